//! Debounced search dispatch with stale-response protection.
//!
//! Every keystroke cancels the pending debounce timer. When the timer fires
//! the dispatcher bumps its generation and spawns the search; the completion
//! carries the generation back so the launcher can drop anything that is no
//! longer current. In-flight searches are never aborted, only discarded.

use super::{Signal, SignalKind, schedule};
use crate::HostBridge;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// Input was blank: nothing scheduled, results must be cleared now
    Cleared,
    /// A search will be dispatched once the quiet interval elapses
    Scheduled,
}

pub struct QueryDispatcher {
    debounce: Duration,
    signals: UnboundedSender<Signal>,
    pending: Option<JoinHandle<()>>,
    /// Identifies the live debounce timer; stale timer signals are ignored
    ticket: u64,
    /// Monotonic search generation; only the latest one is accepted
    generation: u64,
    dispatched: u64,
}

impl QueryDispatcher {
    pub fn new(debounce: Duration, signals: UnboundedSender<Signal>) -> Self {
        Self {
            debounce,
            signals,
            pending: None,
            ticket: 0,
            generation: 0,
            dispatched: 0,
        }
    }

    /// React to a change of the input text.
    pub fn submit(&mut self, text: &str) -> Submission {
        self.cancel_pending();

        if text.trim().is_empty() {
            // A response still in flight must not repopulate a cleared list
            self.generation += 1;
            return Submission::Cleared;
        }

        let ticket = self.ticket;
        self.pending = Some(schedule(
            &self.signals,
            self.debounce,
            SignalKind::DebounceElapsed { ticket },
        ));
        Submission::Scheduled
    }

    /// Handle an elapsed debounce timer. Returns the generation of the
    /// dispatched search, or `None` if the timer was superseded.
    pub fn fire<B: HostBridge>(
        &mut self,
        ticket: u64,
        query: &str,
        bridge: &Arc<B>,
    ) -> Option<u64> {
        if ticket != self.ticket || self.pending.is_none() {
            debug!("Ignoring superseded debounce timer {ticket}");
            return None;
        }
        self.pending = None;
        Some(self.dispatch_now(query, bridge))
    }

    /// Dispatch immediately, skipping the debounce interval.
    pub fn dispatch_now<B: HostBridge>(&mut self, query: &str, bridge: &Arc<B>) -> u64 {
        self.cancel_pending();
        self.generation += 1;
        self.dispatched += 1;
        let generation = self.generation;

        debug!("Dispatching search #{generation}: {query:?}");

        let bridge = Arc::clone(bridge);
        let signals = self.signals.clone();
        let query = query.to_string();
        tokio::spawn(async move {
            let outcome = bridge.search(query).await;
            if signals
                .send(Signal(SignalKind::SearchFinished {
                    generation,
                    outcome,
                }))
                .is_err()
            {
                debug!("Launcher dropped before search #{generation} finished");
            }
        });

        generation
    }

    /// Whether a completion for `generation` should still be applied.
    #[must_use]
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    /// Cancel the pending timer and orphan any in-flight search.
    pub fn invalidate(&mut self) {
        self.cancel_pending();
        self.generation += 1;
    }

    /// Number of searches handed to the collaborator so far.
    #[must_use]
    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        // A timer that already fired may have its signal queued; retire its ticket
        self.ticket += 1;
    }
}

impl Drop for QueryDispatcher {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
