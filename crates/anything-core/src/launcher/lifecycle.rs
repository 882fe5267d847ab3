//! State for host lifecycle handling: the reset guard, the focus-loss grace
//! window and the two progress displays.

use crate::{ProgressKind, ProgressUpdate};
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GuardState {
    #[default]
    Idle,
    /// A reset ran; duplicates are ignored until this epoch settles
    Resetting { epoch: u64 },
}

/// `Idle -> Resetting -> Idle`. Released by the settle timer for the
/// matching epoch or by an explicit host acknowledgment, whichever is first.
#[derive(Debug, Default)]
pub struct ResetGuard {
    state: GuardState,
    epochs: u64,
}

impl ResetGuard {
    /// Enter `Resetting`. Returns the new epoch, or `None` if a reset is
    /// already in progress.
    pub fn try_enter(&mut self) -> Option<u64> {
        if let GuardState::Resetting { .. } = self.state {
            return None;
        }
        self.epochs += 1;
        self.state = GuardState::Resetting { epoch: self.epochs };
        Some(self.epochs)
    }

    /// Settle timer fired. Timers from earlier epochs are ignored.
    pub fn settle(&mut self, epoch: u64) -> bool {
        if self.state == (GuardState::Resetting { epoch }) {
            self.state = GuardState::Idle;
            true
        } else {
            false
        }
    }

    /// Host reported the reset complete.
    pub fn acknowledge(&mut self) -> bool {
        let was_resetting = self.is_resetting();
        self.state = GuardState::Idle;
        was_resetting
    }

    #[must_use]
    pub fn state(&self) -> GuardState {
        self.state
    }

    #[must_use]
    pub fn is_resetting(&self) -> bool {
        matches!(self.state, GuardState::Resetting { .. })
    }
}

/// Suppresses spurious focus-lost events right after the window is shown.
#[derive(Debug, Default)]
pub struct FocusGrace {
    until: Option<Instant>,
}

impl FocusGrace {
    pub fn arm(&mut self, duration: Duration) {
        self.until = Some(Instant::now() + duration);
    }

    pub fn disarm(&mut self) {
        self.until = None;
    }

    #[must_use]
    pub fn suppresses_focus_loss(&self) -> bool {
        self.until.is_some_and(|until| Instant::now() < until)
    }
}

/// What one progress bar shows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ProgressDisplay {
    #[default]
    Hidden,
    /// Indeterminate or failed: full-width bar rendered dimmed
    Dimmed { message: String },
    Active {
        /// Bar fill, 0..=100
        percent: u8,
        /// e.g. "42%"
        label: String,
        message: String,
    },
}

impl ProgressDisplay {
    fn from_update(update: &ProgressUpdate) -> Self {
        if update.percent < 0 {
            return Self::Dimmed {
                message: update.message.clone(),
            };
        }
        let percent = u8::try_from(update.percent.min(100)).unwrap_or(100);
        Self::Active {
            percent,
            label: format!("{percent}%"),
            message: update.message.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressBoard {
    pub indexing: ProgressDisplay,
    pub download: ProgressDisplay,
}

impl ProgressBoard {
    pub fn update(&mut self, update: &ProgressUpdate) {
        let display = ProgressDisplay::from_update(update);
        match update.kind {
            ProgressKind::Indexing => self.indexing = display,
            ProgressKind::Download => self.download = display,
        }
    }
}
