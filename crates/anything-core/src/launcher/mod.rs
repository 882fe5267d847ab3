//! The launcher state machine.
//!
//! [`Launcher`] owns every piece of interaction state: the input text, the
//! result store, the rendered list, the active view, the reset guard and the
//! progress displays. It is driven by three kinds of [`Event`]: user input
//! from the UI, lifecycle events from the host, and internal [`Signal`]s
//! produced by its own timers and collaborator calls. Handlers run to
//! completion; asynchronous work is spawned and reports back as a signal on
//! the channel returned by [`Launcher::new`].

mod dispatcher;
mod keys;
mod lifecycle;
mod render;
mod store;
mod view;
mod window;

pub use keys::{EscapeAction, escape_action};
pub use lifecycle::{GuardState, ProgressBoard, ProgressDisplay};
pub use render::{ListView, RowIcon, RowView, Span, format_score, parse_snippet, split_path};
pub use store::ResultStore;
pub use view::SettingsForm;
pub use window::{Geometry, compute_geometry};

use crate::config::{Config, LauncherConfig};
use crate::{
    HostBridge, HostEvent, ImageData, Key, Result, SearchResult, SettingsRecord, UiEvent,
    ViewState,
};
use dispatcher::{QueryDispatcher, Submission};
use lifecycle::{FocusGrace, ResetGuard};
use render::Renderer;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use view::ViewController;
use window::WindowChoreographer;

/// Completion of work the launcher started itself. Hosts only forward these
/// back into [`Launcher::process`].
#[derive(Debug)]
pub struct Signal(SignalKind);

#[derive(Debug)]
enum SignalKind {
    DebounceElapsed {
        ticket: u64,
    },
    SearchFinished {
        generation: u64,
        outcome: Result<Vec<SearchResult>>,
    },
    ThumbnailReady {
        path: String,
        image: Option<ImageData>,
    },
    RecenterDue,
    ResetSettled {
        epoch: u64,
    },
}

/// Send `kind` back to the launcher after `delay`.
fn schedule(
    signals: &UnboundedSender<Signal>,
    delay: Duration,
    kind: SignalKind,
) -> JoinHandle<()> {
    let signals = signals.clone();
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        if signals.send(Signal(kind)).is_err() {
            debug!("Launcher dropped before timer fired");
        }
    })
}

#[derive(Debug)]
pub enum Event {
    Ui(UiEvent),
    Host(HostEvent),
    Signal(Signal),
}

impl From<UiEvent> for Event {
    fn from(event: UiEvent) -> Self {
        Self::Ui(event)
    }
}

impl From<HostEvent> for Event {
    fn from(event: HostEvent) -> Self {
        Self::Host(event)
    }
}

impl From<Signal> for Event {
    fn from(signal: Signal) -> Self {
        Self::Signal(signal)
    }
}

pub struct Launcher<B: HostBridge> {
    bridge: Arc<B>,
    config: LauncherConfig,
    signals: UnboundedSender<Signal>,

    input: String,
    dispatcher: QueryDispatcher,
    store: ResultStore,
    renderer: Renderer,
    list: ListView,
    window: WindowChoreographer,
    view: ViewController,

    guard: ResetGuard,
    focus_grace: FocusGrace,
    progress: ProgressBoard,
}

impl<B: HostBridge> Launcher<B> {
    /// Create a launcher in the Launcher view with no results. The returned
    /// receiver yields signals that must be fed back through [`Self::process`].
    pub fn new(bridge: Arc<B>, config: &Config) -> (Self, UnboundedReceiver<Signal>) {
        let (signals, signal_rx) = mpsc::unbounded_channel();
        let launcher = Self {
            dispatcher: QueryDispatcher::new(config.launcher.debounce(), signals.clone()),
            renderer: Renderer::new(config.launcher.lazy_thumbnails),
            window: WindowChoreographer::new(
                config.window.clone(),
                config.launcher.recenter_delay(),
                signals.clone(),
            ),
            bridge,
            config: config.launcher.clone(),
            signals,
            input: String::new(),
            store: ResultStore::default(),
            list: ListView::default(),
            view: ViewController::default(),
            guard: ResetGuard::default(),
            focus_grace: FocusGrace::default(),
            progress: ProgressBoard::default(),
        };
        (launcher, signal_rx)
    }

    pub fn process(&mut self, event: impl Into<Event>) {
        match event.into() {
            Event::Ui(event) => self.handle_ui(event),
            Event::Host(event) => self.handle_host(event),
            Event::Signal(Signal(kind)) => self.handle_signal(kind),
        }
    }

    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    #[must_use]
    pub fn results(&self) -> &ResultStore {
        &self.store
    }

    #[must_use]
    pub fn list(&self) -> &ListView {
        &self.list
    }

    #[must_use]
    pub fn view_state(&self) -> ViewState {
        self.view.state()
    }

    #[must_use]
    pub fn settings_form(&self) -> Option<&SettingsForm> {
        self.view.form()
    }

    #[must_use]
    pub fn progress(&self) -> &ProgressBoard {
        &self.progress
    }

    #[must_use]
    pub fn geometry(&self) -> Geometry {
        self.window.current()
    }

    #[must_use]
    pub fn guard_state(&self) -> GuardState {
        self.guard.state()
    }

    /// Number of searches handed to the collaborator so far.
    #[must_use]
    pub fn dispatched_searches(&self) -> u64 {
        self.dispatcher.dispatched()
    }

    // UI events

    fn handle_ui(&mut self, event: UiEvent) {
        match (self.view.state(), event) {
            (ViewState::Launcher, UiEvent::InputChanged { text }) => self.submit(text),
            (ViewState::Launcher, UiEvent::Key { key }) => self.handle_launcher_key(key),
            (ViewState::Launcher, UiEvent::Hover { index }) => {
                if self.store.set_selection(index) {
                    self.refresh();
                }
            }
            (ViewState::Launcher, UiEvent::Click { index }) => {
                if self.store.set_selection(index) {
                    self.refresh();
                    self.open_selected();
                }
            }
            (ViewState::Settings, UiEvent::Key { key }) => self.handle_settings_key(key),
            (ViewState::Settings, UiEvent::SelectPanel { panel }) => {
                if let Some(form) = self.view.form_mut() {
                    form.panel = panel;
                }
            }
            (ViewState::Settings, UiEvent::HotkeyEdited { text }) => {
                if let Some(form) = self.view.form_mut() {
                    form.hotkey_draft = text;
                    form.error = None;
                }
            }
            (ViewState::Settings, UiEvent::SaveSettings) => self.save_settings(),
            (ViewState::Settings, UiEvent::CloseSettings) => self.close_settings(),
            (_, UiEvent::RebuildIndex) => {
                info!("Index rebuild requested");
                self.bridge.rebuild_index();
            }
            (_, UiEvent::DownloadModels) => {
                info!("Model download requested");
                self.bridge.download_models();
            }
            (view, event) => debug!("Ignoring {event:?} in {view:?} view"),
        }
    }

    fn submit(&mut self, text: String) {
        self.input = text;
        if self.dispatcher.submit(&self.input) == Submission::Cleared {
            self.clear_results();
        }
    }

    fn handle_launcher_key(&mut self, key: Key) {
        match key {
            Key::Escape => self.escape(),
            Key::ArrowDown => self.move_selection(1),
            Key::ArrowUp => self.move_selection(-1),
            Key::Enter => self.open_selected(),
            Key::Tab => {}
        }
    }

    fn handle_settings_key(&mut self, key: Key) {
        match key {
            Key::Escape => self.escape(),
            Key::Enter => self.save_settings(),
            Key::Tab => {
                if let Some(form) = self.view.form_mut() {
                    form.panel = form.panel.next();
                }
            }
            Key::ArrowUp | Key::ArrowDown => {}
        }
    }

    fn escape(&mut self) {
        let action = escape_action(
            self.input.is_empty(),
            self.view.state(),
            self.config.on_empty_escape,
        );
        debug!("Escape -> {action:?}");

        match action {
            EscapeAction::ClearQuery => {
                self.input.clear();
                self.dispatcher.invalidate();
                self.clear_results();
            }
            EscapeAction::HideWindow => self.hide(),
            EscapeAction::Quit => {
                info!("Quitting on Escape");
                self.bridge.quit();
            }
            EscapeAction::CloseSettings => self.close_settings(),
        }
    }

    fn move_selection(&mut self, delta: isize) {
        if self.store.move_selection(delta) {
            self.refresh();
        }
    }

    fn open_selected(&mut self) {
        let Some(result) = self.store.current() else {
            return;
        };

        if result.is_settings_entry() {
            self.open_settings();
            return;
        }

        let path = result.path.clone();
        info!("Opening {path}");
        self.bridge.open_file(&path);
        if self.config.hide_after_open {
            self.hide();
        }
    }

    // Host events

    fn handle_host(&mut self, event: HostEvent) {
        match event {
            HostEvent::WindowReset => self.reset(),
            HostEvent::ResetSettled => {
                if self.guard.acknowledge() {
                    debug!("Host acknowledged reset");
                }
            }
            HostEvent::SettingsOpened => self.open_settings(),
            HostEvent::Progress(update) => self.progress.update(&update),
            HostEvent::FocusLost => {
                if self.guard.is_resetting() || self.focus_grace.suppresses_focus_loss() {
                    debug!("Ignoring focus loss during grace period");
                    return;
                }
                self.hide();
            }
            HostEvent::WindowFocused => {
                if self.view.state() == ViewState::Launcher {
                    self.bridge.focus_input();
                }
            }
        }
    }

    fn reset(&mut self) {
        let Some(epoch) = self.guard.try_enter() else {
            debug!("Reset already in progress, ignoring");
            return;
        };
        info!("Window reset (epoch {epoch})");

        if self.view.close_settings() {
            debug!("Reset left the settings view");
        }
        self.window.apply(0, self.bridge.as_ref());

        if self.input.trim().is_empty() {
            self.dispatcher.invalidate();
            self.store.clear();
            self.refresh();
        } else {
            self.dispatcher.dispatch_now(&self.input, &self.bridge);
        }

        self.bridge.focus_input();
        self.focus_grace.arm(self.config.focus_grace());
        drop(schedule(
            &self.signals,
            self.config.reset_settle(),
            SignalKind::ResetSettled { epoch },
        ));
    }

    fn hide(&mut self) {
        info!("Hiding launcher");
        self.bridge.notify_hidden();
        self.bridge.hide();
        self.focus_grace.disarm();
        self.window.apply(0, self.bridge.as_ref());
    }

    // Settings

    fn open_settings(&mut self) {
        let record = self.bridge.load_settings().unwrap_or_else(|e| {
            warn!("Failed to load settings: {e}");
            SettingsRecord::default()
        });
        info!("Opening settings");
        self.view.open_settings(record);
        self.window.apply_settings(self.bridge.as_ref());
        self.focus_grace.arm(self.config.focus_grace());
    }

    fn close_settings(&mut self) {
        if !self.view.close_settings() {
            return;
        }
        info!("Closing settings");
        self.bridge.settings_closed();
        self.window.apply(self.store.len(), self.bridge.as_ref());
        self.bridge.focus_input();
    }

    fn save_settings(&mut self) {
        let Some(form) = self.view.form_mut() else {
            return;
        };

        let record = match form.validated() {
            Ok(record) => record,
            Err(message) => {
                debug!("Settings not saved: {message}");
                form.error = Some(message);
                return;
            }
        };

        match self.bridge.save_settings(&record) {
            Ok(()) => {
                info!("Settings saved (hotkey {})", record.hotkey);
                form.hotkey_draft.clone_from(&record.hotkey);
                form.record = record;
                form.error = None;
            }
            Err(e) => {
                warn!("Failed to save settings: {e}");
                form.error = Some(format!("Failed to save settings: {e}"));
            }
        }
    }

    // Signals

    fn handle_signal(&mut self, kind: SignalKind) {
        match kind {
            SignalKind::DebounceElapsed { ticket } => {
                self.dispatcher.fire(ticket, &self.input, &self.bridge);
            }
            SignalKind::SearchFinished {
                generation,
                outcome,
            } => self.search_finished(generation, outcome),
            SignalKind::ThumbnailReady { path, image } => {
                if self.renderer.thumbnail_resolved(path, image) {
                    self.refresh();
                }
            }
            SignalKind::RecenterDue => self.bridge.recenter(),
            SignalKind::ResetSettled { epoch } => {
                if self.guard.settle(epoch) {
                    debug!("Reset {epoch} settled");
                }
            }
        }
    }

    fn search_finished(&mut self, generation: u64, outcome: Result<Vec<SearchResult>>) {
        if !self.dispatcher.is_current(generation) {
            debug!("Discarding stale search #{generation}");
            return;
        }

        match outcome {
            Ok(results) => {
                debug!("Search #{generation} returned {} results", results.len());
                self.store.replace(results);
                self.refresh();
                if self.view.state() == ViewState::Launcher {
                    self.window.apply(self.store.len(), self.bridge.as_ref());
                }
            }
            // Keep the previous results, and make sure the window shows them
            Err(e) => {
                warn!("Search #{generation} failed: {e}");
                if self.view.state() == ViewState::Launcher {
                    self.window.apply(self.store.len(), self.bridge.as_ref());
                }
            }
        }
    }

    fn clear_results(&mut self) {
        self.store.clear();
        self.refresh();
        self.window.apply(0, self.bridge.as_ref());
    }

    /// Rebuild the list and start any thumbnail fetches it asks for.
    fn refresh(&mut self) {
        let (list, fetch) = self.renderer.render(&self.store);
        self.list = list;

        for path in fetch {
            let bridge = Arc::clone(&self.bridge);
            let signals = self.signals.clone();
            tokio::spawn(async move {
                let image = match bridge.thumbnail(path.clone()).await {
                    Ok(image) => image,
                    Err(e) => {
                        warn!("Thumbnail for {path} failed: {e}");
                        return;
                    }
                };
                if signals
                    .send(Signal(SignalKind::ThumbnailReady { path, image }))
                    .is_err()
                {
                    debug!("Launcher dropped before thumbnail arrived");
                }
            });
        }
    }
}
