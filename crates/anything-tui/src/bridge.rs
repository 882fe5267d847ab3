//! [`HostBridge`] implementation for the terminal.
//!
//! Collaborator calls go to the local file index and the settings store.
//! Window commands cannot act on a real window, so they are queued for the
//! event loop, which applies them to the simulated window.

use anything_core::config::SettingsStore;
use anything_core::search::LocalBackend;
use anything_core::{
    HostBridge, HostEvent, ImageData, ProgressKind, ProgressUpdate, Result, SearchResult,
    SettingsRecord,
};
use std::future::Future;
use std::process::{Command, Stdio};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

/// A window command issued by the launcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowCommand {
    Resize { width: u32, height: u32 },
    Recenter,
    Hide,
    Quit,
    FocusInput,
    SettingsClosed,
}

/// Receiving ends of the bridge's queues, drained by the event loop.
pub struct BridgeChannels {
    pub commands: UnboundedReceiver<WindowCommand>,
    pub host_events: UnboundedReceiver<HostEvent>,
}

pub struct TerminalBridge {
    backend: LocalBackend,
    settings: SettingsStore,
    commands: UnboundedSender<WindowCommand>,
    host_events: UnboundedSender<HostEvent>,
}

impl TerminalBridge {
    pub fn new(backend: LocalBackend, settings: SettingsStore) -> (Self, BridgeChannels) {
        let (commands, command_rx) = mpsc::unbounded_channel();
        let (host_events, host_event_rx) = mpsc::unbounded_channel();
        let bridge = Self {
            backend,
            settings,
            commands,
            host_events,
        };
        let channels = BridgeChannels {
            commands: command_rx,
            host_events: host_event_rx,
        };
        (bridge, channels)
    }

    fn command(&self, command: WindowCommand) {
        if self.commands.send(command).is_err() {
            debug!("Event loop gone, dropping {command:?}");
        }
    }
}

/// Spawn a command with all I/O redirected to null (fire and forget)
fn spawn_silent(program: &str, args: &[&str]) -> std::io::Result<()> {
    Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(drop)
}

fn send_progress(events: &UnboundedSender<HostEvent>, update: ProgressUpdate) {
    if events.send(HostEvent::Progress(update)).is_err() {
        debug!("Event loop gone, dropping progress update");
    }
}

impl HostBridge for TerminalBridge {
    fn search(&self, query: String) -> impl Future<Output = Result<Vec<SearchResult>>> + Send {
        let backend = self.backend.clone();
        async move { backend.search(query).await }
    }

    fn thumbnail(&self, path: String) -> impl Future<Output = Result<Option<ImageData>>> + Send {
        let backend = self.backend.clone();
        async move { backend.thumbnail(path).await }
    }

    fn open_file(&self, path: &str) {
        let opener = if cfg!(target_os = "macos") {
            "open"
        } else {
            "xdg-open"
        };
        if let Err(e) = spawn_silent(opener, &[path]) {
            warn!("Failed to open {path} with {opener}: {e}");
        }
    }

    fn load_settings(&self) -> Result<SettingsRecord> {
        self.settings.load()
    }

    fn save_settings(&self, record: &SettingsRecord) -> Result<()> {
        self.settings.save(record)
    }

    fn rebuild_index(&self) {
        let backend = self.backend.clone();
        let events = self.host_events.clone();
        let ignored = match self.settings.load() {
            Ok(record) => record.ignored_paths,
            Err(e) => {
                warn!("Rebuilding without ignored paths: {e}");
                Vec::new()
            }
        };

        tokio::spawn(async move {
            let progress_events = events.clone();
            let outcome = backend
                .rebuild(ignored, move |update| {
                    send_progress(&progress_events, update);
                })
                .await;
            match outcome {
                Ok(count) => info!("Index rebuilt with {count} files"),
                Err(e) => {
                    warn!("Index rebuild failed: {e}");
                    send_progress(
                        &events,
                        ProgressUpdate::new(
                            ProgressKind::Indexing,
                            -1,
                            format!("Indexing failed: {e}"),
                        ),
                    );
                }
            }
        });
    }

    fn download_models(&self) {
        // File name search runs without models
        info!("Model download requested; nothing to download for name search");
        send_progress(
            &self.host_events,
            ProgressUpdate::new(
                ProgressKind::Download,
                -1,
                "No models needed for file name search",
            ),
        );
    }

    fn notify_hidden(&self) {
        debug!("Launcher hidden");
    }

    fn resize(&self, width: u32, height: u32) {
        self.command(WindowCommand::Resize { width, height });
    }

    fn recenter(&self) {
        self.command(WindowCommand::Recenter);
    }

    fn hide(&self) {
        self.command(WindowCommand::Hide);
    }

    fn quit(&self) {
        self.command(WindowCommand::Quit);
    }

    fn focus_input(&self) {
        self.command(WindowCommand::FocusInput);
    }

    fn settings_closed(&self) {
        self.command(WindowCommand::SettingsClosed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anything_core::config::SearchConfig;

    fn bridge_in(dir: &std::path::Path) -> (TerminalBridge, BridgeChannels) {
        let backend = LocalBackend::new(SearchConfig {
            roots: vec![dir.to_path_buf()],
            max_results: 10,
            max_depth: 2,
        });
        TerminalBridge::new(backend, SettingsStore::new(dir.join("settings.json")))
    }

    #[test]
    fn window_commands_are_queued_in_order() {
        let dir = std::env::temp_dir();
        let (bridge, mut channels) = bridge_in(&dir);

        bridge.resize(700, 60);
        bridge.recenter();
        bridge.hide();

        let mut next = || channels.commands.try_recv().ok();
        assert_eq!(
            next(),
            Some(WindowCommand::Resize {
                width: 700,
                height: 60
            })
        );
        assert_eq!(next(), Some(WindowCommand::Recenter));
        assert_eq!(next(), Some(WindowCommand::Hide));
        assert_eq!(next(), None);
    }

    #[test]
    fn model_download_reports_indeterminate_progress() {
        let dir = std::env::temp_dir();
        let (bridge, mut channels) = bridge_in(&dir);

        bridge.download_models();

        match channels.host_events.try_recv() {
            Ok(HostEvent::Progress(update)) => {
                assert_eq!(update.kind, ProgressKind::Download);
                assert!(update.percent < 0);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
