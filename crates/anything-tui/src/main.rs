//! Anything - terminal launcher.
//!
//! Entry point for the terminal host. It wires the launcher core to the
//! local file index, the settings file and a simulated window, then runs a
//! single event loop that feeds terminal input, launcher signals and host
//! events into the core and applies the window commands it issues.

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{
        DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, Event,
        EventStream, KeyEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures_util::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use anything_core::config::{Config, Directories, SettingsStore};
use anything_core::search::LocalBackend;
use anything_core::{
    Hotkey, HotkeyKey, Launcher, Modifiers, SearchResult, SettingsRecord, UiEvent, format_score,
};

use std::io;
use std::sync::Arc;

mod app;
mod bridge;
mod cli;
mod colors;
mod render;

use app::{App, Snapshot};
use bridge::{BridgeChannels, TerminalBridge};
use cli::{Cli, Commands};

/// Set up logging with file output. The terminal is used for drawing, so
/// logs go to a timestamped file in the temp dir with a stable symlink.
fn setup_logging(debug_flag: bool) {
    let level = if debug_flag || cfg!(debug_assertions) {
        "debug"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let log_dir = std::env::temp_dir();
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let log_filename = format!("anything-tui-{timestamp}.log");

    #[cfg(unix)]
    {
        let symlink_path = log_dir.join("anything-tui.log");
        let _ = std::fs::remove_file(&symlink_path);
        let _ = std::os::unix::fs::symlink(log_dir.join(&log_filename), &symlink_path);
    }

    let file_appender = tracing_appender::rolling::never(&log_dir, &log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    std::mem::forget(guard);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(filter)
        .init();
}

fn load_config(cli: &Cli, dirs: &Directories) -> Result<Config> {
    let path = cli.config.as_ref().unwrap_or(&dirs.config_file);
    Config::load(path).with_context(|| format!("Failed to load {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.debug);

    let dirs = Directories::new()?;
    dirs.ensure_exists()
        .context("Failed to create application directories")?;
    let config = load_config(&cli, &dirs)?;
    let settings = SettingsStore::new(dirs.settings_file.clone());
    let backend = LocalBackend::new(config.search.clone()).with_cache(dirs.index_cache.clone());

    match cli.command {
        Some(Commands::Query { query }) => search_query(&backend, &settings, &query).await?,
        Some(Commands::Index) => rebuild_index(&backend, &settings).await?,
        Some(Commands::Tui) | None => run_tui(config, backend, settings).await?,
    }

    Ok(())
}

async fn ensure_index(backend: &LocalBackend, settings: &SettingsStore) -> Result<()> {
    if backend.indexed_files() == 0 {
        rebuild_index(backend, settings).await?;
    }
    Ok(())
}

async fn rebuild_index(backend: &LocalBackend, settings: &SettingsStore) -> Result<()> {
    let ignored = settings.load()?.ignored_paths;
    let count = backend
        .rebuild(ignored, |update| {
            debug!("{}% {}", update.percent, update.message);
        })
        .await?;
    println!("Indexed {count} files");
    Ok(())
}

async fn search_query(backend: &LocalBackend, settings: &SettingsStore, query: &str) -> Result<()> {
    ensure_index(backend, settings).await?;

    let results = backend.search(query.to_string()).await?;
    if results.is_empty() {
        println!("No results for '{query}'");
        return Ok(());
    }
    for result in results {
        println!("{}", query_line(&result));
    }
    Ok(())
}

/// One line of `query` output: right-aligned score (blank when absent) and path.
fn query_line(result: &SearchResult) -> String {
    let score = result.score.and_then(format_score).unwrap_or_default();
    format!("{score:>8}  {}", result.path)
}

fn initial_hotkey(settings: &SettingsStore) -> Hotkey {
    let text = settings
        .load()
        .map_or_else(|_| SettingsRecord::default().hotkey, |record| record.hotkey);
    text.parse().unwrap_or_else(|e| {
        warn!("Invalid hotkey '{text}' in settings: {e}");
        Hotkey {
            modifiers: Modifiers {
                ctrl: true,
                ..Modifiers::default()
            },
            key: HotkeyKey::Space,
        }
    })
}

async fn run_tui(config: Config, backend: LocalBackend, settings: SettingsStore) -> Result<()> {
    let hotkey = initial_hotkey(&settings);
    let needs_index = backend.indexed_files() == 0;
    let (bridge, BridgeChannels {
        mut commands,
        mut host_events,
    }) = TerminalBridge::new(backend, settings);
    let (mut launcher, mut signals) = Launcher::new(Arc::new(bridge), &config);
    let mut app = App::new(&config.window, hotkey);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    info!("Launcher started");
    if needs_index {
        launcher.process(UiEvent::RebuildIndex);
    }
    let event = app.show();
    launcher.process(event);

    let outcome = event_loop(
        &mut terminal,
        &mut app,
        &mut launcher,
        &mut signals,
        &mut commands,
        &mut host_events,
    )
    .await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;

    outcome
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    launcher: &mut Launcher<TerminalBridge>,
    signals: &mut tokio::sync::mpsc::UnboundedReceiver<anything_core::Signal>,
    commands: &mut tokio::sync::mpsc::UnboundedReceiver<bridge::WindowCommand>,
    host_events: &mut tokio::sync::mpsc::UnboundedReceiver<anything_core::HostEvent>,
) -> Result<()> {
    let mut event_stream = EventStream::new();
    let mut needs_render = true;

    loop {
        if needs_render {
            terminal.draw(|f| render::draw(f, app, launcher))?;
            needs_render = false;
            if let Some(ack) = app.take_reset_ack() {
                launcher.process(ack);
            }
        }

        if app.should_quit {
            info!("Launcher exiting");
            break;
        }

        tokio::select! {
            Some(signal) = signals.recv() => {
                launcher.process(signal);
                needs_render = true;
            }

            Some(event) = host_events.recv() => {
                launcher.process(event);
                needs_render = true;
            }

            Some(command) = commands.recv() => {
                app.apply(command);
                needs_render = true;
            }

            Some(event_result) = event_stream.next() => {
                let event = match event_result {
                    Ok(e) => e,
                    Err(e) => {
                        error!("Event stream error: {}", e);
                        continue;
                    }
                };
                needs_render = true;

                let snapshot = Snapshot {
                    view: launcher.view_state(),
                    input: launcher.input(),
                    form: launcher.settings_form(),
                    rows: launcher.list().rows.len(),
                    selected: launcher.list().selected,
                };
                let mapped = match event {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        app.on_key(key, &snapshot)
                    }
                    Event::Mouse(mouse) => app.on_mouse(mouse, &snapshot),
                    Event::FocusGained => app.on_focus_change(true),
                    Event::FocusLost => app.on_focus_change(false),
                    _ => None,
                };
                if let Some(mapped) = mapped {
                    launcher.process(mapped);
                }
                if let Some(form) = launcher.settings_form() {
                    app.set_hotkey(&form.record.hotkey);
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_line_shows_score_when_present() {
        let result = SearchResult::for_path("/home/me/notes.md").with_score(12.345);
        assert_eq!(query_line(&result), "    12.3  /home/me/notes.md");
    }

    #[test]
    fn query_line_leaves_missing_score_blank() {
        let result = SearchResult::for_path("/home/me/notes.md");
        assert_eq!(query_line(&result), "          /home/me/notes.md");
    }
}
