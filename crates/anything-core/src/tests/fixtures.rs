//! Test fixtures and helpers

use crate::config::Config;
use crate::{Error, HostBridge, ImageData, Launcher, Result, SearchResult, SettingsRecord, Signal};
use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::Instant;

/// Everything the launcher asked the host to do, in order
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Search(String),
    Thumbnail(String),
    OpenFile(String),
    SaveSettings(SettingsRecord),
    RebuildIndex,
    DownloadModels,
    NotifyHidden,
    Resize(u32, u32),
    Recenter,
    Hide,
    Quit,
    FocusInput,
    SettingsClosed,
}

struct Scripted {
    delay: Duration,
    outcome: std::result::Result<Vec<SearchResult>, String>,
}

/// Recording host bridge with scripted search responses.
///
/// Unscripted searches answer immediately with one `/r/<query>.txt` result.
#[derive(Default)]
pub struct FakeBridge {
    commands: Mutex<Vec<Command>>,
    scripted: Mutex<HashMap<String, VecDeque<Scripted>>>,
    thumbnails: Mutex<HashMap<String, Option<ImageData>>>,
    settings: Mutex<SettingsRecord>,
    fail_saves: AtomicBool,
}

impl FakeBridge {
    pub fn respond(&self, query: &str, delay_ms: u64, results: Vec<SearchResult>) {
        self.push_script(query, delay_ms, Ok(results));
    }

    pub fn fail(&self, query: &str, delay_ms: u64, message: &str) {
        self.push_script(query, delay_ms, Err(message.to_string()));
    }

    fn push_script(
        &self,
        query: &str,
        delay_ms: u64,
        outcome: std::result::Result<Vec<SearchResult>, String>,
    ) {
        self.scripted
            .lock()
            .unwrap()
            .entry(query.to_string())
            .or_default()
            .push_back(Scripted {
                delay: Duration::from_millis(delay_ms),
                outcome,
            });
    }

    /// `None` makes the thumbnail call fail.
    pub fn set_thumbnail(&self, path: &str, image: Option<ImageData>) {
        self.thumbnails
            .lock()
            .unwrap()
            .insert(path.to_string(), image);
    }

    pub fn set_settings(&self, record: SettingsRecord) {
        *self.settings.lock().unwrap() = record;
    }

    pub fn fail_saves(&self) {
        self.fail_saves.store(true, Ordering::SeqCst);
    }

    pub fn commands(&self) -> Vec<Command> {
        self.commands.lock().unwrap().clone()
    }

    pub fn take_commands(&self) -> Vec<Command> {
        std::mem::take(&mut *self.commands.lock().unwrap())
    }

    pub fn count(&self, command: &Command) -> usize {
        self.commands().iter().filter(|c| *c == command).count()
    }

    pub fn searches(&self) -> Vec<String> {
        self.commands()
            .into_iter()
            .filter_map(|c| match c {
                Command::Search(q) => Some(q),
                _ => None,
            })
            .collect()
    }

    pub fn last_resize(&self) -> Option<(u32, u32)> {
        self.commands().into_iter().rev().find_map(|c| match c {
            Command::Resize(w, h) => Some((w, h)),
            _ => None,
        })
    }

    fn record(&self, command: Command) {
        self.commands.lock().unwrap().push(command);
    }
}

impl HostBridge for FakeBridge {
    fn search(&self, query: String) -> impl Future<Output = Result<Vec<SearchResult>>> + Send {
        self.record(Command::Search(query.clone()));
        let scripted = self
            .scripted
            .lock()
            .unwrap()
            .get_mut(&query)
            .and_then(VecDeque::pop_front);

        async move {
            match scripted {
                Some(Scripted { delay, outcome }) => {
                    tokio::time::sleep(delay).await;
                    outcome.map_err(Error::Search)
                }
                None => Ok(vec![SearchResult::for_path(format!("/r/{query}.txt"))]),
            }
        }
    }

    fn thumbnail(&self, path: String) -> impl Future<Output = Result<Option<ImageData>>> + Send {
        self.record(Command::Thumbnail(path.clone()));
        let outcome = match self.thumbnails.lock().unwrap().get(&path) {
            Some(Some(image)) => Ok(Some(image.clone())),
            Some(None) => Err(Error::Thumbnail(format!("cannot decode {path}"))),
            None => Ok(None),
        };
        async move { outcome }
    }

    fn open_file(&self, path: &str) {
        self.record(Command::OpenFile(path.to_string()));
    }

    fn load_settings(&self) -> Result<SettingsRecord> {
        Ok(self.settings.lock().unwrap().clone())
    }

    fn save_settings(&self, record: &SettingsRecord) -> Result<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(Error::Settings("disk full".to_string()));
        }
        self.record(Command::SaveSettings(record.clone()));
        *self.settings.lock().unwrap() = record.clone();
        Ok(())
    }

    fn rebuild_index(&self) {
        self.record(Command::RebuildIndex);
    }

    fn download_models(&self) {
        self.record(Command::DownloadModels);
    }

    fn notify_hidden(&self) {
        self.record(Command::NotifyHidden);
    }

    fn resize(&self, width: u32, height: u32) {
        self.record(Command::Resize(width, height));
    }

    fn recenter(&self) {
        self.record(Command::Recenter);
    }

    fn hide(&self) {
        self.record(Command::Hide);
    }

    fn quit(&self) {
        self.record(Command::Quit);
    }

    fn focus_input(&self) {
        self.record(Command::FocusInput);
    }

    fn settings_closed(&self) {
        self.record(Command::SettingsClosed);
    }
}

/// A launcher wired to a [`FakeBridge`], with helpers to drive paused time.
pub struct Harness {
    pub launcher: Launcher<FakeBridge>,
    pub bridge: Arc<FakeBridge>,
    signals: UnboundedReceiver<Signal>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    pub fn with_config(config: &Config) -> Self {
        let bridge = Arc::new(FakeBridge::default());
        let (launcher, signals) = Launcher::new(Arc::clone(&bridge), config);
        Self {
            launcher,
            bridge,
            signals,
        }
    }

    pub fn send(&mut self, event: impl Into<crate::Event>) {
        self.launcher.process(event);
    }

    pub fn type_text(&mut self, text: &str) {
        self.send(crate::UiEvent::InputChanged {
            text: text.to_string(),
        });
    }

    pub fn key(&mut self, key: crate::Key) {
        self.send(crate::UiEvent::Key { key });
    }

    /// Feed back every signal that arrives within the next `ms` of
    /// (paused) time.
    pub async fn run_for(&mut self, ms: u64) {
        let deadline = Instant::now() + Duration::from_millis(ms);
        while let Ok(Some(signal)) = tokio::time::timeout_at(deadline, self.signals.recv()).await
        {
            self.launcher.process(signal);
        }
    }

    /// Run until every pending timer and search has completed.
    pub async fn settle(&mut self) {
        self.run_for(10_000).await;
    }

    pub fn paths(&self) -> Vec<&str> {
        self.launcher
            .results()
            .results()
            .iter()
            .map(|r| r.path.as_str())
            .collect()
    }
}

pub fn results(paths: &[&str]) -> Vec<SearchResult> {
    paths.iter().map(|p| SearchResult::for_path(*p)).collect()
}

pub fn numbered(n: usize) -> Vec<SearchResult> {
    (0..n)
        .map(|i| SearchResult::for_path(format!("/docs/file{i}.txt")))
        .collect()
}
