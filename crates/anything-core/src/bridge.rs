//! The narrow interface between the launcher state machine and its host.
//!
//! Everything the launcher needs from the outside world goes through
//! [`HostBridge`]: the search and thumbnail collaborators, settings I/O,
//! long-running maintenance jobs, and window commands. Hosts implement it
//! once; tests implement it with a recording fake.

use crate::{ImageData, Result, SearchResult, SettingsRecord};
use std::future::Future;

pub trait HostBridge: Send + Sync + 'static {
    /// Run a search. Called from a spawned task, never from a handler.
    fn search(&self, query: String) -> impl Future<Output = Result<Vec<SearchResult>>> + Send;

    /// Produce a preview for an image file. `Ok(None)` means no preview.
    fn thumbnail(&self, path: String) -> impl Future<Output = Result<Option<ImageData>>> + Send;

    /// Open a file with the system handler. Fire-and-forget.
    fn open_file(&self, path: &str);

    /// Read the persisted settings record.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings cannot be read.
    fn load_settings(&self) -> Result<SettingsRecord>;

    /// Persist the settings record.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings cannot be written.
    fn save_settings(&self, record: &SettingsRecord) -> Result<()>;

    /// Start rebuilding the search index; progress arrives as host events.
    fn rebuild_index(&self);

    /// Start downloading models; progress arrives as host events.
    fn download_models(&self);

    /// State tracking hook, called right before the window is hidden.
    fn notify_hidden(&self);

    // Window commands

    fn resize(&self, width: u32, height: u32);
    fn recenter(&self);
    fn hide(&self);
    fn quit(&self);
    fn focus_input(&self);
    fn settings_closed(&self);
}
