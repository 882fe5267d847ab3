use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub launcher: LauncherConfig,

    #[serde(default)]
    pub window: WindowConfig,

    #[serde(default)]
    pub search: SearchConfig,
}

impl Config {
    /// Load config from file, falling back to defaults when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains invalid JSON.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        super::validation::warn_unknown_fields(&content, "config.json");
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// What Escape does when the search field is already empty
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EmptyEscape {
    /// Hide the window and keep the process alive
    #[default]
    Hide,
    /// Terminate the application
    Quit,
}

/// Timing and behaviour of the interaction core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LauncherConfig {
    /// Quiet period after the last keystroke before a search is issued
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Delay between collapsing the window and recentering it
    #[serde(default = "default_recenter_delay_ms")]
    pub recenter_delay_ms: u64,

    /// How long the reset guard suppresses input after a window reset
    #[serde(default = "default_reset_settle_ms")]
    pub reset_settle_ms: u64,

    /// Focus-loss events inside this window after a reset are ignored
    #[serde(default = "default_focus_grace_ms")]
    pub focus_grace_ms: u64,

    #[serde(default)]
    pub on_empty_escape: EmptyEscape,

    /// Request thumbnails for image results after they are displayed
    #[serde(default = "default_true")]
    pub lazy_thumbnails: bool,

    /// Hide the launcher once a result has been opened
    #[serde(default = "default_true")]
    pub hide_after_open: bool,
}

fn default_debounce_ms() -> u64 {
    100
}

fn default_recenter_delay_ms() -> u64 {
    10
}

fn default_reset_settle_ms() -> u64 {
    200
}

fn default_focus_grace_ms() -> u64 {
    800
}

fn default_true() -> bool {
    true
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            recenter_delay_ms: default_recenter_delay_ms(),
            reset_settle_ms: default_reset_settle_ms(),
            focus_grace_ms: default_focus_grace_ms(),
            on_empty_escape: EmptyEscape::default(),
            lazy_thumbnails: true,
            hide_after_open: true,
        }
    }
}

impl LauncherConfig {
    #[must_use]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    #[must_use]
    pub fn recenter_delay(&self) -> Duration {
        Duration::from_millis(self.recenter_delay_ms)
    }

    #[must_use]
    pub fn reset_settle(&self) -> Duration {
        Duration::from_millis(self.reset_settle_ms)
    }

    #[must_use]
    pub fn focus_grace(&self) -> Duration {
        Duration::from_millis(self.focus_grace_ms)
    }
}

/// Window geometry in logical pixels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowConfig {
    #[serde(default = "default_width")]
    pub width: u32,

    #[serde(default = "default_input_row_height")]
    pub input_row_height: u32,

    #[serde(default = "default_item_row_height")]
    pub item_row_height: u32,

    /// Extra height added below the list when it is non-empty
    #[serde(default = "default_padding")]
    pub padding: u32,

    /// Rows shown before the list starts scrolling
    #[serde(default = "default_max_visible")]
    pub max_visible: u32,

    #[serde(default = "default_settings_width")]
    pub settings_width: u32,

    #[serde(default = "default_settings_height")]
    pub settings_height: u32,
}

fn default_width() -> u32 {
    700
}

fn default_input_row_height() -> u32 {
    60
}

fn default_item_row_height() -> u32 {
    50
}

fn default_padding() -> u32 {
    14
}

fn default_max_visible() -> u32 {
    5
}

fn default_settings_width() -> u32 {
    900
}

fn default_settings_height() -> u32 {
    600
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            input_row_height: default_input_row_height(),
            item_row_height: default_item_row_height(),
            padding: default_padding(),
            max_visible: default_max_visible(),
            settings_width: default_settings_width(),
            settings_height: default_settings_height(),
        }
    }
}

/// Local file search backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchConfig {
    /// Directories indexed by the local backend (defaults to the home directory)
    #[serde(default = "default_roots")]
    pub roots: Vec<PathBuf>,

    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Maximum directory depth walked below each root
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

fn default_roots() -> Vec<PathBuf> {
    directories::UserDirs::new()
        .map(|dirs| vec![dirs.home_dir().to_path_buf()])
        .unwrap_or_default()
}

fn default_max_results() -> usize {
    50
}

fn default_max_depth() -> usize {
    8
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            roots: default_roots(),
            max_results: default_max_results(),
            max_depth: default_max_depth(),
        }
    }
}
