//! Shared types for Anything launcher components.
//!
//! This crate provides the data types exchanged between the launcher core
//! and its hosts: search results, persisted settings, host lifecycle events
//! and user input events. All types are serializable so a host can carry
//! them over any transport.

use serde::{Deserialize, Deserializer, Serialize};

/// Reserved path of the virtual "settings" result.
pub const SETTINGS_URI: &str = "anything://settings";

/// Deserialize a Vec that may be null or missing (both become empty vec)
fn deserialize_null_as_empty_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let opt: Option<Vec<T>> = Option::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

/// Encoded image bytes (icons and thumbnails)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageData {
    /// MIME type of `bytes`, e.g. `image/png`
    pub mime: String,
    pub width: u32,
    pub height: u32,
    pub bytes: Vec<u8>,
}

impl ImageData {
    #[must_use]
    pub fn png(width: u32, height: u32, bytes: Vec<u8>) -> Self {
        Self {
            mime: "image/png".to_string(),
            width,
            height,
            bytes,
        }
    }
}

/// Icon supplied by the search collaborator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IconSource {
    /// No icon, the UI picks a placeholder from the extension
    #[default]
    None,
    /// Inline image data rendered as-is
    Inline(ImageData),
}

/// A single search hit.
///
/// Results are immutable once returned by the search collaborator; the
/// launcher never re-sorts them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub path: String,

    /// Context text with `[`/`]` delimited highlight spans
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,

    #[serde(default)]
    pub icon: IconSource,

    /// Lowercase extension including the leading dot (`.pdf`), empty if none
    #[serde(default)]
    pub extension: String,
}

impl SearchResult {
    /// Create a result for `path`, deriving the extension from it.
    #[must_use]
    pub fn for_path(path: impl Into<String>) -> Self {
        let path = path.into();
        let extension = extension_of(&path);
        Self {
            path,
            extension,
            ..Default::default()
        }
    }

    /// The virtual result that opens the settings view.
    #[must_use]
    pub fn settings_entry() -> Self {
        Self {
            path: SETTINGS_URI.to_string(),
            snippet: Some("Configure AI, Indexing, and Hotkeys".to_string()),
            score: Some(1000.0),
            icon: IconSource::None,
            extension: ".settings".to_string(),
        }
    }

    #[must_use]
    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = Some(snippet.into());
        self
    }

    #[must_use]
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    #[must_use]
    pub fn with_icon(mut self, image: ImageData) -> Self {
        self.icon = IconSource::Inline(image);
        self
    }

    #[must_use]
    pub fn is_settings_entry(&self) -> bool {
        self.path == SETTINGS_URI
    }

    #[must_use]
    pub fn category(&self) -> FileCategory {
        FileCategory::from_path(&self.path)
    }
}

/// Lowercase extension of the last path component, with the leading dot.
#[must_use]
pub fn extension_of(path: &str) -> String {
    let name = path.rsplit(['/', '\\']).next().unwrap_or(path);
    match name.rfind('.') {
        Some(idx) if idx > 0 => name[idx..].to_lowercase(),
        _ => String::new(),
    }
}

/// Placeholder icon category chosen from a file extension
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileCategory {
    Pdf,
    Document,
    Image,
    Code,
    #[default]
    Other,
}

const DOCUMENT_SUFFIXES: &[&str] = &[".docx", ".doc", ".rtf"];
const IMAGE_SUFFIXES: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".webp", ".svg"];
const CODE_SUFFIXES: &[&str] = &[
    ".go", ".js", ".py", ".html", ".css", ".json", ".rs", ".ts", ".toml",
];

impl FileCategory {
    /// Categorize by the lowercased path suffix. Directory depth and casing
    /// do not matter.
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        let lower = path.to_lowercase();
        let ends_with_any = |suffixes: &[&str]| suffixes.iter().any(|s| lower.ends_with(s));

        if lower.ends_with(".pdf") {
            Self::Pdf
        } else if ends_with_any(DOCUMENT_SUFFIXES) {
            Self::Document
        } else if ends_with_any(IMAGE_SUFFIXES) {
            Self::Image
        } else if ends_with_any(CODE_SUFFIXES) {
            Self::Code
        } else {
            Self::Other
        }
    }

    #[must_use]
    pub fn is_image(self) -> bool {
        matches!(self, Self::Image)
    }
}

/// Persisted user settings.
///
/// The launcher only edits `hotkey`; the other fields configure the indexer
/// and are passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsRecord {
    /// "simple" (first 512 tokens) or "accurate" (chunking)
    #[serde(default = "default_embedding_strategy")]
    pub embedding_strategy: String,

    /// Max vectors per file, only used by the "accurate" strategy
    #[serde(default = "default_max_chunks")]
    pub max_chunks_per_file: u32,

    #[serde(default = "default_hotkey")]
    pub hotkey: String,

    #[serde(default, deserialize_with = "deserialize_null_as_empty_vec")]
    pub ignored_paths: Vec<String>,

    #[serde(default, deserialize_with = "deserialize_null_as_empty_vec")]
    pub allowed_extensions: Vec<String>,
}

fn default_embedding_strategy() -> String {
    "simple".to_string()
}

fn default_max_chunks() -> u32 {
    15
}

fn default_hotkey() -> String {
    "Ctrl+Space".to_string()
}

impl Default for SettingsRecord {
    fn default() -> Self {
        Self {
            embedding_strategy: default_embedding_strategy(),
            max_chunks_per_file: default_max_chunks(),
            hotkey: default_hotkey(),
            ignored_paths: [
                "node_modules",
                ".git",
                "$RECYCLE.BIN",
                "System Volume Information",
                "Windows",
                "Program Files",
                "Program Files (x86)",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            allowed_extensions: [".txt", ".md", ".markdown", ".pdf", ".docx", ".rtf"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Which long-running task a progress update belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressKind {
    Indexing,
    Download,
}

/// Progress report from a long-running host task.
///
/// A negative `percent` marks an indeterminate or failed state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressUpdate {
    #[serde(rename = "type")]
    pub kind: ProgressKind,
    pub percent: i32,
    #[serde(default)]
    pub message: String,
}

impl ProgressUpdate {
    #[must_use]
    pub fn new(kind: ProgressKind, percent: i32, message: impl Into<String>) -> Self {
        Self {
            kind,
            percent,
            message: message.into(),
        }
    }
}

/// Lifecycle events emitted by the host window/runtime
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HostEvent {
    /// Window was (re)shown and the launcher should start fresh
    WindowReset,

    /// Host finished laying out after a reset
    ResetSettled,

    /// Host asked for the settings view
    SettingsOpened,

    /// Progress of indexing or model download
    Progress(ProgressUpdate),

    /// Window lost OS focus
    FocusLost,

    /// Window gained OS focus
    WindowFocused,
}

/// Active presentation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewState {
    #[default]
    Launcher,
    Settings,
}

/// Panels inside the settings view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingsPanel {
    #[default]
    General,
    Indexing,
    Models,
}

impl SettingsPanel {
    pub const ALL: [SettingsPanel; 3] = [Self::General, Self::Indexing, Self::Models];

    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::General => Self::Indexing,
            Self::Indexing => Self::Models,
            Self::Models => Self::General,
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Indexing => "Indexing",
            Self::Models => "Models",
        }
    }
}

/// Navigation keys the launcher reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Escape,
    ArrowUp,
    ArrowDown,
    Enter,
    Tab,
}

/// Events sent from the UI widgets to the launcher
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiEvent {
    /// Search field text changed
    InputChanged { text: String },

    /// Navigation key pressed
    Key { key: Key },

    /// Pointer entered a result row
    Hover { index: usize },

    /// Result row clicked
    Click { index: usize },

    /// Settings panel tab activated
    SelectPanel { panel: SettingsPanel },

    /// Hotkey field edited in the settings form
    HotkeyEdited { text: String },

    /// Save button in the settings form
    SaveSettings,

    /// Close button in the settings form
    CloseSettings,

    /// "Rebuild index" button
    RebuildIndex,

    /// "Download models" button
    DownloadModels,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn search_result_deserializes_minimal() {
        let json = json!({ "path": "/home/me/notes.md" });
        let result: SearchResult = serde_json::from_value(json).expect("Failed to deserialize");
        assert_eq!(result.path, "/home/me/notes.md");
        assert_eq!(result.snippet, None);
        assert_eq!(result.score, None);
        assert_eq!(result.icon, IconSource::None);
        assert_eq!(result.extension, "");
    }

    #[test]
    fn search_result_skips_absent_optionals() {
        let result = SearchResult::for_path("C:\\Docs\\a.pdf");
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("snippet").is_none());
        assert!(json.get("score").is_none());
        assert_eq!(json["extension"], ".pdf");
        assert_eq!(json["icon"]["kind"], "none");
    }

    #[test]
    fn inline_icon_is_tagged() {
        let result = SearchResult::for_path("/x/app").with_icon(ImageData::png(1, 1, vec![7]));
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["icon"]["kind"], "inline");
        assert_eq!(json["icon"]["mime"], "image/png");
    }

    #[test]
    fn extension_uses_last_component() {
        assert_eq!(extension_of("/a.b/c"), "");
        assert_eq!(extension_of("/a/Report.PDF"), ".pdf");
        assert_eq!(extension_of("C:\\x\\photo.JPeg"), ".jpeg");
        assert_eq!(extension_of("/home/.bashrc"), "");
    }

    #[test]
    fn settings_entry_is_recognized() {
        let entry = SearchResult::settings_entry();
        assert!(entry.is_settings_entry());
        assert!(!SearchResult::for_path("/tmp/settings").is_settings_entry());
    }

    #[test]
    fn file_category_examples() {
        assert_eq!(FileCategory::from_path("A/B/Report.PDF"), FileCategory::Pdf);
        assert_eq!(FileCategory::from_path("x.pdf"), FileCategory::Pdf);
        assert_eq!(
            FileCategory::from_path("letter.docx"),
            FileCategory::Document
        );
        assert_eq!(FileCategory::from_path("logo.SVG"), FileCategory::Image);
        assert_eq!(FileCategory::from_path("main.go"), FileCategory::Code);
        assert_eq!(FileCategory::from_path("README"), FileCategory::Other);
    }

    #[test]
    fn settings_record_defaults_fill_missing_fields() {
        let record: SettingsRecord =
            serde_json::from_value(json!({ "hotkey": "Alt+K", "ignored_paths": null })).unwrap();
        assert_eq!(record.hotkey, "Alt+K");
        assert_eq!(record.embedding_strategy, "simple");
        assert_eq!(record.max_chunks_per_file, 15);
        assert!(record.ignored_paths.is_empty());
    }

    #[test]
    fn settings_record_uses_snake_case_keys() {
        let json = serde_json::to_value(SettingsRecord::default()).unwrap();
        assert!(json.get("embedding_strategy").is_some());
        assert!(json.get("max_chunks_per_file").is_some());
        assert!(json.get("allowed_extensions").is_some());
    }

    #[test]
    fn progress_update_wire_format() {
        let update: ProgressUpdate = serde_json::from_value(json!({
            "type": "download",
            "percent": -1,
            "message": "failed"
        }))
        .unwrap();
        assert_eq!(update.kind, ProgressKind::Download);
        assert_eq!(update.percent, -1);
    }

    #[test]
    fn host_event_wire_format() {
        let event: HostEvent = serde_json::from_value(json!({ "event": "window_reset" })).unwrap();
        assert_eq!(event, HostEvent::WindowReset);

        let event: HostEvent = serde_json::from_value(json!({
            "event": "progress",
            "type": "indexing",
            "percent": 40,
            "message": "Scanning"
        }))
        .unwrap();
        assert_eq!(
            event,
            HostEvent::Progress(ProgressUpdate::new(ProgressKind::Indexing, 40, "Scanning"))
        );
    }

    #[test]
    fn ui_event_wire_format() {
        let event: UiEvent =
            serde_json::from_value(json!({ "type": "key", "key": "arrow_down" })).unwrap();
        assert_eq!(
            event,
            UiEvent::Key {
                key: Key::ArrowDown
            }
        );
    }

    #[test]
    fn settings_panel_cycles() {
        let mut panel = SettingsPanel::default();
        for _ in 0..SettingsPanel::ALL.len() {
            panel = panel.next();
        }
        assert_eq!(panel, SettingsPanel::General);
    }
}
