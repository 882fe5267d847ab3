//! Persistence for the user settings record shared with the indexer.

use crate::{Error, Result, SettingsRecord};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Reads and writes `settings.json`.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the record. A missing file is created with defaults; a file that
    /// does not parse is left alone and defaults are returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, or if the
    /// default file cannot be written.
    pub fn load(&self) -> Result<SettingsRecord> {
        if !self.path.exists() {
            debug!("No settings at {}, writing defaults", self.path.display());
            let record = SettingsRecord::default();
            self.save(&record)?;
            return Ok(record);
        }

        let content = std::fs::read_to_string(&self.path)?;
        super::validation::warn_unknown_settings_fields(&content, "settings.json");
        match serde_json::from_str(&content) {
            Ok(record) => Ok(record),
            Err(e) => {
                warn!("Invalid settings in {}: {e}", self.path.display());
                Ok(SettingsRecord::default())
            }
        }
    }

    /// Persist the record. The write goes through a sibling temp file so a
    /// crash never leaves a truncated settings file behind.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the file cannot be written.
    pub fn save(&self, record: &SettingsRecord) -> Result<()> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| Error::Settings(format!("invalid path {}", self.path.display())))?;
        std::fs::create_dir_all(parent)?;

        let content = serde_json::to_string_pretty(record)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, &self.path)?;

        debug!("Saved settings to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_creates_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(temp_dir.path().join("settings.json"));

        let record = store.load().unwrap();
        assert_eq!(record, SettingsRecord::default());
        assert!(store.path().exists());
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(temp_dir.path().join("nested/settings.json"));

        let record = SettingsRecord {
            hotkey: "Alt+K".to_string(),
            ..Default::default()
        };
        store.save(&record).unwrap();

        assert_eq!(store.load().unwrap().hotkey, "Alt+K");
        assert!(!temp_dir.path().join("nested/settings.json.tmp").exists());
    }

    #[test]
    fn test_load_invalid_json_falls_back_to_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();

        let record = SettingsStore::new(path.clone()).load().unwrap();
        assert_eq!(record, SettingsRecord::default());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[test]
    fn test_load_keeps_unknown_indexer_values_out() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{ "embedding_strategy": "accurate", "max_chunks_per_file": 4, "future": 1 }"#,
        )
        .unwrap();

        let record = SettingsStore::new(path).load().unwrap();
        assert_eq!(record.embedding_strategy, "accurate");
        assert_eq!(record.max_chunks_per_file, 4);
        assert_eq!(record.hotkey, "Ctrl+Space");
    }
}
