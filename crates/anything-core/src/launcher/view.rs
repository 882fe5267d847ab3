//! Launcher/Settings view switching and the settings form state.

use crate::hotkey::Hotkey;
use crate::{SettingsPanel, SettingsRecord, ViewState};

/// Editable copy of the settings record shown in the Settings view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsForm {
    pub record: SettingsRecord,
    /// Hotkey text as typed; only written back to `record` on a valid save
    pub hotkey_draft: String,
    pub panel: SettingsPanel,
    /// Validation or save failure shown next to the form
    pub error: Option<String>,
}

impl SettingsForm {
    #[must_use]
    pub fn new(record: SettingsRecord) -> Self {
        Self {
            hotkey_draft: record.hotkey.clone(),
            record,
            panel: SettingsPanel::default(),
            error: None,
        }
    }

    /// The record to persist, with the draft hotkey normalized.
    ///
    /// # Errors
    ///
    /// Returns a user-facing message if the draft hotkey does not parse.
    pub fn validated(&self) -> Result<SettingsRecord, String> {
        let hotkey: Hotkey = self
            .hotkey_draft
            .parse()
            .map_err(|e| format!("Invalid hotkey: {e}"))?;
        Ok(SettingsRecord {
            hotkey: hotkey.to_string(),
            ..self.record.clone()
        })
    }
}

#[derive(Debug, Default)]
pub struct ViewController {
    state: ViewState,
    form: Option<SettingsForm>,
}

impl ViewController {
    /// Load `record` into a fresh form and switch to Settings.
    pub fn open_settings(&mut self, record: SettingsRecord) {
        self.form = Some(SettingsForm::new(record));
        self.state = ViewState::Settings;
    }

    /// Switch back to the launcher. Returns `false` if already there.
    pub fn close_settings(&mut self) -> bool {
        if self.state == ViewState::Launcher {
            return false;
        }
        self.form = None;
        self.state = ViewState::Launcher;
        true
    }

    #[must_use]
    pub fn state(&self) -> ViewState {
        self.state
    }

    #[must_use]
    pub fn form(&self) -> Option<&SettingsForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut SettingsForm> {
        self.form.as_mut()
    }
}
