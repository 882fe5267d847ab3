//! Escape key policy as a single decision table.

use crate::ViewState;
use crate::config::EmptyEscape;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeAction {
    /// Clear the input and results and collapse the window
    ClearQuery,
    /// Notify the host, then hide the window
    HideWindow,
    /// Terminate the application
    Quit,
    /// Leave the settings view
    CloseSettings,
}

#[must_use]
pub fn escape_action(input_empty: bool, view: ViewState, on_empty: EmptyEscape) -> EscapeAction {
    match (view, input_empty, on_empty) {
        (ViewState::Settings, _, _) => EscapeAction::CloseSettings,
        (ViewState::Launcher, false, _) => EscapeAction::ClearQuery,
        (ViewState::Launcher, true, EmptyEscape::Hide) => EscapeAction::HideWindow,
        (ViewState::Launcher, true, EmptyEscape::Quit) => EscapeAction::Quit,
    }
}
