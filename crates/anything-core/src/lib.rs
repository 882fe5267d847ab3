pub mod config;
pub mod search;

mod bridge;
mod error;
mod hotkey;
mod launcher;

#[cfg(test)]
mod tests;

pub use bridge::HostBridge;
pub use error::{Error, Result};
pub use hotkey::{Hotkey, HotkeyKey, Modifiers, ParseHotkeyError};
pub use launcher::{
    EscapeAction, Event, Geometry, GuardState, Launcher, ListView, ProgressBoard, ProgressDisplay,
    ResultStore, RowIcon, RowView, SettingsForm, Signal, Span, compute_geometry, escape_action,
    format_score, parse_snippet, split_path,
};

pub use anything_types::*;
