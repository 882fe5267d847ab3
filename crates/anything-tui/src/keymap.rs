//! Matching terminal key presses against a parsed [`Hotkey`].

use anything_core::{Hotkey, HotkeyKey};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Whether `event` is the key combination `hotkey` describes.
///
/// Modifiers must match exactly. Letters compare case-insensitively since
/// terminals report Shift+K as an uppercase `K`.
#[must_use]
pub fn matches(hotkey: &Hotkey, event: &KeyEvent) -> bool {
    let mods = event.modifiers;
    let wanted = hotkey.modifiers;
    if mods.contains(KeyModifiers::CONTROL) != wanted.ctrl
        || mods.contains(KeyModifiers::ALT) != wanted.alt
        || mods.contains(KeyModifiers::SHIFT) != wanted.shift
        || mods.contains(KeyModifiers::SUPER) != wanted.super_key
    {
        return false;
    }

    match (hotkey.key, event.code) {
        (HotkeyKey::Space, KeyCode::Char(' '))
        | (HotkeyKey::Enter, KeyCode::Enter)
        | (HotkeyKey::Esc, KeyCode::Esc)
        | (HotkeyKey::Tab, KeyCode::Tab) => true,
        // Many terminals send Ctrl+Space as NUL
        (HotkeyKey::Space, KeyCode::Null) => wanted.ctrl,
        (HotkeyKey::Letter(letter), KeyCode::Char(c)) => c.eq_ignore_ascii_case(&letter),
        (HotkeyKey::Function(n), KeyCode::F(f)) => n == f,
        _ => false,
    }
}
