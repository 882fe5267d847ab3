//! Global hotkey strings such as `Ctrl+Space` or `Alt+Shift+F5`.

use std::fmt;
use std::str::FromStr;

/// Modifier set of a hotkey
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[allow(clippy::struct_excessive_bools)] // one flag per physical modifier key
pub struct Modifiers {
    pub alt: bool,
    pub ctrl: bool,
    pub shift: bool,
    pub super_key: bool,
}

/// Non-modifier key of a hotkey
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HotkeyKey {
    Space,
    Enter,
    Esc,
    Tab,
    /// Uppercase ASCII letter
    Letter(char),
    /// Function key F1..=F12
    Function(u8),
}

impl HotkeyKey {
    fn parse(token: &str) -> Option<Self> {
        match token {
            "SPACE" => return Some(Self::Space),
            "ENTER" => return Some(Self::Enter),
            "ESC" => return Some(Self::Esc),
            "TAB" => return Some(Self::Tab),
            _ => {}
        }

        let mut chars = token.chars();
        if let (Some(c), None) = (chars.next(), chars.next())
            && c.is_ascii_uppercase()
        {
            return Some(Self::Letter(c));
        }

        let n: u8 = token.strip_prefix('F')?.parse().ok()?;
        (1..=12).contains(&n).then_some(Self::Function(n))
    }
}

impl fmt::Display for HotkeyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Space => f.write_str("Space"),
            Self::Enter => f.write_str("Enter"),
            Self::Esc => f.write_str("Esc"),
            Self::Tab => f.write_str("Tab"),
            Self::Letter(c) => write!(f, "{c}"),
            Self::Function(n) => write!(f, "F{n}"),
        }
    }
}

/// A parsed global hotkey
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hotkey {
    pub modifiers: Modifiers,
    pub key: HotkeyKey,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseHotkeyError {
    #[error("Hotkey is empty")]
    Empty,

    #[error("Unknown key '{0}'")]
    UnknownToken(String),

    #[error("Hotkey has no key, only modifiers")]
    MissingKey,

    #[error("Hotkey has more than one key: '{0}' and '{1}'")]
    MultipleKeys(String, String),
}

impl FromStr for Hotkey {
    type Err = ParseHotkeyError;

    /// Tokens are separated by `+`, case-insensitive and whitespace-tolerant.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(ParseHotkeyError::Empty);
        }

        let mut modifiers = Modifiers::default();
        let mut key: Option<(HotkeyKey, String)> = None;

        for raw in s.split('+') {
            let token = raw.trim().to_uppercase();
            match token.as_str() {
                "ALT" => modifiers.alt = true,
                "CTRL" | "CONTROL" => modifiers.ctrl = true,
                "SHIFT" => modifiers.shift = true,
                "WIN" | "CMD" => modifiers.super_key = true,
                _ => {
                    let parsed = HotkeyKey::parse(&token)
                        .ok_or_else(|| ParseHotkeyError::UnknownToken(raw.trim().to_string()))?;
                    if let Some((_, previous)) = &key {
                        return Err(ParseHotkeyError::MultipleKeys(
                            previous.clone(),
                            raw.trim().to_string(),
                        ));
                    }
                    key = Some((parsed, raw.trim().to_string()));
                }
            }
        }

        let (key, _) = key.ok_or(ParseHotkeyError::MissingKey)?;
        Ok(Self { modifiers, key })
    }
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.modifiers;
        for (on, name) in [
            (m.ctrl, "Ctrl+"),
            (m.alt, "Alt+"),
            (m.shift, "Shift+"),
            (m.super_key, "Win+"),
        ] {
            if on {
                f.write_str(name)?;
            }
        }
        write!(f, "{}", self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_default_hotkey() {
        let hotkey: Hotkey = "Ctrl+Space".parse().unwrap();
        assert!(hotkey.modifiers.ctrl);
        assert!(!hotkey.modifiers.alt);
        assert_eq!(hotkey.key, HotkeyKey::Space);
    }

    #[test]
    fn parsing_is_case_and_space_insensitive() {
        let hotkey: Hotkey = " control + shift +k ".parse().unwrap();
        assert!(hotkey.modifiers.ctrl);
        assert!(hotkey.modifiers.shift);
        assert_eq!(hotkey.key, HotkeyKey::Letter('K'));
    }

    #[test]
    fn parses_function_keys_in_range() {
        let hotkey: Hotkey = "Cmd+F12".parse().unwrap();
        assert!(hotkey.modifiers.super_key);
        assert_eq!(hotkey.key, HotkeyKey::Function(12));

        assert_eq!(
            "Alt+F13".parse::<Hotkey>(),
            Err(ParseHotkeyError::UnknownToken("F13".to_string()))
        );
        assert!("F0".parse::<Hotkey>().is_err());
    }

    #[test]
    fn rejects_missing_key() {
        assert_eq!(
            "Ctrl+Alt".parse::<Hotkey>(),
            Err(ParseHotkeyError::MissingKey)
        );
        assert_eq!("  ".parse::<Hotkey>(), Err(ParseHotkeyError::Empty));
    }

    #[test]
    fn rejects_unknown_and_duplicate_keys() {
        assert_eq!(
            "Ctrl+Banana".parse::<Hotkey>(),
            Err(ParseHotkeyError::UnknownToken("Banana".to_string()))
        );
        assert!(matches!(
            "A+B".parse::<Hotkey>(),
            Err(ParseHotkeyError::MultipleKeys(_, _))
        ));
        assert!("Ctrl+1".parse::<Hotkey>().is_err());
    }

    #[test]
    fn displays_canonical_form() {
        let hotkey: Hotkey = "space+shift+ctrl".parse().unwrap();
        assert_eq!(hotkey.to_string(), "Ctrl+Shift+Space");
    }
}
