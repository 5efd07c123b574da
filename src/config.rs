//! Runtime configuration: hotkey combos and profile file resolution.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Default inter-key delay in milliseconds. Matches the pacing the tuning
/// menu reliably accepts; faster and the game starts eating presses.
pub const DEFAULT_INTER_KEY_DELAY_MS: u64 = 50;

/// Default trigger binding.
pub const DEFAULT_HOTKEY: &str = "ctrl+alt+s";

/// The non-modifier part of a hotkey combo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComboKey {
    /// A letter or digit key, stored uppercase.
    Char(char),
    /// A function key F1..F24.
    Function(u8),
}

/// A parsed global-hotkey combination such as `ctrl+alt+s`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombo {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub win: bool,
    pub key: ComboKey,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ComboParseError {
    #[error("empty hotkey combo")]
    Empty,
    #[error("unknown key '{0}' in hotkey combo")]
    UnknownKey(String),
    #[error("hotkey combo has no non-modifier key")]
    MissingKey,
    #[error("more than one non-modifier key in hotkey combo ('{0}')")]
    ExtraKey(String),
    #[error("global hotkeys need at least one modifier (ctrl/alt/shift/win)")]
    NoModifier,
}

impl FromStr for KeyCombo {
    type Err = ComboParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ComboParseError::Empty);
        }

        let (mut ctrl, mut alt, mut shift, mut win) = (false, false, false, false);
        let mut key: Option<ComboKey> = None;

        for part in s.split('+') {
            let part = part.trim().to_ascii_lowercase();
            match part.as_str() {
                "" => return Err(ComboParseError::Empty),
                "ctrl" | "control" => ctrl = true,
                "alt" => alt = true,
                "shift" => shift = true,
                "win" | "super" => win = true,
                other => {
                    let parsed = parse_key(other)
                        .ok_or_else(|| ComboParseError::UnknownKey(other.to_string()))?;
                    if key.replace(parsed).is_some() {
                        return Err(ComboParseError::ExtraKey(other.to_string()));
                    }
                }
            }
        }

        let key = key.ok_or(ComboParseError::MissingKey)?;
        if !(ctrl || alt || shift || win) {
            return Err(ComboParseError::NoModifier);
        }

        Ok(KeyCombo {
            ctrl,
            alt,
            shift,
            win,
            key,
        })
    }
}

fn parse_key(s: &str) -> Option<ComboKey> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if c.is_ascii_alphanumeric() {
            return Some(ComboKey::Char(c.to_ascii_uppercase()));
        }
        return None;
    }
    if let Some(n) = s.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
        if (1..=24).contains(&n) {
            return Some(ComboKey::Function(n));
        }
    }
    None
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        if self.ctrl {
            parts.push("Ctrl".to_string());
        }
        if self.alt {
            parts.push("Alt".to_string());
        }
        if self.shift {
            parts.push("Shift".to_string());
        }
        if self.win {
            parts.push("Win".to_string());
        }
        match self.key {
            ComboKey::Char(c) => parts.push(c.to_string()),
            ComboKey::Function(n) => parts.push(format!("F{}", n)),
        }
        write!(f, "{}", parts.join("+"))
    }
}

/// Resolves a profile argument to a concrete file path.
///
/// An existing or absolute path wins as-is. A relative path that doesn't
/// exist is retried under the per-user config directory
/// (`<config>/protune/<path>`), so profiles can live next to the lock
/// file. If neither exists the original path comes back and the loader
/// reports the I/O error.
pub fn resolve_profile_path(path: &Path) -> PathBuf {
    if path.exists() || path.is_absolute() {
        return path.to_path_buf();
    }
    if let Some(base) = dirs::config_dir() {
        let candidate = base.join("protune").join(path);
        if candidate.exists() {
            return candidate;
        }
    }
    path.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_default_combo() {
        let combo: KeyCombo = DEFAULT_HOTKEY.parse().unwrap();
        assert!(combo.ctrl);
        assert!(combo.alt);
        assert!(!combo.shift);
        assert!(!combo.win);
        assert_eq!(combo.key, ComboKey::Char('S'));
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        let a: KeyCombo = "CTRL+Shift+F5".parse().unwrap();
        assert!(a.ctrl);
        assert!(a.shift);
        assert_eq!(a.key, ComboKey::Function(5));
    }

    #[test]
    fn test_parse_digit_key() {
        let combo: KeyCombo = "win+3".parse().unwrap();
        assert!(combo.win);
        assert_eq!(combo.key, ComboKey::Char('3'));
    }

    #[test]
    fn test_parse_rejects_bare_key() {
        let err = "s".parse::<KeyCombo>().unwrap_err();
        assert_eq!(err, ComboParseError::NoModifier);
    }

    #[test]
    fn test_parse_rejects_modifier_only() {
        let err = "ctrl+alt".parse::<KeyCombo>().unwrap_err();
        assert_eq!(err, ComboParseError::MissingKey);
    }

    #[test]
    fn test_parse_rejects_unknown_key() {
        let err = "ctrl+bogus".parse::<KeyCombo>().unwrap_err();
        assert_eq!(err, ComboParseError::UnknownKey("bogus".to_string()));
    }

    #[test]
    fn test_parse_rejects_two_keys() {
        let err = "ctrl+a+b".parse::<KeyCombo>().unwrap_err();
        assert_eq!(err, ComboParseError::ExtraKey("b".to_string()));
    }

    #[test]
    fn test_parse_rejects_out_of_range_function_key() {
        let err = "ctrl+f25".parse::<KeyCombo>().unwrap_err();
        assert_eq!(err, ComboParseError::UnknownKey("f25".to_string()));
    }

    #[test]
    fn test_display_roundtrip() {
        let combo: KeyCombo = "ctrl+alt+s".parse().unwrap();
        assert_eq!(combo.to_string(), "Ctrl+Alt+S");

        let reparsed: KeyCombo = combo.to_string().parse().unwrap();
        assert_eq!(reparsed, combo);
    }

    #[test]
    fn test_resolve_existing_path_wins() {
        let dir = std::env::temp_dir();
        let path = dir.join("protune_resolve_test.json");
        std::fs::write(&path, "{}").unwrap();

        let resolved = resolve_profile_path(&path);
        assert_eq!(resolved, path);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_resolve_missing_path_comes_back() {
        let path = Path::new("definitely_missing_profile.json");
        assert_eq!(resolve_profile_path(path), path.to_path_buf());
    }
}
