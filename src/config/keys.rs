//! Keybinding configuration types and parsing
//!
//! Keys are written in vim-style notation (e.g. "C-q", "<Space>", "<CR>")
//! and resolved per [`KeyContext`], falling back to global bindings.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Deserialize;
use thiserror::Error;

use crate::ui::action::Action;

/// A key combination (key code + modifiers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyCombo {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Normalize a key event the way config parsing does: uppercase
    /// characters become lowercase + SHIFT.
    pub fn from_key_event(event: &KeyEvent) -> Self {
        match event.code {
            KeyCode::Char(c) if c.is_ascii_uppercase() => Self {
                code: KeyCode::Char(c.to_ascii_lowercase()),
                modifiers: event.modifiers | KeyModifiers::SHIFT,
            },
            _ => Self {
                code: event.code,
                modifiers: event.modifiers,
            },
        }
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            parts.push("C".into());
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            parts.push("M".into());
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            parts.push("S".into());
        }
        parts.push(match self.code {
            KeyCode::Char(' ') => "<Space>".to_string(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Enter => "<CR>".to_string(),
            KeyCode::Esc => "<Esc>".to_string(),
            KeyCode::Tab => "<Tab>".to_string(),
            KeyCode::Backspace => "<BS>".to_string(),
            KeyCode::Up => "<Up>".to_string(),
            KeyCode::Down => "<Down>".to_string(),
            KeyCode::Left => "<Left>".to_string(),
            KeyCode::Right => "<Right>".to_string(),
            KeyCode::F(n) => format!("<F{n}>"),
            other => format!("{other:?}"),
        });
        f.write_str(&parts.join("-"))
    }
}

impl FromStr for KeyCombo {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_key_notation(s)
    }
}

/// Which screen a binding applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyContext {
    /// Choosing or typing the input array
    Setup,
    /// Watching the sort play back
    Show,
}

/// Configuration for all keybindings
#[derive(Debug, Clone, Default)]
pub struct KeybindingConfig {
    pub global: HashMap<KeyCombo, Action>,
    pub context: HashMap<KeyContext, HashMap<KeyCombo, Action>>,
}

impl KeybindingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context bindings win over global ones.
    pub fn get_action(&self, key: &KeyCombo, context: KeyContext) -> Option<Action> {
        self.context
            .get(&context)
            .and_then(|bindings| bindings.get(key))
            .or_else(|| self.global.get(key))
            .copied()
    }

    /// First key bound to `action` in `context`, for hint rendering.
    pub fn key_for(&self, action: Action, context: KeyContext) -> Option<KeyCombo> {
        let find = |map: &HashMap<KeyCombo, Action>| {
            let mut keys: Vec<KeyCombo> = map
                .iter()
                .filter(|(_, a)| **a == action)
                .map(|(k, _)| *k)
                .collect();
            keys.sort_by_key(|k| k.to_string());
            keys.into_iter().next()
        };
        self.context
            .get(&context)
            .and_then(find)
            .or_else(|| find(&self.global))
    }

    /// Merge user configuration on top of defaults
    pub fn merge(&mut self, other: KeybindingConfig) {
        self.global.extend(other.global);
        for (ctx, bindings) in other.context {
            self.context.entry(ctx).or_default().extend(bindings);
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyParseError {
    #[error("empty key notation")]
    Empty,
    #[error("no key specified")]
    NoKey,
    #[error("invalid key: {0}")]
    InvalidKey(String),
    #[error("invalid modifier: {0}")]
    InvalidModifier(String),
}

/// Parse a vim-style key notation string into a KeyCombo
///
/// - `C-x` Ctrl, `M-x` Alt, `S-x` Shift, combinable (`C-S-x`)
/// - `<CR>`, `<Esc>`, `<Tab>`, `<BS>`, `<Space>`, arrows (`<Up>`...),
///   `<F1>`..`<F12>`
/// - an uppercase letter implies SHIFT
pub fn parse_key_notation(s: &str) -> Result<KeyCombo, KeyParseError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(KeyParseError::Empty);
    }
    let inner = s
        .strip_prefix('<')
        .and_then(|rest| rest.strip_suffix('>'))
        .unwrap_or(s);

    let mut modifiers = KeyModifiers::NONE;
    let mut parts: Vec<&str> = inner.split('-').collect();
    // "C--" binds Ctrl+minus
    if inner.ends_with("--") {
        parts.truncate(parts.len().saturating_sub(2));
        parts.push("-");
    }
    let key = parts.pop().filter(|k| !k.is_empty()).ok_or(KeyParseError::NoKey)?;
    for part in parts {
        match part {
            "C" => modifiers |= KeyModifiers::CONTROL,
            "M" => modifiers |= KeyModifiers::ALT,
            "S" => modifiers |= KeyModifiers::SHIFT,
            other => return Err(KeyParseError::InvalidModifier(other.to_string())),
        }
    }

    let code = parse_key_code(key)?;
    if let KeyCode::Char(c) = code {
        if c.is_ascii_uppercase() {
            return Ok(KeyCombo::new(
                KeyCode::Char(c.to_ascii_lowercase()),
                modifiers | KeyModifiers::SHIFT,
            ));
        }
    }
    Ok(KeyCombo::new(code, modifiers))
}

fn parse_key_code(key: &str) -> Result<KeyCode, KeyParseError> {
    // Display writes modified special keys as `C-<Up>`.
    let key = match key.strip_prefix('<').and_then(|k| k.strip_suffix('>')) {
        Some(inner) if !inner.is_empty() => inner,
        _ => key,
    };
    let mut chars = key.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(c));
    }
    let code = match key.to_ascii_uppercase().as_str() {
        "CR" | "ENTER" | "RETURN" => KeyCode::Enter,
        "ESC" | "ESCAPE" => KeyCode::Esc,
        "TAB" => KeyCode::Tab,
        "BS" | "BACKSPACE" => KeyCode::Backspace,
        "SPACE" => KeyCode::Char(' '),
        "UP" => KeyCode::Up,
        "DOWN" => KeyCode::Down,
        "LEFT" => KeyCode::Left,
        "RIGHT" => KeyCode::Right,
        f if f.starts_with('F') => {
            let n: u8 = f[1..]
                .parse()
                .map_err(|_| KeyParseError::InvalidKey(key.to_string()))?;
            if !(1..=12).contains(&n) {
                return Err(KeyParseError::InvalidKey(key.to_string()));
            }
            KeyCode::F(n)
        }
        _ => return Err(KeyParseError::InvalidKey(key.to_string())),
    };
    Ok(code)
}
