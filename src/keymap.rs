use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::error::{Error, Result};

/// A single key chord such as `ctrl+c`, `esc` or `enter`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    code: KeyCode,
    modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn parse(spec: &str) -> Result<Self> {
        let invalid = || Error::InvalidKeyBinding(spec.to_string());

        let mut parts: Vec<&str> = spec.split('+').map(str::trim).collect();
        // "+" and "ctrl++" bind the plus key
        if spec == "+" || spec.ends_with("++") {
            parts.truncate(parts.len() - 2);
            parts.push("+");
        }
        let key = parts.pop().filter(|k| !k.is_empty()).ok_or_else(invalid)?;

        let mut modifiers = KeyModifiers::NONE;
        for m in parts {
            modifiers |= match m.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => KeyModifiers::CONTROL,
                "alt" => KeyModifiers::ALT,
                "shift" => KeyModifiers::SHIFT,
                _ => return Err(invalid()),
            };
        }

        let code = match key.to_ascii_lowercase().as_str() {
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "backspace" => KeyCode::Backspace,
            "space" => KeyCode::Char(' '),
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    // crossterm reports ctrl chords with the lower case character
                    (Some(c), None) if modifiers.contains(KeyModifiers::CONTROL) => {
                        KeyCode::Char(c.to_ascii_lowercase())
                    }
                    (Some(c), None) => KeyCode::Char(c),
                    _ => return Err(invalid()),
                }
            }
        };

        Ok(Self { code, modifiers })
    }

    pub fn matches(&self, key: &KeyEvent) -> bool {
        if self.code != key.code {
            return false;
        }
        // terminals report shift on upper case characters inconsistently
        let relevant = KeyModifiers::CONTROL | KeyModifiers::ALT;
        if matches!(self.code, KeyCode::Char(_)) && !self.modifiers.contains(KeyModifiers::SHIFT) {
            (key.modifiers & relevant) == self.modifiers
        } else {
            key.modifiers == self.modifiers
        }
    }
}

/// Resolved key bindings for the actions the app reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMap {
    pub quit: Vec<KeyBinding>,
    pub restart: Vec<KeyBinding>,
    pub next_line: Vec<KeyBinding>,
}

fn parse_all(specs: &[String]) -> Result<Vec<KeyBinding>> {
    specs.iter().map(|s| KeyBinding::parse(s)).collect()
}

fn any_matches(bindings: &[KeyBinding], key: &KeyEvent) -> bool {
    bindings.iter().any(|b| b.matches(key))
}

impl KeyMap {
    pub fn from_config(cfg: &crate::config::Keybindings) -> Result<Self> {
        Ok(Self {
            quit: parse_all(&cfg.quit)?,
            restart: parse_all(&cfg.restart)?,
            next_line: parse_all(&cfg.next_line)?,
        })
    }

    pub fn is_quit(&self, key: &KeyEvent) -> bool {
        any_matches(&self.quit, key)
    }

    pub fn is_restart(&self, key: &KeyEvent) -> bool {
        any_matches(&self.restart, key)
    }

    pub fn is_next_line(&self, key: &KeyEvent) -> bool {
        any_matches(&self.next_line, key)
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        // the defaults are known to parse
        Self::from_config(&crate::config::Keybindings::default()).unwrap_or(Self {
            quit: vec![],
            restart: vec![],
            next_line: vec![],
        })
    }
}
