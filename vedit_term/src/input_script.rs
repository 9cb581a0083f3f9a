//! # Input Script Parser
//!
//! Scripted key input for headless runs and deterministic tests.
//!
//! ## Format
//!
//! Scripts are line-based, with each line holding one input action:
//! - Key names: `Enter`, `Escape`/`Esc`, `Backspace`, `Delete`, `Tab`, `Space`
//! - Navigation: `Up`, `Down`, `Left`, `Right`, `Home`, `End`, `PageUp`, `PageDown`
//! - Control keys: `Ctrl+c`
//! - Single characters: `a`, `G`, `$`, `:`
//! - Text strings: `"Hello World"` (typed one character at a time)
//! - Comments: `# This is a comment`
//!
//! ## Example
//!
//! ```text
//! # Type a line and save it
//! i
//! "Hello vedit"
//! Escape
//! ":wq out.txt"
//! Enter
//! ```

use std::collections::VecDeque;

use thiserror::Error;
use vedit_core::Key;

/// Input script error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputScriptError {
    #[error("Invalid key name: {0}")]
    InvalidKeyName(String),

    #[error("Invalid modifier: {0}")]
    InvalidModifier(String),

    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    #[error("Empty script")]
    EmptyScript,
}

/// Input script
#[derive(Debug, Clone, Default)]
pub struct InputScript {
    keys: VecDeque<Key>,
}

impl InputScript {
    /// Parses a script from text
    pub fn from_text(text: &str) -> Result<Self, InputScriptError> {
        let mut keys = VecDeque::new();

        for (line_num, line) in text.lines().enumerate() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            keys.extend(Self::parse_line(line, line_num + 1)?);
        }

        if keys.is_empty() {
            return Err(InputScriptError::EmptyScript);
        }

        Ok(Self { keys })
    }

    fn parse_line(line: &str, line_num: usize) -> Result<Vec<Key>, InputScriptError> {
        // Quoted text
        if line.len() >= 2 && line.starts_with('"') && line.ends_with('"') {
            return Ok(line[1..line.len() - 1].chars().map(Key::Char).collect());
        }

        // Modifier + key
        let chord = line
            .split_once('+')
            .filter(|(modifier, key)| !modifier.is_empty() && !key.is_empty());
        if let Some((modifier, key)) = chord {
            return match modifier.trim().to_lowercase().as_str() {
                "ctrl" | "control" => Self::parse_ctrl(key.trim(), line_num).map(|key| vec![key]),
                other => Err(InputScriptError::InvalidModifier(other.to_string())),
            };
        }

        Self::parse_key(line)
            .map(|key| vec![key])
            .map_err(|e| InputScriptError::ParseError {
                line: line_num,
                message: e.to_string(),
            })
    }

    fn parse_ctrl(key: &str, line_num: usize) -> Result<Key, InputScriptError> {
        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) if ch.is_ascii_alphabetic() => Ok(Key::Ctrl(ch.to_ascii_lowercase())),
            _ => Err(InputScriptError::ParseError {
                line: line_num,
                message: format!("Invalid control key: {}", key),
            }),
        }
    }

    /// Parses a key name
    fn parse_key(name: &str) -> Result<Key, InputScriptError> {
        let mut chars = name.chars();
        if let (Some(ch), None) = (chars.next(), chars.next()) {
            return Ok(Key::Char(ch));
        }

        match name.to_lowercase().as_str() {
            "enter" | "return" => Ok(Key::Enter),
            "escape" | "esc" => Ok(Key::Escape),
            "backspace" | "back" => Ok(Key::Backspace),
            "delete" | "del" => Ok(Key::Delete),
            "tab" => Ok(Key::Tab),
            "space" => Ok(Key::Char(' ')),

            "up" | "arrowup" => Ok(Key::Up),
            "down" | "arrowdown" => Ok(Key::Down),
            "left" | "arrowleft" => Ok(Key::Left),
            "right" | "arrowright" => Ok(Key::Right),
            "home" => Ok(Key::Home),
            "end" => Ok(Key::End),
            "pageup" => Ok(Key::PageUp),
            "pagedown" => Ok(Key::PageDown),

            _ => Err(InputScriptError::InvalidKeyName(name.to_string())),
        }
    }

    /// Returns the next key, if any
    pub fn next_key(&mut self) -> Option<Key> {
        self.keys.pop_front()
    }

    /// Returns the number of remaining keys
    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl Iterator for InputScript {
    type Item = Key;

    fn next(&mut self) -> Option<Key> {
        self.next_key()
    }
}
