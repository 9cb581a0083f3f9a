//! Platform-independent key representation

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// Platform-independent key symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub enum Key {
    // Printable characters, including space
    Char(char),

    // Navigation
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,

    // Special keys
    Enter,
    Backspace,
    Delete,
    Escape,
    Tab,

    // Control chords, stored as the lowercase letter (Ctrl+C => Ctrl('c'))
    Ctrl(char),
}

impl Key {
    /// Ctrl+C: backs out of Insert and Command mode like Escape, and in
    /// Normal mode cancels the pending count and operator
    pub fn is_interrupt(&self) -> bool {
        matches!(self, Key::Ctrl('c'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interrupt() {
        assert!(Key::Ctrl('c').is_interrupt());
        assert!(!Key::Escape.is_interrupt());
        assert!(!Key::Char('c').is_interrupt());
    }
}
