//! Editor modes

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// Editor mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub enum EditorMode {
    /// Normal mode (navigation, counts, operators)
    #[default]
    Normal,
    /// Insert mode (text entry)
    Insert,
    /// Command mode (colon command line)
    Command,
    /// Visual mode. Reserved: nothing switches into it yet.
    Visual,
}

impl EditorMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            EditorMode::Normal => "NORMAL",
            EditorMode::Insert => "INSERT",
            EditorMode::Command => "COMMAND",
            EditorMode::Visual => "VISUAL",
        }
    }
}
