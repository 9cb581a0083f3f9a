//! Editor snapshot for deterministic testing and headless runs

use crate::{EditorMode, Operator, Position};
use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// Complete editor state snapshot
///
/// Rows and the register are decoded lossily so the snapshot can be
/// compared and serialized as text.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct EditorSnapshot {
    pub mode: EditorMode,
    pub cursor: Position,
    pub rows: Vec<String>,
    pub dirty: bool,
    pub pending_count: usize,
    pub pending_operator: Option<Operator>,
    pub command_line: String,
    pub register: String,
    pub filename: Option<String>,
}

impl EditorSnapshot {
    /// Compute a deterministic hash of the snapshot state
    #[cfg(test)]
    pub fn hash(&self) -> u64 {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();
        hasher.update([self.mode as u8]);
        hasher.update(self.cursor.row.to_le_bytes());
        hasher.update(self.cursor.col.to_le_bytes());

        for row in &self.rows {
            hasher.update(row.as_bytes());
            hasher.update(b"\n");
        }

        hasher.update([self.dirty as u8]);
        hasher.update(self.pending_count.to_le_bytes());
        hasher.update([self.pending_operator.map_or(0, |op| op as u8 + 1)]);
        hasher.update(self.command_line.as_bytes());
        hasher.update(self.register.as_bytes());
        if let Some(name) = &self.filename {
            hasher.update(name.as_bytes());
        }

        let result = hasher.finalize();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&result[..8]);
        u64::from_le_bytes(bytes)
    }
}
