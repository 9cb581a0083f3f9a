//! Operators applied over a motion range

use alloc::vec::Vec;

use crate::document::Document;
use crate::viewport::Position;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// Operator waiting for (or applied with) a motion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub enum Operator {
    /// `d`
    Delete,
    /// `y`
    Yank,
    /// `c`
    Change,
}

impl Operator {
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            'd' => Some(Operator::Delete),
            'y' => Some(Operator::Yank),
            'c' => Some(Operator::Change),
            _ => None,
        }
    }

    /// Apply the operator over the half-open range between `a` and `b`.
    ///
    /// The endpoints may come in either order. The spanned text is stored
    /// in `register` unless the range is empty. Returns the position the
    /// cursor should take: the start of the range.
    pub fn apply(
        &self,
        document: &mut Document,
        register: &mut Vec<u8>,
        a: Position,
        b: Position,
    ) -> Position {
        let (start, end) = if a <= b { (a, b) } else { (b, a) };

        let text = match self {
            Operator::Delete | Operator::Change => document.delete_range(start, end),
            Operator::Yank => document.copy_range(start, end),
        };

        tracing::debug!(
            operator = ?self,
            start_row = start.row,
            start_col = start.col,
            end_row = end.row,
            end_col = end.col,
            bytes = text.len(),
            "operator applied"
        );

        if !text.is_empty() {
            *register = text;
        }
        start
    }
}
