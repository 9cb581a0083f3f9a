//! Cursor motions
//!
//! A motion maps a start position and a repeat count to an end position.
//! Motions never touch the document; the same value serves plain cursor
//! movement and the far end of an operator range.

use crate::document::Document;
use crate::key::Key;
use crate::viewport::Position;

/// The closed set of motions the editor understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Motion {
    /// `h`
    Left,
    /// `l`
    Right,
    /// `k`
    Up,
    /// `j`
    Down,
    /// `_`: first column, `count - 1` rows down
    FirstColumn,
    /// `$`: end of row, `count - 1` rows down
    LineEnd,
    /// Home: first column of the current row
    LineStart,
    /// `g`: first row
    DocumentStart,
    /// `G`: last row
    DocumentEnd,
    /// `w`. Not implemented, returns the start position.
    WordForward,
    /// `b`. Not implemented, returns the start position.
    WordBackward,
    /// `W`. Not implemented, returns the start position.
    BigWordForward,
    /// `B`. Not implemented, returns the start position.
    BigWordBackward,
}

impl Motion {
    /// Look up the motion bound to `key`
    pub fn from_key(key: Key) -> Option<Self> {
        let motion = match key {
            Key::Char('h') | Key::Left => Motion::Left,
            Key::Char('l') | Key::Right => Motion::Right,
            Key::Char('k') | Key::Up => Motion::Up,
            Key::Char('j') | Key::Down => Motion::Down,
            Key::Char('_') => Motion::FirstColumn,
            Key::Char('$') | Key::End => Motion::LineEnd,
            Key::Home => Motion::LineStart,
            Key::Char('g') => Motion::DocumentStart,
            Key::Char('G') => Motion::DocumentEnd,
            Key::Char('w') => Motion::WordForward,
            Key::Char('b') => Motion::WordBackward,
            Key::Char('W') => Motion::BigWordForward,
            Key::Char('B') => Motion::BigWordBackward,
            _ => return None,
        };
        Some(motion)
    }

    /// Evaluate the motion from `from`, repeated `count` times.
    ///
    /// The result always satisfies `row < max(row_count, 1)` and
    /// `col <= row_len(row)`.
    pub fn apply(&self, document: &Document, from: Position, count: usize) -> Position {
        let from = clamp(document, from);

        match self {
            Motion::Left => Position::new(from.row, from.col - count.min(from.col)),
            Motion::Right => {
                let len = document.row_len(from.row);
                Position::new(from.row, from.col + count.min(len - from.col))
            }
            Motion::Up => clamp(
                document,
                Position::new(from.row - count.min(from.row), from.col),
            ),
            Motion::Down => {
                let below = document.row_count().saturating_sub(from.row);
                clamp(document, Position::new(from.row + count.min(below), from.col))
            }
            Motion::FirstColumn => Motion::Down.apply(
                document,
                Position::new(from.row, 0),
                count.saturating_sub(1),
            ),
            Motion::LineEnd => {
                let row = Motion::Down
                    .apply(document, from, count.saturating_sub(1))
                    .row;
                Position::new(row, document.row_len(row))
            }
            Motion::LineStart => Position::new(from.row, 0),
            Motion::DocumentStart => clamp(document, Position::new(0, from.col)),
            Motion::DocumentEnd => clamp(document, Position::new(document.last_row(), from.col)),
            // Word boundaries are not classified yet: w/W should land on the
            // next word/WORD start and b/B on the previous one.
            Motion::WordForward
            | Motion::WordBackward
            | Motion::BigWordForward
            | Motion::BigWordBackward => from,
        }
    }
}

/// Pull a position back inside the document
pub fn clamp(document: &Document, pos: Position) -> Position {
    let row = pos.row.min(document.last_row());
    Position::new(row, pos.col.min(document.row_len(row)))
}
