//! Line buffer: the ordered rows of the open document

use alloc::vec::Vec;

use crate::row::Row;
use crate::viewport::Position;

/// Document with line-based storage
///
/// Unlike most editors the document may hold zero rows: a freshly created
/// file has no lines until the first character is typed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    rows: Vec<Row>,
    dirty: bool,
}

impl Document {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            dirty: false,
        }
    }

    /// Build a document from raw lines, stripping trailing `\n` / `\r`
    pub fn from_lines<I, L>(lines: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: AsRef<[u8]>,
    {
        let rows = lines
            .into_iter()
            .map(|line| {
                let mut bytes = line.as_ref();
                while let [rest @ .., b'\n' | b'\r'] = bytes {
                    bytes = rest;
                }
                Row::new(bytes.to_vec())
            })
            .collect();
        Self { rows, dirty: false }
    }

    /// Serialize every row followed by a single `\n`
    pub fn to_byte_stream(&self) -> Vec<u8> {
        let total = self.rows.iter().map(|row| row.len() + 1).sum();
        let mut out = Vec::with_capacity(total);
        for row in &self.rows {
            out.extend_from_slice(row.chars());
            out.push(b'\n');
        }
        out
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, at: usize) -> Option<&Row> {
        self.rows.get(at)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Length of the row at `at`, 0 for rows that don't exist
    pub fn row_len(&self, at: usize) -> usize {
        self.rows.get(at).map(Row::len).unwrap_or(0)
    }

    /// Index of the last row, 0 for an empty document
    pub fn last_row(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    pub fn insert_row(&mut self, at: usize, bytes: &[u8]) {
        let at = at.min(self.rows.len());
        self.rows.insert(at, Row::new(bytes.to_vec()));
        self.dirty = true;
    }

    pub fn delete_row(&mut self, at: usize) {
        if at >= self.rows.len() {
            return;
        }
        self.rows.remove(at);
        self.dirty = true;
    }

    pub fn insert_char(&mut self, row: usize, at: usize, byte: u8) {
        if let Some(row) = self.rows.get_mut(row) {
            row.insert(at, byte);
            self.dirty = true;
        }
    }

    pub fn delete_char(&mut self, row: usize, at: usize) {
        if let Some(row) = self.rows.get_mut(row) {
            if row.delete(at) {
                self.dirty = true;
            }
        }
    }

    pub fn append_bytes(&mut self, row: usize, bytes: &[u8]) {
        if let Some(row) = self.rows.get_mut(row) {
            row.append(bytes);
            self.dirty = true;
        }
    }

    /// Cut a row at `at`, returning the tail that was removed
    pub fn truncate_row(&mut self, row: usize, at: usize) -> Vec<u8> {
        match self.rows.get_mut(row) {
            Some(row) => {
                let tail = row.split_off(at);
                if !tail.is_empty() {
                    self.dirty = true;
                }
                tail
            }
            None => Vec::new(),
        }
    }

    /// Bytes spanned by the half-open range `[start, end)`.
    ///
    /// Positions must be in document order. A range crossing rows
    /// includes one `\n` per line break it spans.
    pub fn copy_range(&self, start: Position, end: Position) -> Vec<u8> {
        let Some((start, end)) = self.clamp_range(start, end) else {
            return Vec::new();
        };

        let mut out = Vec::new();
        if start.row == end.row {
            out.extend_from_slice(&self.rows[start.row].chars()[start.col..end.col]);
            return out;
        }

        out.extend_from_slice(&self.rows[start.row].chars()[start.col..]);
        out.push(b'\n');
        for row in &self.rows[start.row + 1..end.row] {
            out.extend_from_slice(row.chars());
            out.push(b'\n');
        }
        out.extend_from_slice(&self.rows[end.row].chars()[..end.col]);
        out
    }

    /// Remove the half-open range `[start, end)`, joining the rows on
    /// either side. Returns the removed bytes.
    pub fn delete_range(&mut self, start: Position, end: Position) -> Vec<u8> {
        let Some((start, end)) = self.clamp_range(start, end) else {
            return Vec::new();
        };

        let removed = self.copy_range(start, end);
        if removed.is_empty() {
            return removed;
        }

        if start.row == end.row {
            self.rows[start.row].drain(start.col, end.col);
        } else {
            let tail = self.rows[end.row].chars()[end.col..].to_vec();
            self.rows[start.row].split_off(start.col);
            self.rows[start.row].append(&tail);
            self.rows.drain(start.row + 1..=end.row);
        }
        self.dirty = true;
        removed
    }

    fn clamp_range(&self, start: Position, end: Position) -> Option<(Position, Position)> {
        if start.row >= self.rows.len() || end < start {
            return None;
        }
        let clamp = |pos: Position| {
            let row = pos.row.min(self.last_row());
            Position::new(row, pos.col.min(self.row_len(row)))
        };
        let start = clamp(start);
        Some((start, clamp(end).max(start)))
    }
}
