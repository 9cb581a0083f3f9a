//! Cursor position, render column and scrolling

use crate::document::Document;
use crate::row::TAB_STOP;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// Logical cursor position: a row index and a byte offset into that row.
///
/// Ordering is document order (row first, then column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub const fn zero() -> Self {
        Self { row: 0, col: 0 }
    }
}

/// Cursor position on screen, in document coordinates with tabs expanded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderPosition {
    pub rx: usize,
    pub ry: usize,
}

/// Tab-expanded column of byte offset `col` on `row`.
///
/// Reads the live row bytes rather than the cached render form so the
/// answer is right even mid-edit. Columns count bytes, not characters,
/// so a multibyte character spans several columns and the host may cut it
/// when scrolling horizontally (known limitation).
pub fn render_column(document: &Document, row: usize, col: usize) -> usize {
    let Some(row) = document.row(row) else {
        return 0;
    };

    let mut rx = 0;
    for &byte in row.chars().iter().take(col) {
        if byte == b'\t' {
            rx += (TAB_STOP - 1) - (rx % TAB_STOP);
        }
        rx += 1;
    }
    rx
}

/// Visible window into the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub row_offset: usize,
    pub col_offset: usize,
    pub screen_rows: usize,
    pub screen_cols: usize,
}

impl Viewport {
    pub fn new(screen_rows: usize, screen_cols: usize) -> Self {
        Self {
            row_offset: 0,
            col_offset: 0,
            screen_rows,
            screen_cols,
        }
    }

    /// Move the offsets the minimum amount needed to show `render`
    pub fn scroll_to(&mut self, render: RenderPosition) {
        if render.ry < self.row_offset {
            self.row_offset = render.ry;
        }
        if self.screen_rows > 0 && render.ry >= self.row_offset + self.screen_rows {
            self.row_offset = render.ry + 1 - self.screen_rows;
        }
        if render.rx < self.col_offset {
            self.col_offset = render.rx;
        }
        if self.screen_cols > 0 && render.rx >= self.col_offset + self.screen_cols {
            self.col_offset = render.rx + 1 - self.screen_cols;
        }
    }

    /// Compute the render position of `cursor` and scroll it into view
    pub fn scroll(&mut self, document: &Document, cursor: Position) -> RenderPosition {
        let render = RenderPosition {
            rx: render_column(document, cursor.row, cursor.col),
            ry: cursor.row,
        };
        self.scroll_to(render);
        render
    }
}
