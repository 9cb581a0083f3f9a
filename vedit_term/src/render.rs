//! Editor rendering and output

use std::iter;

use vedit_core::{EditorCore, EditorMode};

/// One composed screen: text rows, status bar, message line and cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Exactly `screen_rows` text rows, each at most `screen_cols` wide
    pub lines: Vec<String>,
    pub status: String,
    pub message: String,
    /// Screen (row, col) of the cursor
    pub cursor: (usize, usize),
}

/// Editor view for rendering
///
/// Composes a [`Frame`] from editor state. Drawing it is the terminal's job.
#[derive(Debug, Clone)]
pub struct EditorView {
    banner: String,
}

impl EditorView {
    pub fn new(banner: impl Into<String>) -> Self {
        Self {
            banner: banner.into(),
        }
    }

    /// Compose a frame. Call [`EditorCore::scroll`] first.
    pub fn render(&self, core: &EditorCore, message: Option<&str>) -> Frame {
        let viewport = core.viewport();
        let document = core.document();
        let cols = viewport.screen_cols;

        let lines = (0..viewport.screen_rows)
            .map(|y| match document.row(y + viewport.row_offset) {
                Some(row) => visible_slice(row.render(), viewport.col_offset, cols),
                None if document.is_empty() && y == viewport.screen_rows / 3 => {
                    self.render_banner(cols)
                }
                None => truncate("~", cols),
            })
            .collect();

        let (message, cursor) = if core.mode() == EditorMode::Command {
            let line = format!(":{}", core.command_line());
            let col = line.chars().count().min(cols.saturating_sub(1));
            (truncate(&line, cols), (viewport.screen_rows + 1, col))
        } else {
            let render = core.render_position();
            (
                truncate(message.unwrap_or(""), cols),
                (
                    render.ry.saturating_sub(viewport.row_offset),
                    render.rx.saturating_sub(viewport.col_offset),
                ),
            )
        };

        Frame {
            lines,
            status: self.render_status(core),
            message,
            cursor,
        }
    }

    /// Render just the status line
    pub fn render_status(&self, core: &EditorCore) -> String {
        let left = format!(
            "{} - {}{} - {} lines",
            core.mode().as_str(),
            core.filename().unwrap_or("[No Name]"),
            if core.dirty() { "[+]" } else { "" },
            core.document().row_count()
        );
        let cursor = core.cursor();
        let right = format!("{}:{}", cursor.row + 1, cursor.col + 1);

        let cols = core.viewport().screen_cols;
        let left_len = left.chars().count();
        let right_len = right.chars().count();
        if left_len >= cols {
            truncate(&left, cols)
        } else if left_len + right_len <= cols {
            let gap = cols - left_len - right_len;
            let mut status = left;
            status.extend(iter::repeat(' ').take(gap));
            status.push_str(&right);
            status
        } else {
            let mut status = left;
            status.extend(iter::repeat(' ').take(cols - left_len));
            status
        }
    }

    // Welcome banner, centered, a third of the way down an empty document
    fn render_banner(&self, cols: usize) -> String {
        let banner = truncate(&self.banner, cols);
        let mut padding = (cols - banner.chars().count()) / 2;
        let mut line = String::with_capacity(cols);
        if padding > 0 {
            line.push('~');
            padding -= 1;
        }
        line.extend(iter::repeat(' ').take(padding));
        line.push_str(&banner);
        line
    }
}

impl Default for EditorView {
    fn default() -> Self {
        Self::new(format!("vedit -- version {}", env!("CARGO_PKG_VERSION")))
    }
}

/// Columns are bytes of the render form. A multibyte character cut by
/// `col_offset` or the right edge shows as U+FFFD (known limitation).
fn visible_slice(render: &[u8], col_offset: usize, cols: usize) -> String {
    let start = col_offset.min(render.len());
    let end = start.saturating_add(cols).min(render.len());
    String::from_utf8_lossy(&render[start..end]).into_owned()
}

fn truncate(text: &str, cols: usize) -> String {
    text.chars().take(cols).collect()
}
