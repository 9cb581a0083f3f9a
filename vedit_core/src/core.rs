//! EditorCore state machine
//!
//! A complete, testable, no_std modal editing state machine. Keys go in,
//! [`CoreOutcome`]s come out; anything touching the outside world (files,
//! exiting) is returned as a request for the host to carry out.

use alloc::string::String;
use alloc::vec::Vec;

use crate::{
    command::{parse_command, Command},
    document::Document,
    key::Key,
    mode::EditorMode,
    motion::{self, Motion},
    operator::Operator,
    snapshot::EditorSnapshot,
    viewport::{Position, RenderPosition, Viewport},
};

const NO_WRITE: &str = "No write since last change (add ! to override)";
const NO_FILE_NAME: &str = "No file name";
const NOT_IMPLEMENTED: &str = "not implemented";

/// Outcome from applying a key to the editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreOutcome {
    /// Nothing changed
    Continue,
    /// State changed (buffer modified, cursor moved, mode changed, etc)
    Changed,
    /// Request to exit the editor
    RequestExit { forced: bool },
    /// Display a status message
    StatusMessage(String),
    /// Request IO operation from host
    RequestIo(CoreIoRequest),
}

/// IO request from editor core to host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreIoRequest {
    /// Write the document to `path`
    Save { path: String },
    /// Write the document to `path`, then exit if that worked
    SaveAndQuit { path: String },
    /// Replace the document with the contents of `path`
    Open { path: String },
}

/// Editor core state machine
#[derive(Debug, Clone, Default)]
pub struct EditorCore {
    mode: EditorMode,
    document: Document,
    cursor: Position,
    render: RenderPosition,
    viewport: Viewport,
    pending_count: usize,
    pending_operator: Option<Operator>,
    register: Vec<u8>,
    command_line: String,
    filename: Option<String>,
}

impl EditorCore {
    /// Create a new editor holding an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a key event and return the outcome
    pub fn apply_key(&mut self, key: Key) -> CoreOutcome {
        match self.mode {
            EditorMode::Normal => self.handle_normal_mode(key),
            EditorMode::Insert => self.handle_insert_mode(key),
            EditorMode::Command => self.handle_command_mode(key),
            EditorMode::Visual => self.handle_visual_mode(key),
        }
    }

    /// Get a complete snapshot of editor state
    pub fn snapshot(&self) -> EditorSnapshot {
        EditorSnapshot {
            mode: self.mode,
            cursor: self.cursor,
            rows: self
                .document
                .rows()
                .iter()
                .map(|row| String::from_utf8_lossy(row.chars()).into_owned())
                .collect(),
            dirty: self.document.is_dirty(),
            pending_count: self.pending_count,
            pending_operator: self.pending_operator,
            command_line: self.command_line.clone(),
            register: String::from_utf8_lossy(&self.register).into_owned(),
            filename: self.filename.clone(),
        }
    }

    // Public accessors for rendering/testing
    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    pub fn dirty(&self) -> bool {
        self.document.is_dirty()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Render position as of the last [`EditorCore::scroll`]
    pub fn render_position(&self) -> RenderPosition {
        self.render
    }

    pub fn pending_count(&self) -> usize {
        self.pending_count
    }

    pub fn pending_operator(&self) -> Option<Operator> {
        self.pending_operator
    }

    pub fn register(&self) -> &[u8] {
        &self.register
    }

    pub fn command_line(&self) -> &str {
        &self.command_line
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// Set the text area size. Only the host knows the terminal size.
    pub fn set_screen_size(&mut self, rows: usize, cols: usize) {
        self.viewport.screen_rows = rows;
        self.viewport.screen_cols = cols;
    }

    /// Recompute the render position and scroll it into view.
    ///
    /// Called once per frame, before drawing.
    pub fn scroll(&mut self) -> RenderPosition {
        self.render = self.viewport.scroll(&self.document, self.cursor);
        self.render
    }

    /// Replace the document with `lines` read from `filename`
    pub fn load_lines<I, L>(&mut self, lines: I, filename: Option<String>)
    where
        I: IntoIterator<Item = L>,
        L: AsRef<[u8]>,
    {
        self.document = Document::from_lines(lines);
        self.reset_for_new_document(filename);
    }

    /// Start an empty document that will be saved as `filename`
    pub fn new_file(&mut self, filename: Option<String>) {
        self.document = Document::new();
        self.reset_for_new_document(filename);
    }

    /// Record a successful write of the whole document to `path`.
    ///
    /// Only a write to the current file makes the document clean; a copy
    /// written elsewhere leaves the current file's changes unsaved.
    /// Returns whether the document is now clean.
    pub fn mark_written(&mut self, path: &str) -> bool {
        if self.filename.as_deref() == Some(path) {
            self.document.mark_saved();
            tracing::debug!(path, "document clean");
        }
        !self.document.is_dirty()
    }

    fn reset_for_new_document(&mut self, filename: Option<String>) {
        self.filename = filename;
        self.cursor = Position::zero();
        self.render = RenderPosition::default();
        self.viewport.row_offset = 0;
        self.viewport.col_offset = 0;
        self.reset_pending();
    }

    // Private mode handlers

    fn handle_normal_mode(&mut self, key: Key) -> CoreOutcome {
        match key {
            // Repeat count
            Key::Char(ch @ '1'..='9') => self.push_count_digit(ch),
            Key::Char('0') if self.pending_count > 0 => self.push_count_digit('0'),

            // Operators wait for a motion
            Key::Char(ch @ ('c' | 'd' | 'y')) => {
                self.pending_operator = Operator::from_char(ch);
                CoreOutcome::Continue
            }

            // Enter insert mode
            Key::Char('i') => self.enter_insert(None),
            Key::Char('I') => self.enter_insert(Some(Motion::FirstColumn)),
            Key::Char('a') => self.enter_insert(Some(Motion::Right)),
            Key::Char('A') => self.enter_insert(Some(Motion::LineEnd)),

            // Enter command mode
            Key::Char(':') => {
                self.reset_pending();
                self.set_mode(EditorMode::Command);
                self.command_line.clear();
                CoreOutcome::Changed
            }

            Key::Escape | Key::Ctrl('l') => {
                self.reset_pending();
                CoreOutcome::Continue
            }
            key if key.is_interrupt() => {
                self.reset_pending();
                CoreOutcome::StatusMessage("Type :q and press <Enter> to exit".into())
            }

            // Delete under cursor, as `dl`
            Key::Delete => {
                let count = self.take_count();
                self.pending_operator = None;
                let end = Motion::Right.apply(&self.document, self.cursor, count);
                self.apply_operator(Operator::Delete, self.cursor, end)
            }

            Key::PageUp | Key::PageDown => {
                self.reset_pending();
                self.page(key)
            }

            _ => self.run_motion_key(key),
        }
    }

    fn handle_insert_mode(&mut self, key: Key) -> CoreOutcome {
        match key {
            key if key == Key::Escape || key.is_interrupt() => {
                self.set_mode(EditorMode::Normal);
                // Cursor steps back onto the last inserted character (vi behavior)
                self.cursor = Motion::Left.apply(&self.document, self.cursor, 1);
                CoreOutcome::Changed
            }
            Key::Enter => self.insert_newline(),
            Key::Backspace | Key::Ctrl('h') => self.backspace(),
            Key::Delete => self.delete_forward(),
            Key::Tab => self.insert_char('\t'),
            Key::Char(ch) => self.insert_char(ch),
            Key::PageUp | Key::PageDown => self.page(key),
            other => match Motion::from_key(other) {
                Some(motion) => {
                    self.cursor = motion.apply(&self.document, self.cursor, 1);
                    CoreOutcome::Changed
                }
                None => CoreOutcome::Continue,
            },
        }
    }

    fn handle_command_mode(&mut self, key: Key) -> CoreOutcome {
        match key {
            key if key == Key::Escape || key.is_interrupt() => {
                // Cancel command
                self.set_mode(EditorMode::Normal);
                self.command_line.clear();
                CoreOutcome::Changed
            }
            Key::Enter => {
                let line = ::core::mem::take(&mut self.command_line);
                self.set_mode(EditorMode::Normal);
                self.execute_command(&line)
            }
            Key::Backspace | Key::Ctrl('h') => {
                // Erasing past the start of the line abandons it
                if self.command_line.pop().is_none() {
                    self.set_mode(EditorMode::Normal);
                }
                CoreOutcome::Changed
            }
            Key::Char(ch) => {
                self.command_line.push(ch);
                CoreOutcome::Changed
            }
            Key::Tab => {
                self.command_line.push('\t');
                CoreOutcome::Changed
            }
            _ => CoreOutcome::Continue,
        }
    }

    fn handle_visual_mode(&mut self, _key: Key) -> CoreOutcome {
        self.set_mode(EditorMode::Normal);
        CoreOutcome::Changed
    }

    fn set_mode(&mut self, mode: EditorMode) {
        if self.mode != mode {
            tracing::trace!(from = self.mode.as_str(), to = mode.as_str(), "mode switch");
        }
        self.mode = mode;
    }

    // Counts, motions and operators

    fn push_count_digit(&mut self, digit: char) -> CoreOutcome {
        let value = digit.to_digit(10).unwrap_or(0) as usize;
        self.pending_count = self
            .pending_count
            .saturating_mul(10)
            .saturating_add(value);
        CoreOutcome::Continue
    }

    fn take_count(&mut self) -> usize {
        let count = ::core::mem::take(&mut self.pending_count);
        count.max(1)
    }

    fn reset_pending(&mut self) {
        self.pending_count = 0;
        self.pending_operator = None;
    }

    fn run_motion_key(&mut self, key: Key) -> CoreOutcome {
        let Some(motion) = Motion::from_key(key) else {
            self.reset_pending();
            return CoreOutcome::StatusMessage(NOT_IMPLEMENTED.into());
        };

        let count = self.take_count();
        let start = self.cursor;
        let end = motion.apply(&self.document, start, count);

        match self.pending_operator.take() {
            Some(operator) => self.apply_operator(operator, start, end),
            None => {
                self.cursor = end;
                CoreOutcome::Changed
            }
        }
    }

    fn apply_operator(
        &mut self,
        operator: Operator,
        start: Position,
        end: Position,
    ) -> CoreOutcome {
        let cursor = operator.apply(&mut self.document, &mut self.register, start, end);
        self.cursor = motion::clamp(&self.document, cursor);
        if operator == Operator::Change {
            self.set_mode(EditorMode::Insert);
        }
        CoreOutcome::Changed
    }

    fn enter_insert(&mut self, motion: Option<Motion>) -> CoreOutcome {
        self.reset_pending();
        if let Some(motion) = motion {
            self.cursor = motion.apply(&self.document, self.cursor, 1);
        }
        self.set_mode(EditorMode::Insert);
        CoreOutcome::Changed
    }

    fn page(&mut self, key: Key) -> CoreOutcome {
        let rows = self.viewport.screen_rows.max(1);
        let (top, motion) = match key {
            Key::PageUp => (self.viewport.row_offset, Motion::Up),
            _ => (self.viewport.row_offset + rows - 1, Motion::Down),
        };
        let from = motion::clamp(&self.document, Position::new(top, self.cursor.col));
        self.cursor = motion.apply(&self.document, from, rows);
        CoreOutcome::Changed
    }

    // Insert mode editing

    fn insert_char(&mut self, ch: char) -> CoreOutcome {
        let Position { row, mut col } = self.cursor;
        if row == self.document.row_count() {
            self.document.insert_row(row, b"");
        }

        let mut buf = [0u8; 4];
        for &byte in ch.encode_utf8(&mut buf).as_bytes() {
            self.document.insert_char(row, col, byte);
            col += 1;
        }
        self.cursor = Position::new(row, col);
        CoreOutcome::Changed
    }

    fn insert_newline(&mut self) -> CoreOutcome {
        let Position { row, col } = self.cursor;
        if row == self.document.row_count() {
            self.document.insert_row(row, b"");
        }

        if col == 0 {
            self.document.insert_row(row, b"");
        } else {
            let tail = self.document.truncate_row(row, col);
            self.document.insert_row(row + 1, &tail);
        }
        self.cursor = Position::new(row + 1, 0);
        CoreOutcome::Changed
    }

    fn backspace(&mut self) -> CoreOutcome {
        let Position { row, col } = self.cursor;
        if row >= self.document.row_count() {
            return CoreOutcome::Continue;
        }

        if col > 0 {
            self.document.delete_char(row, col - 1);
            self.cursor = Position::new(row, col - 1);
        } else if row > 0 {
            // Join with previous line
            let join = self.document.row_len(row - 1);
            let current: Vec<u8> = self
                .document
                .row(row)
                .map(|r| r.chars().to_vec())
                .unwrap_or_default();
            self.document.append_bytes(row - 1, &current);
            self.document.delete_row(row);
            self.cursor = Position::new(row - 1, join);
        } else {
            return CoreOutcome::Continue;
        }
        CoreOutcome::Changed
    }

    fn delete_forward(&mut self) -> CoreOutcome {
        let Position { row, col } = self.cursor;
        if col < self.document.row_len(row) {
            self.document.delete_char(row, col);
        } else if row + 1 < self.document.row_count() {
            let next: Vec<u8> = self
                .document
                .row(row + 1)
                .map(|r| r.chars().to_vec())
                .unwrap_or_default();
            self.document.append_bytes(row, &next);
            self.document.delete_row(row + 1);
        } else {
            return CoreOutcome::Continue;
        }
        CoreOutcome::Changed
    }

    // Command line

    fn execute_command(&mut self, line: &str) -> CoreOutcome {
        let command = parse_command(line);
        tracing::debug!(?command, "command");

        match command {
            Command::Empty => CoreOutcome::Changed,
            Command::Quit { force } => {
                if self.document.is_dirty() && !force {
                    CoreOutcome::StatusMessage(NO_WRITE.into())
                } else {
                    CoreOutcome::RequestExit { forced: force }
                }
            }
            Command::Write(arg) => match self.resolve_write_path(arg) {
                Some(path) => CoreOutcome::RequestIo(CoreIoRequest::Save { path }),
                None => CoreOutcome::StatusMessage(NO_FILE_NAME.into()),
            },
            Command::WriteQuit(arg) => match self.resolve_write_path(arg) {
                Some(path) => CoreOutcome::RequestIo(CoreIoRequest::SaveAndQuit { path }),
                None => CoreOutcome::StatusMessage(NO_FILE_NAME.into()),
            },
            Command::Edit { path, force } => {
                if self.document.is_dirty() && !force {
                    return CoreOutcome::StatusMessage(NO_WRITE.into());
                }
                match path.or_else(|| self.filename.clone()) {
                    Some(path) => CoreOutcome::RequestIo(CoreIoRequest::Open { path }),
                    None => CoreOutcome::StatusMessage(NO_FILE_NAME.into()),
                }
            }
            Command::Unknown(verb) => {
                CoreOutcome::StatusMessage(alloc::format!("{}: {}", NOT_IMPLEMENTED, verb))
            }
        }
    }

    /// Argument if given, else the current filename. A named write from an
    /// unnamed document adopts the name.
    fn resolve_write_path(&mut self, arg: Option<String>) -> Option<String> {
        match arg {
            Some(path) => {
                if self.filename.is_none() {
                    self.filename = Some(path.clone());
                }
                Some(path)
            }
            None => self.filename.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::{render_form, Row};
    use alloc::vec;

    fn editor_with(lines: &[&str]) -> EditorCore {
        let mut editor = EditorCore::new();
        editor.load_lines(lines.iter().map(|l| l.as_bytes()), None);
        editor
    }

    fn type_keys(editor: &mut EditorCore, text: &str) {
        for ch in text.chars() {
            editor.apply_key(Key::Char(ch));
        }
    }

    fn run_command(editor: &mut EditorCore, line: &str) -> CoreOutcome {
        editor.apply_key(Key::Char(':'));
        type_keys(editor, line);
        editor.apply_key(Key::Enter)
    }

    fn rows(editor: &EditorCore) -> Vec<&[u8]> {
        editor.document().rows().iter().map(Row::chars).collect()
    }

    #[test]
    fn test_new_editor() {
        let editor = EditorCore::new();
        assert_eq!(editor.mode(), EditorMode::Normal);
        assert_eq!(editor.cursor(), Position::zero());
        assert!(!editor.dirty());
        assert_eq!(editor.document().row_count(), 0);
    }

    #[test]
    fn test_enter_insert_mode() {
        let mut editor = EditorCore::new();
        let outcome = editor.apply_key(Key::Char('i'));
        assert_eq!(outcome, CoreOutcome::Changed);
        assert_eq!(editor.mode(), EditorMode::Insert);
    }

    #[test]
    fn test_insert_into_empty_document() {
        let mut editor = EditorCore::new();
        editor.apply_key(Key::Char('i'));
        type_keys(&mut editor, "hi");
        assert_eq!(rows(&editor), vec![&b"hi"[..]]);
        assert_eq!(editor.cursor(), Position::new(0, 2));
        assert!(editor.dirty());
    }

    #[test]
    fn test_insert_command_letters_in_insert_mode() {
        let mut editor = EditorCore::new();
        editor.apply_key(Key::Char('i'));
        type_keys(&mut editor, "iahjkldyc:0123G$");
        assert_eq!(rows(&editor), vec![&b"iahjkldyc:0123G$"[..]]);
        assert_eq!(editor.mode(), EditorMode::Insert);
    }

    #[test]
    fn test_insert_multibyte_char() {
        let mut editor = EditorCore::new();
        editor.apply_key(Key::Char('i'));
        editor.apply_key(Key::Char('é'));
        assert_eq!(rows(&editor), vec!["é".as_bytes()]);
        assert_eq!(editor.cursor(), Position::new(0, 2));
    }

    #[test]
    fn test_escape_from_insert_moves_left() {
        let mut editor = EditorCore::new();
        editor.apply_key(Key::Char('i'));
        type_keys(&mut editor, "hi");
        let outcome = editor.apply_key(Key::Escape);
        assert_eq!(outcome, CoreOutcome::Changed);
        assert_eq!(editor.mode(), EditorMode::Normal);
        assert_eq!(editor.cursor(), Position::new(0, 1));
    }

    #[test]
    fn test_interrupt_leaves_insert() {
        let mut editor = editor_with(&["abc"]);
        editor.apply_key(Key::Char('i'));
        editor.apply_key(Key::Ctrl('c'));
        assert_eq!(editor.mode(), EditorMode::Normal);
        assert_eq!(editor.cursor(), Position::zero());
    }

    #[test]
    fn test_interrupt_in_normal_mode() {
        let mut editor = editor_with(&["abc", "def"]);
        editor.apply_key(Key::Char('2'));
        editor.apply_key(Key::Char('d'));
        let outcome = editor.apply_key(Key::Ctrl('c'));
        assert_eq!(
            outcome,
            CoreOutcome::StatusMessage("Type :q and press <Enter> to exit".into())
        );
        assert_eq!(editor.pending_operator(), None);
        assert_eq!(editor.pending_count(), 0);
        assert_eq!(editor.mode(), EditorMode::Normal);

        // The next motion is a plain move, not a delete
        editor.apply_key(Key::Char('j'));
        assert_eq!(rows(&editor), vec![&b"abc"[..], b"def"]);
        assert_eq!(editor.cursor(), Position::new(1, 0));
    }

    #[test]
    fn test_interrupt_cancels_command_line() {
        let mut editor = EditorCore::new();
        editor.apply_key(Key::Char(':'));
        editor.apply_key(Key::Char('w'));
        editor.apply_key(Key::Ctrl('c'));
        assert_eq!(editor.mode(), EditorMode::Normal);
        assert_eq!(editor.command_line(), "");
    }

    #[test]
    fn test_navigation_in_insert_mode() {
        let lines: Vec<String> = (0..30).map(|i| alloc::format!("row {}", i)).collect();
        let mut editor = EditorCore::new();
        editor.load_lines(lines.iter().map(|l| l.as_bytes()), None);
        editor.set_screen_size(10, 80);
        editor.apply_key(Key::Char('i'));

        editor.apply_key(Key::End);
        assert_eq!(editor.cursor(), Position::new(0, 5));
        editor.apply_key(Key::Left);
        assert_eq!(editor.cursor(), Position::new(0, 4));
        editor.apply_key(Key::Down);
        assert_eq!(editor.cursor(), Position::new(1, 4));
        editor.apply_key(Key::Home);
        assert_eq!(editor.cursor(), Position::new(1, 0));

        editor.apply_key(Key::PageDown);
        assert_eq!(editor.cursor().row, 19);
        assert_eq!(editor.mode(), EditorMode::Insert);
        assert!(!editor.dirty());

        // Typed text lands at the moved cursor
        editor.apply_key(Key::Char('>'));
        assert_eq!(editor.document().row(19).unwrap().chars(), b">row 19");
    }

    #[test]
    fn test_enter_splits_row() {
        let mut editor = editor_with(&["hello"]);
        editor.apply_key(Key::Char('l'));
        editor.apply_key(Key::Char('l'));
        editor.apply_key(Key::Char('i'));
        editor.apply_key(Key::Enter);
        assert_eq!(rows(&editor), vec![&b"he"[..], b"llo"]);
        assert_eq!(editor.cursor(), Position::new(1, 0));
    }

    #[test]
    fn test_enter_at_column_zero_opens_row_above() {
        let mut editor = editor_with(&["hello"]);
        editor.apply_key(Key::Char('i'));
        editor.apply_key(Key::Enter);
        assert_eq!(rows(&editor), vec![&b""[..], b"hello"]);
        assert_eq!(editor.cursor(), Position::new(1, 0));
    }

    #[test]
    fn test_backspace_to_empty_row() {
        let mut editor = editor_with(&["abc", "def"]);
        editor.apply_key(Key::Char('A'));
        assert_eq!(editor.cursor(), Position::new(0, 3));
        for _ in 0..3 {
            editor.apply_key(Key::Backspace);
        }
        assert_eq!(rows(&editor), vec![&b""[..], b"def"]);
        assert_eq!(editor.cursor(), Position::zero());

        // Nothing left of (0, 0)
        assert_eq!(editor.apply_key(Key::Backspace), CoreOutcome::Continue);
    }

    #[test]
    fn test_backspace_joins_rows() {
        let mut editor = editor_with(&["hello", "world"]);
        editor.apply_key(Key::Char('j'));
        editor.apply_key(Key::Char('i'));
        editor.apply_key(Key::Backspace);
        assert_eq!(rows(&editor), vec![&b"helloworld"[..]]);
        assert_eq!(editor.cursor(), Position::new(0, 5));
    }

    #[test]
    fn test_delete_key_in_insert_joins_next_row() {
        let mut editor = editor_with(&["ab", "cd"]);
        editor.apply_key(Key::Char('A'));
        editor.apply_key(Key::Delete);
        assert_eq!(rows(&editor), vec![&b"abcd"[..]]);
        editor.apply_key(Key::Delete);
        assert_eq!(rows(&editor), vec![&b"abd"[..]]);
    }

    #[test]
    fn test_render_form_never_stale() {
        let mut editor = editor_with(&["a\tb", "\tc"]);
        editor.apply_key(Key::Char('i'));
        type_keys(&mut editor, "\tx");
        editor.apply_key(Key::Tab);
        editor.apply_key(Key::Enter);
        editor.apply_key(Key::Backspace);
        editor.apply_key(Key::Delete);
        for row in editor.document().rows() {
            assert_eq!(row.render(), render_form(row.chars()).as_slice());
        }
    }

    #[test]
    fn test_navigation_normal_mode() {
        let mut editor = editor_with(&["hello", "world"]);

        editor.apply_key(Key::Char('j'));
        assert_eq!(editor.cursor().row, 1);

        editor.apply_key(Key::Char('l'));
        assert_eq!(editor.cursor().col, 1);

        editor.apply_key(Key::Char('k'));
        assert_eq!(editor.cursor().row, 0);

        editor.apply_key(Key::Char('h'));
        assert_eq!(editor.cursor().col, 0);

        editor.apply_key(Key::Down);
        editor.apply_key(Key::End);
        assert_eq!(editor.cursor(), Position::new(1, 5));
        editor.apply_key(Key::Home);
        assert_eq!(editor.cursor(), Position::new(1, 0));
    }

    #[test]
    fn test_count_prefix() {
        let mut editor = editor_with(&["0123456789abcdef"]);
        type_keys(&mut editor, "12");
        assert_eq!(editor.pending_count(), 12);
        editor.apply_key(Key::Char('l'));
        assert_eq!(editor.cursor().col, 12);
        assert_eq!(editor.pending_count(), 0);

        type_keys(&mut editor, "10h");
        assert_eq!(editor.cursor().col, 2);
    }

    #[test]
    fn test_zero_without_count_is_not_a_count() {
        let mut editor = editor_with(&["abc"]);
        let outcome = editor.apply_key(Key::Char('0'));
        assert_eq!(outcome, CoreOutcome::StatusMessage("not implemented".into()));
        assert_eq!(editor.pending_count(), 0);
    }

    #[test]
    fn test_unmapped_key_clears_pending_state() {
        let mut editor = editor_with(&["abc", "def"]);
        type_keys(&mut editor, "3d");
        let before = editor.cursor();
        let outcome = editor.apply_key(Key::Char('z'));
        assert_eq!(outcome, CoreOutcome::StatusMessage("not implemented".into()));
        assert_eq!(editor.cursor(), before);
        assert_eq!(editor.pending_count(), 0);
        assert_eq!(editor.pending_operator(), None);
        assert_eq!(rows(&editor), vec![&b"abc"[..], b"def"]);
    }

    #[test]
    fn test_counted_delete_down() {
        let mut editor = editor_with(&["r0", "r1", "r2", "r3", "r4"]);
        type_keys(&mut editor, "3");
        editor.apply_key(Key::Char('d'));
        assert_eq!(editor.pending_operator(), Some(Operator::Delete));
        editor.apply_key(Key::Char('j'));

        assert_eq!(rows(&editor), vec![&b"r3"[..], b"r4"]);
        assert_eq!(editor.cursor(), Position::zero());
        assert_eq!(editor.register(), b"r0\nr1\nr2\n");
        assert_eq!(editor.pending_operator(), None);
        assert!(editor.dirty());
    }

    #[test]
    fn test_delete_to_line_end() {
        let mut editor = editor_with(&["hello world"]);
        type_keys(&mut editor, "5ld$");
        assert_eq!(rows(&editor), vec![&b"hello"[..]]);
        assert_eq!(editor.register(), b" world");
        assert_eq!(editor.cursor(), Position::new(0, 5));
    }

    #[test]
    fn test_delete_backwards_motion() {
        let mut editor = editor_with(&["hello"]);
        type_keys(&mut editor, "3l2dh");
        assert_eq!(rows(&editor), vec![&b"hlo"[..]]);
        assert_eq!(editor.cursor(), Position::new(0, 1));
    }

    #[test]
    fn test_yank_keeps_document() {
        let mut editor = editor_with(&["hello", "world"]);
        type_keys(&mut editor, "y$");
        assert_eq!(editor.register(), b"hello");
        assert_eq!(rows(&editor), vec![&b"hello"[..], b"world"]);
        assert!(!editor.dirty());
        assert_eq!(editor.cursor(), Position::zero());
    }

    #[test]
    fn test_change_enters_insert_at_range_start() {
        let mut editor = editor_with(&["hello world"]);
        type_keys(&mut editor, "c5l");
        assert_eq!(editor.mode(), EditorMode::Insert);
        assert_eq!(editor.cursor(), Position::zero());
        type_keys(&mut editor, "howdy");
        assert_eq!(rows(&editor), vec![&b"howdy world"[..]]);
    }

    #[test]
    fn test_delete_key_in_normal_mode() {
        let mut editor = editor_with(&["hello"]);
        editor.apply_key(Key::Delete);
        assert_eq!(rows(&editor), vec![&b"ello"[..]]);
        assert_eq!(editor.register(), b"h");
    }

    #[test]
    fn test_word_motion_operator_is_noop() {
        // Word motions don't move yet, so `dw` spans nothing.
        let mut editor = editor_with(&["hello world"]);
        type_keys(&mut editor, "dw");
        assert_eq!(rows(&editor), vec![&b"hello world"[..]]);
        assert!(!editor.dirty());
    }

    #[test]
    fn test_insert_variants() {
        let mut editor = editor_with(&["  abc"]);
        editor.apply_key(Key::Char('A'));
        assert_eq!(editor.cursor(), Position::new(0, 5));
        editor.apply_key(Key::Escape);

        editor.apply_key(Key::Char('I'));
        assert_eq!(editor.cursor(), Position::new(0, 0));
        editor.apply_key(Key::Escape);

        editor.apply_key(Key::Char('a'));
        assert_eq!(editor.cursor(), Position::new(0, 1));
        assert_eq!(editor.mode(), EditorMode::Insert);
    }

    #[test]
    fn test_document_start_end() {
        let mut editor = editor_with(&["one", "two", "three"]);
        editor.apply_key(Key::Char('G'));
        assert_eq!(editor.cursor(), Position::new(2, 0));
        editor.apply_key(Key::Char('G'));
        assert_eq!(editor.cursor(), Position::new(2, 0));
        editor.apply_key(Key::Char('g'));
        assert_eq!(editor.cursor(), Position::new(0, 0));
    }

    #[test]
    fn test_page_down_and_up() {
        let lines: Vec<String> = (0..50).map(|i| alloc::format!("line {}", i)).collect();
        let mut editor = EditorCore::new();
        editor.load_lines(lines.iter().map(|l| l.as_bytes()), None);
        editor.set_screen_size(10, 80);

        editor.apply_key(Key::PageDown);
        assert_eq!(editor.cursor().row, 19);
        editor.scroll();
        assert_eq!(editor.viewport().row_offset, 10);

        editor.apply_key(Key::PageUp);
        assert_eq!(editor.cursor().row, 0);
    }

    #[test]
    fn test_scroll_tracks_tabs() {
        let mut editor = editor_with(&["\tabcdefghi"]);
        editor.set_screen_size(5, 80);
        editor.apply_key(Key::Char('l'));
        let render = editor.scroll();
        assert_eq!(render, RenderPosition { rx: 8, ry: 0 });
    }

    #[test]
    fn test_command_mode() {
        let mut editor = EditorCore::new();
        editor.apply_key(Key::Char(':'));
        assert_eq!(editor.mode(), EditorMode::Command);

        editor.apply_key(Key::Char('q'));
        assert_eq!(editor.command_line(), "q");

        editor.apply_key(Key::Backspace);
        assert_eq!(editor.command_line(), "");
        assert_eq!(editor.mode(), EditorMode::Command);

        // Erasing an empty line abandons it
        editor.apply_key(Key::Backspace);
        assert_eq!(editor.mode(), EditorMode::Normal);
    }

    #[test]
    fn test_escape_cancels_command() {
        let mut editor = EditorCore::new();
        editor.apply_key(Key::Char(':'));
        editor.apply_key(Key::Char('q'));
        editor.apply_key(Key::Escape);
        assert_eq!(editor.mode(), EditorMode::Normal);
        assert_eq!(editor.command_line(), "");
    }

    #[test]
    fn test_quit_command() {
        let mut editor = EditorCore::new();
        let outcome = run_command(&mut editor, "q");
        assert_eq!(outcome, CoreOutcome::RequestExit { forced: false });
    }

    #[test]
    fn test_quit_dirty_fails() {
        let mut editor = EditorCore::new();
        editor.apply_key(Key::Char('i'));
        editor.apply_key(Key::Char('x'));
        editor.apply_key(Key::Escape);

        let outcome = run_command(&mut editor, "q");
        assert_eq!(
            outcome,
            CoreOutcome::StatusMessage("No write since last change (add ! to override)".into())
        );
        assert_eq!(editor.mode(), EditorMode::Normal);
    }

    #[test]
    fn test_force_quit() {
        let mut editor = EditorCore::new();
        editor.apply_key(Key::Char('i'));
        editor.apply_key(Key::Char('x'));
        editor.apply_key(Key::Escape);

        let outcome = run_command(&mut editor, "q!");
        assert_eq!(outcome, CoreOutcome::RequestExit { forced: true });
    }

    #[test]
    fn test_write_without_name() {
        let mut editor = EditorCore::new();
        let outcome = run_command(&mut editor, "w");
        assert_eq!(outcome, CoreOutcome::StatusMessage("No file name".into()));
    }

    #[test]
    fn test_write_with_argument_adopts_name() {
        let mut editor = EditorCore::new();
        let outcome = run_command(&mut editor, "w out.txt");
        assert_eq!(
            outcome,
            CoreOutcome::RequestIo(CoreIoRequest::Save {
                path: "out.txt".into()
            })
        );
        assert_eq!(editor.filename(), Some("out.txt"));

        let outcome = run_command(&mut editor, "w other.txt");
        assert_eq!(
            outcome,
            CoreOutcome::RequestIo(CoreIoRequest::Save {
                path: "other.txt".into()
            })
        );
        assert_eq!(editor.filename(), Some("out.txt"));
    }

    #[test]
    fn test_write_quit_command() {
        let mut editor = EditorCore::new();
        editor.load_lines([b"x"], Some("file.txt".into()));
        let outcome = run_command(&mut editor, "wq");
        assert_eq!(
            outcome,
            CoreOutcome::RequestIo(CoreIoRequest::SaveAndQuit {
                path: "file.txt".into()
            })
        );
    }

    #[test]
    fn test_edit_refused_when_dirty() {
        let mut editor = editor_with(&["abc"]);
        type_keys(&mut editor, "dl");
        assert!(editor.dirty());

        let outcome = run_command(&mut editor, "e other.txt");
        assert_eq!(
            outcome,
            CoreOutcome::StatusMessage("No write since last change (add ! to override)".into())
        );

        let outcome = run_command(&mut editor, "e! other.txt");
        assert_eq!(
            outcome,
            CoreOutcome::RequestIo(CoreIoRequest::Open {
                path: "other.txt".into()
            })
        );
    }

    #[test]
    fn test_edit_reloads_current_file() {
        let mut editor = EditorCore::new();
        editor.load_lines([b"x"], Some("file.txt".into()));
        let outcome = run_command(&mut editor, "e");
        assert_eq!(
            outcome,
            CoreOutcome::RequestIo(CoreIoRequest::Open {
                path: "file.txt".into()
            })
        );
    }

    #[test]
    fn test_unknown_command() {
        let mut editor = EditorCore::new();
        let outcome = run_command(&mut editor, "set number");
        assert_eq!(
            outcome,
            CoreOutcome::StatusMessage("not implemented: set".into())
        );
        assert_eq!(editor.mode(), EditorMode::Normal);
    }

    #[test]
    fn test_load_lines_resets_state() {
        let mut editor = editor_with(&["abc", "def"]);
        type_keys(&mut editor, "jl2");
        editor.load_lines([b"new"], Some("new.txt".into()));
        assert_eq!(editor.cursor(), Position::zero());
        assert_eq!(editor.pending_count(), 0);
        assert!(!editor.dirty());
        assert_eq!(editor.filename(), Some("new.txt"));
    }

    #[test]
    fn test_mark_written_current_file() {
        let mut editor = EditorCore::new();
        editor.load_lines([b"orig"], Some("a.txt".into()));
        editor.apply_key(Key::Char('i'));
        editor.apply_key(Key::Char('x'));
        assert!(editor.dirty());

        assert!(editor.mark_written("a.txt"));
        assert!(!editor.dirty());
    }

    #[test]
    fn test_write_elsewhere_keeps_dirty() {
        let mut editor = EditorCore::new();
        editor.load_lines([b"orig"], Some("a.txt".into()));
        editor.apply_key(Key::Char('i'));
        editor.apply_key(Key::Char('X'));
        editor.apply_key(Key::Escape);

        let outcome = run_command(&mut editor, "w backup.txt");
        assert_eq!(
            outcome,
            CoreOutcome::RequestIo(CoreIoRequest::Save {
                path: "backup.txt".into()
            })
        );
        assert!(!editor.mark_written("backup.txt"));
        assert!(editor.dirty());
        assert_eq!(editor.filename(), Some("a.txt"));

        let outcome = run_command(&mut editor, "q");
        assert_eq!(
            outcome,
            CoreOutcome::StatusMessage("No write since last change (add ! to override)".into())
        );
    }

    #[test]
    fn test_write_adopting_name_makes_clean() {
        let mut editor = EditorCore::new();
        editor.apply_key(Key::Char('i'));
        editor.apply_key(Key::Char('x'));
        editor.apply_key(Key::Escape);

        run_command(&mut editor, "w new.txt");
        assert!(editor.mark_written("new.txt"));
        assert_eq!(run_command(&mut editor, "q"), CoreOutcome::RequestExit { forced: false });
    }

    #[test]
    fn test_snapshot() {
        let mut editor = editor_with(&["test"]);
        editor.apply_key(Key::Char('i'));
        editor.apply_key(Key::Char('!'));

        let snapshot = editor.snapshot();
        assert_eq!(snapshot.mode, EditorMode::Insert);
        assert_eq!(snapshot.cursor, Position::new(0, 1));
        assert_eq!(snapshot.rows, vec![String::from("!test")]);
        assert!(snapshot.dirty);
    }
}
