//! A single line of the document

use alloc::vec::Vec;

/// Columns between tab stops
pub const TAB_STOP: usize = 8;

/// Expand tabs in `chars` to the next multiple of [`TAB_STOP`].
///
/// A tab always produces at least one space. Every other byte is copied
/// through unchanged and occupies one column.
pub fn render_form(chars: &[u8]) -> Vec<u8> {
    let tabs = chars.iter().filter(|&&b| b == b'\t').count();
    let mut render = Vec::with_capacity(chars.len() + tabs * (TAB_STOP - 1));

    for &byte in chars {
        if byte == b'\t' {
            render.push(b' ');
            while render.len() % TAB_STOP != 0 {
                render.push(b' ');
            }
        } else {
            render.push(byte);
        }
    }

    render
}

/// One row of text: raw bytes plus the derived display form
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    chars: Vec<u8>,
    render: Vec<u8>,
}

impl Row {
    pub fn new(chars: Vec<u8>) -> Self {
        let render = render_form(&chars);
        Self { chars, render }
    }

    pub fn chars(&self) -> &[u8] {
        &self.chars
    }

    pub fn render(&self) -> &[u8] {
        &self.render
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Insert a byte, clamping `at` to the row length
    pub fn insert(&mut self, at: usize, byte: u8) {
        let at = at.min(self.chars.len());
        self.chars.insert(at, byte);
        self.update();
    }

    /// Remove the byte at `at`. Returns false if `at` is past the end.
    pub fn delete(&mut self, at: usize) -> bool {
        if at >= self.chars.len() {
            return false;
        }
        self.chars.remove(at);
        self.update();
        true
    }

    pub fn append(&mut self, bytes: &[u8]) {
        self.chars.extend_from_slice(bytes);
        self.update();
    }

    /// Cut the row at `at`, returning everything from `at` onwards
    pub fn split_off(&mut self, at: usize) -> Vec<u8> {
        let at = at.min(self.chars.len());
        let tail = self.chars.split_off(at);
        self.update();
        tail
    }

    /// Remove `start..end` (clamped), returning the removed bytes
    pub fn drain(&mut self, start: usize, end: usize) -> Vec<u8> {
        let end = end.min(self.chars.len());
        let start = start.min(end);
        let removed = self.chars.drain(start..end).collect();
        self.update();
        removed
    }

    fn update(&mut self) {
        self.render = render_form(&self.chars);
    }
}
