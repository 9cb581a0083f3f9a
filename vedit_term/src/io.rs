//! Document I/O operations

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, Write};

use thiserror::Error;

/// Document I/O error
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IoError {
    #[error("Document not found")]
    NotFound,

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("I/O error: {0}")]
    Other(String),
}

impl IoError {
    fn from_io(path: &str, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => IoError::NotFound,
            io::ErrorKind::PermissionDenied => IoError::PermissionDenied(path.to_string()),
            _ => IoError::Other(err.to_string()),
        }
    }
}

/// Editor I/O abstraction.
///
/// Whole documents only: `open` yields the lines of a file without their
/// terminators, `save` replaces a file with a byte stream.
pub trait EditorIo {
    fn open(&mut self, path: &str) -> Result<Vec<Vec<u8>>, IoError>;
    /// Returns the number of bytes written
    fn save(&mut self, path: &str, bytes: &[u8]) -> Result<usize, IoError>;
}

/// Split a file's bytes into lines. A trailing newline does not start a
/// new line; `\r` is left for the document to strip.
pub fn split_lines(bytes: &[u8]) -> Vec<Vec<u8>> {
    let mut lines: Vec<Vec<u8>> = bytes.split(|&b| b == b'\n').map(<[u8]>::to_vec).collect();
    if bytes.is_empty() || bytes.ends_with(b"\n") {
        lines.pop();
    }
    lines
}

/// Editor I/O on the local file system
#[derive(Debug, Default, Clone, Copy)]
pub struct FsEditorIo;

impl FsEditorIo {
    pub fn new() -> Self {
        Self
    }
}

impl EditorIo for FsEditorIo {
    fn open(&mut self, path: &str) -> Result<Vec<Vec<u8>>, IoError> {
        let bytes = fs::read(path).map_err(|err| IoError::from_io(path, err))?;
        let lines = split_lines(&bytes);
        tracing::info!(path, lines = lines.len(), bytes = bytes.len(), "opened file");
        Ok(lines)
    }

    fn save(&mut self, path: &str, bytes: &[u8]) -> Result<usize, IoError> {
        let write = || -> io::Result<()> {
            let mut file = File::create(path)?;
            file.write_all(bytes)?;
            file.flush()
        };
        write().map_err(|err| {
            tracing::warn!(path, error = %err, "save failed");
            IoError::from_io(path, err)
        })?;
        tracing::info!(path, bytes = bytes.len(), "saved file");
        Ok(bytes.len())
    }
}

/// In-memory editor I/O, keyed by path
#[derive(Debug, Default, Clone)]
pub struct MemoryEditorIo {
    files: HashMap<String, Vec<u8>>,
}

impl MemoryEditorIo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        self.files.insert(path.into(), contents.into());
        self
    }

    pub fn file(&self, path: &str) -> Option<&[u8]> {
        self.files.get(path).map(Vec::as_slice)
    }
}

impl EditorIo for MemoryEditorIo {
    fn open(&mut self, path: &str) -> Result<Vec<Vec<u8>>, IoError> {
        self.files
            .get(path)
            .map(|bytes| split_lines(bytes))
            .ok_or(IoError::NotFound)
    }

    fn save(&mut self, path: &str, bytes: &[u8]) -> Result<usize, IoError> {
        self.files.insert(path.to_string(), bytes.to_vec());
        Ok(bytes.len())
    }
}
