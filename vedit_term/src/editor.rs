//! Main editor implementation
//!
//! [`Editor`] wraps the [`EditorCore`] state machine and carries out the
//! requests it makes: file I/O through an [`EditorIo`], quitting, and the
//! timed status message shown under the status bar.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use thiserror::Error;
use vedit_core::{CoreIoRequest, CoreOutcome, EditorCore, EditorSnapshot, Key};

use crate::config::ConfigError;
use crate::input_script::InputScriptError;
use crate::io::{EditorIo, IoError};
use crate::render::{EditorView, Frame};

/// Editor error
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    #[error("Script error: {0}")]
    Script(#[from] InputScriptError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Cannot open log file {}: {source}", .path.display())]
    LogFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot read script {}: {source}", .path.display())]
    ScriptFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// Editor result
pub type EditorResult<T> = Result<T, EditorError>;

/// Editor action result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorAction {
    /// Continue editing
    Continue,
    /// Quit the editor
    Quit,
    /// Document was saved
    Saved { path: String, bytes: usize },
}

#[derive(Debug, Clone)]
struct StatusMessage {
    text: String,
    set_at: Instant,
}

/// The vi-like editor
pub struct Editor<Io: EditorIo> {
    core: EditorCore,
    io: Io,
    view: EditorView,
    status: Option<StatusMessage>,
    message_timeout: Duration,
}

impl<Io: EditorIo> Editor<Io> {
    /// Create a new editor on an empty document
    pub fn new(io: Io) -> Self {
        Self {
            core: EditorCore::new(),
            io,
            view: EditorView::default(),
            status: None,
            message_timeout: Duration::from_secs(5),
        }
    }

    /// How long a status message stays on screen
    pub fn with_message_timeout(mut self, timeout: Duration) -> Self {
        self.message_timeout = timeout;
        self
    }

    pub fn core(&self) -> &EditorCore {
        &self.core
    }

    pub fn io(&self) -> &Io {
        &self.io
    }

    pub fn snapshot(&self) -> EditorSnapshot {
        self.core.snapshot()
    }

    /// Set the text area size (window minus status bar and message line)
    pub fn set_screen_size(&mut self, rows: usize, cols: usize) {
        self.core.set_screen_size(rows, cols);
    }

    pub fn set_status_message(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            set_at: Instant::now(),
        });
    }

    /// Current status message, if it is still fresh
    pub fn status_message(&self) -> Option<&str> {
        self.status
            .as_ref()
            .filter(|status| status.set_at.elapsed() < self.message_timeout)
            .map(|status| status.text.as_str())
    }

    /// Load `path` into the editor. A missing file starts an empty
    /// document under that name.
    pub fn open(&mut self, path: &str) -> EditorResult<()> {
        match self.io.open(path) {
            Ok(lines) => {
                let count = lines.len();
                self.core.load_lines(lines, Some(path.to_string()));
                self.set_status_message(format!("\"{}\" {}L", path, count));
                Ok(())
            }
            Err(IoError::NotFound) => {
                tracing::info!(path, "new file");
                self.core.new_file(Some(path.to_string()));
                self.set_status_message(format!("\"{}\" [New File]", path));
                Ok(())
            }
            Err(err) => {
                tracing::warn!(path, error = %err, "open failed");
                Err(err.into())
            }
        }
    }

    /// Process one key
    ///
    /// Errors are recoverable: the document is left as it was and the
    /// caller should show the error as a status message.
    pub fn process_key(&mut self, key: Key) -> EditorResult<EditorAction> {
        match self.core.apply_key(key) {
            CoreOutcome::Continue | CoreOutcome::Changed => Ok(EditorAction::Continue),
            CoreOutcome::RequestExit { forced } => {
                tracing::info!(forced, "quit");
                Ok(EditorAction::Quit)
            }
            CoreOutcome::StatusMessage(text) => {
                self.set_status_message(text);
                Ok(EditorAction::Continue)
            }
            CoreOutcome::RequestIo(request) => self.handle_io(request),
        }
    }

    /// Process a key, turning any error into a status message
    pub fn handle_key(&mut self, key: Key) -> EditorAction {
        self.process_key(key).unwrap_or_else(|err| {
            self.set_status_message(err.to_string());
            EditorAction::Continue
        })
    }

    /// Scroll the viewport to the cursor and compose the next frame
    pub fn frame(&mut self) -> Frame {
        self.core.scroll();
        self.view.render(&self.core, self.status_message())
    }

    fn handle_io(&mut self, request: CoreIoRequest) -> EditorResult<EditorAction> {
        match request {
            CoreIoRequest::Save { path } => self.save(path),
            CoreIoRequest::SaveAndQuit { path } => {
                self.save(path)?;
                Ok(EditorAction::Quit)
            }
            CoreIoRequest::Open { path } => {
                self.open(&path)?;
                Ok(EditorAction::Continue)
            }
        }
    }

    fn save(&mut self, path: String) -> EditorResult<EditorAction> {
        let stream = self.core.document().to_byte_stream();
        let bytes = self.io.save(&path, &stream)?;
        self.core.mark_written(&path);
        self.set_status_message(format!(
            "\"{}\" {}L, {}B written",
            path,
            self.core.document().row_count(),
            bytes
        ));
        Ok(EditorAction::Saved { path, bytes })
    }
}
