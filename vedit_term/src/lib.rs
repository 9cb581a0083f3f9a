//! # vedit terminal host
//!
//! Runs the `vedit_core` editing engine on a real terminal.
//!
//! ## Philosophy
//!
//! - **Thin host**: All editing semantics live in the core
//! - **Requests, not side effects**: The core asks for I/O, the host performs it
//! - **Testable**: Headless runs from key scripts, in-memory I/O for tests
//!
//! ## Design
//!
//! - `Editor` owns the core, an `EditorIo` and the status message clock
//! - `EditorView` composes a `Frame`; `Terminal` draws it with crossterm
//! - `runtime` holds the interactive and scripted control loops
//! - Logging goes to a file through `tracing`, never to the screen

pub mod config;
pub mod editor;
pub mod input_script;
pub mod io;
pub mod logging;
pub mod render;
pub mod runtime;
pub mod terminal;

pub use config::{ConfigError, EditorConfig};
pub use editor::{Editor, EditorAction, EditorError, EditorResult};
pub use input_script::{InputScript, InputScriptError};
pub use io::{EditorIo, FsEditorIo, IoError, MemoryEditorIo};
pub use render::{EditorView, Frame};
pub use runtime::{run_interactive, run_script};
pub use terminal::Terminal;
