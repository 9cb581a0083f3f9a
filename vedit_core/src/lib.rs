#![no_std]

//! # vedit core
//!
//! The editing engine behind the `vedit` terminal editor.
//!
//! ## Philosophy
//!
//! - **No_std compatible**: Uses alloc but not std
//! - **Deterministic**: Same key sequence => same editor state
//! - **Modal editing**: Normal, Insert, Command modes (Visual reserved)
//! - **Mechanism over policy**: Core computes state, hosts draw and persist it
//! - **No ambient authority**: File access is requested, never performed
//!
//! ## Design
//!
//! The core provides:
//! - Row / Document: byte rows with a tab-expanded render form
//! - Viewport: render column and minimal scrolling
//! - Motion: closed set of cursor motions evaluated against a document
//! - Operator: delete / yank / change over a motion range
//! - EditorCore: the modal state machine tying it together
//! - EditorSnapshot: deterministic state for tests and headless runs

extern crate alloc;

pub mod command;
pub mod core;
pub mod document;
pub mod key;
pub mod mode;
pub mod motion;
pub mod operator;
pub mod row;
pub mod snapshot;
pub mod viewport;

pub use command::{parse_command, Command};
pub use crate::core::{CoreIoRequest, CoreOutcome, EditorCore};
pub use document::Document;
pub use key::Key;
pub use mode::EditorMode;
pub use motion::Motion;
pub use operator::Operator;
pub use row::{render_form, Row, TAB_STOP};
pub use snapshot::EditorSnapshot;
pub use viewport::{Position, RenderPosition, Viewport};
