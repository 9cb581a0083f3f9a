//! File logging
//!
//! The screen belongs to the editor, so logs only ever go to a file.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::LOG_FILTER_ENV;
use crate::editor::{EditorError, EditorResult};

/// Default filter when `VEDIT_LOG` is unset or invalid
pub const DEFAULT_FILTER: &str = "info";

/// Build the filter from `VEDIT_LOG`, falling back to [`DEFAULT_FILTER`]
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install a global subscriber writing to `path` (truncated)
pub fn init(path: &Path) -> EditorResult<()> {
    let file = File::create(path).map_err(|source| EditorError::LogFile {
        path: path.to_path_buf(),
        source,
    })?;

    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();

    // A subscriber may already be installed (tests); keep it.
    if installed.is_ok() {
        tracing::info!(path = %path.display(), "logging started");
    }
    Ok(())
}
