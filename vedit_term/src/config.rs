//! Command-line and environment configuration

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Environment variable naming the log file when `--log` is absent
pub const LOG_FILE_ENV: &str = "VEDIT_LOG_FILE";
/// Environment variable holding the log filter directives
pub const LOG_FILTER_ENV: &str = "VEDIT_LOG";

/// Configuration error
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing value for {0}")]
    MissingValue(String),

    #[error("Invalid size: {0} (expected <rows>x<cols>)")]
    InvalidSize(String),

    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Unexpected argument: {0}")]
    UnexpectedArgument(String),
}

/// Editor configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    /// File to open
    pub file: Option<PathBuf>,
    /// Where to write logs; no logging without it
    pub log_file: Option<PathBuf>,
    /// Key script to run headless instead of the terminal
    pub script: Option<PathBuf>,
    /// Window size (rows, cols) for headless runs
    pub size: Option<(u16, u16)>,
    /// How long a status message stays visible
    pub message_timeout: Duration,
    /// `--help` was given
    pub show_help: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            file: None,
            log_file: None,
            script: None,
            size: None,
            message_timeout: Duration::from_secs(5),
            show_help: false,
        }
    }
}

impl EditorConfig {
    /// Window size used when no terminal is attached
    pub const DEFAULT_SCRIPT_SIZE: (u16, u16) = (24, 80);

    /// Parse `args` (without the program name)
    pub fn from_args<I, S>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter().map(Into::<String>::into);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--log" | "-l" => {
                    let value = args.next().ok_or_else(|| ConfigError::MissingValue(arg.clone()))?;
                    config.log_file = Some(PathBuf::from(value));
                }
                "--script" | "-s" => {
                    let value = args.next().ok_or_else(|| ConfigError::MissingValue(arg.clone()))?;
                    config.script = Some(PathBuf::from(value));
                }
                "--size" => {
                    let value = args.next().ok_or_else(|| ConfigError::MissingValue(arg.clone()))?;
                    config.size = Some(parse_size(&value)?);
                }
                "--help" | "-h" => {
                    config.show_help = true;
                }
                other if other.starts_with('-') && other.len() > 1 => {
                    return Err(ConfigError::UnknownOption(other.to_string()));
                }
                _ if config.file.is_none() => {
                    config.file = Some(PathBuf::from(&arg));
                }
                _ => return Err(ConfigError::UnexpectedArgument(arg.clone())),
            }
        }

        Ok(config)
    }

    /// Fill unset values from the environment
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.log_file.is_none() {
            self.log_file = lookup(LOG_FILE_ENV)
                .filter(|value| !value.is_empty())
                .map(PathBuf::from);
        }
    }

    pub fn script_size(&self) -> (u16, u16) {
        self.size.unwrap_or(Self::DEFAULT_SCRIPT_SIZE)
    }
}

/// Parse `<rows>x<cols>`
fn parse_size(value: &str) -> Result<(u16, u16), ConfigError> {
    let invalid = || ConfigError::InvalidSize(value.to_string());
    let (rows, cols) = value.split_once(['x', 'X']).ok_or_else(invalid)?;
    let rows = rows.trim().parse().map_err(|_| invalid())?;
    let cols = cols.trim().parse().map_err(|_| invalid())?;
    Ok((rows, cols))
}

/// Usage text for `--help` and argument errors
pub fn usage(program: &str) -> String {
    format!(
        "Usage: {program} [OPTIONS] [FILE]

Options:
  -l, --log <FILE>         Write logs to FILE (or set {LOG_FILE_ENV}); filter with {LOG_FILTER_ENV}
  -s, --script <FILE>      Run a key script headless and print the final state as JSON
  --size <ROWS>x<COLS>     Window size for --script (default 24x80)
  -h, --help               Show this help message

Examples:
  {program} notes.txt
  {program} --script keys.txt --size 10x40 notes.txt"
    )
}
