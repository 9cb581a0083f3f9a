//! Colon command parsing

use alloc::string::String;

/// Parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Nothing typed
    Empty,
    /// `:q` / `:q!`
    Quit { force: bool },
    /// `:w [path]`
    Write(Option<String>),
    /// `:wq [path]`
    WriteQuit(Option<String>),
    /// `:e [path]` / `:e! [path]`
    Edit { path: Option<String>, force: bool },
    /// Anything else, carrying the verb
    Unknown(String),
}

/// Parse a command line (without the leading ':')
///
/// The line is trimmed and split on the first run of whitespace into a
/// verb and an optional argument.
pub fn parse_command(line: &str) -> Command {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Command::Empty;
    }

    let (verb, arg) = match trimmed.find(char::is_whitespace) {
        Some(split) => (&trimmed[..split], trimmed[split..].trim_start()),
        None => (trimmed, ""),
    };
    let arg = (!arg.is_empty()).then(|| String::from(arg));

    match verb {
        "q" => Command::Quit { force: false },
        "q!" => Command::Quit { force: true },
        "w" => Command::Write(arg),
        "wq" => Command::WriteQuit(arg),
        "e" => Command::Edit {
            path: arg,
            force: false,
        },
        "e!" => Command::Edit {
            path: arg,
            force: true,
        },
        _ => Command::Unknown(verb.into()),
    }
}
