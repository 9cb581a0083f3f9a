//! # vedit
//!
//! Entry point for the vedit terminal editor.

use std::env;
use std::fs;
use std::io::{self, Write};
use std::process;

use vedit_term::terminal::install_panic_hook;
use vedit_term::{
    logging, run_interactive, run_script, Editor, EditorConfig, EditorError, EditorResult,
    FsEditorIo, InputScript,
};

fn main() {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("vedit");

    let mut config = EditorConfig::from_args(args.iter().skip(1).cloned()).unwrap_or_else(|e| {
        eprintln!("vedit: {}", e);
        eprintln!("{}", vedit_term::config::usage(program));
        process::exit(1);
    });
    if config.show_help {
        println!("{}", vedit_term::config::usage(program));
        return;
    }
    config.apply_env(|name| env::var(name).ok());

    // Runs after the terminal guard has been dropped
    if let Err(e) = run(&config) {
        tracing::error!(error = %e, "fatal");
        eprintln!("vedit: {}", e);
        process::exit(1);
    }
}

fn run(config: &EditorConfig) -> EditorResult<()> {
    if let Some(path) = &config.log_file {
        logging::init(path)?;
    }
    install_panic_hook();

    let mut editor = Editor::new(FsEditorIo::new()).with_message_timeout(config.message_timeout);
    if let Some(file) = &config.file {
        editor.open(&file.to_string_lossy())?;
    }

    match &config.script {
        Some(script_path) => {
            let text = fs::read_to_string(script_path).map_err(|source| EditorError::ScriptFile {
                path: script_path.clone(),
                source,
            })?;
            let script = InputScript::from_text(&text)?;
            let snapshot = run_script(&mut editor, script, config.script_size())?;

            let mut stdout = io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, &snapshot)?;
            writeln!(stdout)?;
        }
        None => {
            editor.set_status_message("HELP: :w = save | :q = quit | :e <file> = open");
            run_interactive(&mut editor)?;
        }
    }

    Ok(())
}
