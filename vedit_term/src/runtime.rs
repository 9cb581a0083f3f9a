//! Control loops: interactive on a terminal, or headless from a script

use vedit_core::EditorSnapshot;

use crate::editor::{Editor, EditorAction, EditorResult};
use crate::input_script::InputScript;
use crate::io::EditorIo;
use crate::terminal::Terminal;

/// Run the editor on the terminal until it quits.
///
/// Each key is fully processed and the frame redrawn before the next key
/// is read. Terminal failures end the loop; everything else is shown as a
/// status message.
pub fn run_interactive<Io: EditorIo>(editor: &mut Editor<Io>) -> EditorResult<()> {
    let mut terminal = Terminal::enter()?;

    loop {
        let (rows, cols) = terminal.text_area()?;
        editor.set_screen_size(rows, cols);
        let frame = editor.frame();
        terminal.draw(&frame)?;

        let Some(key) = terminal.read_key()? else {
            continue;
        };
        tracing::trace!(?key, "key");

        if editor.handle_key(key) == EditorAction::Quit {
            break;
        }
    }

    Ok(())
}

/// Feed `script` to the editor without a terminal, composing a frame after
/// every key as the interactive loop would, and return the final state.
pub fn run_script<Io: EditorIo>(
    editor: &mut Editor<Io>,
    script: InputScript,
    size: (u16, u16),
) -> EditorResult<EditorSnapshot> {
    let (rows, cols) = size;
    let text_rows = (rows as usize).saturating_sub(crate::terminal::RESERVED_ROWS);
    editor.set_screen_size(text_rows, cols as usize);
    editor.frame();

    for key in script {
        if editor.handle_key(key) == EditorAction::Quit {
            tracing::debug!("script quit");
            break;
        }
        editor.frame();
    }

    Ok(editor.snapshot())
}
