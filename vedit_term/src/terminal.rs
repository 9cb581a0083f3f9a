//! Terminal collaborator: raw mode, key decoding, window size, drawing

use std::io::{self, Stdout, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{
    self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use vedit_core::Key;

use crate::editor::EditorResult;
use crate::render::Frame;

/// Rows taken by the status bar and the message line
pub const RESERVED_ROWS: usize = 2;

/// Raw-mode terminal session
///
/// Dropping it restores the terminal.
pub struct Terminal {
    stdout: Stdout,
}

impl Terminal {
    /// Enter raw mode and the alternate screen
    pub fn enter() -> EditorResult<Self> {
        let mut stdout = io::stdout();
        enable_raw_mode()?;
        if let Err(err) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(err.into());
        }
        tracing::debug!("terminal entered raw mode");
        Ok(Self { stdout })
    }

    /// Usable text area (rows, cols)
    pub fn text_area(&self) -> EditorResult<(usize, usize)> {
        let (cols, rows) = terminal::size()?;
        Ok((
            (rows as usize).saturating_sub(RESERVED_ROWS),
            cols as usize,
        ))
    }

    /// Block until the next key press. Other events yield `None`.
    pub fn read_key(&mut self) -> EditorResult<Option<Key>> {
        match event::read()? {
            Event::Key(event) if event.kind != KeyEventKind::Release => Ok(translate_key(event)),
            _ => Ok(None),
        }
    }

    /// Write a composed frame
    pub fn draw(&mut self, frame: &Frame) -> EditorResult<()> {
        let out = &mut self.stdout;
        queue!(out, Hide)?;

        let mut y: u16 = 0;
        for line in &frame.lines {
            queue!(out, MoveTo(0, y), Print(line), Clear(ClearType::UntilNewLine))?;
            y = y.saturating_add(1);
        }

        queue!(
            out,
            MoveTo(0, y),
            SetAttribute(Attribute::Reverse),
            Print(&frame.status),
            SetAttribute(Attribute::Reset),
            Clear(ClearType::UntilNewLine),
            MoveTo(0, y.saturating_add(1)),
            Print(&frame.message),
            Clear(ClearType::UntilNewLine),
        )?;

        let (row, col) = frame.cursor;
        queue!(out, MoveTo(to_u16(col), to_u16(row)), Show)?;
        out.flush()?;
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        restore();
        tracing::debug!("terminal restored");
    }
}

/// Leave the alternate screen and raw mode. Safe to call more than once.
pub fn restore() {
    let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
    let _ = disable_raw_mode();
}

/// Restore the terminal before the default panic hook prints anything
pub fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore();
        tracing::error!(%info, "panic");
        default_hook(info);
    }));
}

/// Translate a crossterm key event into an editor key
pub fn translate_key(event: KeyEvent) -> Option<Key> {
    let key = match event.code {
        KeyCode::Char(ch) if event.modifiers.contains(KeyModifiers::CONTROL) => {
            Key::Ctrl(ch.to_ascii_lowercase())
        }
        KeyCode::Char(ch) => Key::Char(ch),
        KeyCode::Enter => Key::Enter,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Esc => Key::Escape,
        KeyCode::Tab => Key::Tab,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        _ => return None,
    };
    Some(key)
}

fn to_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> Option<Key> {
        translate_key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn test_translate_chars() {
        assert_eq!(press(KeyCode::Char('a'), KeyModifiers::NONE), Some(Key::Char('a')));
        assert_eq!(press(KeyCode::Char('G'), KeyModifiers::SHIFT), Some(Key::Char('G')));
        assert_eq!(press(KeyCode::Char(':'), KeyModifiers::NONE), Some(Key::Char(':')));
    }

    #[test]
    fn test_translate_ctrl() {
        assert_eq!(press(KeyCode::Char('c'), KeyModifiers::CONTROL), Some(Key::Ctrl('c')));
        assert_eq!(press(KeyCode::Char('L'), KeyModifiers::CONTROL), Some(Key::Ctrl('l')));
        assert!(press(KeyCode::Char('c'), KeyModifiers::CONTROL)
            .unwrap()
            .is_interrupt());
    }

    #[test]
    fn test_translate_named_keys() {
        assert_eq!(press(KeyCode::Esc, KeyModifiers::NONE), Some(Key::Escape));
        assert_eq!(press(KeyCode::Enter, KeyModifiers::NONE), Some(Key::Enter));
        assert_eq!(press(KeyCode::PageDown, KeyModifiers::NONE), Some(Key::PageDown));
        assert_eq!(press(KeyCode::Delete, KeyModifiers::NONE), Some(Key::Delete));
    }

    #[test]
    fn test_translate_unknown() {
        assert_eq!(press(KeyCode::F(1), KeyModifiers::NONE), None);
        assert_eq!(press(KeyCode::Insert, KeyModifiers::NONE), None);
    }

    #[test]
    fn test_to_u16_saturates() {
        assert_eq!(to_u16(12), 12);
        assert_eq!(to_u16(usize::MAX), u16::MAX);
    }
}
