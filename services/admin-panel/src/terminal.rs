//! Raw-mode navigation keys and screen control.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{self, Clear, ClearType};

use crate::menu::Key;

/// Where navigation keys come from.
pub trait KeySource {
    fn next_key(&mut self) -> io::Result<Key>;
}

/// Reads single key presses from the controlling terminal.
///
/// Raw mode is held only for the duration of one read so that line prompts
/// run in the normal buffered, echoed mode.
pub struct CrosstermKeys;

struct RawMode;

impl RawMode {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(RawMode)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode() {
            log::error!("failed to restore terminal mode: {}", e);
        }
    }
}

impl KeySource for CrosstermKeys {
    fn next_key(&mut self) -> io::Result<Key> {
        let _raw = RawMode::enable()?;
        loop {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            // Ctrl-C never reaches the process as a signal in raw mode
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                return Ok(Key::Cancel);
            }
            if let Some(mapped) = map_key(key.code) {
                return Ok(mapped);
            }
        }
    }
}

pub fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Up | KeyCode::Char('k') => Some(Key::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(Key::Down),
        KeyCode::Enter => Some(Key::Confirm),
        KeyCode::Esc | KeyCode::Char('q') => Some(Key::Cancel),
        _ => None,
    }
}

pub fn clear_screen(out: &mut impl Write) -> io::Result<()> {
    execute!(out, Clear(ClearType::All), MoveTo(0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_and_vi_keys_navigate() {
        assert_eq!(map_key(KeyCode::Up), Some(Key::Up));
        assert_eq!(map_key(KeyCode::Char('k')), Some(Key::Up));
        assert_eq!(map_key(KeyCode::Down), Some(Key::Down));
        assert_eq!(map_key(KeyCode::Char('j')), Some(Key::Down));
    }

    #[test]
    fn enter_confirms_and_escape_cancels() {
        assert_eq!(map_key(KeyCode::Enter), Some(Key::Confirm));
        assert_eq!(map_key(KeyCode::Esc), Some(Key::Cancel));
        assert_eq!(map_key(KeyCode::Char('q')), Some(Key::Cancel));
    }

    #[test]
    fn other_keys_are_ignored() {
        assert_eq!(map_key(KeyCode::Char('x')), None);
        assert_eq!(map_key(KeyCode::Tab), None);
        assert_eq!(map_key(KeyCode::Left), None);
    }
}
