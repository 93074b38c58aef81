//! Terminal input to coordinator triggers.
//!
//! Keys are reported with browser-style key codes so the dismissal engine sees
//! the same codes as any other host (Escape is 27).

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use trellis_core::Trigger;

/// Maps a terminal event to a coordinator trigger.
///
/// A left-button press is a click; a key press (not repeat or release) is a
/// keydown. Everything else is ignored.
pub fn trigger_for(event: &Event) -> Option<Trigger> {
    match event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            ..
        }) => Some(Trigger::Click),
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(Trigger::Key {
            code: key_code(key),
        }),
        _ => None,
    }
}

/// Browser-style key code for `key`, or 0 when there is none.
pub fn key_code(key: &KeyEvent) -> u32 {
    match key.code {
        KeyCode::Backspace => 8,
        KeyCode::Tab | KeyCode::BackTab => 9,
        KeyCode::Enter => 13,
        KeyCode::Esc => 27,
        KeyCode::PageUp => 33,
        KeyCode::PageDown => 34,
        KeyCode::End => 35,
        KeyCode::Home => 36,
        KeyCode::Left => 37,
        KeyCode::Up => 38,
        KeyCode::Right => 39,
        KeyCode::Down => 40,
        KeyCode::Insert => 45,
        KeyCode::Delete => 46,
        KeyCode::F(n @ 1..=24) => 111 + u32::from(n),
        KeyCode::Char(c) if c.is_ascii_alphabetic() => u32::from(c.to_ascii_uppercase()),
        KeyCode::Char(c) if c.is_ascii() => u32::from(c),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEventState, KeyModifiers};

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column: 3,
            row: 4,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_escape_maps_to_27() {
        assert_eq!(
            trigger_for(&Event::Key(key(KeyCode::Esc))),
            Some(Trigger::ESCAPE)
        );
    }

    #[test]
    fn test_letters_use_uppercase_codes() {
        assert_eq!(key_code(&key(KeyCode::Char('a'))), 65);
        assert_eq!(key_code(&key(KeyCode::Char('B'))), 66);
        assert_eq!(key_code(&key(KeyCode::Char('7'))), 55);
        assert_eq!(key_code(&key(KeyCode::Char(' '))), 32);
    }

    #[test]
    fn test_named_keys() {
        assert_eq!(key_code(&key(KeyCode::Enter)), 13);
        assert_eq!(key_code(&key(KeyCode::Tab)), 9);
        assert_eq!(key_code(&key(KeyCode::Left)), 37);
        assert_eq!(key_code(&key(KeyCode::Down)), 40);
        assert_eq!(key_code(&key(KeyCode::F(1))), 112);
        assert_eq!(key_code(&key(KeyCode::Char('é'))), 0);
    }

    #[test]
    fn test_key_release_is_ignored() {
        let release = KeyEvent {
            code: KeyCode::Esc,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(trigger_for(&Event::Key(release)), None);
    }

    #[test]
    fn test_only_left_press_is_click() {
        assert_eq!(
            trigger_for(&mouse(MouseEventKind::Down(MouseButton::Left))),
            Some(Trigger::Click)
        );
        assert_eq!(
            trigger_for(&mouse(MouseEventKind::Down(MouseButton::Right))),
            None
        );
        assert_eq!(
            trigger_for(&mouse(MouseEventKind::Up(MouseButton::Left))),
            None
        );
        assert_eq!(trigger_for(&mouse(MouseEventKind::Moved)), None);
    }

    #[test]
    fn test_resize_is_ignored() {
        assert_eq!(trigger_for(&Event::Resize(80, 24)), None);
    }
}
