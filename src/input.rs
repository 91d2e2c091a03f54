//! Keyboard mapping from crossterm events to game input.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use flappy_biry::FlappyInput;

/// What a key press asks the main loop to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Game(FlappyInput),
    Quit,
}

/// Map a key event. Only presses count; repeats and releases return `None`.
pub fn map_key(key: KeyEvent) -> Option<KeyAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    let action = match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => KeyAction::Quit,
        KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter => KeyAction::Game(FlappyInput::Flap),
        _ => KeyAction::Game(FlappyInput::Other),
    };
    Some(action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_flap_keys() {
        for code in [KeyCode::Char(' '), KeyCode::Up, KeyCode::Enter] {
            assert_eq!(
                map_key(press(code)),
                Some(KeyAction::Game(FlappyInput::Flap))
            );
        }
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(map_key(press(KeyCode::Esc)), Some(KeyAction::Quit));
        assert_eq!(map_key(press(KeyCode::Char('q'))), Some(KeyAction::Quit));
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(KeyAction::Quit)
        );
    }

    #[test]
    fn test_plain_c_is_not_quit() {
        assert_eq!(
            map_key(press(KeyCode::Char('c'))),
            Some(KeyAction::Game(FlappyInput::Other))
        );
    }

    #[test]
    fn test_release_and_repeat_ignored() {
        for kind in [KeyEventKind::Release, KeyEventKind::Repeat] {
            let key = KeyEvent {
                code: KeyCode::Char(' '),
                modifiers: KeyModifiers::NONE,
                kind,
                state: KeyEventState::NONE,
            };
            assert_eq!(map_key(key), None);
        }
    }
}
