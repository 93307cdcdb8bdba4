use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Action, Direction};

/// What a key press asks the terminal driver to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    GameAction(Action<2>),
    /// Leave the title screen
    Start,
    Restart,
    TogglePause,
    Quit,
    None,
}

/// Maps raw key presses to heading requests and driver commands
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            KeyCode::Up => steer(Direction::UP),
            KeyCode::Down => steer(Direction::DOWN),
            KeyCode::Left => steer(Direction::LEFT),
            KeyCode::Right => steer(Direction::RIGHT),
            KeyCode::Enter => KeyAction::Start,
            KeyCode::Esc => KeyAction::Quit,
            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'w' => steer(Direction::UP),
                's' => steer(Direction::DOWN),
                'a' => steer(Direction::LEFT),
                'd' => steer(Direction::RIGHT),
                ' ' | 'p' => KeyAction::TogglePause,
                'q' => KeyAction::Quit,
                'r' => KeyAction::Restart,
                _ => KeyAction::None,
            },
            _ => KeyAction::None,
        }
    }
}

fn steer(direction: Direction<2>) -> KeyAction {
    KeyAction::GameAction(Action::Move(direction))
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyAction {
        InputHandler::new().handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_movement_keys() {
        let cases = [
            (KeyCode::Up, Direction::UP),
            (KeyCode::Down, Direction::DOWN),
            (KeyCode::Left, Direction::LEFT),
            (KeyCode::Right, Direction::RIGHT),
            (KeyCode::Char('w'), Direction::UP),
            (KeyCode::Char('S'), Direction::DOWN),
            (KeyCode::Char('a'), Direction::LEFT),
            (KeyCode::Char('D'), Direction::RIGHT),
        ];
        for (code, direction) in cases {
            assert_eq!(key(code), KeyAction::GameAction(Action::Move(direction)));
        }
    }

    #[test]
    fn test_control_keys() {
        assert_eq!(key(KeyCode::Enter), KeyAction::Start);
        assert_eq!(key(KeyCode::Char(' ')), KeyAction::TogglePause);
        assert_eq!(key(KeyCode::Char('P')), KeyAction::TogglePause);
        assert_eq!(key(KeyCode::Char('r')), KeyAction::Restart);
        assert_eq!(key(KeyCode::Char('R')), KeyAction::Restart);
        assert_eq!(key(KeyCode::Char('q')), KeyAction::Quit);
        assert_eq!(key(KeyCode::Esc), KeyAction::Quit);
        assert_eq!(key(KeyCode::Char('x')), KeyAction::None);
        assert_eq!(key(KeyCode::Tab), KeyAction::None);
    }

    #[test]
    fn test_ctrl_c() {
        let handler = InputHandler::new();

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handler.handle_key_event(ctrl_c), KeyAction::Quit);
    }
}
