use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::snake::Direction;

/// The keys the game itself reacts to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Restart,
    Other,
}

impl Key {
    /// The direction an arrow key asks for.
    pub fn direction(self) -> Option<Direction> {
        match self {
            Key::Left => Some(Direction::Left),
            Key::Right => Some(Direction::Right),
            Key::Up => Some(Direction::Up),
            Key::Down => Some(Direction::Down),
            Key::Restart | Key::Other => None,
        }
    }
}

/// What a key press means to the program as a whole.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Game(Key),
    Quit,
}

impl From<KeyEvent> for Command {
    fn from(ev: KeyEvent) -> Self {
        if is_ctrl_c(&ev) {
            return Command::Quit;
        }

        let key = match ev.code {
            KeyCode::Esc => return Command::Quit,
            KeyCode::Left | KeyCode::Char('a') => Key::Left,
            KeyCode::Right | KeyCode::Char('d') => Key::Right,
            KeyCode::Up | KeyCode::Char('w') => Key::Up,
            KeyCode::Down | KeyCode::Char('s') => Key::Down,
            KeyCode::Char('r') | KeyCode::Char('R') => Key::Restart,
            _ => Key::Other,
        };

        Command::Game(key)
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}
