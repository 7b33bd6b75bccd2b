//! Key mapping from terminal events to maze commands.

use crate::types::{Direction, MazeCommand};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to maze commands.
pub fn handle_key_event(key: KeyEvent) -> Option<MazeCommand> {
    match key.code {
        // Movement
        KeyCode::Up => Some(MazeCommand::Move(Direction::North)),
        KeyCode::Right => Some(MazeCommand::Move(Direction::East)),
        KeyCode::Down => Some(MazeCommand::Move(Direction::South)),
        KeyCode::Left => Some(MazeCommand::Move(Direction::West)),

        // Rotation of the player's tile
        KeyCode::Char('z') | KeyCode::Char('Z') => Some(MazeCommand::Rotate(1)),
        KeyCode::Char('x') | KeyCode::Char('X') => Some(MazeCommand::Rotate(-1)),

        // Slide the player's row / column
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            Some(MazeCommand::SlidePlayerLine(Direction::West))
        }
        KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(MazeCommand::SlidePlayerLine(Direction::East))
        }
        KeyCode::Char('p') | KeyCode::Char('P') => {
            Some(MazeCommand::SlidePlayerLine(Direction::North))
        }
        KeyCode::Char('l') | KeyCode::Char('L') => {
            Some(MazeCommand::SlidePlayerLine(Direction::South))
        }

        // Actions
        KeyCode::Char(' ') => Some(MazeCommand::Wait),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(MazeCommand::Restart),

        _ => None,
    }
}

/// Check if key should quit the game.
///
/// `q` is a slide key here, so only Esc and Ctrl-C quit.
pub fn should_quit(key: KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
            && key.modifiers.contains(KeyModifiers::CONTROL))
}
