// Key decoding for the terminal surface.

use crate::domain::{Direction, Intent};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Maps a key press to a player intent. Releases and unbound keys yield nothing.
pub fn decode(key: &KeyEvent) -> Option<Intent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(key.code, KeyCode::Char('c' | 'C')).then_some(Intent::Quit);
    }

    let intent = match key.code {
        KeyCode::Left | KeyCode::Char('a' | 'A') => Intent::MoveLeft,
        KeyCode::Right | KeyCode::Char('d' | 'D') => Intent::MoveRight,
        KeyCode::Up | KeyCode::Char('w' | 'W') => Intent::Aim(Direction::Straight),
        KeyCode::Char('q' | 'Q') => Intent::Aim(Direction::DiagonalLeft),
        KeyCode::Char('e' | 'E') => Intent::Aim(Direction::DiagonalRight),
        KeyCode::Char('z' | 'Z') => Intent::Aim(Direction::HorizontalLeft),
        KeyCode::Char('c' | 'C') => Intent::Aim(Direction::HorizontalRight),
        KeyCode::Char(' ') => Intent::Fire,
        KeyCode::Char('x' | 'X') | KeyCode::Esc => Intent::Quit,
        _ => return None,
    };
    Some(intent)
}
