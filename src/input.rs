use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::snake::Direction::{self, *};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    Reset,
    Pause,
    Quit,
}

/// Translates a key press into a game command. Keys with no meaning map to `None`.
pub fn command_for(key: &KeyEvent) -> Option<Command> {
    if is_ctrl_c(key) {
        return Some(Command::Quit);
    }

    let cmd = match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Command::Turn(Up),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Command::Turn(Left),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Command::Turn(Down),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Command::Turn(Right),
        KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => Command::Reset,
        KeyCode::Esc | KeyCode::Char('p') | KeyCode::Char('P') => Command::Pause,
        KeyCode::Char('q') | KeyCode::Char('Q') => Command::Quit,
        _ => return None,
    };

    Some(cmd)
}

pub fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}
