//! Key bindings and the directional commands they produce.

use crate::grid::Grid;
use crate::player::Player;
use crate::tile::Interaction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// One queued directional move. Handling it performs exactly one interaction
/// with the tile next to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Up,
    Down,
    Left,
    Right,
}

impl Command {
    #[inline]
    pub fn is_up(self) -> bool {
        self == Self::Up
    }

    #[inline]
    pub fn is_down(self) -> bool {
        self == Self::Down
    }

    #[inline]
    pub fn is_left(self) -> bool {
        self == Self::Left
    }

    #[inline]
    pub fn is_right(self) -> bool {
        self == Self::Right
    }

    /// (dx, dy) with y growing downward.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Let the tile in this direction decide what happens.
    pub fn handle(self, grid: &mut Grid, player: &mut Player) -> Interaction {
        let (dx, dy) = self.delta();
        let target = grid.get(
            player.x().wrapping_add_signed(dx),
            player.y().wrapping_add_signed(dy),
        );
        if self.is_left() || self.is_right() {
            target.move_horizontal(grid, player, dx)
        } else {
            target.move_vertical(grid, player, dy)
        }
    }
}

/// Action from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Move(Command),
    Pause,
    Restart,
    Quit,
    None,
}

/// Map key event to game action: arrows or WASD to move, P pause, R restart, Q/Esc quit.
pub fn key_to_action(key: KeyEvent) -> Action {
    let KeyEvent {
        code, modifiers, ..
    } = key;
    if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
        return Action::Quit;
    }
    let no_mod = modifiers.is_empty() || modifiers == KeyModifiers::SHIFT;
    if !no_mod {
        return Action::None;
    }
    let code = match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    };
    match code {
        KeyCode::Up | KeyCode::Char('w') => Action::Move(Command::Up),
        KeyCode::Down | KeyCode::Char('s') => Action::Move(Command::Down),
        KeyCode::Left | KeyCode::Char('a') => Action::Move(Command::Left),
        KeyCode::Right | KeyCode::Char('d') => Action::Move(Command::Right),
        KeyCode::Char('p') => Action::Pause,
        KeyCode::Char('r') => Action::Restart,
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        _ => Action::None,
    }
}
