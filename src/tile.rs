//! Tiles: the closed set of cell kinds, how they draw, how they react to the player,
//! and how loose tiles respond to gravity.

use crate::grid::Grid;
use crate::level::RawTile;
use crate::player::Player;
use crate::theme::Theme;
use ratatui::style::Color;

/// Support state of a loose tile (stone or box).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallingState {
    #[default]
    Resting,
    Falling,
}

impl FallingState {
    #[inline]
    pub fn is_falling(self) -> bool {
        self == Self::Falling
    }

    /// Horizontal push of `tile` by the player. Only a resting tile moves, and only when
    /// the cell two steps away is Air and the cell under the pushed tile is not.
    fn push(self, tile: Tile, grid: &mut Grid, player: &mut Player, dx: isize) -> Interaction {
        match self {
            Self::Falling => Interaction::Blocked,
            Self::Resting => {
                let (px, py) = player.position();
                let next = px.wrapping_add_signed(dx);
                let beyond = px.wrapping_add_signed(2 * dx);
                if grid.get(beyond, py).is_air() && !grid.get(next, py + 1).is_air() {
                    grid.set(beyond, py, tile);
                    player.move_to_tile(grid, next, py);
                    Interaction::Pushed
                } else {
                    Interaction::Blocked
                }
            }
        }
    }
}

/// The two key/lock colour families. Each key opens only the locks of its own kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyConfig {
    /// Lock kind 1.
    Yellow,
    /// Lock kind 2.
    Blue,
}

impl KeyConfig {
    pub const ALL: [Self; 2] = [Self::Yellow, Self::Blue];

    #[inline]
    pub fn is_lock1(self) -> bool {
        self == Self::Yellow
    }

    /// Removal predicate: true for every lock this key opens.
    pub fn removes(self, tile: Tile) -> bool {
        if self.is_lock1() {
            tile.is_lock1()
        } else {
            tile.is_lock2()
        }
    }

    pub fn color(self, theme: &Theme) -> Color {
        match self {
            Self::Yellow => theme.key_yellow,
            Self::Blue => theme.key_blue,
        }
    }
}

/// What a single player interaction did to the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    /// Nothing changed.
    Blocked,
    Moved,
    Pushed,
    KeyCollected { key: KeyConfig, locks_removed: usize },
}

/// One grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Air,
    Flux,
    Wall,
    /// Marker for the cell the player stands on; the `Player` coordinates are authoritative.
    Player,
    Stone(FallingState),
    Box(FallingState),
    Key(KeyConfig),
    Lock(KeyConfig),
}

impl From<RawTile> for Tile {
    fn from(raw: RawTile) -> Self {
        match raw {
            RawTile::Air => Self::Air,
            RawTile::Flux => Self::Flux,
            RawTile::Unbreakable => Self::Wall,
            RawTile::Player => Self::Player,
            RawTile::Stone => Self::Stone(FallingState::Resting),
            RawTile::FallingStone => Self::Stone(FallingState::Falling),
            RawTile::Box => Self::Box(FallingState::Resting),
            RawTile::FallingBox => Self::Box(FallingState::Falling),
            RawTile::Key1 => Self::Key(KeyConfig::Yellow),
            RawTile::Lock1 => Self::Lock(KeyConfig::Yellow),
            RawTile::Key2 => Self::Key(KeyConfig::Blue),
            RawTile::Lock2 => Self::Lock(KeyConfig::Blue),
        }
    }
}

impl Tile {
    #[inline]
    pub fn is_air(self) -> bool {
        self == Self::Air
    }

    /// Cells the player walks onto without side effects.
    #[inline]
    pub fn is_passable_floor(self) -> bool {
        matches!(self, Self::Air | Self::Flux)
    }

    #[inline]
    pub fn is_lock1(self) -> bool {
        matches!(self, Self::Lock(k) if k.is_lock1())
    }

    #[inline]
    pub fn is_lock2(self) -> bool {
        matches!(self, Self::Lock(k) if !k.is_lock1())
    }

    /// Support state of stone/box; `None` for every other tile.
    pub fn falling_state(self) -> Option<FallingState> {
        match self {
            Self::Stone(s) | Self::Box(s) => Some(s),
            _ => None,
        }
    }

    fn with_falling_state(self, state: FallingState) -> Self {
        match self {
            Self::Stone(_) => Self::Stone(state),
            Self::Box(_) => Self::Box(state),
            other => other,
        }
    }

    /// Fill colour, or `None` for cells left as background (Air, player marker).
    pub fn color(self, theme: &Theme) -> Option<Color> {
        match self {
            Self::Air | Self::Player => None,
            Self::Flux => Some(theme.tile_flux),
            Self::Wall => Some(theme.tile_wall),
            Self::Stone(_) => Some(theme.tile_stone),
            Self::Box(_) => Some(theme.tile_box),
            Self::Key(k) | Self::Lock(k) => Some(k.color(theme)),
        }
    }

    /// What a loose tile sitting on top of this one should become.
    /// Only Air lets things fall; everything else supports.
    pub fn block_on_top_state(self) -> FallingState {
        match self {
            Self::Air => FallingState::Falling,
            Self::Flux
            | Self::Wall
            | Self::Player
            | Self::Stone(_)
            | Self::Box(_)
            | Self::Key(_)
            | Self::Lock(_) => FallingState::Resting,
        }
    }

    /// Player at `player` steps sideways onto this tile (which sits at player.x + dx).
    pub fn move_horizontal(self, grid: &mut Grid, player: &mut Player, dx: isize) -> Interaction {
        match self {
            Self::Stone(state) | Self::Box(state) => state.push(self, grid, player, dx),
            _ => self.enter(grid, player, dx, 0),
        }
    }

    /// Player steps up or down onto this tile (which sits at player.y + dy).
    /// Loose tiles cannot be pushed vertically.
    pub fn move_vertical(self, grid: &mut Grid, player: &mut Player, dy: isize) -> Interaction {
        self.enter(grid, player, 0, dy)
    }

    fn enter(self, grid: &mut Grid, player: &mut Player, dx: isize, dy: isize) -> Interaction {
        match self {
            Self::Air | Self::Flux => {
                player.move_by(grid, dx, dy);
                Interaction::Moved
            }
            Self::Key(key) => {
                let locks_removed = grid.remove_matching(|t| key.removes(t));
                player.move_by(grid, dx, dy);
                Interaction::KeyCollected { key, locks_removed }
            }
            Self::Wall | Self::Player | Self::Stone(_) | Self::Box(_) | Self::Lock(_) => {
                Interaction::Blocked
            }
        }
    }

    /// Per-tick update for the tile at (x, y). Returns true if it fell one cell.
    pub fn update(self, grid: &mut Grid, x: usize, y: usize) -> bool {
        if self.falling_state().is_none() {
            return false;
        }
        let state = grid.get(x, y + 1).block_on_top_state();
        let tile = self.with_falling_state(state);
        match state {
            FallingState::Falling => {
                grid.set(x, y + 1, tile);
                grid.set(x, y, Self::Air);
                true
            }
            FallingState::Resting => {
                grid.set(x, y, tile);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;

    fn setup<const W: usize, const H: usize>(rows: [[u8; W]; H]) -> (Grid, Player) {
        let level = Level::from_rows(&rows).unwrap();
        let (x, y) = level.player_start();
        (Grid::from_level(&level), Player::new(x, y))
    }

    #[test]
    fn test_support_report() {
        assert_eq!(Tile::Air.block_on_top_state(), FallingState::Falling);
        assert_eq!(Tile::Flux.block_on_top_state(), FallingState::Resting);
        assert_eq!(Tile::Wall.block_on_top_state(), FallingState::Resting);
        assert_eq!(
            Tile::Key(KeyConfig::Blue).block_on_top_state(),
            FallingState::Resting
        );
    }

    #[test]
    fn test_lock_predicates() {
        let yellow = Tile::Lock(KeyConfig::Yellow);
        let blue = Tile::Lock(KeyConfig::Blue);
        assert!(yellow.is_lock1() && !yellow.is_lock2());
        assert!(blue.is_lock2() && !blue.is_lock1());
        assert!(KeyConfig::Yellow.removes(yellow));
        assert!(!KeyConfig::Yellow.removes(blue));
        assert!(KeyConfig::Blue.removes(blue));
        assert!(!KeyConfig::Blue.removes(Tile::Key(KeyConfig::Blue)));
    }

    #[test]
    fn test_resting_stone_pushed_right() {
        let (mut grid, mut player) = setup([
            [2, 2, 2, 2, 2, 2],
            [2, 3, 4, 0, 0, 2],
            [2, 1, 1, 1, 1, 2],
            [2, 2, 2, 2, 2, 2],
        ]);
        let stone = grid.get(2, 1);
        let outcome = stone.move_horizontal(&mut grid, &mut player, 1);
        assert_eq!(outcome, Interaction::Pushed);
        assert_eq!(player.position(), (2, 1));
        assert_eq!(grid.get(1, 1), Tile::Air);
        assert_eq!(grid.get(2, 1), Tile::Player);
        assert_eq!(grid.get(3, 1), Tile::Stone(FallingState::Resting));
    }

    #[test]
    fn test_resting_box_pushed_left() {
        let (mut grid, mut player) = setup([
            [2, 2, 2, 2, 2],
            [2, 0, 6, 3, 2],
            [2, 1, 2, 1, 2],
            [2, 2, 2, 2, 2],
        ]);
        let outcome = grid.get(2, 1).move_horizontal(&mut grid, &mut player, -1);
        assert_eq!(outcome, Interaction::Pushed);
        assert_eq!(player.position(), (2, 1));
        assert_eq!(grid.get(1, 1), Tile::Box(FallingState::Resting));
        assert_eq!(grid.get(3, 1), Tile::Air);
    }

    #[test]
    fn test_push_into_wall_blocked() {
        let (mut grid, mut player) = setup([
            [2, 2, 2, 2, 2],
            [2, 3, 4, 2, 2],
            [2, 1, 1, 1, 2],
            [2, 2, 2, 2, 2],
        ]);
        let before = grid.clone();
        let outcome = grid.get(2, 1).move_horizontal(&mut grid, &mut player, 1);
        assert_eq!(outcome, Interaction::Blocked);
        assert_eq!(player.position(), (1, 1));
        assert_eq!(grid, before);
    }

    #[test]
    fn test_push_without_support_blocked() {
        let (mut grid, mut player) = setup([
            [2, 2, 2, 2, 2, 2],
            [2, 3, 4, 0, 0, 2],
            [2, 1, 0, 1, 1, 2],
            [2, 2, 2, 2, 2, 2],
        ]);
        let before = grid.clone();
        let outcome = grid.get(2, 1).move_horizontal(&mut grid, &mut player, 1);
        assert_eq!(outcome, Interaction::Blocked);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_push_onto_flux_blocked() {
        // The cell beyond must be Air, not merely passable.
        let (mut grid, mut player) = setup([
            [2, 2, 2, 2, 2],
            [2, 3, 4, 1, 2],
            [2, 1, 1, 1, 2],
            [2, 2, 2, 2, 2],
        ]);
        let outcome = grid.get(2, 1).move_horizontal(&mut grid, &mut player, 1);
        assert_eq!(outcome, Interaction::Blocked);
        assert_eq!(player.position(), (1, 1));
    }

    #[test]
    fn test_falling_stone_cannot_be_pushed() {
        let (mut grid, mut player) = setup([
            [2, 2, 2, 2, 2],
            [2, 3, 5, 0, 2],
            [2, 1, 1, 1, 2],
            [2, 2, 2, 2, 2],
        ]);
        let outcome = grid.get(2, 1).move_horizontal(&mut grid, &mut player, 1);
        assert_eq!(outcome, Interaction::Blocked);
        assert_eq!(grid.get(2, 1), Tile::Stone(FallingState::Falling));
    }

    #[test]
    fn test_stone_blocks_vertical_move() {
        let (mut grid, mut player) = setup([
            [2, 2, 2],
            [2, 3, 2],
            [2, 4, 2],
            [2, 1, 2],
            [2, 2, 2],
        ]);
        let outcome = grid.get(1, 2).move_vertical(&mut grid, &mut player, 1);
        assert_eq!(outcome, Interaction::Blocked);
        assert_eq!(player.position(), (1, 1));
    }

    #[test]
    fn test_flux_is_walkable_and_consumed() {
        let (mut grid, mut player) = setup([
            [2, 2, 2],
            [2, 3, 2],
            [2, 1, 2],
            [2, 2, 2],
        ]);
        let outcome = grid.get(1, 2).move_vertical(&mut grid, &mut player, 1);
        assert_eq!(outcome, Interaction::Moved);
        assert_eq!(player.position(), (1, 2));
        assert_eq!(grid.get(1, 1), Tile::Air);
        assert_eq!(grid.get(1, 2), Tile::Player);
    }

    #[test]
    fn test_key_removes_matching_locks_only() {
        let (mut grid, mut player) = setup([
            [2, 2, 2, 2, 2, 2, 2],
            [2, 3, 8, 0, 9, 11, 2],
            [2, 9, 1, 1, 1, 1, 2],
            [2, 2, 2, 2, 2, 2, 2],
        ]);
        let outcome = grid.get(2, 1).move_horizontal(&mut grid, &mut player, 1);
        assert_eq!(
            outcome,
            Interaction::KeyCollected {
                key: KeyConfig::Yellow,
                locks_removed: 2
            }
        );
        assert_eq!(player.position(), (2, 1));
        assert_eq!(grid.get(2, 1), Tile::Player);
        assert_eq!(grid.get(4, 1), Tile::Air);
        assert_eq!(grid.get(1, 2), Tile::Air);
        assert_eq!(grid.get(5, 1), Tile::Lock(KeyConfig::Blue));
    }

    #[test]
    fn test_lock_is_impassable() {
        let (mut grid, mut player) = setup([
            [2, 2, 2, 2],
            [2, 3, 11, 2],
            [2, 2, 2, 2],
        ]);
        let outcome = grid.get(2, 1).move_horizontal(&mut grid, &mut player, 1);
        assert_eq!(outcome, Interaction::Blocked);
        assert_eq!(player.position(), (1, 1));
    }

    #[test]
    fn test_stone_falls_then_lands() {
        let (mut grid, _player) = setup([
            [2, 2, 2, 2],
            [2, 3, 4, 2],
            [2, 1, 0, 2],
            [2, 2, 2, 2],
        ]);
        assert!(grid.get(2, 1).update(&mut grid, 2, 1));
        assert_eq!(grid.get(2, 1), Tile::Air);
        assert_eq!(grid.get(2, 2), Tile::Stone(FallingState::Falling));

        assert!(!grid.get(2, 2).update(&mut grid, 2, 2));
        assert_eq!(grid.get(2, 2), Tile::Stone(FallingState::Resting));
    }

    #[test]
    fn test_inert_tiles_do_not_update() {
        let (mut grid, _player) = setup([
            [2, 2, 2],
            [2, 3, 2],
            [2, 8, 2],
            [2, 0, 2],
            [2, 2, 2],
        ]);
        assert!(!grid.get(1, 2).update(&mut grid, 1, 2));
        assert_eq!(grid.get(1, 2), Tile::Key(KeyConfig::Yellow));
    }
}
