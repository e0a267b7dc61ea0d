//! The player entity. Its coordinates are authoritative; the grid carries a marker tile.

use crate::grid::Grid;
use crate::tile::Tile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Player {
    x: usize,
    y: usize,
}

impl Player {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn x(&self) -> usize {
        self.x
    }

    #[inline]
    pub fn y(&self) -> usize {
        self.y
    }

    #[inline]
    pub fn position(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    /// Move to (x, y): Air behind, marker ahead, coordinates updated in one step.
    pub fn move_to_tile(&mut self, grid: &mut Grid, x: usize, y: usize) {
        grid.set(self.x, self.y, Tile::Air);
        grid.set(x, y, Tile::Player);
        self.x = x;
        self.y = y;
    }

    pub fn move_by(&mut self, grid: &mut Grid, dx: isize, dy: isize) {
        let x = self.x.wrapping_add_signed(dx);
        let y = self.y.wrapping_add_signed(dy);
        self.move_to_tile(grid, x, y);
    }
}
