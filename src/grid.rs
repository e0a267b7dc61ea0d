//! The map: a fixed rectangle of tiles, updated in place once per tick.

use crate::level::Level;
use crate::tile::Tile;
use tracing::trace;

/// Tile grid. rows[y][x]; y=0 is top, y grows downward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    rows: Vec<Vec<Tile>>,
}

impl Grid {
    pub fn from_level(level: &Level) -> Self {
        let rows = level
            .rows()
            .iter()
            .map(|row| row.iter().copied().map(Tile::from).collect())
            .collect();
        Self {
            width: level.width(),
            height: level.height(),
            rows,
        }
    }

    /// Tile at (x, y). Levels are walled, so neighbours of the player are always in range;
    /// anything outside still reads as Wall.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Tile {
        self.rows
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(Tile::Wall)
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, tile: Tile) {
        if let Some(cell) = self.rows.get_mut(y).and_then(|row| row.get_mut(x)) {
            *cell = tile;
        }
    }

    #[inline]
    pub fn is_passable_floor(&self, x: usize, y: usize) -> bool {
        self.get(x, y).is_passable_floor()
    }

    /// Gravity pass: every cell once, rows bottom to top, columns left to right.
    /// A tile that falls lands in a row already visited, so it moves at most once per sweep.
    /// Returns the number of tiles that fell.
    pub fn sweep_update(&mut self) -> usize {
        let mut fell = 0;
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                let tile = self.get(x, y);
                if tile.update(self, x, y) {
                    trace!(x, y, ?tile, "tile_fell");
                    fell += 1;
                }
            }
        }
        fell
    }

    /// Replace every tile matching `should_remove` with Air. Returns how many were replaced.
    pub fn remove_matching(&mut self, should_remove: impl Fn(Tile) -> bool) -> usize {
        let mut removed = 0;
        for cell in self.rows.iter_mut().flatten() {
            if should_remove(*cell) {
                *cell = Tile::Air;
                removed += 1;
            }
        }
        removed
    }

    /// Coordinates of every tile matching `pred`, row-major.
    pub fn positions(&self, pred: impl Fn(Tile) -> bool) -> Vec<(usize, usize)> {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(y, row)| {
                row.iter()
                    .enumerate()
                    .filter(|&(_, &t)| pred(t))
                    .map(move |(x, _)| (x, y))
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.rows.iter().map(Vec::as_slice)
    }
}
