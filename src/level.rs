//! Level data: numeric cell encoding, validation and the built-in sample level.

use thiserror::Error;

/// Raw cell values as they appear in level data (0..=11).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RawTile {
    Air = 0,
    Flux = 1,
    Unbreakable = 2,
    Player = 3,
    Stone = 4,
    FallingStone = 5,
    Box = 6,
    FallingBox = 7,
    Key1 = 8,
    Lock1 = 9,
    Key2 = 10,
    Lock2 = 11,
}

impl TryFrom<u8> for RawTile {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => Self::Air,
            1 => Self::Flux,
            2 => Self::Unbreakable,
            3 => Self::Player,
            4 => Self::Stone,
            5 => Self::FallingStone,
            6 => Self::Box,
            7 => Self::FallingBox,
            8 => Self::Key1,
            9 => Self::Lock1,
            10 => Self::Key2,
            11 => Self::Lock2,
            other => return Err(other),
        })
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LevelError {
    #[error("level has no cells")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown tile value {value} at ({x}, {y})")]
    UnknownTile { value: u8, x: usize, y: usize },
    #[error("perimeter is not walled at ({x}, {y})")]
    OpenPerimeter { x: usize, y: usize },
    #[error("level has no player start")]
    MissingPlayer,
    #[error("level has {count} player starts, expected exactly one")]
    MultiplePlayers { count: usize },
}

/// Sample level: 6 rows x 8 columns, player starting at (1, 1).
const SAMPLE: [[u8; 8]; 6] = [
    [2, 2, 2, 2, 2, 2, 2, 2],
    [2, 3, 0, 1, 1, 2, 0, 2],
    [2, 4, 2, 6, 1, 2, 0, 2],
    [2, 8, 4, 1, 1, 2, 0, 2],
    [2, 4, 1, 1, 1, 9, 0, 2],
    [2, 2, 2, 2, 2, 2, 2, 2],
];

/// A validated, rectangular, walled level. rows[y][x]; y=0 is top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    rows: Vec<Vec<RawTile>>,
    player_start: (usize, usize),
}

impl Level {
    /// Build a level from raw numeric rows, rejecting anything the engine cannot run safely.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, LevelError> {
        let width = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        if width == 0 {
            return Err(LevelError::Empty);
        }
        let height = rows.len();

        let mut parsed = Vec::with_capacity(height);
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(LevelError::RaggedRow {
                    row: y,
                    expected: width,
                    found: row.len(),
                });
            }
            let cells = row
                .iter()
                .enumerate()
                .map(|(x, &value)| {
                    RawTile::try_from(value).map_err(|value| LevelError::UnknownTile { value, x, y })
                })
                .collect::<Result<Vec<_>, _>>()?;
            parsed.push(cells);
        }

        for (y, row) in parsed.iter().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                let on_edge = x == 0 || y == 0 || x == width - 1 || y == height - 1;
                if on_edge && cell != RawTile::Unbreakable {
                    return Err(LevelError::OpenPerimeter { x, y });
                }
            }
        }

        let starts: Vec<(usize, usize)> = parsed
            .iter()
            .enumerate()
            .flat_map(|(y, row)| {
                row.iter()
                    .enumerate()
                    .filter(|&(_, &c)| c == RawTile::Player)
                    .map(move |(x, _)| (x, y))
            })
            .collect();
        let player_start = match starts.as_slice() {
            [] => return Err(LevelError::MissingPlayer),
            [single] => *single,
            many => return Err(LevelError::MultiplePlayers { count: many.len() }),
        };

        Ok(Self {
            rows: parsed,
            player_start,
        })
    }

    /// The built-in sample level.
    pub fn sample() -> Result<Self, LevelError> {
        Self::from_rows(&SAMPLE)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn player_start(&self) -> (usize, usize) {
        self.player_start
    }

    pub fn rows(&self) -> &[Vec<RawTile>] {
        &self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_level_shape() {
        let level = Level::sample().unwrap();
        assert_eq!(level.width(), 8);
        assert_eq!(level.height(), 6);
        assert_eq!(level.player_start(), (1, 1));
        assert_eq!(level.rows()[4][5], RawTile::Lock1);
    }

    #[test]
    fn test_raw_tile_mapping() {
        assert_eq!(RawTile::try_from(0), Ok(RawTile::Air));
        assert_eq!(RawTile::try_from(7), Ok(RawTile::FallingBox));
        assert_eq!(RawTile::try_from(11), Ok(RawTile::Lock2));
        assert_eq!(RawTile::try_from(12), Err(12));
    }

    #[test]
    fn test_unknown_tile_rejected() {
        let rows: [[u8; 3]; 4] = [[2, 2, 2], [2, 3, 2], [2, 42, 2], [2, 2, 2]];
        assert_eq!(
            Level::from_rows(&rows),
            Err(LevelError::UnknownTile { value: 42, x: 1, y: 2 })
        );
    }

    #[test]
    fn test_ragged_row_rejected() {
        let rows: Vec<Vec<u8>> = vec![vec![2, 2, 2], vec![2, 3], vec![2, 2, 2]];
        assert_eq!(
            Level::from_rows(rows.as_slice()),
            Err(LevelError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn test_open_perimeter_rejected() {
        let rows: [[u8; 3]; 3] = [[2, 2, 2], [2, 3, 0], [2, 2, 2]];
        assert_eq!(
            Level::from_rows(&rows),
            Err(LevelError::OpenPerimeter { x: 2, y: 1 })
        );
    }

    #[test]
    fn test_player_count_checked() {
        let none: [[u8; 3]; 3] = [[2, 2, 2], [2, 0, 2], [2, 2, 2]];
        assert_eq!(Level::from_rows(&none), Err(LevelError::MissingPlayer));
        let two: [[u8; 4]; 3] = [[2, 2, 2, 2], [2, 3, 3, 2], [2, 2, 2, 2]];
        assert_eq!(
            Level::from_rows(&two),
            Err(LevelError::MultiplePlayers { count: 2 })
        );
    }

    #[test]
    fn test_empty_rejected() {
        let rows: [[u8; 0]; 0] = [];
        assert_eq!(Level::from_rows(&rows), Err(LevelError::Empty));
    }
}
