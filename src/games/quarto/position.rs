//! Board coordinates for Quarto.

use super::error::QuartoError;
use super::Board;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// Width and height of the board.
pub const BOARD_SIZE: usize = 4;

/// Number of cells on the board.
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// A validated cell on the 4x4 board.
///
/// Rows and columns are in `0..4`. Serializes as `[row, col]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "[usize; 2]", try_from = "[usize; 2]")]
pub struct Position {
    row: u8,
    col: u8,
}

impl Position {
    /// Creates a position, rejecting coordinates outside the board.
    pub fn new(row: usize, col: usize) -> Result<Self, QuartoError> {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return Err(QuartoError::OutOfBounds { row, col });
        }
        Ok(Self::at(row, col))
    }

    /// Unchecked constructor for compile-time tables.
    pub(crate) const fn at(row: usize, col: usize) -> Self {
        Self {
            row: row as u8,
            col: col as u8,
        }
    }

    /// Returns the row (0-3).
    pub fn row(&self) -> usize {
        self.row as usize
    }

    /// Returns the column (0-3).
    pub fn col(&self) -> usize {
        self.col as usize
    }

    /// Converts position to board index (0-15, row-major).
    pub fn to_index(self) -> usize {
        self.row() * BOARD_SIZE + self.col()
    }

    /// Creates position from board index.
    pub fn from_index(index: usize) -> Option<Self> {
        (index < CELL_COUNT).then(|| Self::at(index / BOARD_SIZE, index % BOARD_SIZE))
    }

    /// All 16 positions in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..CELL_COUNT).map(|i| Self::at(i / BOARD_SIZE, i % BOARD_SIZE))
    }

    /// Label for display, e.g. `r0c3`.
    pub fn label(&self) -> String {
        format!("r{}c{}", self.row, self.col)
    }

    /// Filters positions by board state - returns only empty cells.
    #[instrument(skip(board))]
    pub fn valid_moves(board: &Board) -> Vec<Position> {
        Self::all().filter(|pos| board.get(*pos).is_none()).collect()
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl From<Position> for [usize; 2] {
    fn from(pos: Position) -> Self {
        [pos.row(), pos.col()]
    }
}

impl TryFrom<[usize; 2]> for Position {
    type Error = QuartoError;

    fn try_from([row, col]: [usize; 2]) -> Result<Self, Self::Error> {
        Position::new(row, col)
    }
}

/// Error parsing a position string.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ParsePositionError {
    /// Input is not `row,col` or `r<row>c<col>`.
    #[display("Cannot parse position from {:?}", _0)]
    Malformed(String),

    /// Coordinates parsed but lie outside the board.
    #[display("{}", _0)]
    OutOfBounds(QuartoError),
}

impl std::error::Error for ParsePositionError {}

impl FromStr for Position {
    type Err = ParsePositionError;

    /// Parses `"1,2"`, `"1 2"` or `"r1c2"`.
    #[instrument]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ParsePositionError::Malformed(s.to_string());
        let lower = s.trim().to_lowercase();

        let (row, col) = if let Some(rest) = lower.strip_prefix('r') {
            rest.split_once('c').ok_or_else(malformed)?
        } else {
            lower
                .split_once(|c: char| c == ',' || c.is_whitespace())
                .ok_or_else(malformed)?
        };

        let row: usize = row.trim().parse().map_err(|_| malformed())?;
        let col: usize = col.trim().parse().map_err(|_| malformed())?;
        Position::new(row, col).map_err(ParsePositionError::OutOfBounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_out_of_bounds() {
        assert_eq!(Position::new(4, 0), Err(QuartoError::OutOfBounds { row: 4, col: 0 }));
        assert_eq!(Position::new(0, 7), Err(QuartoError::OutOfBounds { row: 0, col: 7 }));
        assert!(Position::new(3, 3).is_ok());
    }

    #[test]
    fn test_index_round_trip() {
        for (i, pos) in Position::all().enumerate() {
            assert_eq!(pos.to_index(), i);
            assert_eq!(Position::from_index(i), Some(pos));
        }
        assert_eq!(Position::from_index(CELL_COUNT), None);
    }

    #[test]
    fn test_parse_forms() {
        let expected = Position::new(1, 2).unwrap();
        assert_eq!("1,2".parse::<Position>().unwrap(), expected);
        assert_eq!("1 2".parse::<Position>().unwrap(), expected);
        assert_eq!("R1C2".parse::<Position>().unwrap(), expected);
        assert!(matches!("nope".parse::<Position>(), Err(ParsePositionError::Malformed(_))));
        assert!(matches!("4,0".parse::<Position>(), Err(ParsePositionError::OutOfBounds(_))));
    }

    #[test]
    fn test_label() {
        assert_eq!(Position::new(0, 3).unwrap().label(), "r0c3");
    }
}
