//! The 4x4 Quarto board.

use super::error::QuartoError;
use super::position::{BOARD_SIZE, Position};
use super::Piece;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// 4x4 grid where each cell is empty or holds one piece.
///
/// The board knows geometry only. Whether a piece was legally available
/// is checked by the game state, not here.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    cells: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a board from a raw grid (rows of cells).
    pub fn from_rows(cells: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        Self { cells }
    }

    /// Returns the piece at a validated position.
    pub fn get(&self, pos: Position) -> Option<Piece> {
        self.cells[pos.row()][pos.col()]
    }

    /// Checks whether a cell is empty.
    ///
    /// # Errors
    ///
    /// Returns [`QuartoError::OutOfBounds`] if `row` or `col` is not in `0..4`.
    pub fn is_empty(&self, row: usize, col: usize) -> Result<bool, QuartoError> {
        let pos = Position::new(row, col)?;
        Ok(self.get(pos).is_none())
    }

    /// Places a piece in an empty cell. No other cell is touched.
    ///
    /// # Errors
    ///
    /// - [`QuartoError::OutOfBounds`] for coordinates outside the grid
    /// - [`QuartoError::CellOccupied`] if the cell already holds a piece
    #[instrument(skip(self))]
    pub fn place(&mut self, row: usize, col: usize, piece: Piece) -> Result<(), QuartoError> {
        let pos = Position::new(row, col)?;
        self.place_at(pos, piece)
    }

    /// Places a piece at an already-validated position.
    pub fn place_at(&mut self, pos: Position, piece: Piece) -> Result<(), QuartoError> {
        let cell = &mut self.cells[pos.row()][pos.col()];
        if cell.is_some() {
            return Err(QuartoError::CellOccupied(pos));
        }
        *cell = Some(piece);
        Ok(())
    }

    /// True iff all 16 cells are occupied.
    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(Option::is_some)
    }

    /// Number of occupied cells.
    pub fn piece_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }

    /// Empty cells in row-major order.
    pub fn empty_cells(&self) -> Vec<Position> {
        Position::valid_moves(self)
    }

    /// Occupied cells with their pieces, row-major.
    pub fn occupied(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        Position::all().filter_map(move |pos| self.get(pos).map(|piece| (pos, piece)))
    }

    /// Returns the raw grid.
    pub fn rows(&self) -> &[[Option<Piece>; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }
}

/// Renders the grid as piece codes, `....` for empty cells.
impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (r, row) in self.cells.iter().enumerate() {
            let line = row
                .iter()
                .map(|cell| cell.map(|p| p.code()).unwrap_or_else(|| "....".to_string()))
                .collect::<Vec<_>>()
                .join(" ");
            write!(f, "{}", line)?;
            if r + 1 < BOARD_SIZE {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
