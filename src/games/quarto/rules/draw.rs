//! Draw detection logic for Quarto.

use super::super::Board;
use super::win::find_win;
use tracing::instrument;

/// Checks if the board is full (all 16 cells occupied).
#[instrument(skip(board))]
pub fn is_full(board: &Board) -> bool {
    board.is_full()
}

/// A full board with no winning line.
///
/// A placement that fills the board and completes a line is a win, so
/// the win check comes first.
#[instrument(skip(board))]
pub fn is_draw(board: &Board, include_squares: bool) -> bool {
    is_full(board) && find_win(board, include_squares).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::quarto::{Piece, Position};

    /// Fills the board so that no row, column, diagonal or 2x2 square
    /// shares an attribute.
    fn drawn_board() -> Board {
        const LAYOUT: [[usize; 4]; 4] = [
            [0b0100, 0b1110, 0b0001, 0b1010],
            [0b1001, 0b1000, 0b1101, 0b0110],
            [0b1111, 0b0000, 0b1011, 0b0111],
            [0b0010, 0b0011, 0b1100, 0b0101],
        ];
        Board::from_rows(LAYOUT.map(|row| row.map(Piece::from_index)))
    }

    #[test]
    fn test_empty_board_not_full() {
        let board = Board::new();
        assert!(!is_full(&board));
        assert!(!is_draw(&board, false));
    }

    #[test]
    fn test_full_board_without_win_is_draw() {
        let board = drawn_board();
        assert!(is_full(&board));
        assert!(is_draw(&board, false));
        assert!(is_draw(&board, true));
    }

    #[test]
    fn test_full_board_with_win_is_not_draw() {
        let mut board = Board::new();
        for (pos, piece) in Position::all().zip(Piece::all()) {
            board.place_at(pos, piece).unwrap();
        }
        // Row 0 holds indices 0..4: all black and large.
        assert!(is_full(&board));
        assert!(!is_draw(&board, false));
    }
}
