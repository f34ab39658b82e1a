//! Piece conservation invariant: every piece is in exactly one place.

use super::super::piece::PIECE_COUNT;
use super::super::{GameState, Piece};
use super::Invariant;
use std::collections::HashSet;

/// Invariant: pool, board and selected slot partition the 16 pieces.
///
/// No piece is missing, duplicated, or in two places at once.
pub struct PieceConservationInvariant;

impl Invariant<GameState> for PieceConservationInvariant {
    fn holds(game: &GameState) -> bool {
        let all: Vec<Piece> = game
            .pool()
            .remaining()
            .chain(game.board().occupied().map(|(_, piece)| piece))
            .chain(game.selected_piece())
            .collect();

        let distinct: HashSet<Piece> = all.iter().copied().collect();
        all.len() == PIECE_COUNT && distinct.len() == PIECE_COUNT
    }

    fn description() -> &'static str {
        "Pool, board and selected piece hold each of the 16 pieces exactly once"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::quarto::{Position, new_game};

    #[test]
    fn test_new_game_holds() {
        assert!(PieceConservationInvariant::holds(&new_game(false)));
    }

    #[test]
    fn test_selected_piece_counts_once() {
        let mut game = new_game(false);
        game.select_piece("BSRF".parse().unwrap()).unwrap();
        assert!(PieceConservationInvariant::holds(&game));
    }

    #[test]
    fn test_duplicate_piece_violates() {
        let mut game = new_game(false);
        game.select_piece("BSRF".parse().unwrap()).unwrap();
        // The selected piece also appears on the board.
        game.board
            .place_at(Position::new(1, 1).unwrap(), "BSRF".parse().unwrap())
            .unwrap();
        assert!(!PieceConservationInvariant::holds(&game));
    }
}
