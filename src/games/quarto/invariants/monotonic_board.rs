//! Monotonic board invariant: recorded placements stay where they were put.

use super::super::{Action, GameState, Piece, Position};
use super::Invariant;
use std::collections::HashSet;

/// Invariant: the board agrees with the action history.
///
/// Each recorded placement still holds the piece selected just before it,
/// no cell is placed twice, and a trailing selection is the selected piece.
/// When the history covers every piece on the board, its first action must
/// be a selection, so every placed piece is accounted for. A game restored
/// from a snapshot carries a history that only covers later turns.
pub struct MonotonicBoardInvariant;

impl Invariant<GameState> for MonotonicBoardInvariant {
    fn holds(game: &GameState) -> bool {
        let board = game.board();
        let mut pending: Option<Piece> = None;
        let mut placed: HashSet<Position> = HashSet::new();

        for action in game.history() {
            match *action {
                Action::Select { piece, .. } => {
                    if pending.replace(piece).is_some() {
                        return false;
                    }
                }
                Action::Place { position, .. } => {
                    let Some(on_board) = board.get(position) else {
                        return false;
                    };
                    if let Some(piece) = pending.take()
                        && piece != on_board
                    {
                        return false;
                    }
                    if !placed.insert(position) {
                        return false;
                    }
                }
            }
        }

        if placed.len() > board.piece_count() {
            return false;
        }
        let complete = placed.len() == board.piece_count();
        if complete && matches!(game.history().first(), Some(Action::Place { .. })) {
            return false;
        }

        match game.history().last() {
            Some(Action::Select { piece, .. }) => game.selected_piece() == Some(*piece),
            _ => true,
        }
    }

    fn description() -> &'static str {
        "Board matches recorded placements (never overwritten)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::quarto::new_game;

    #[test]
    fn test_empty_game_holds() {
        assert!(MonotonicBoardInvariant::holds(&new_game(false)));
    }

    #[test]
    fn test_moves_hold() {
        let mut game = new_game(false);
        game.select_piece("WLSF".parse().unwrap()).unwrap();
        game.place_piece(3, 0).unwrap();
        game.select_piece("BLRH".parse().unwrap()).unwrap();
        assert!(MonotonicBoardInvariant::holds(&game));
        assert_eq!(game.history().len(), 3);
    }

    #[test]
    fn test_board_ahead_of_history_holds() {
        let mut game = new_game(false);
        game.select_piece("WLSF".parse().unwrap()).unwrap();
        game.place_piece(3, 0).unwrap();
        // Same shape as a game restored from a snapshot: the board holds
        // pieces the history does not cover.
        game.board
            .place_at(Position::new(0, 0).unwrap(), "BLRH".parse().unwrap())
            .unwrap();
        assert!(MonotonicBoardInvariant::holds(&game));
    }

    #[test]
    fn test_moved_piece_violates() {
        let mut game = new_game(false);
        game.select_piece("WLSF".parse().unwrap()).unwrap();
        game.place_piece(3, 0).unwrap();
        // Swap the recorded piece for another one.
        game.board = crate::games::quarto::Board::new();
        game.board
            .place_at(Position::new(3, 0).unwrap(), "BLRH".parse().unwrap())
            .unwrap();
        assert!(!MonotonicBoardInvariant::holds(&game));
    }
}
