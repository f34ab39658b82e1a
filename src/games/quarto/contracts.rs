//! Contract-based validation for Quarto.
//!
//! Contracts define correctness through preconditions and postconditions:
//! {P(state, action)} transition {Q(before, after)}.

use super::error::QuartoError;
use super::game::GameState;
use super::invariants::{InvariantSet, QuartoInvariants};
use super::phases::Phase;
use super::{Piece, Position};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// Preconditions and postconditions for a state transition.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), QuartoError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), QuartoError>;
}

// ─────────────────────────────────────────────────────────────
//  Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the game has not been won or drawn.
pub struct GameNotOver;

impl GameNotOver {
    /// Fails with `GameAlreadyOver` in a terminal phase.
    pub fn check(game: &GameState) -> Result<(), QuartoError> {
        if game.is_over() {
            Err(QuartoError::GameAlreadyOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: the game is in the phase an operation requires.
pub struct InPhase;

impl InPhase {
    /// Fails with `IllegalPhase` naming `operation` if the phase differs.
    pub fn check(game: &GameState, expected: Phase, operation: &'static str) -> Result<(), QuartoError> {
        let phase = game.current_phase();
        if phase != expected {
            Err(QuartoError::IllegalPhase { operation, phase })
        } else {
            Ok(())
        }
    }
}

/// Precondition: the piece is still in the pool.
pub struct PieceAvailable;

impl PieceAvailable {
    /// Fails with `PieceNotInPool` for placed or selected pieces.
    pub fn check(piece: Piece, game: &GameState) -> Result<(), QuartoError> {
        if game.pool().contains(piece) {
            Ok(())
        } else {
            Err(QuartoError::PieceNotInPool(piece))
        }
    }
}

/// Precondition: the target cell is empty.
pub struct CellIsEmpty;

impl CellIsEmpty {
    /// Fails with `CellOccupied` if the cell holds a piece.
    pub fn check(pos: Position, game: &GameState) -> Result<(), QuartoError> {
        if game.board().get(pos).is_some() {
            Err(QuartoError::CellOccupied(pos))
        } else {
            Ok(())
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Transition Contracts
// ─────────────────────────────────────────────────────────────

fn check_invariants(after: &GameState) -> Result<(), QuartoError> {
    QuartoInvariants::check_all(after).map_err(|violations| {
        let descriptions = violations
            .iter()
            .map(|v| v.description.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        warn!(%descriptions, "Postcondition failed");
        QuartoError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
    })
}

/// Contract for piece selection.
///
/// Preconditions:
/// - Game not over
/// - Awaiting selection
/// - Piece still in the pool
///
/// Postconditions:
/// - Exactly one more action in history
/// - All game invariants hold
pub struct SelectContract;

impl Contract<GameState, Piece> for SelectContract {
    #[instrument(skip(game))]
    fn pre(game: &GameState, piece: &Piece) -> Result<(), QuartoError> {
        GameNotOver::check(game)?;
        InPhase::check(game, Phase::AwaitingSelection, "select a piece")?;
        PieceAvailable::check(*piece, game)?;
        Ok(())
    }

    fn post(before: &GameState, after: &GameState) -> Result<(), QuartoError> {
        if after.history().len() != before.history().len() + 1 || after.pool().len() + 1 != before.pool().len() {
            return Err(QuartoError::InvariantViolation(
                "Selection must withdraw exactly one piece".to_string(),
            ));
        }
        check_invariants(after)
    }
}

/// Contract for piece placement.
///
/// Preconditions, in order:
/// - Coordinates on the board (checked in every phase)
/// - Game not over
/// - Awaiting placement
/// - Target cell empty
///
/// Postconditions:
/// - Exactly one more piece on the board
/// - All game invariants hold
pub struct PlaceContract;

impl Contract<GameState, (usize, usize)> for PlaceContract {
    #[instrument(skip(game))]
    fn pre(game: &GameState, cell: &(usize, usize)) -> Result<(), QuartoError> {
        let (row, col) = *cell;
        let pos = Position::new(row, col)?;
        GameNotOver::check(game)?;
        InPhase::check(game, Phase::AwaitingPlacement, "place a piece")?;
        CellIsEmpty::check(pos, game)?;
        Ok(())
    }

    fn post(before: &GameState, after: &GameState) -> Result<(), QuartoError> {
        if after.board().piece_count() != before.board().piece_count() + 1 {
            return Err(QuartoError::InvariantViolation(
                "Placement must add exactly one piece".to_string(),
            ));
        }
        check_invariants(after)
    }
}
