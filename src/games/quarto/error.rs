//! Error type for Quarto operations.
//!
//! Every failed operation reports exactly one of these and leaves the game
//! untouched.

use super::phases::Phase;
use super::{Piece, Player, Position};

/// Error that can occur when validating or applying a Quarto operation.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum QuartoError {
    /// Coordinate outside the 4x4 grid.
    #[display("Cell ({}, {}) is outside the 4x4 board", row, col)]
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },

    /// Placement target already holds a piece.
    #[display("Cell {} is already occupied", _0)]
    CellOccupied(Position),

    /// Piece was already placed or already selected.
    #[display("Piece {} is not in the pool", _0)]
    PieceNotInPool(Piece),

    /// Operation invoked in the wrong phase.
    #[display("Cannot {} while {}", operation, phase)]
    IllegalPhase {
        /// The rejected operation.
        operation: &'static str,
        /// Phase the game was in.
        phase: Phase,
    },

    /// Any mutation after the game is won or drawn.
    #[display("Game is already over")]
    GameAlreadyOver,

    /// An action was attributed to the player whose turn it is not.
    #[display("It's {}'s turn, not {}'s", expected, actual)]
    WrongPlayer {
        /// Player whose action is awaited.
        expected: Player,
        /// Player named by the action.
        actual: Player,
    },

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),

    /// A snapshot does not describe a reachable game.
    #[display("Invalid snapshot: {}", _0)]
    InvalidSnapshot(String),
}

impl std::error::Error for QuartoError {}
