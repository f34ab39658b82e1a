//! Quarto rules engine.
//!
//! Sixteen pieces, each a unique combination of four binary attributes,
//! are placed on a 4x4 board. Each turn one player selects a piece and the
//! opponent places it. Whoever completes a line of four pieces sharing an
//! attribute wins.

mod action;
mod board;
mod contracts;
mod error;
mod game;
mod invariants;
mod phases;
mod piece;
mod pool;
mod position;
mod record;
mod rules;
mod snapshot;
mod types;

pub use action::Action;
pub use board::Board;
pub use contracts::{CellIsEmpty, Contract, GameNotOver, InPhase, PieceAvailable, PlaceContract, SelectContract};
pub use error::QuartoError;
pub use game::{GameState, new_game};
pub use invariants::{
    AlternatingTurnInvariant, Invariant, InvariantSet, InvariantViolation, MonotonicBoardInvariant,
    PieceConservationInvariant, QuartoInvariants,
};
pub use phases::{Outcome, Phase};
pub use piece::{Axis, Color, PIECE_COUNT, ParsePieceError, Piece, Shape, SharedAttribute, Size, Top};
pub use pool::{PiecePool, new_pool};
pub use position::{BOARD_SIZE, CELL_COUNT, ParsePositionError, Position};
pub use record::{GameRecord, RecordError, Turn};
pub use rules::{
    EXTENDED_LINE_COUNT, Line, LineKind, STANDARD_LINE_COUNT, WinReport, WinningLine, check_line, find_win,
    is_draw, is_full, lines, shared_attributes,
};
pub use snapshot::GameSnapshot;
pub use types::Player;
