//! Quarto rules engine.
//!
//! Quarto is a two-player placement game. Sixteen pieces, each a unique
//! combination of four binary attributes (color, size, shape, top), go on
//! a 4x4 board. On each turn one player selects a piece from the pool and
//! the opponent places it on an empty cell. A player who completes a row,
//! column or diagonal of four pieces sharing at least one attribute wins.
//! With extended rules, any 2x2 square also counts.
//!
//! # Architecture
//!
//! - **Pieces**: [`Piece`] encoding and the [`PiecePool`] of unused pieces
//! - **Board**: 4x4 [`Board`] occupancy addressed by [`Position`]
//! - **Rules**: pure win and draw detection ([`find_win`], [`is_draw`])
//! - **State machine**: [`GameState`] turn phases, history and outcome
//! - **Persistence**: JSON [`GameSnapshot`]s and TOML [`GameRecord`]s
//!
//! # Example
//!
//! ```
//! use quarto::{new_game, Phase, Piece};
//!
//! let mut game = new_game(false);
//! let piece: Piece = "BLSF".parse().unwrap();
//! game.select_piece(piece).unwrap();
//! assert_eq!(game.current_phase(), Phase::AwaitingPlacement);
//!
//! let phase = game.place_piece(1, 2).unwrap();
//! assert_eq!(phase, Phase::AwaitingSelection);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod games;

// Crate-level exports - Configuration
pub use config::{ConfigError, GameConfig};

// Crate-level exports - Pieces and board
pub use games::quarto::{
    Axis, BOARD_SIZE, Board, CELL_COUNT, Color, PIECE_COUNT, ParsePieceError, ParsePositionError, Piece,
    PiecePool, Position, Shape, SharedAttribute, Size, Top, new_pool,
};

// Crate-level exports - Rules
pub use games::quarto::{
    EXTENDED_LINE_COUNT, Line, LineKind, STANDARD_LINE_COUNT, WinReport, WinningLine, check_line, find_win,
    is_draw, is_full, lines, shared_attributes,
};

// Crate-level exports - Game state machine
pub use games::quarto::{Action, GameState, Outcome, Phase, Player, QuartoError, new_game};

// Crate-level exports - Contracts and invariants
pub use games::quarto::{
    AlternatingTurnInvariant, CellIsEmpty, Contract, GameNotOver, InPhase, Invariant, InvariantSet,
    InvariantViolation, MonotonicBoardInvariant, PieceAvailable, PieceConservationInvariant, PlaceContract,
    QuartoInvariants, SelectContract,
};

// Crate-level exports - Persistence
pub use games::quarto::{GameRecord, GameSnapshot, RecordError, Turn};
