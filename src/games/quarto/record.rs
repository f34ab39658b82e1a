//! TOML game records.
//!
//! A record lists turns as `(piece, cell)` pairs. Turn `n` is a selection
//! of `piece` by the placer of turn `n - 1` (Player One for the first turn)
//! followed by its placement at `cell` by the opponent.
//!
//! ```toml
//! extended_rules = false
//!
//! [[turns]]
//! piece = "BLSF"
//! cell = [0, 0]
//! ```

use super::action::Action;
use super::error::QuartoError;
use super::game::GameState;
use super::{Piece, Position};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// One selection and the placement that follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct Turn {
    /// Piece handed to the placer.
    pub piece: Piece,
    /// Cell the piece is placed on.
    pub cell: Position,
}

/// A game written as a sequence of turns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameRecord {
    /// Whether 2x2 squares count as winning lines.
    #[serde(default)]
    extended_rules: bool,

    /// Turns in play order.
    #[serde(default)]
    turns: Vec<Turn>,
}

impl GameRecord {
    /// Creates a record from its parts.
    pub fn new(extended_rules: bool, turns: Vec<Turn>) -> Self {
        Self {
            extended_rules,
            turns,
        }
    }

    /// Parses a record from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, RecordError> {
        toml::from_str(content).map_err(|e| RecordError::new(format!("Failed to parse record: {}", e)))
    }

    /// Loads a record from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RecordError> {
        debug!("Loading game record");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| RecordError::new(format!("Failed to read record file: {}", e)))?;
        let record = Self::from_toml(&content)?;
        info!(turns = record.turns.len(), "Record loaded");
        Ok(record)
    }

    /// Renders the record as TOML text.
    pub fn to_toml(&self) -> Result<String, RecordError> {
        toml::to_string(self).map_err(|e| RecordError::new(format!("Failed to render record: {}", e)))
    }

    /// Overrides the rule flag.
    pub fn with_extended_rules(mut self, extended_rules: bool) -> Self {
        self.extended_rules = extended_rules;
        self
    }

    /// Plays every turn on a fresh game.
    ///
    /// Stops at the first rejected action. Turns after the game has ended
    /// fail with `GameAlreadyOver`.
    #[instrument(skip(self), fields(turns = self.turns.len(), extended = self.extended_rules))]
    pub fn play(&self) -> Result<GameState, QuartoError> {
        let mut game = GameState::new(self.extended_rules);
        for (number, turn) in self.turns.iter().enumerate() {
            debug!(turn = number + 1, piece = %turn.piece, cell = %turn.cell, "Playing turn");
            game.select_piece(turn.piece)?;
            game.place_piece(turn.cell.row(), turn.cell.col())?;
        }
        info!(phase = %game.current_phase(), "Record played");
        Ok(game)
    }
}

impl From<&GameState> for GameRecord {
    /// Collects completed turns from a game's history.
    ///
    /// A pending selection at the end of the history has no cell yet and
    /// is left out.
    fn from(game: &GameState) -> Self {
        let turns = game
            .history()
            .windows(2)
            .filter_map(|pair| match (pair[0], pair[1]) {
                (Action::Select { piece, .. }, Action::Place { position, .. }) => {
                    Some(Turn::new(piece, position))
                }
                _ => None,
            })
            .collect();
        Self::new(game.extended_rules(), turns)
    }
}

/// Game record error.
#[derive(Debug, Clone, Display, Error)]
#[display("Record error: {} at {}:{}", message, file, line)]
pub struct RecordError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl RecordError {
    /// Creates a new record error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
