//! Serializable snapshot of a game in any phase.
//!
//! A snapshot carries the board grid, the pool, the selected piece, the
//! active player, the phase, the rule flag and (optionally) the action
//! history. Restoring re-derives the outcome with a fresh win check and
//! rejects snapshots that no legal game could reach.

use super::action::Action;
use super::error::QuartoError;
use super::game::GameState;
use super::invariants::{InvariantSet, QuartoInvariants};
use super::phases::{Outcome, Phase};
use super::pool::PiecePool;
use super::rules::find_win;
use super::{Board, Piece, Player};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Serializable view of a [`GameState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Board occupancy, rows of cells.
    pub board: Board,
    /// Pieces neither placed nor selected.
    pub pool: PiecePool,
    /// Piece awaiting placement.
    pub selected: Option<Piece>,
    /// Player whose action is awaited.
    pub active_player: Player,
    /// Current phase.
    pub phase: Phase,
    /// Whether 2x2 squares count.
    pub extended_rules: bool,
    /// Actions so far. May be empty or cover only the later turns.
    #[serde(default)]
    pub history: Vec<Action>,
}

impl From<&GameState> for GameSnapshot {
    fn from(game: &GameState) -> Self {
        Self {
            board: game.board().clone(),
            pool: *game.pool(),
            selected: game.selected_piece(),
            active_player: game.active_player(),
            phase: game.current_phase(),
            extended_rules: game.extended_rules(),
            history: game.history().to_vec(),
        }
    }
}

impl GameSnapshot {
    /// Serializes to pretty JSON.
    pub fn to_json(&self) -> Result<String, QuartoError> {
        serde_json::to_string_pretty(self).map_err(|e| QuartoError::InvalidSnapshot(e.to_string()))
    }

    /// Parses JSON without validating the game (see [`GameState::try_from`]).
    pub fn from_json(json: &str) -> Result<Self, QuartoError> {
        serde_json::from_str(json).map_err(|e| QuartoError::InvalidSnapshot(e.to_string()))
    }

    fn placements(&self) -> usize {
        self.history.iter().filter(|a| !a.is_select()).count()
    }

    /// Player a legal game awaits in `phase`, given the pieces on the board.
    ///
    /// Player Two places the odd-numbered pieces and Player One the even
    /// ones. The last placer stays active until they select.
    fn expected_active(&self, phase: Phase) -> Player {
        let placer = |nth: usize| if nth % 2 == 1 { Player::Two } else { Player::One };
        let placed = self.board.piece_count();
        match phase {
            Phase::AwaitingPlacement => placer(placed + 1),
            Phase::AwaitingSelection | Phase::Won | Phase::Drawn => placer(placed),
        }
    }

    /// Phase implied by the board, independent of the recorded phase.
    fn derived_phase(&self) -> (Phase, Option<Outcome>) {
        if let Some(report) = find_win(&self.board, self.extended_rules) {
            let outcome = Outcome::Won {
                winner: self.active_player,
                report,
            };
            return (Phase::Won, Some(outcome));
        }
        if self.board.is_full() {
            return (Phase::Drawn, Some(Outcome::Drawn));
        }
        let phase = if self.selected.is_some() {
            Phase::AwaitingPlacement
        } else {
            Phase::AwaitingSelection
        };
        (phase, None)
    }
}

impl TryFrom<GameSnapshot> for GameState {
    type Error = QuartoError;

    /// Restores a game from a snapshot.
    ///
    /// A history covering every placed piece is replayed and must reproduce
    /// the snapshot exactly. Otherwise the state is rebuilt from its fields
    /// and checked against the game invariants.
    #[instrument(skip(snapshot), fields(phase = %snapshot.phase, pieces = snapshot.board.piece_count()))]
    fn try_from(snapshot: GameSnapshot) -> Result<Self, Self::Error> {
        if !snapshot.history.is_empty() && snapshot.placements() == snapshot.board.piece_count() {
            debug!(actions = snapshot.history.len(), "Restoring by replay");
            let game = GameState::replay(snapshot.extended_rules, &snapshot.history)
                .map_err(|e| QuartoError::InvalidSnapshot(format!("history does not replay: {}", e)))?;
            if GameSnapshot::from(&game) != snapshot {
                warn!("Replayed history disagrees with snapshot fields");
                return Err(QuartoError::InvalidSnapshot(
                    "history does not match board, pool or turn".to_string(),
                ));
            }
            return Ok(game);
        }

        let (phase, outcome) = snapshot.derived_phase();
        if phase != snapshot.phase {
            return Err(QuartoError::InvalidSnapshot(format!(
                "phase {} does not match board (expected {})",
                snapshot.phase, phase
            )));
        }

        let expected = snapshot.expected_active(phase);
        if snapshot.active_player != expected {
            warn!(active = %snapshot.active_player, %expected, "Turn order does not match board");
            return Err(QuartoError::InvalidSnapshot(format!(
                "{} cannot be active with {} pieces placed while {}",
                snapshot.active_player,
                snapshot.board.piece_count(),
                phase
            )));
        }

        // A pending selection is the one action a bare snapshot still implies.
        let mut history = snapshot.history;
        if history.is_empty()
            && let Some(piece) = snapshot.selected
        {
            history.push(Action::Select {
                player: snapshot.active_player.opponent(),
                piece,
            });
        }

        let game = GameState {
            board: snapshot.board,
            pool: snapshot.pool,
            selected: snapshot.selected,
            active: snapshot.active_player,
            phase,
            extended_rules: snapshot.extended_rules,
            outcome,
            history,
        };

        QuartoInvariants::check_all(&game).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            QuartoError::InvalidSnapshot(descriptions)
        })?;

        debug!("Snapshot restored");
        Ok(game)
    }
}

impl GameState {
    /// Captures this game as a snapshot.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::from(self)
    }

    /// Serializes this game to pretty JSON.
    pub fn to_json(&self) -> Result<String, QuartoError> {
        self.snapshot().to_json()
    }

    /// Restores and validates a game from JSON.
    pub fn from_json(json: &str) -> Result<Self, QuartoError> {
        GameSnapshot::from_json(json)?.try_into()
    }
}
