//! Turn phases and game outcomes.

use super::rules::WinReport;
use super::Player;
use serde::{Deserialize, Serialize};

/// Phase of the Quarto state machine.
///
/// `AwaitingSelection -> AwaitingPlacement -> AwaitingSelection | Won | Drawn`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No piece is selected; the active player must hand one to the opponent.
    #[strum(serialize = "awaiting selection")]
    AwaitingSelection,
    /// A piece is selected; the active player must place it.
    #[strum(serialize = "awaiting placement")]
    AwaitingPlacement,
    /// A placement completed a winning line (terminal).
    #[strum(serialize = "won")]
    Won,
    /// The board filled with no winning line (terminal).
    #[strum(serialize = "drawn")]
    Drawn,
}

impl Phase {
    /// Returns true for `Won` and `Drawn`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Won | Phase::Drawn)
    }
}

/// Outcome of a finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// A player completed one or more winning lines.
    Won {
        /// The player who placed the completing piece.
        winner: Player,
        /// Every winning line and its shared attributes.
        report: WinReport,
    },
    /// The board filled without a winning line.
    Drawn,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::Won { winner, .. } => Some(*winner),
            Outcome::Drawn => None,
        }
    }

    /// Returns the win details if there are any.
    pub fn report(&self) -> Option<&WinReport> {
        match self {
            Outcome::Won { report, .. } => Some(report),
            Outcome::Drawn => None,
        }
    }

    /// Returns true if the game was a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Drawn)
    }

    /// Terminal phase matching this outcome.
    pub fn phase(&self) -> Phase {
        match self {
            Outcome::Won { .. } => Phase::Won,
            Outcome::Drawn => Phase::Drawn,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Won { winner, report } => write!(f, "Player {} wins: {}", winner, report),
            Outcome::Drawn => write!(f, "Draw"),
        }
    }
}
