//! First-class action types for Quarto.
//!
//! Each successful mutation of a game is recorded as an action, so a game
//! can be replayed, logged, or checked against its history.

use super::{Piece, Player, Position};
use serde::{Deserialize, Serialize};

/// A single step of a Quarto turn.
///
/// A turn is a selection by one player followed by a placement by the
/// other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// `player` hands `piece` to the opponent.
    Select {
        /// The selecting player.
        player: Player,
        /// The piece handed over.
        piece: Piece,
    },
    /// `player` places the selected piece at `position`.
    Place {
        /// The placing player.
        player: Player,
        /// Target cell.
        position: Position,
    },
}

impl Action {
    /// Returns the player performing this action.
    pub fn player(&self) -> Player {
        match self {
            Action::Select { player, .. } | Action::Place { player, .. } => *player,
        }
    }

    /// True for selections.
    pub fn is_select(&self) -> bool {
        matches!(self, Action::Select { .. })
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Select { player, piece } => write!(f, "{} selects {}", player, piece),
            Action::Place { player, position } => write!(f, "{} places at {}", player, position),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_json_shape() {
        let action = Action::Place {
            player: Player::Two,
            position: Position::new(1, 3).unwrap(),
        };
        let json = serde_json::to_value(action).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"action": "place", "player": "two", "position": [1, 3]})
        );
        let back: Action = serde_json::from_value(json).unwrap();
        assert_eq!(back, action);
    }

    #[test]
    fn test_display() {
        let action = Action::Select {
            player: Player::One,
            piece: "BLSF".parse().unwrap(),
        };
        assert_eq!(action.to_string(), "One selects BLSF");
        assert!(action.is_select());
        assert_eq!(action.player(), Player::One);
    }
}
