//! Alternating turn invariant: selections and placements interleave.

use super::super::{Action, GameState, Phase, Player};
use super::Invariant;

/// Invariant: turns follow the select/place rhythm.
///
/// A selection is always followed by the opponent's placement, and a
/// placement by the same player's selection. The phase, active player,
/// selected piece and outcome must agree with the last recorded action.
/// A history that starts at game start begins with Player One selecting.
pub struct AlternatingTurnInvariant;

fn phase_consistent(game: &GameState) -> bool {
    let selected = game.selected_piece().is_some();
    let phase = game.current_phase();
    let outcome_phase = game.outcome().map(|o| o.phase());

    match phase {
        Phase::AwaitingPlacement => selected && outcome_phase.is_none(),
        Phase::AwaitingSelection => !selected && outcome_phase.is_none(),
        Phase::Won | Phase::Drawn => !selected && outcome_phase == Some(phase),
    }
}

impl Invariant<GameState> for AlternatingTurnInvariant {
    fn holds(game: &GameState) -> bool {
        if !phase_consistent(game) {
            return false;
        }

        let history = game.history();
        for pair in history.windows(2) {
            let ok = match (pair[0], pair[1]) {
                (Action::Select { player: a, .. }, Action::Place { player: b, .. }) => a != b,
                (Action::Place { player: a, .. }, Action::Select { player: b, .. }) => a == b,
                _ => false,
            };
            if !ok {
                return false;
            }
        }

        let placements = history.iter().filter(|a| !a.is_select()).count();
        if placements == game.board().piece_count()
            && let Some(first) = history.first()
            && !(first.is_select() && first.player() == Player::One)
        {
            return false;
        }

        match history.last() {
            None => true,
            Some(Action::Select { player, .. }) => {
                game.current_phase() == Phase::AwaitingPlacement && game.active_player() == player.opponent()
            }
            Some(Action::Place { player, .. }) => {
                game.current_phase() != Phase::AwaitingPlacement && game.active_player() == *player
            }
        }
    }

    fn description() -> &'static str {
        "Players alternate: the placer selects next, the selector's opponent places"
    }
}
