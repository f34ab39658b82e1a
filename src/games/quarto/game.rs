//! The Quarto state machine.
//!
//! A [`GameState`] owns one board, one piece pool, the selected piece and
//! the turn bookkeeping. [`GameState::select_piece`] and
//! [`GameState::place_piece`] are the only mutations. Both validate
//! first and build the next state on a copy, so a failed call never
//! leaves a partial change behind.

use super::action::Action;
use super::contracts::{Contract, PlaceContract, SelectContract};
use super::error::QuartoError;
use super::phases::{Outcome, Phase};
use super::pool::PiecePool;
use super::rules::{WinReport, find_win};
use super::{Board, Piece, Player, Position};
use tracing::{debug, info, instrument};

/// Complete state of one Quarto game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub(super) board: Board,
    pub(super) pool: PiecePool,
    pub(super) selected: Option<Piece>,
    pub(super) active: Player,
    pub(super) phase: Phase,
    pub(super) extended_rules: bool,
    pub(super) outcome: Option<Outcome>,
    pub(super) history: Vec<Action>,
}

/// Starts a new game: empty board, full pool, Player One to select.
///
/// With `extended_rules`, 2x2 squares also count as winning lines. The
/// flag is fixed for the life of the game.
pub fn new_game(extended_rules: bool) -> GameState {
    GameState::new(extended_rules)
}

impl GameState {
    /// Creates a new game in `AwaitingSelection`.
    #[instrument]
    pub fn new(extended_rules: bool) -> Self {
        Self {
            board: Board::new(),
            pool: PiecePool::full(),
            selected: None,
            active: Player::One,
            phase: Phase::AwaitingSelection,
            extended_rules,
            outcome: None,
            history: Vec::new(),
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Queries
    // ─────────────────────────────────────────────────────────────

    /// Returns the current phase.
    pub fn current_phase(&self) -> Phase {
        self.phase
    }

    /// Returns the player whose action is awaited.
    ///
    /// In a finished game this is the player who made the last placement.
    pub fn active_player(&self) -> Player {
        self.active
    }

    /// Pieces that may be selected now. Empty outside `AwaitingSelection`.
    pub fn legal_piece_choices(&self) -> Vec<Piece> {
        match self.phase {
            Phase::AwaitingSelection => self.pool.remaining().collect(),
            _ => Vec::new(),
        }
    }

    /// Cells the selected piece may go to. Empty outside `AwaitingPlacement`.
    pub fn legal_cells(&self) -> Vec<Position> {
        match self.phase {
            Phase::AwaitingPlacement => self.board.empty_cells(),
            _ => Vec::new(),
        }
    }

    /// True once a placement completed a winning line.
    pub fn is_won(&self) -> bool {
        self.phase == Phase::Won
    }

    /// True once the board filled without a winning line.
    pub fn is_drawn(&self) -> bool {
        self.phase == Phase::Drawn
    }

    /// True in `Won` or `Drawn`.
    pub fn is_over(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Every winning line of a won game.
    pub fn winning_lines(&self) -> Option<&WinReport> {
        self.outcome.as_ref().and_then(Outcome::report)
    }

    /// The winner of a won game.
    pub fn winner(&self) -> Option<Player> {
        self.outcome.as_ref().and_then(Outcome::winner)
    }

    /// The outcome of a finished game.
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the pool of unplaced, unselected pieces.
    pub fn pool(&self) -> &PiecePool {
        &self.pool
    }

    /// Returns the piece awaiting placement.
    pub fn selected_piece(&self) -> Option<Piece> {
        self.selected
    }

    /// Whether 2x2 squares count as winning lines.
    pub fn extended_rules(&self) -> bool {
        self.extended_rules
    }

    /// Returns the action history.
    pub fn history(&self) -> &[Action] {
        &self.history
    }

    // ─────────────────────────────────────────────────────────────
    //  Transitions
    // ─────────────────────────────────────────────────────────────

    /// Hands `piece` to the opponent.
    ///
    /// The piece leaves the pool, the phase becomes `AwaitingPlacement`
    /// and the opponent becomes the active player.
    ///
    /// # Errors
    ///
    /// - [`QuartoError::GameAlreadyOver`] after a win or draw
    /// - [`QuartoError::IllegalPhase`] unless awaiting selection
    /// - [`QuartoError::PieceNotInPool`] if the piece is placed or already selected
    #[instrument(skip(self, piece), fields(piece = %piece, player = %self.active))]
    pub fn select_piece(&mut self, piece: Piece) -> Result<(), QuartoError> {
        SelectContract::pre(self, &piece)?;

        let mut next = self.clone();
        next.pool.remove(piece)?;
        next.selected = Some(piece);
        next.history.push(Action::Select {
            player: self.active,
            piece,
        });
        next.active = self.active.opponent();
        next.phase = Phase::AwaitingPlacement;

        #[cfg(debug_assertions)]
        SelectContract::post(self, &next)?;

        debug!(next_player = %next.active, remaining = next.pool.len(), "Piece selected");
        *self = next;
        Ok(())
    }

    /// Places the selected piece at `(row, col)` and evaluates the board.
    ///
    /// Returns the resulting phase: `Won` if any line completes with a
    /// shared attribute (even when the board is also full), else `Drawn`
    /// on a full board, else `AwaitingSelection` with the placing player
    /// still active, since they now select for the opponent.
    ///
    /// # Errors
    ///
    /// - [`QuartoError::OutOfBounds`] for coordinates outside the grid, in any phase
    /// - [`QuartoError::GameAlreadyOver`] after a win or draw
    /// - [`QuartoError::IllegalPhase`] unless awaiting placement
    /// - [`QuartoError::CellOccupied`] if the cell already holds a piece
    #[instrument(skip(self), fields(player = %self.active))]
    pub fn place_piece(&mut self, row: usize, col: usize) -> Result<Phase, QuartoError> {
        PlaceContract::pre(self, &(row, col))?;

        let position = Position::new(row, col)?;
        let piece = self.selected.ok_or(QuartoError::IllegalPhase {
            operation: "place a piece",
            phase: self.phase,
        })?;

        let mut next = self.clone();
        next.board.place_at(position, piece)?;
        next.selected = None;
        next.history.push(Action::Place {
            player: self.active,
            position,
        });

        if let Some(report) = find_win(&next.board, next.extended_rules) {
            info!(winner = %self.active, lines = %report, "Game won");
            next.phase = Phase::Won;
            next.outcome = Some(Outcome::Won {
                winner: self.active,
                report,
            });
        } else if next.board.is_full() {
            info!("Game drawn");
            next.phase = Phase::Drawn;
            next.outcome = Some(Outcome::Drawn);
        } else {
            next.phase = Phase::AwaitingSelection;
        }

        #[cfg(debug_assertions)]
        PlaceContract::post(self, &next)?;

        debug!(%position, %piece, phase = %next.phase, "Piece placed");
        *self = next;
        Ok(self.phase)
    }

    /// Applies a recorded action, checking it names the active player.
    ///
    /// # Errors
    ///
    /// [`QuartoError::WrongPlayer`] if another player is expected, plus
    /// any error of the underlying transition.
    #[instrument(skip(self, action), fields(action = %action))]
    pub fn apply(&mut self, action: Action) -> Result<Phase, QuartoError> {
        if self.is_over() {
            return Err(QuartoError::GameAlreadyOver);
        }
        if action.player() != self.active {
            return Err(QuartoError::WrongPlayer {
                expected: self.active,
                actual: action.player(),
            });
        }
        match action {
            Action::Select { piece, .. } => {
                self.select_piece(piece)?;
                Ok(self.phase)
            }
            Action::Place { position, .. } => self.place_piece(position.row(), position.col()),
        }
    }

    /// Replays actions from a new game.
    ///
    /// # Errors
    ///
    /// Returns the first error any action produces.
    #[instrument(skip(actions), fields(count = actions.len()))]
    pub fn replay(extended_rules: bool, actions: &[Action]) -> Result<Self, QuartoError> {
        let mut game = Self::new(extended_rules);
        for action in actions {
            game.apply(*action)?;
        }
        Ok(game)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn piece(code: &str) -> Piece {
        code.parse().unwrap()
    }

    /// Observable state compared for no-op checks.
    fn observe(game: &GameState) -> (Phase, Board, PiecePool, Option<Piece>, Player, usize) {
        (
            game.current_phase(),
            game.board().clone(),
            *game.pool(),
            game.selected_piece(),
            game.active_player(),
            game.history().len(),
        )
    }

    #[test]
    fn test_initial_state() {
        let game = new_game(false);
        assert_eq!(game.current_phase(), Phase::AwaitingSelection);
        assert_eq!(game.active_player(), Player::One);
        assert_eq!(game.legal_piece_choices().len(), 16);
        assert!(game.legal_cells().is_empty());
        assert_eq!(game.selected_piece(), None);
        assert!(!game.is_won());
        assert!(!game.is_drawn());
    }

    #[test]
    fn test_select_then_place_turn_structure() {
        let mut game = new_game(false);
        game.select_piece(piece("BLSF")).unwrap();
        assert_eq!(game.current_phase(), Phase::AwaitingPlacement);
        assert_eq!(game.active_player(), Player::Two);
        assert_eq!(game.selected_piece(), Some(piece("BLSF")));
        assert!(!game.pool().contains(piece("BLSF")));
        assert!(game.legal_piece_choices().is_empty());
        assert_eq!(game.legal_cells().len(), 16);

        let phase = game.place_piece(2, 1).unwrap();
        assert_eq!(phase, Phase::AwaitingSelection);
        // The placing player now selects for the opponent.
        assert_eq!(game.active_player(), Player::Two);
        assert_eq!(game.selected_piece(), None);
        assert_eq!(game.legal_piece_choices().len(), 15);
    }

    #[test]
    fn test_place_before_select_is_illegal_phase() {
        let mut game = new_game(false);
        let before = observe(&game);
        assert!(matches!(
            game.place_piece(0, 0),
            Err(QuartoError::IllegalPhase { phase: Phase::AwaitingSelection, .. })
        ));
        assert_eq!(observe(&game), before);
    }

    #[test]
    fn test_select_twice_is_illegal_phase() {
        let mut game = new_game(false);
        game.select_piece(piece("BLSF")).unwrap();
        let before = observe(&game);
        assert!(matches!(
            game.select_piece(piece("WLSF")),
            Err(QuartoError::IllegalPhase { .. })
        ));
        assert_eq!(observe(&game), before);
    }

    #[test]
    fn test_select_placed_piece_fails() {
        let mut game = new_game(false);
        game.select_piece(piece("BLSF")).unwrap();
        game.place_piece(0, 0).unwrap();
        let before = observe(&game);
        assert_eq!(
            game.select_piece(piece("BLSF")),
            Err(QuartoError::PieceNotInPool(piece("BLSF")))
        );
        assert_eq!(observe(&game), before);
    }

    #[test]
    fn test_place_on_occupied_cell_fails() {
        let mut game = new_game(false);
        game.select_piece(piece("BLSF")).unwrap();
        game.place_piece(0, 0).unwrap();
        game.select_piece(piece("WSRH")).unwrap();
        let before = observe(&game);
        assert_eq!(
            game.place_piece(0, 0),
            Err(QuartoError::CellOccupied(Position::new(0, 0).unwrap()))
        );
        assert_eq!(observe(&game), before);
    }

    #[test]
    fn test_out_of_bounds_in_every_phase() {
        let mut game = new_game(false);
        assert_eq!(game.place_piece(4, 0), Err(QuartoError::OutOfBounds { row: 4, col: 0 }));
        game.select_piece(piece("BLSF")).unwrap();
        let before = observe(&game);
        assert_eq!(game.place_piece(4, 0), Err(QuartoError::OutOfBounds { row: 4, col: 0 }));
        assert_eq!(observe(&game), before);
    }

    #[test]
    fn test_row_win_on_shared_color() {
        let mut game = new_game(false);
        for (col, code) in ["BLSF", "BSRH", "BLRF", "BSSH"].iter().enumerate() {
            game.select_piece(piece(code)).unwrap();
            game.place_piece(0, col).unwrap();
        }
        assert!(game.is_won());
        assert_eq!(game.selected_piece(), None);
        let report = game.winning_lines().unwrap();
        assert_eq!(report.lines().len(), 1);
        assert_eq!(report.lines()[0].line().kind(), super::super::rules::LineKind::Row(0));
    }

    #[test]
    fn test_no_mutation_after_game_over() {
        let mut game = new_game(false);
        for (col, code) in ["BLSF", "BSRH", "BLRF", "BSSH"].iter().enumerate() {
            game.select_piece(piece(code)).unwrap();
            game.place_piece(0, col).unwrap();
        }
        let before = observe(&game);
        assert_eq!(game.select_piece(piece("WLSF")), Err(QuartoError::GameAlreadyOver));
        assert_eq!(game.place_piece(1, 1), Err(QuartoError::GameAlreadyOver));
        assert_eq!(observe(&game), before);
    }

    #[test]
    fn test_winner_is_placing_player() {
        let mut game = new_game(false);
        // One selects, Two places; Two selects, One places; ...
        let expected_placers = [Player::Two, Player::One, Player::Two, Player::One];
        for (col, code) in ["WLSF", "WSRH", "WLRF", "WSSH"].iter().enumerate() {
            game.select_piece(piece(code)).unwrap();
            assert_eq!(game.active_player(), expected_placers[col]);
            game.place_piece(col, 0).unwrap();
        }
        assert_eq!(game.winner(), Some(Player::One));
    }

    #[test]
    fn test_apply_rejects_wrong_player() {
        let mut game = new_game(false);
        let action = Action::Select {
            player: Player::Two,
            piece: piece("BLSF"),
        };
        assert_eq!(
            game.apply(action),
            Err(QuartoError::WrongPlayer {
                expected: Player::One,
                actual: Player::Two
            })
        );
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_replay_matches_live_game() {
        let mut live = new_game(true);
        live.select_piece(piece("BLSF")).unwrap();
        live.place_piece(1, 1).unwrap();
        live.select_piece(piece("WSRH")).unwrap();
        live.place_piece(2, 3).unwrap();

        let replayed = GameState::replay(true, live.history()).unwrap();
        assert_eq!(replayed, live);
    }

    #[test]
    fn test_pieces_are_conserved() {
        let mut game = new_game(false);
        let picks = ["BLSF", "WSRH", "BSRF", "WLSH", "BLRH"];
        let cells = [(0, 0), (1, 2), (3, 3), (2, 0), (0, 3)];
        for (code, (row, col)) in picks.iter().zip(cells) {
            game.select_piece(piece(code)).unwrap();
            let mut seen: HashSet<Piece> = game.pool().remaining().collect();
            seen.extend(game.board().occupied().map(|(_, p)| p));
            seen.extend(game.selected_piece());
            assert_eq!(seen.len(), 16);
            game.place_piece(row, col).unwrap();
        }
    }
}
