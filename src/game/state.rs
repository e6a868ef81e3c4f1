use serde::Serialize;

use super::board::{Board, Run, WinScan};
use super::player::{Player, PlayerProfile};
use crate::config::{AppConfig, GameConfig};
use crate::error::{ConfigError, RejectReason};

/// Where a game stands. Exactly one of these holds at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "winner", rename_all = "snake_case")]
pub enum GameStatus {
    InProgress,
    Won(Player),
    Tied,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

/// What a successful drop did to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Continue,
    Win,
    Tie,
}

/// Result of a drop request, handed back to whoever renders the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum DropResult {
    Rejected {
        reason: RejectReason,
    },
    Placed {
        row: usize,
        column: usize,
        player: Player,
        outcome: Outcome,
    },
}

impl DropResult {
    pub fn is_placed(&self) -> bool {
        matches!(self, DropResult::Placed { .. })
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            DropResult::Placed { outcome, .. } => Some(*outcome),
            DropResult::Rejected { .. } => None,
        }
    }

    pub fn rejection(&self) -> Option<RejectReason> {
        match self {
            DropResult::Rejected { reason } => Some(*reason),
            DropResult::Placed { .. } => None,
        }
    }
}

/// One game of Connect Four: the grid, whose turn it is, and whether it is over.
///
/// The grid is only ever written through [`GameState::attempt_drop`].
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    board: Board,
    players: [PlayerProfile; 2],
    current_player: Player,
    status: GameStatus,
    win_scan: WinScan,
    moves: usize,
}

impl GameState {
    /// Start a game on a `width` x `height` grid.
    pub fn new(
        width: usize,
        height: usize,
        player_one: PlayerProfile,
        player_two: PlayerProfile,
    ) -> Result<Self, ConfigError> {
        let config = AppConfig {
            game: GameConfig {
                width,
                height,
                ..GameConfig::default()
            },
            players: [player_one, player_two],
        };
        Self::from_config(&config)
    }

    /// Start a game from a loaded configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_parts(config.game, config.players.clone()))
    }

    fn from_parts(game: GameConfig, players: [PlayerProfile; 2]) -> Self {
        tracing::info!(width = game.width, height = game.height, "new game");
        GameState {
            board: Board::new(game.width, game.height),
            players,
            current_player: Player::One,
            status: GameStatus::InProgress,
            win_scan: game.win_scan,
            moves: 0,
        }
    }

    /// Use a different win detection strategy.
    pub fn with_win_scan(mut self, win_scan: WinScan) -> Self {
        self.win_scan = win_scan;
        self
    }

    /// Begin a fresh game with the same dimensions, players and rules.
    pub fn reset(&mut self) {
        let game = GameConfig {
            width: self.board.width(),
            height: self.board.height(),
            win_scan: self.win_scan,
        };
        let players = self.players.clone();
        *self = Self::from_parts(game, players);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn current_profile(&self) -> &PlayerProfile {
        self.profile(self.current_player)
    }

    pub fn profile(&self, player: Player) -> &PlayerProfile {
        &self.players[player.index()]
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn winner(&self) -> Option<Player> {
        match self.status {
            GameStatus::Won(player) => Some(player),
            _ => None,
        }
    }

    /// The four cells that won the game, if it was won.
    pub fn winning_run(&self) -> Option<Run> {
        self.winner().and_then(|player| self.board.winning_run(player))
    }

    pub fn win_scan(&self) -> WinScan {
        self.win_scan
    }

    /// Number of pieces placed so far
    pub fn move_count(&self) -> usize {
        self.moves
    }

    /// Columns that would accept a drop right now.
    pub fn legal_columns(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }
        (0..self.board.width())
            .filter(|&col| !self.board.is_column_full(col))
            .collect()
    }

    /// Drop the current player's piece into `column`.
    ///
    /// Either the whole move applies (piece placed, status updated, turn
    /// passed) or nothing changes and a rejection is returned. A move that
    /// completes four in a row on the last empty cell is a win, not a tie.
    pub fn attempt_drop(&mut self, column: usize) -> DropResult {
        match self.try_drop(column) {
            Ok(placed) => placed,
            Err(reason) => {
                tracing::debug!(column, %reason, "drop rejected");
                DropResult::Rejected { reason }
            }
        }
    }

    fn try_drop(&mut self, column: usize) -> Result<DropResult, RejectReason> {
        if self.is_terminal() {
            return Err(RejectReason::GameOver);
        }
        if !self.board.is_valid_column(column) {
            return Err(RejectReason::InvalidColumn);
        }
        let row = self
            .board
            .find_open_row(column)
            .ok_or(RejectReason::ColumnFull)?;

        let player = self.current_player;
        self.board.place(row, column, player);
        self.moves += 1;
        tracing::debug!(row, column, player = player.id(), "piece placed");

        let outcome = if self.board.is_winning_move(self.win_scan, row, column) {
            self.status = GameStatus::Won(player);
            tracing::info!(winner = player.id(), moves = self.moves, "game won");
            Outcome::Win
        } else if self.board.is_full() {
            self.status = GameStatus::Tied;
            tracing::info!(moves = self.moves, "game tied");
            Outcome::Tie
        } else {
            self.current_player = player.other();
            Outcome::Continue
        };

        Ok(DropResult::Placed {
            row,
            column,
            player,
            outcome,
        })
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::from_parts(
            GameConfig::default(),
            [
                PlayerProfile::default_for(Player::One),
                PlayerProfile::default_for(Player::Two),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Cell;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const SCANS: [WinScan; 2] = [WinScan::FullBoard, WinScan::LastMove];

    fn game(scan: WinScan) -> GameState {
        GameState::default().with_win_scan(scan)
    }

    fn play(state: &mut GameState, columns: &[usize]) -> DropResult {
        let mut last = None;
        for &col in columns {
            last = Some(state.attempt_drop(col));
        }
        last.expect("at least one move")
    }

    /// Column order that fills a 7x6 board with no four in a row. The final
    /// grid has player 1 wherever `column / 2 + level` is even (level counted
    /// from the bottom), so no line holds more than two of a kind.
    fn tie_sequence() -> Vec<usize> {
        let mut seq = Vec::new();
        for (a, b) in [(0, 2), (1, 3), (4, 6)] {
            for _ in 0..3 {
                seq.extend([a, b, b, a]);
            }
        }
        seq.extend([5; 6]);
        seq
    }

    #[test]
    fn test_initial_state() {
        let state = GameState::default();
        assert_eq!(state.current_player(), Player::One);
        assert_eq!(state.status(), GameStatus::InProgress);
        assert!(!state.is_terminal());
        assert_eq!(state.legal_columns().len(), 7);
        assert_eq!(state.move_count(), 0);
        assert_eq!(state.current_profile().name, "Player 1");
    }

    #[test]
    fn test_new_rejects_bad_dimensions() {
        let p1 = PlayerProfile::default_for(Player::One);
        let p2 = PlayerProfile::default_for(Player::Two);
        assert!(GameState::new(0, 6, p1.clone(), p2.clone()).is_err());
        assert!(GameState::new(7, 0, p1.clone(), p2.clone()).is_err());
        // Would overflow the cell count if it reached the board.
        assert!(GameState::new(usize::MAX, usize::MAX, p1.clone(), p2.clone()).is_err());
        let state = GameState::new(5, 4, p1, p2).unwrap();
        assert_eq!(state.board().width(), 5);
        assert_eq!(state.board().height(), 4);
    }

    #[test]
    fn test_constructors_agree_on_blank_names() {
        let blank = PlayerProfile::new("", "");
        let p2 = PlayerProfile::default_for(Player::Two);
        assert!(matches!(
            GameState::new(7, 6, blank.clone(), p2.clone()),
            Err(ConfigError::Validation(msg)) if msg.contains("players[0]")
        ));

        let mut config = AppConfig::default();
        config.players[0] = blank;
        assert!(matches!(
            GameState::from_config(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_from_config_keeps_profiles() {
        let mut config = AppConfig::default();
        config.players[1] = PlayerProfile::new("Grace", "blue");
        config.game.win_scan = WinScan::LastMove;
        let state = GameState::from_config(&config).unwrap();
        assert_eq!(state.profile(Player::Two).name, "Grace");
        assert_eq!(state.win_scan(), WinScan::LastMove);
    }

    #[test]
    fn test_placed_result() {
        let mut state = GameState::default();
        let result = state.attempt_drop(3);
        assert_eq!(
            result,
            DropResult::Placed {
                row: 5,
                column: 3,
                player: Player::One,
                outcome: Outcome::Continue,
            }
        );
        assert_eq!(state.current_player(), Player::Two);
        assert_eq!(state.board().get(5, 3), Cell::Piece(Player::One));
        assert_eq!(state.move_count(), 1);
    }

    #[test]
    fn test_invalid_column_rejected() {
        let mut state = GameState::default();
        let before = state.clone();
        assert_eq!(
            state.attempt_drop(7),
            DropResult::Rejected {
                reason: RejectReason::InvalidColumn
            }
        );
        assert_eq!(
            state.attempt_drop(usize::MAX).rejection(),
            Some(RejectReason::InvalidColumn)
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_column_full_rejected_without_turn_change() {
        let mut state = GameState::default();
        play(&mut state, &[3; 6]);
        let before = state.clone();
        assert_eq!(
            state.attempt_drop(3).rejection(),
            Some(RejectReason::ColumnFull)
        );
        assert_eq!(state, before);
        assert!(!state.legal_columns().contains(&3));
    }

    #[test]
    fn test_win_keeps_current_player() {
        for scan in SCANS {
            let mut state = game(scan);
            // 1 plays column 0, 2 plays column 1
            let result = play(&mut state, &[0, 1, 0, 1, 0, 1, 0]);
            assert_eq!(result.outcome(), Some(Outcome::Win), "{scan:?}");
            assert_eq!(state.status(), GameStatus::Won(Player::One));
            assert_eq!(state.current_player(), Player::One);
            assert_eq!(state.winner(), Some(Player::One));
            assert_eq!(
                state.winning_run(),
                Some([(2, 0), (3, 0), (4, 0), (5, 0)])
            );
            assert!(state.legal_columns().is_empty());
        }
    }

    #[test]
    fn test_player_two_can_win() {
        for scan in SCANS {
            let mut state = game(scan);
            let result = play(&mut state, &[6, 0, 6, 1, 5, 2, 6, 3]);
            assert_eq!(
                result,
                DropResult::Placed {
                    row: 5,
                    column: 3,
                    player: Player::Two,
                    outcome: Outcome::Win,
                }
            );
        }
    }

    #[test]
    fn test_terminal_lock() {
        let mut state = GameState::default();
        play(&mut state, &[0, 1, 0, 1, 0, 1, 0]);
        let before = state.clone();
        for col in 0..8 {
            assert_eq!(
                state.attempt_drop(col).rejection(),
                Some(RejectReason::GameOver)
            );
        }
        assert_eq!(state, before);
    }

    #[test]
    fn test_tie() {
        for scan in SCANS {
            let mut state = game(scan);
            let seq = tie_sequence();
            assert_eq!(seq.len(), 42);
            for (idx, &col) in seq.iter().enumerate() {
                let result = state.attempt_drop(col);
                let expected = if idx == 41 { Outcome::Tie } else { Outcome::Continue };
                assert_eq!(result.outcome(), Some(expected), "move {idx} col {col}");
            }
            assert_eq!(state.status(), GameStatus::Tied);
            assert_eq!(state.winner(), None);
            assert!(state.board().is_full());
            assert_eq!(
                state.attempt_drop(0).rejection(),
                Some(RejectReason::GameOver)
            );
        }
    }

    #[test]
    fn test_win_takes_precedence_over_tie() {
        // 4x3 board. Player 2's last piece completes the top row and fills
        // the grid at the same time.
        for scan in SCANS {
            let p1 = PlayerProfile::default_for(Player::One);
            let p2 = PlayerProfile::default_for(Player::Two);
            let mut state = GameState::new(4, 3, p1, p2).unwrap().with_win_scan(scan);
            let result = play(&mut state, &[0, 2, 0, 0, 1, 1, 2, 1, 3, 2, 3]);
            assert_eq!(result.outcome(), Some(Outcome::Continue));
            assert_eq!(state.legal_columns(), vec![3]);

            let result = state.attempt_drop(3);
            assert!(state.board().is_full());
            assert_eq!(result.outcome(), Some(Outcome::Win), "{scan:?}");
            assert_eq!(state.status(), GameStatus::Won(Player::Two));
            assert_eq!(
                state.winning_run(),
                Some([(0, 0), (0, 1), (0, 2), (0, 3)])
            );
        }
    }

    #[test]
    fn test_reset_reinitialises_everything() {
        let mut state = GameState::default().with_win_scan(WinScan::LastMove);
        play(&mut state, &[0, 1, 0, 1, 0, 1, 0]);
        state.reset();
        assert_eq!(state.status(), GameStatus::InProgress);
        assert_eq!(state.current_player(), Player::One);
        assert_eq!(state.move_count(), 0);
        assert_eq!(state.board().piece_count(), 0);
        assert_eq!(state.win_scan(), WinScan::LastMove);
    }

    #[test]
    fn test_drop_result_json_shape() {
        let placed = DropResult::Placed {
            row: 5,
            column: 0,
            player: Player::One,
            outcome: Outcome::Continue,
        };
        assert_eq!(
            serde_json::to_value(placed).unwrap(),
            serde_json::json!({
                "result": "placed",
                "row": 5,
                "column": 0,
                "player": 1,
                "outcome": "continue",
            })
        );
        let rejected = DropResult::Rejected {
            reason: RejectReason::ColumnFull,
        };
        assert_eq!(
            serde_json::to_value(rejected).unwrap(),
            serde_json::json!({ "result": "rejected", "reason": "column_full" })
        );
    }

    #[test]
    fn test_status_json_shape() {
        assert_eq!(
            serde_json::to_value(GameStatus::Won(Player::Two)).unwrap(),
            serde_json::json!({ "status": "won", "winner": 2 })
        );
        assert_eq!(
            serde_json::to_value(GameStatus::Tied).unwrap(),
            serde_json::json!({ "status": "tied" })
        );
    }

    #[test]
    fn test_random_games_hold_invariants() {
        for scan in SCANS {
            let mut rng = StdRng::seed_from_u64(0xC4);
            for _ in 0..200 {
                let mut state = game(scan);
                let mut heights = [0usize; 7];
                while !state.is_terminal() {
                    // Include an off-board column now and then.
                    let col = rng.random_range(0..8);
                    let before = state.clone();
                    let result = state.attempt_drop(col);
                    match result {
                        DropResult::Rejected { reason } => {
                            assert_eq!(state, before);
                            if col == 7 {
                                assert_eq!(reason, RejectReason::InvalidColumn);
                            } else {
                                assert_eq!(reason, RejectReason::ColumnFull);
                                assert_eq!(heights[col], 6);
                            }
                        }
                        DropResult::Placed {
                            row,
                            column,
                            player,
                            outcome,
                        } => {
                            // Gravity: the piece lands right above the stack.
                            assert_eq!(row, 5 - heights[column]);
                            heights[column] += 1;
                            assert_eq!(player, before.current_player());
                            assert_eq!(before.board().get(row, column), Cell::Empty);
                            match outcome {
                                Outcome::Continue => {
                                    assert_eq!(state.current_player(), player.other())
                                }
                                Outcome::Win | Outcome::Tie => {
                                    assert_eq!(state.current_player(), player)
                                }
                            }
                            // Placed pieces never change.
                            for r in 0..6 {
                                for c in 0..7 {
                                    let old = before.board().get(r, c);
                                    if !old.is_empty() {
                                        assert_eq!(state.board().get(r, c), old);
                                    }
                                }
                            }
                        }
                    }
                }
                assert_eq!(
                    state.attempt_drop(rng.random_range(0..7)).rejection(),
                    Some(RejectReason::GameOver)
                );
            }
        }
    }

    #[test]
    fn test_scan_strategies_agree_on_random_games() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let mut full = game(WinScan::FullBoard);
            let mut last = game(WinScan::LastMove);
            while !full.is_terminal() {
                let col = rng.random_range(0..7);
                assert_eq!(full.attempt_drop(col), last.attempt_drop(col));
            }
            assert_eq!(full.status(), last.status());
        }
    }
}
