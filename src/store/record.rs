//! Game records and the field sets used to create and update them.

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use derive_new::new;

use crate::games::side_stacker::{
    AiDifficulty, Board, GameMode, GameState, GameStatus, Player,
};

/// A stored game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct GameRecord {
    /// Game id.
    id: String,
    /// Current board.
    board: Board,
    /// Player to move, or the last mover once the game is over.
    current_player: Player,
    /// Game status, carrying the winner when won.
    status: GameStatus,
    /// Who drives each side.
    mode: GameMode,
    /// AI difficulty for X, when configured.
    ai_difficulty_x: Option<AiDifficulty>,
    /// AI difficulty for O, when configured.
    ai_difficulty_o: Option<AiDifficulty>,
    /// When the game was created.
    created_at: DateTime<Utc>,
    /// When the record last changed.
    updated_at: DateTime<Utc>,
    /// When the last accepted move was made (creation time before any).
    last_move_at: DateTime<Utc>,
}

impl GameRecord {
    /// Returns the winner, present only when the game is won.
    pub fn winner(&self) -> Option<Player> {
        self.status.winner()
    }

    /// Returns the board, turn and status as a [`GameState`].
    pub fn state(&self) -> GameState {
        GameState::from_parts(self.board, self.current_player, self.status)
    }

    /// Returns the difficulty used when the AI plays `player`.
    ///
    /// Slots without a configured difficulty play at [`AiDifficulty::Easy`].
    pub fn difficulty_for(&self, player: Player) -> AiDifficulty {
        match player {
            Player::X => self.ai_difficulty_x,
            Player::O => self.ai_difficulty_o,
        }
        .unwrap_or_default()
    }
}

/// Fields of a game about to be created.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct NewGame {
    /// Game id.
    id: String,
    /// Starting board.
    board: Board,
    /// Player to move first.
    current_player: Player,
    /// Starting status.
    status: GameStatus,
    /// Who drives each side.
    mode: GameMode,
    /// AI difficulty for X.
    ai_difficulty_x: Option<AiDifficulty>,
    /// AI difficulty for O.
    ai_difficulty_o: Option<AiDifficulty>,
    /// Creation time, also used for the initial move time.
    created_at: DateTime<Utc>,
}

impl NewGame {
    /// A fresh game: empty board, X to move, in progress.
    pub fn new(
        id: String,
        mode: GameMode,
        ai_difficulty_x: Option<AiDifficulty>,
        ai_difficulty_o: Option<AiDifficulty>,
        created_at: DateTime<Utc>,
    ) -> Self {
        let state = GameState::new();
        Self {
            id,
            board: *state.board(),
            current_player: state.current_player(),
            status: state.status(),
            mode,
            ai_difficulty_x,
            ai_difficulty_o,
            created_at,
        }
    }

    /// Replaces the starting position.
    pub fn with_state(mut self, state: GameState) -> Self {
        self.board = *state.board();
        self.current_player = state.current_player();
        self.status = state.status();
        self
    }

    /// Converts into a record stamped at the creation time.
    pub fn into_record(self) -> GameRecord {
        GameRecord::new(
            self.id,
            self.board,
            self.current_player,
            self.status,
            self.mode,
            self.ai_difficulty_x,
            self.ai_difficulty_o,
            self.created_at,
            self.created_at,
            self.created_at,
        )
    }
}

/// Fields written by an accepted move.
///
/// Id, mode and difficulties never change after creation, so they are not
/// part of an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct GameUpdate {
    /// Board after the move.
    board: Board,
    /// Player to move next, or the mover if the game ended.
    current_player: Player,
    /// Status after the move.
    status: GameStatus,
    /// When the move was made.
    moved_at: DateTime<Utc>,
}

impl GameUpdate {
    /// Builds an update from the state after a move.
    pub fn new(state: GameState, moved_at: DateTime<Utc>) -> Self {
        Self {
            board: *state.board(),
            current_player: state.current_player(),
            status: state.status(),
            moved_at,
        }
    }

    /// Applies this update to `record`.
    pub fn apply_to(&self, record: &mut GameRecord) {
        record.board = self.board;
        record.current_player = self.current_player;
        record.status = self.status;
        record.updated_at = self.moved_at;
        record.last_move_at = self.moved_at;
    }
}
