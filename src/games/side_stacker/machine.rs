//! Move application and turn progression.

use tracing::{debug, instrument};

use super::rules::{has_four_in_row, is_draw};
use super::types::{GameStatus, Move, Player};
use super::Board;
use crate::error::GameError;

/// The mutable part of a game: board, whose turn it is, and status.
///
/// Transitions go through [`GameState::apply_move`], which returns a new
/// state and leaves the receiver untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    current_player: Player,
    status: GameStatus,
}

impl GameState {
    /// Creates a new game: empty board, X to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_player: Player::X,
            status: GameStatus::InProgress,
        }
    }

    /// Reassembles a state from stored parts.
    pub fn from_parts(board: Board, current_player: Player, status: GameStatus) -> Self {
        Self {
            board,
            current_player,
            status,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player to move (or the last mover once finished).
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Applies a move for the current player.
    ///
    /// On success the returned state is either won by the mover, drawn,
    /// or in progress with the turn passed to the opponent. The player
    /// does not change once the game is finished.
    ///
    /// # Errors
    ///
    /// - [`GameError::InvalidState`] if the game is already over.
    /// - [`GameError::IllegalMove`] if the row is out of range or full.
    #[instrument(skip(self), fields(player = %self.current_player, status = %self.status))]
    pub fn apply_move(&self, mv: Move) -> Result<GameState, GameError> {
        if self.status.is_terminal() {
            return Err(GameError::InvalidState {
                status: self.status,
            });
        }

        let mover = self.current_player;
        let board = self.board.apply(mv, mover)?;

        let next = if has_four_in_row(&board, mover) {
            debug!(winner = %mover, "Move completes a line");
            Self {
                board,
                current_player: mover,
                status: GameStatus::Won(mover),
            }
        } else if is_draw(&board) {
            debug!("Board full without a line");
            Self {
                board,
                current_player: mover,
                status: GameStatus::Draw,
            }
        } else {
            Self {
                board,
                current_player: mover.opponent(),
                status: GameStatus::InProgress,
            }
        };

        Ok(next)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
