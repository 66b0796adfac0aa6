//! AI opponents for side-stacker.
//!
//! Each [`AiDifficulty`] maps to a [`MoveStrategy`]. Strategies only ever
//! return members of [`Board::legal_moves`].

mod heuristic;
mod minimax;
mod random;

pub use heuristic::{LOSS_SCORE, WIN_SCORE, evaluate};
pub use minimax::{MEDIUM_DEPTH, MinimaxStrategy};
pub use random::RandomStrategy;

use tracing::{debug, instrument};

use super::{AiDifficulty, Board, Move, Player};
use crate::error::GameError;

/// Selects a move for `player` on `board`.
pub trait MoveStrategy: Send + Sync {
    /// Chooses one of the board's legal moves.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NoLegalMoves`] if the board is full.
    fn choose_move(&self, board: &Board, player: Player) -> Result<Move, GameError>;

    /// Returns the strategy's display name.
    fn name(&self) -> &str;
}

/// Dispatches move selection by difficulty.
#[derive(Debug, Clone, Default)]
pub struct AiEngine {
    random: RandomStrategy,
    minimax: MinimaxStrategy,
}

impl AiEngine {
    /// Creates an engine with the standard strategies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the strategy used for `difficulty`.
    pub fn strategy(&self, difficulty: AiDifficulty) -> &dyn MoveStrategy {
        match difficulty {
            AiDifficulty::Easy => &self.random,
            AiDifficulty::Medium => &self.minimax,
        }
    }

    /// Computes the next move for `player` at the given difficulty.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NoLegalMoves`] if the board is full.
    #[instrument(skip(self, board))]
    pub fn next_move(
        &self,
        board: &Board,
        player: Player,
        difficulty: AiDifficulty,
    ) -> Result<Move, GameError> {
        let strategy = self.strategy(difficulty);
        let mv = strategy.choose_move(board, player)?;
        debug!(strategy = strategy.name(), %mv, "AI chose move");
        Ok(mv)
    }
}
