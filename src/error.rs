//! Error types for game operations.

use derive_more::{Display, Error};

use crate::db::DbError;
use crate::games::side_stacker::GameStatus;

/// Error returned by game operations.
///
/// Every variant is a local rejection: the stored game is left unchanged.
#[derive(Debug, Clone, Display, Error)]
pub enum GameError {
    /// No game exists with this id.
    #[display("Game not found: {}", id)]
    NotFound {
        /// The requested game id.
        id: String,
    },

    /// The move is out of range or the row has no room on that side.
    #[display("Illegal move: {}", reason)]
    IllegalMove {
        /// Why the move was rejected.
        reason: String,
    },

    /// A move was attempted against a finished game.
    #[display("Game is already over ({})", status)]
    InvalidState {
        /// Status of the finished game.
        status: GameStatus,
    },

    /// The AI was asked to move on a board with no empty cells.
    #[display("No legal moves available")]
    NoLegalMoves,

    /// The persistence layer failed.
    #[display("Store unavailable: {}", source)]
    StoreUnavailable {
        /// Underlying store error.
        source: DbError,
    },
}

impl GameError {
    /// Creates an illegal move error.
    pub fn illegal(reason: impl Into<String>) -> Self {
        Self::IllegalMove {
            reason: reason.into(),
        }
    }

    /// Creates a not-found error.
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }
}

impl From<std::convert::Infallible> for GameError {
    fn from(never: std::convert::Infallible) -> Self {
        match never {}
    }
}

impl From<DbError> for GameError {
    fn from(source: DbError) -> Self {
        Self::StoreUnavailable { source }
    }
}
