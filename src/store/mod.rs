//! Persistence boundary for game records.
//!
//! The game service talks to storage only through [`GameStore`]. Two
//! implementations exist: [`MemoryStore`] and the SQLite-backed
//! [`GameRepository`](crate::db::GameRepository).

mod memory;
mod record;

pub use memory::MemoryStore;
pub use record::{GameRecord, GameUpdate, NewGame};

use crate::db::DbError;

/// Keyed storage for game records.
///
/// Implementations must not partially apply a failed write.
pub trait GameStore: Send + Sync {
    /// Stores a new game and returns the record.
    fn create(&self, game: NewGame) -> Result<GameRecord, DbError>;

    /// Reads a game, or `None` if the id is unknown.
    fn read(&self, id: &str) -> Result<Option<GameRecord>, DbError>;

    /// Writes a move's fields and stamps `updated_at` and `last_move_at`.
    /// Returns `None` if the id is unknown.
    fn update(&self, id: &str, update: GameUpdate) -> Result<Option<GameRecord>, DbError>;
}
