//! In-memory game store.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, instrument};

use super::{GameRecord, GameStore, GameUpdate, NewGame};
use crate::db::DbError;

/// Game store backed by a shared map.
///
/// Clones share the same games.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    games: Arc<Mutex<HashMap<String, GameRecord>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating in-memory game store");
        Self::default()
    }

    /// Number of stored games.
    pub fn len(&self) -> usize {
        self.games().len()
    }

    /// Returns true if no games are stored.
    pub fn is_empty(&self) -> bool {
        self.games().is_empty()
    }

    fn games(&self) -> MutexGuard<'_, HashMap<String, GameRecord>> {
        self.games.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl GameStore for MemoryStore {
    #[instrument(skip(self, game), fields(game_id = %game.id()))]
    fn create(&self, game: NewGame) -> Result<GameRecord, DbError> {
        let mut games = self.games();
        if games.contains_key(game.id()) {
            return Err(DbError::new(format!("Game '{}' already exists", game.id())));
        }
        let record = game.into_record();
        games.insert(record.id().clone(), record.clone());
        debug!("Game stored");
        Ok(record)
    }

    #[instrument(skip(self))]
    fn read(&self, id: &str) -> Result<Option<GameRecord>, DbError> {
        let record = self.games().get(id).cloned();
        if record.is_none() {
            debug!("Game not found");
        }
        Ok(record)
    }

    #[instrument(skip(self, update))]
    fn update(&self, id: &str, update: GameUpdate) -> Result<Option<GameRecord>, DbError> {
        let mut games = self.games();
        let Some(record) = games.get_mut(id) else {
            debug!("Game not found");
            return Ok(None);
        };
        update.apply_to(record);
        Ok(Some(record.clone()))
    }
}
