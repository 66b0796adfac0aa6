//! Caller-facing game operations.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::clock::Clock;
use crate::error::GameError;
use crate::games::side_stacker::{AiDifficulty, GameMode, Move};
use crate::orchestrator::TurnOrchestrator;
use crate::store::{GameRecord, GameStore, GameUpdate, NewGame};

/// Generates a random (version 4) game id.
pub fn new_game_id() -> String {
    Uuid::new_v4().to_string()
}

type LockTable = HashMap<String, Arc<Mutex<()>>>;

/// Starts games, reads them and applies moves.
///
/// Reads and moves on the same game id are serialized through a per-id
/// lock, so a human move and an AI move triggered by a concurrent read
/// can never both build on the same prior state. A lock lives in the
/// table only while some call holds or waits on it.
pub struct GameService {
    store: Arc<dyn GameStore>,
    clock: Arc<dyn Clock>,
    orchestrator: TurnOrchestrator,
    locks: Mutex<LockTable>,
}

impl std::fmt::Debug for GameService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameService")
            .field("orchestrator", &self.orchestrator)
            .field("tracked_locks", &self.tracked_locks())
            .finish_non_exhaustive()
    }
}

impl GameService {
    /// Creates a service over `store`, reading time from `clock`.
    pub fn new(
        store: Arc<dyn GameStore>,
        clock: Arc<dyn Clock>,
        orchestrator: TurnOrchestrator,
    ) -> Self {
        Self {
            store,
            clock,
            orchestrator,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Number of game ids with a lock currently in the table.
    pub fn tracked_locks(&self) -> usize {
        self.lock_table().len()
    }

    fn lock_table(&self) -> MutexGuard<'_, LockTable> {
        self.locks.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Runs `f` while holding the lock for `id`.
    ///
    /// The table entry is dropped afterwards unless another call has
    /// picked up the same lock in the meantime.
    fn with_game_lock<T>(
        &self,
        id: &str,
        f: impl FnOnce() -> Result<T, GameError>,
    ) -> Result<T, GameError> {
        let lock = self
            .lock_table()
            .entry(id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        let result = {
            let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());
            f()
        };

        // Clones are only taken under the table lock, so a count of two
        // (table plus ours) means nobody else is waiting.
        let mut table = self.lock_table();
        if Arc::strong_count(&lock) == 2
            && table.get(id).is_some_and(|held| Arc::ptr_eq(held, &lock))
        {
            table.remove(id);
        }
        result
    }

    fn load(&self, id: &str) -> Result<GameRecord, GameError> {
        self.store
            .read(id)?
            .ok_or_else(|| GameError::not_found(id))
    }

    /// Starts a new game.
    ///
    /// Difficulties are stored as given; unset slots play at
    /// [`AiDifficulty::Easy`] when the AI moves for them.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::StoreUnavailable`] if the game cannot be stored.
    #[instrument(skip(self))]
    pub fn start_game(
        &self,
        mode: GameMode,
        ai_difficulty_x: Option<AiDifficulty>,
        ai_difficulty_o: Option<AiDifficulty>,
    ) -> Result<GameRecord, GameError> {
        let game = NewGame::new(
            new_game_id(),
            mode,
            ai_difficulty_x,
            ai_difficulty_o,
            self.clock.now(),
        );
        let record = self.store.create(game)?;
        info!(game_id = %record.id(), %mode, "Game started");
        Ok(record)
    }

    /// Reads a game, first letting a due AI player make one move.
    ///
    /// # Errors
    ///
    /// - [`GameError::NotFound`] if no game has this id.
    /// - [`GameError::StoreUnavailable`] if the store fails.
    #[instrument(skip(self))]
    pub fn get_game(&self, id: &str) -> Result<GameRecord, GameError> {
        self.with_game_lock(id, || {
            let record = self.load(id)?;
            self.orchestrator
                .maybe_advance(self.store.as_ref(), record, self.clock.now())
        })
    }

    /// Applies a move for the player whose turn it is.
    ///
    /// `mv` may be an unchecked request; it is converted only after the
    /// game is found and known to be in progress, so those rejections take
    /// precedence over a malformed move.
    ///
    /// # Errors
    ///
    /// - [`GameError::NotFound`] if no game has this id.
    /// - [`GameError::InvalidState`] if the game is over.
    /// - [`GameError::IllegalMove`] if the move is malformed, out of range
    ///   or targets a full row.
    /// - [`GameError::StoreUnavailable`] if the store fails.
    #[instrument(skip(self, mv))]
    pub fn submit_move<M>(&self, id: &str, mv: M) -> Result<GameRecord, GameError>
    where
        M: TryInto<Move>,
        GameError: From<M::Error>,
    {
        self.with_game_lock(id, || {
            let record = self.load(id)?;
            let status = *record.status();
            if status.is_terminal() {
                warn!(%status, "Move on finished game");
                return Err(GameError::InvalidState { status });
            }

            let mv: Move = mv.try_into().map_err(GameError::from).inspect_err(|e| {
                warn!(error = %e, "Malformed move");
            })?;
            let mover = *record.current_player();
            debug!(%mv, player = %mover, "Applying move");

            let next = record.state().apply_move(mv).inspect_err(|e| {
                warn!(error = %e, "Move rejected");
            })?;

            let updated = self
                .store
                .update(id, GameUpdate::new(next, self.clock.now()))?
                .ok_or_else(|| GameError::not_found(id))?;

            info!(player = %mover, %mv, status = %updated.status(), "Move applied");
            Ok(updated)
        })
    }
}
