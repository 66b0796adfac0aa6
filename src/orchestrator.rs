//! Pull-driven AI turn progression.
//!
//! AI participants never move on a timer. Each time a game is read, the
//! orchestrator checks whether an AI is due and, if so, plays exactly one
//! move for it.

use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, info, instrument, warn};

use crate::error::GameError;
use crate::games::side_stacker::ai::AiEngine;
use crate::games::side_stacker::{AiDifficulty, Player};
use crate::store::{GameRecord, GameStore, GameUpdate};

/// Minimum time between an accepted move and the next AI move.
pub const AI_MOVE_DELAY_MS: i64 = 1000;

/// Decides when AI players move and plays their moves.
#[derive(Debug, Clone)]
pub struct TurnOrchestrator {
    delay: TimeDelta,
    engine: AiEngine,
}

impl TurnOrchestrator {
    /// Creates an orchestrator with the given minimum AI move delay.
    pub fn new(delay: TimeDelta) -> Self {
        Self {
            delay,
            engine: AiEngine::new(),
        }
    }

    /// Returns the minimum AI move delay.
    pub fn delay(&self) -> TimeDelta {
        self.delay
    }

    /// Returns the AI player due to move at `now`, with its difficulty.
    ///
    /// An AI is due when the game is in progress, the player to move is
    /// AI-controlled in the game's mode, and at least the delay has passed
    /// since the last move.
    #[instrument(level = "debug", skip(self, record), fields(game_id = %record.id()))]
    pub fn due_player(
        &self,
        record: &GameRecord,
        now: DateTime<Utc>,
    ) -> Option<(Player, AiDifficulty)> {
        if record.status().is_terminal() {
            return None;
        }
        let player = *record.current_player();
        if !record.mode().is_ai_controlled(player) {
            return None;
        }
        let elapsed = now - *record.last_move_at();
        if elapsed < self.delay {
            debug!(elapsed_ms = elapsed.num_milliseconds(), "AI not due yet");
            return None;
        }
        Some((player, record.difficulty_for(player)))
    }

    /// Plays one AI move if one is due, returning the resulting record.
    ///
    /// When no AI is due, or the AI cannot produce an acceptable move, the
    /// record is returned unchanged.
    ///
    /// # Errors
    ///
    /// - [`GameError::StoreUnavailable`] if the update fails.
    /// - [`GameError::NotFound`] if the game disappeared before the update.
    #[instrument(skip(self, store, record), fields(game_id = %record.id()))]
    pub fn maybe_advance(
        &self,
        store: &dyn GameStore,
        record: GameRecord,
        now: DateTime<Utc>,
    ) -> Result<GameRecord, GameError> {
        let Some((player, difficulty)) = self.due_player(&record, now) else {
            return Ok(record);
        };

        let mv = match self.engine.next_move(record.board(), player, difficulty) {
            Ok(mv) => mv,
            Err(e) => {
                warn!(error = %e, "AI produced no move");
                return Ok(record);
            }
        };

        let next = match record.state().apply_move(mv) {
            Ok(next) => next,
            Err(e) => {
                warn!(error = %e, %mv, "AI move rejected");
                return Ok(record);
            }
        };

        let updated = store
            .update(record.id(), GameUpdate::new(next, now))?
            .ok_or_else(|| GameError::not_found(record.id().as_str()))?;

        info!(
            player = %player,
            difficulty = %difficulty,
            %mv,
            status = %updated.status(),
            "AI move applied"
        );
        Ok(updated)
    }
}

impl Default for TurnOrchestrator {
    fn default() -> Self {
        Self::new(TimeDelta::milliseconds(AI_MOVE_DELAY_MS))
    }
}
