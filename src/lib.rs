//! Side-stacker game server library
//!
//! Side-stacker is connect-four played sideways on a 7x7 grid: each move
//! pushes a piece into a row from its left or right end.
//!
//! # Architecture
//!
//! - **Games**: board, win and draw rules, move state machine, AI strategies
//! - **Orchestrator**: pull-driven AI turns, at most one per delay window
//! - **Service**: start, read and move operations, serialized per game
//! - **Store**: persistence boundary with in-memory and SQLite backends
//! - **Server**: REST transport over the service
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use side_stacker::{GameMode, GameService, MemoryStore, Move, SystemClock, TurnOrchestrator};
//!
//! # fn example() -> Result<(), side_stacker::GameError> {
//! let service = GameService::new(
//!     Arc::new(MemoryStore::new()),
//!     Arc::new(SystemClock),
//!     TurnOrchestrator::default(),
//! );
//! let game = service.start_game(GameMode::Local, None, None)?;
//! let game = service.submit_move(game.id(), Move::left(0))?;
//! println!("{}", game.board().display());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod clock;
mod config;
mod db;
mod error;
mod games;
mod orchestrator;
mod server;
mod service;
mod store;

// Crate-level exports - Game core
pub use games::side_stacker::{
    AiDifficulty, BOARD_SIZE, Board, Cell, GameMode, GameState, GameStatus, Move, Player, Side,
};

// Crate-level exports - Rules
pub use games::side_stacker::rules::{
    WIN_LENGTH, check_winner, count_runs, has_four_in_row, is_draw, is_full,
};

// Crate-level exports - AI
pub use games::side_stacker::ai::{
    AiEngine, LOSS_SCORE, MEDIUM_DEPTH, MinimaxStrategy, MoveStrategy, RandomStrategy, WIN_SCORE,
    evaluate,
};

// Crate-level exports - Errors
pub use error::GameError;

// Crate-level exports - Orchestration and service
pub use clock::{Clock, ManualClock, SystemClock};
pub use orchestrator::{AI_MOVE_DELAY_MS, TurnOrchestrator};
pub use service::{GameService, new_game_id};

// Crate-level exports - Persistence
pub use db::{DbError, GameRepository, MIGRATIONS};
pub use store::{GameRecord, GameStore, GameUpdate, MemoryStore, NewGame};

// Crate-level exports - Transport and config
pub use config::{ConfigError, ServerConfig};
pub use server::{ApiError, AppState, CreateGameRequest, GameView, MoveRequest, router, serve};
