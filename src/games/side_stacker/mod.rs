//! Side-stacker: four in a row, with pieces pushed in from the row ends.

pub mod ai;
mod board;
mod machine;
pub mod rules;
mod types;

pub use board::{BOARD_SIZE, Board};
pub use machine::GameState;
pub use types::{AiDifficulty, Cell, GameMode, GameStatus, Move, Player, Side};
