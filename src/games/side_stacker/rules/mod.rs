//! Game rules for side-stacker.
//!
//! Pure functions over a [`Board`](super::Board): line scanning used both
//! for win detection and by the AI heuristic, and draw detection.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{WIN_LENGTH, check_winner, count_runs, has_four_in_row};
