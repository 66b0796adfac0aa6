//! SQLite persistence for games.

mod error;
mod models;
mod repository;
mod schema;

pub use error::DbError;
pub use repository::{GameRepository, MIGRATIONS};
