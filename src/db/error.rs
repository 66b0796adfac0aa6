//! Errors raised by game storage.

use derive_more::{Display, Error};
use tracing::{instrument, warn};

/// A storage failure, tagged with the source line that raised it.
///
/// Covers connection and query failures, failed migrations, and stored
/// rows that no longer decode into a game (a corrupt board column or an
/// unknown enum label). Callers see it as a store outage; the stored game
/// is never partially written.
#[derive(Debug, Clone, Display, Error)]
#[display("Database error: {} at {}:{}", message, file, line)]
pub struct DbError {
    /// What went wrong.
    pub message: String,
    /// Line that raised the error.
    pub line: u32,
    /// File that raised the error.
    pub file: &'static str,
}

impl DbError {
    /// Creates a storage error at the caller's location.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// A stored `column` value that cannot be decoded.
    #[track_caller]
    pub fn corrupt(column: &str, detail: impl std::fmt::Display) -> Self {
        warn!(column, %detail, "Undecodable game column");
        Self::new(format!("Corrupt {} column: {}", column, detail))
    }
}

impl From<diesel::result::Error> for DbError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        Self::new(format!("Query failed: {}", err))
    }
}

impl From<diesel::ConnectionError> for DbError {
    #[track_caller]
    fn from(err: diesel::ConnectionError) -> Self {
        Self::new(format!("Connection failed: {}", err))
    }
}

impl From<serde_json::Error> for DbError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::corrupt("board", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_is_recorded() {
        let err = DbError::new("boom");
        assert!(err.file.ends_with("error.rs"));
        assert!(err.to_string().starts_with("Database error: boom at "));
    }

    #[test]
    fn test_bad_board_json_is_corrupt_board() {
        let json_err = serde_json::from_str::<serde_json::Value>("[[").unwrap_err();
        let err = DbError::from(json_err);
        assert!(err.message.starts_with("Corrupt board column"));
    }
}
