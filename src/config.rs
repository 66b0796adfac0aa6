//! Server configuration.

use std::path::Path;

use chrono::TimeDelta;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Settings for the game server.
///
/// Every key is optional in the TOML file; missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind.
    #[serde(default = "default_host")]
    host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    port: u16,

    /// SQLite database file.
    #[serde(default = "default_database_path")]
    database_path: String,

    /// Minimum milliseconds between a move and the next AI move.
    #[serde(default = "default_ai_move_delay_ms")]
    ai_move_delay_ms: u64,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3001
}

fn default_database_path() -> String {
    "side_stacker.db".to_string()
}

fn default_ai_move_delay_ms() -> u64 {
    crate::orchestrator::AI_MOVE_DELAY_MS as u64
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database_path: default_database_path(),
            ai_move_delay_ms: default_ai_move_delay_ms(),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(host = %config.host, port = config.port, "Config loaded");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on malformed TOML or out-of-range values.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Overrides the bind host.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Overrides the bind port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Overrides the database file.
    pub fn with_database_path(mut self, path: impl Into<String>) -> Self {
        self.database_path = path.into();
        self
    }

    /// Returns the AI move delay as a duration.
    pub fn ai_move_delay(&self) -> TimeDelta {
        TimeDelta::milliseconds(i64::try_from(self.ai_move_delay_ms).unwrap_or(i64::MAX))
    }

    /// Returns the `host:port` bind address.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error at the caller's location.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = ServerConfig::from_toml("").unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind_addr(), "127.0.0.1:3001");
        assert_eq!(config.ai_move_delay(), TimeDelta::milliseconds(1000));
    }

    #[test]
    fn test_partial_file_overrides() {
        let config = ServerConfig::from_toml("port = 8080\nai_move_delay_ms = 250\n").unwrap();
        assert_eq!(*config.port(), 8080);
        assert_eq!(config.host(), "127.0.0.1");
        assert_eq!(*config.ai_move_delay_ms(), 250);
    }

    #[test]
    fn test_bad_value_rejected() {
        let err = ServerConfig::from_toml("port = \"eighty\"").unwrap_err();
        assert!(err.message.contains("Failed to parse config"));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "database_path = \"games.db\"").unwrap();
        let config = ServerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.database_path(), "games.db");
    }

    #[test]
    fn test_missing_file() {
        assert!(ServerConfig::from_file("/nonexistent/side_stacker.toml").is_err());
    }
}
