//! Core runtime configuration.
//!
//! # Responsibility
//! - Describe where the database lives and how logging is set up.
//! - Load that description from JSON with serde defaults.
//!
//! # Invariants
//! - Missing `db_path` means an in-memory database.
//! - Missing `log_level` falls back to [`default_log_level`].

use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::logging::{default_log_level, init_logging};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Error raised while loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file cannot be read.
    Io(std::io::Error),
    /// Config text is not valid JSON for `CoreConfig`.
    Parse(serde_json::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read config: {err}"),
            Self::Parse(err) => write!(f, "failed to parse config: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Runtime configuration for hosts embedding the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoreConfig {
    /// SQLite database file. `None` opens an in-memory database.
    pub db_path: Option<PathBuf>,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Absolute log directory. `None` leaves logging uninitialized.
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    /// Parses configuration from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads and parses a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Initializes file logging when `log_dir` is set.
    ///
    /// Returns `Ok(false)` when logging is not configured.
    pub fn init_logging(&self) -> Result<bool, String> {
        let Some(log_dir) = self.log_dir.as_deref() else {
            return Ok(false);
        };
        let log_dir = log_dir
            .to_str()
            .ok_or_else(|| format!("log_dir is not valid UTF-8: `{}`", log_dir.display()))?;
        init_logging(&self.log_level, log_dir)?;
        Ok(true)
    }

    /// Opens the configured database with migrations applied.
    pub fn open_db(&self) -> DbResult<Connection> {
        match self.db_path.as_deref() {
            Some(path) => open_db(path),
            None => open_db_in_memory(),
        }
    }
}
