//! SQLite bootstrap for the scrum core.
//!
//! # Responsibility
//! - Open connections with the pragmas the repositories rely on.
//! - Bring the `users`/`projects` schema up to the latest migration.
//!
//! # Invariants
//! - Schema version lives in `PRAGMA user_version`.
//! - A connection handed to a repository has every migration applied.
//! - A failed migration leaves the database at its previous version.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening or migrating the scrum database.
#[derive(Debug)]
pub enum DbError {
    /// Opening the file or applying connection pragmas failed.
    Sqlite(rusqlite::Error),
    /// The migration with this version failed and was rolled back.
    Migration {
        version: u32,
        source: rusqlite::Error,
    },
    /// The file was migrated by a newer build than this one.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl DbError {
    /// Schema version this error is tied to, when there is one.
    pub fn schema_version(&self) -> Option<u32> {
        match self {
            Self::Sqlite(_) => None,
            Self::Migration { version, .. } => Some(*version),
            Self::UnsupportedSchemaVersion { db_version, .. } => Some(*db_version),
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite error: {err}"),
            Self::Migration { version, source } => {
                write!(f, "schema migration {version:04} failed: {source}")
            }
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "scrum database is at schema version {db_version}, this build supports up to {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) | Self::Migration { source: err, .. } => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
