//! Ordered schema migrations for the scrum database.
//!
//! # Invariants
//! - Versions are strictly increasing, starting at 1.
//! - All pending migrations run in one transaction; `user_version` is bumped
//!   after each script inside it.

use crate::db::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("0001_init.sql"),
}];

/// Returns the latest migration version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Brings the connection up to [`latest_version`].
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    apply_from(conn, MIGRATIONS)
}

/// Reads the schema version mirrored in `PRAGMA user_version`.
pub fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}

fn apply_from(conn: &mut Connection, migrations: &[Migration]) -> DbResult<()> {
    let from_version = current_user_version(conn)?;
    let target = migrations.last().map_or(0, |migration| migration.version);
    if from_version > target {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from_version,
            latest_supported: target,
        });
    }

    let pending: Vec<&Migration> = migrations
        .iter()
        .filter(|migration| migration.version > from_version)
        .collect();
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in pending {
        let script = format!(
            "{}\nPRAGMA user_version = {};",
            migration.sql, migration.version
        );
        if let Err(source) = tx.execute_batch(&script) {
            error!(
                "event=db_migrate module=db status=error version={} error={}",
                migration.version, source
            );
            return Err(DbError::Migration {
                version: migration.version,
                source,
            });
        }
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from_version={} to_version={}",
        from_version, target
    );
    Ok(())
}
