//! Versioned schema migrations, tracked through `PRAGMA user_version`.

pub mod v001_risk_register;
pub mod v002_control_assessments;

use grc_core::errors::StorageError;
use rusqlite::Connection;

use crate::connection::writer::with_immediate_transaction;
use crate::sqlite_err;

/// (version, name, sql), in apply order.
const MIGRATIONS: &[(u32, &str, &str)] = &[
    (1, "risk_register", v001_risk_register::MIGRATION_SQL),
    (2, "control_assessments", v002_control_assessments::MIGRATION_SQL),
];

/// Schema version a fully migrated database reports.
pub const LATEST_VERSION: u32 = 2;

/// Current `user_version` of the database.
pub fn current_version(conn: &Connection) -> Result<u32, StorageError> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(sqlite_err)
}

/// Apply every migration newer than the database's version, each in its own
/// transaction. Returns the resulting version.
pub fn run_migrations(conn: &Connection) -> Result<u32, StorageError> {
    let current = current_version(conn)?;
    if current > LATEST_VERSION {
        return Err(StorageError::MigrationFailed {
            version: current,
            reason: format!("database is newer than this build (latest known {LATEST_VERSION})"),
        });
    }

    for &(version, name, sql) in MIGRATIONS {
        if version <= current {
            continue;
        }
        with_immediate_transaction(conn, |tx| {
            tx.execute_batch(sql)
                .map_err(|e| StorageError::MigrationFailed {
                    version,
                    reason: e.to_string(),
                })?;
            tx.pragma_update(None, "user_version", version)
                .map_err(|e| StorageError::MigrationFailed {
                    version,
                    reason: e.to_string(),
                })
        })?;
        tracing::info!(version, name, "applied migration");
    }

    current_version(conn)
}
