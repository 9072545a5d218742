//! Per-connection PRAGMAs for the register database.
//!
//! WAL mode, NORMAL sync, 5s busy_timeout, foreign_keys ON.

use grc_core::errors::StorageError;
use rusqlite::Connection;

use crate::sqlite_err;

/// Pragmas for the writer connection.
pub fn apply_pragmas(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA cache_size = -16000;
        PRAGMA busy_timeout = 5000;
        PRAGMA foreign_keys = ON;
        ",
    )
    .map_err(sqlite_err)
}

/// Pragmas for read-only pool connections. Journal mode is a property of the
/// database file and is set by the writer.
pub fn apply_read_pragmas(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "
        PRAGMA busy_timeout = 5000;
        PRAGMA cache_size = -8000;
        PRAGMA query_only = ON;
        ",
    )
    .map_err(sqlite_err)
}

/// Whether WAL journaling is active on a connection.
pub fn verify_wal_mode(conn: &Connection) -> Result<bool, StorageError> {
    let mode: String = conn
        .pragma_query_value(None, "journal_mode", |row| row.get(0))
        .map_err(sqlite_err)?;
    Ok(mode.eq_ignore_ascii_case("wal"))
}
