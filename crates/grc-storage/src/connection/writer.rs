//! Write transactions.

use grc_core::errors::StorageError;
use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::sqlite_err;

/// Run `f` inside a `BEGIN IMMEDIATE` transaction, committing on success.
/// The write lock is taken up front so concurrent writers wait on
/// `busy_timeout` instead of failing mid-transaction with `SQLITE_BUSY`.
/// An error from `f` drops the transaction, which rolls it back.
pub fn with_immediate_transaction<F, T, E>(conn: &Connection, f: F) -> Result<T, E>
where
    F: FnOnce(&Transaction<'_>) -> Result<T, E>,
    E: From<StorageError>,
{
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate).map_err(|e| {
        StorageError::SqliteError {
            message: format!("failed to begin immediate transaction: {e}"),
        }
    })?;

    let result = f(&tx)?;

    tx.commit().map_err(sqlite_err)?;
    Ok(result)
}
