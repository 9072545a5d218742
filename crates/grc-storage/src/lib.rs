//! # grc-storage
//!
//! Persistence for the risk register. Two [`IRegisterStorage`] backends:
//! SQLite ([`StorageEngine`]: one serialized writer, pooled readers,
//! versioned migrations) and a process-local [`InMemoryStorage`].
//!
//! [`IRegisterStorage`]: grc_core::IRegisterStorage

pub mod backend;
pub mod connection;
pub mod engine;
pub mod memory;
pub mod migrations;
pub mod queries;

pub use backend::open_backend;
pub use engine::StorageEngine;
pub use memory::InMemoryStorage;

use grc_core::errors::StorageError;

/// Map a rusqlite error, keeping constraint failures distinguishable.
pub fn sqlite_err(e: rusqlite::Error) -> StorageError {
    match e.sqlite_error_code() {
        Some(rusqlite::ErrorCode::ConstraintViolation) => StorageError::ConstraintViolation {
            message: e.to_string(),
        },
        _ => StorageError::SqliteError {
            message: e.to_string(),
        },
    }
}
