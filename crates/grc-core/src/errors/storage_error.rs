//! Storage errors.

use super::error_code::{self, GrcErrorCode};

/// Errors raised by a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("constraint violation: {message}")]
    ConstraintViolation { message: String },

    #[error("migration failed at version {version}: {reason}")]
    MigrationFailed { version: u32, reason: String },

    #[error("invalid value {value:?} in column {column}")]
    InvalidColumn { column: &'static str, value: String },

    #[error("{resource} lock poisoned")]
    LockPoisoned { resource: &'static str },
}

impl GrcErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ConstraintViolation { .. } => error_code::CONSTRAINT_VIOLATION,
            Self::MigrationFailed { .. } => error_code::MIGRATION_FAILED,
            _ => error_code::STORAGE_ERROR,
        }
    }
}
