//! Top-level error aggregating every subsystem error.

use super::error_code::{self, GrcErrorCode};
use super::{ConfigError, ExportError, StorageError, ValidationError};

pub type GrcResult<T> = Result<T, GrcError>;

#[derive(Debug, thiserror::Error)]
pub enum GrcError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("conflict: {message}")]
    Conflict { message: String },

    #[error("internal error: {0}")]
    Internal(String),
}

impl GrcError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// True for errors the caller caused (bad input, missing row, conflict).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::NotFound { .. }
                | Self::Conflict { .. }
                | Self::Storage(StorageError::ConstraintViolation { .. })
        )
    }
}

impl GrcErrorCode for GrcError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Storage(StorageError::ConstraintViolation { .. }) => error_code::CONFLICT,
            Self::Storage(e) => e.error_code(),
            Self::Validation(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Export(e) => e.error_code(),
            Self::NotFound { .. } => error_code::NOT_FOUND,
            Self::Conflict { .. } => error_code::CONFLICT,
            Self::Internal(_) => error_code::INTERNAL_ERROR,
        }
    }
}
