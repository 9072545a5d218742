//! Export errors.

use super::error_code::{self, GrcErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("CSV writer error: {0}")]
    Csv(String),

    #[error("UTF-8 conversion error: {0}")]
    Encoding(String),
}

impl GrcErrorCode for ExportError {
    fn error_code(&self) -> &'static str {
        error_code::EXPORT_ERROR
    }
}
