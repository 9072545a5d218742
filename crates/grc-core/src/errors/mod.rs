//! Error handling for the risk register.
//! One error enum per subsystem, `thiserror` only, aggregated into [`GrcError`].

pub mod config_error;
pub mod error_code;
pub mod export_error;
pub mod grc_error;
pub mod storage_error;
pub mod validation_error;

pub use config_error::ConfigError;
pub use error_code::GrcErrorCode;
pub use export_error::ExportError;
pub use grc_error::{GrcError, GrcResult};
pub use storage_error::StorageError;
pub use validation_error::ValidationError;
