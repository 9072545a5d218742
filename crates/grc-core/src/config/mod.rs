//! Configuration for the risk register.
//! TOML-based, layered resolution: CLI > env > config file > defaults.

pub mod export_config;
pub mod grc_config;
pub mod logging_config;
pub mod scoring_config;
pub mod server_config;
pub mod storage_config;

pub use export_config::ExportConfig;
pub use grc_config::{CliOverrides, GrcConfig};
pub use logging_config::{LogFormat, LoggingConfig};
pub use scoring_config::ScoringConfig;
pub use server_config::ServerConfig;
pub use storage_config::{StorageBackend, StorageConfig};
