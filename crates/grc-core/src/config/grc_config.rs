//! Top-level register configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{
    ExportConfig, LogFormat, LoggingConfig, ScoringConfig, ServerConfig, StorageBackend,
    StorageConfig,
};
use crate::constants::{MAX_FACTOR, MIN_FACTOR};
use crate::errors::ConfigError;

/// Config file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "grc.toml";

/// Upper bound for `storage.read_pool_size`.
pub const MAX_READ_POOL_SIZE: usize = 8;

/// Top-level configuration aggregating all sections.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`GRC_*`)
/// 3. Config file (`--config` path, or `grc.toml` in the working directory)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GrcConfig {
    pub storage: StorageConfig,
    pub server: ServerConfig,
    pub scoring: ScoringConfig,
    pub export: ExportConfig,
    pub logging: LoggingConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub backend: Option<StorageBackend>,
    pub db_path: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub log_level: Option<String>,
}

impl GrcConfig {
    /// Load configuration with layered resolution.
    ///
    /// An explicit `config_path` must exist. Without one, `grc.toml` in the
    /// working directory is merged when present.
    pub fn load(
        config_path: Option<&Path>,
        cli_overrides: Option<&CliOverrides>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 3: config file
        match config_path {
            Some(path) => Self::merge_toml_file(&mut config, path)?,
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::merge_toml_file(&mut config, &default_path)?;
                }
            }
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config)?;

        // Layer 1: CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &GrcConfig) -> Result<(), ConfigError> {
        for (field, value) in [
            ("scoring.auto_risk_likelihood", config.scoring.auto_risk_likelihood),
            ("scoring.auto_risk_impact", config.scoring.auto_risk_impact),
        ] {
            if let Some(v) = value {
                if !(MIN_FACTOR..=MAX_FACTOR).contains(&v) {
                    return Err(ConfigError::ValidationFailed {
                        field: field.to_string(),
                        message: format!("must be between {MIN_FACTOR} and {MAX_FACTOR}"),
                    });
                }
            }
        }
        if config.server.port == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "server.port".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if let Some(size) = config.storage.read_pool_size {
            if !(1..=MAX_READ_POOL_SIZE).contains(&size) {
                return Err(ConfigError::ValidationFailed {
                    field: "storage.read_pool_size".to_string(),
                    message: format!("must be between 1 and {MAX_READ_POOL_SIZE}"),
                });
            }
        }
        if let Some(ref path) = config.storage.db_path {
            if path.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "storage.db_path".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }
        if let Some(ref prefix) = config.export.filename_prefix {
            if prefix.trim().is_empty() || prefix.contains(['/', '\\', '"']) {
                return Err(ConfigError::ValidationFailed {
                    field: "export.filename_prefix".to_string(),
                    message: "must be a non-empty file name fragment".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut GrcConfig, path: &Path) -> Result<(), ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
                path: path.display().to_string(),
            })?;

        let file_config: GrcConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a `Some` value.
    pub fn merge(base: &mut GrcConfig, other: &GrcConfig) {
        // Storage
        if other.storage.backend.is_some() {
            base.storage.backend = other.storage.backend;
        }
        if other.storage.db_path.is_some() {
            base.storage.db_path = other.storage.db_path.clone();
        }
        if other.storage.read_pool_size.is_some() {
            base.storage.read_pool_size = other.storage.read_pool_size;
        }

        // Server
        if other.server.host.is_some() {
            base.server.host = other.server.host.clone();
        }
        if other.server.port.is_some() {
            base.server.port = other.server.port;
        }

        // Scoring
        if other.scoring.auto_risk_likelihood.is_some() {
            base.scoring.auto_risk_likelihood = other.scoring.auto_risk_likelihood;
        }
        if other.scoring.auto_risk_impact.is_some() {
            base.scoring.auto_risk_impact = other.scoring.auto_risk_impact;
        }

        // Export
        if other.export.filename_prefix.is_some() {
            base.export.filename_prefix = other.export.filename_prefix.clone();
        }

        // Logging
        if other.logging.level.is_some() {
            base.logging.level = other.logging.level.clone();
        }
        if other.logging.format.is_some() {
            base.logging.format = other.logging.format;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `GRC_DB_PATH`, `GRC_SERVER_PORT`, etc. Unparseable numbers are
    /// ignored; an unknown backend or log format is an error.
    fn apply_env_overrides(config: &mut GrcConfig) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("GRC_STORAGE_BACKEND") {
            config.storage.backend = Some(val.parse()?);
        }
        if let Ok(val) = std::env::var("GRC_DB_PATH") {
            config.storage.db_path = Some(val);
        }
        if let Ok(val) = std::env::var("GRC_READ_POOL_SIZE") {
            if let Ok(v) = val.parse::<usize>() {
                config.storage.read_pool_size = Some(v);
            }
        }
        if let Ok(val) = std::env::var("GRC_SERVER_HOST") {
            config.server.host = Some(val);
        }
        if let Ok(val) = std::env::var("GRC_SERVER_PORT") {
            if let Ok(v) = val.parse::<u16>() {
                config.server.port = Some(v);
            }
        }
        if let Ok(val) = std::env::var("GRC_AUTO_RISK_LIKELIHOOD") {
            if let Ok(v) = val.parse::<u8>() {
                config.scoring.auto_risk_likelihood = Some(v);
            }
        }
        if let Ok(val) = std::env::var("GRC_AUTO_RISK_IMPACT") {
            if let Ok(v) = val.parse::<u8>() {
                config.scoring.auto_risk_impact = Some(v);
            }
        }
        if let Ok(val) = std::env::var("GRC_EXPORT_PREFIX") {
            config.export.filename_prefix = Some(val);
        }
        if let Ok(val) = std::env::var("GRC_LOG_LEVEL") {
            config.logging.level = Some(val);
        }
        if let Ok(val) = std::env::var("GRC_LOG_FORMAT") {
            config.logging.format = Some(match val.trim().to_ascii_lowercase().as_str() {
                "text" => LogFormat::Text,
                "json" => LogFormat::Json,
                other => {
                    return Err(ConfigError::ValidationFailed {
                        field: "logging.format".to_string(),
                        message: format!("unknown format {other:?}, expected \"text\" or \"json\""),
                    })
                }
            });
        }
        Ok(())
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut GrcConfig, cli: &CliOverrides) {
        if let Some(v) = cli.backend {
            config.storage.backend = Some(v);
        }
        if let Some(ref v) = cli.db_path {
            config.storage.db_path = Some(v.clone());
        }
        if let Some(ref v) = cli.host {
            config.server.host = Some(v.clone());
        }
        if let Some(v) = cli.port {
            config.server.port = Some(v);
        }
        if let Some(ref v) = cli.log_level {
            config.logging.level = Some(v.clone());
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}
