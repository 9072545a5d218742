//! Storage backend configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Which `IRegisterStorage` implementation to open at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Sqlite,
    Memory,
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sqlite => f.write_str("sqlite"),
            Self::Memory => f.write_str("memory"),
        }
    }
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "memory" => Ok(Self::Memory),
            other => Err(ConfigError::ValidationFailed {
                field: "storage.backend".to_string(),
                message: format!("unknown backend {other:?}, expected \"sqlite\" or \"memory\""),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// Backend to open. Default: sqlite.
    pub backend: Option<StorageBackend>,
    /// SQLite database file. Default: `grc.db`.
    pub db_path: Option<String>,
    /// Read-only connections in the SQLite read pool (1–8). Default: 4.
    pub read_pool_size: Option<usize>,
}

impl StorageConfig {
    pub fn effective_backend(&self) -> StorageBackend {
        self.backend.unwrap_or_default()
    }

    pub fn effective_db_path(&self) -> &str {
        self.db_path.as_deref().unwrap_or("grc.db")
    }

    pub fn effective_read_pool_size(&self) -> usize {
        self.read_pool_size.unwrap_or(4)
    }
}
