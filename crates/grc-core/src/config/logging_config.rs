//! Logging configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive. Default: `info`. `RUST_LOG` takes precedence.
    pub level: Option<String>,
    /// Output format. Default: text.
    pub format: Option<LogFormat>,
}

impl LoggingConfig {
    pub fn effective_level(&self) -> &str {
        self.level.as_deref().unwrap_or("info")
    }

    pub fn effective_format(&self) -> LogFormat {
        self.format.unwrap_or_default()
    }
}
