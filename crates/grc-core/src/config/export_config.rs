//! Export configuration.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_EXPORT_PREFIX;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ExportConfig {
    /// Download file name prefix. Default: `risk-register`.
    pub filename_prefix: Option<String>,
}

impl ExportConfig {
    pub fn effective_filename_prefix(&self) -> &str {
        self.filename_prefix.as_deref().unwrap_or(DEFAULT_EXPORT_PREFIX)
    }
}
