//! HTTP server configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address. Default: 127.0.0.1.
    pub host: Option<String>,
    /// Bind port. Default: 8080.
    pub port: Option<u16>,
}

impl ServerConfig {
    pub fn effective_host(&self) -> &str {
        self.host.as_deref().unwrap_or("127.0.0.1")
    }

    pub fn effective_port(&self) -> u16 {
        self.port.unwrap_or(8080)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.effective_host(), self.effective_port())
    }
}
