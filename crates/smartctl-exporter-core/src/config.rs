//! Exporter configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default listen port for smartctl exporters.
pub const DEFAULT_PORT: u16 = 9633;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExporterConfig {
    /// smartctl binary, resolved through `PATH` when not absolute.
    pub smartctl_path: String,
    /// Devices to read. Empty means every device `smartctl --scan` reports.
    pub devices: Vec<String>,
    /// Bind address.
    pub host: String,
    pub port: u16,
    /// URL path the exposition is served on.
    pub metrics_path: String,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            smartctl_path: "smartctl".to_string(),
            devices: Vec::new(),
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            metrics_path: "/metrics".to_string(),
        }
    }
}

impl ExporterConfig {
    /// Load a JSON config file. Missing fields take their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
