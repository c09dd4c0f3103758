//! # Configuration Utilities
//!
//! Checker configuration structure and TOML parsing helpers. Every field has
//! a sensible default so the binary runs without a config file, and every
//! field can be overridden from the command line.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;

/// Load a TOML configuration file and deserialize it into the specified type.
///
/// # Arguments
/// - `path`: Path to the TOML configuration file
///
/// # Returns
/// - `Ok(T)`: Successfully loaded and parsed configuration
/// - `Err`: File I/O or parsing error
///
/// # Example
/// ```ignore
/// let config: CheckerConfig = load_config("config/checker.toml")?;
/// ```
pub fn load_config<T>(path: &str) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Checker runtime configuration.
///
/// # Example TOML
///
/// ```toml
/// service_port = 5005
/// state_dir = "state"
/// http_timeout_secs = 10
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckerConfig {
    /// TCP port the gallery service listens on
    #[serde(default = "default_service_port")]
    pub service_port: u16,
    /// Directory placement records are persisted in
    #[serde(default = "default_state_dir")]
    pub state_dir: String,
    /// Per-request HTTP timeout in seconds
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            service_port: default_service_port(),
            state_dir: default_state_dir(),
            http_timeout_secs: default_http_timeout_secs(),
        }
    }
}

fn default_service_port() -> u16 {
    5005
}

fn default_state_dir() -> String {
    "state".to_string()
}

fn default_http_timeout_secs() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: CheckerConfig = toml::from_str("").unwrap();
        assert_eq!(config.service_port, 5005);
        assert_eq!(config.state_dir, "state");
        assert_eq!(config.http_timeout_secs, 10);
    }

    #[test]
    fn partial_config_overrides_only_named_fields() {
        let config: CheckerConfig = toml::from_str("service_port = 8080").unwrap();
        assert_eq!(config.service_port, 8080);
        assert_eq!(config.state_dir, "state");
    }
}
