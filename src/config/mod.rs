//! Configuration module for sitewatch
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`SITEWATCH_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use sitewatch::config::SitewatchConfig;
//!
//! let config = SitewatchConfig::default();
//! assert_eq!(config.server.base_url, "http://127.0.0.1:8000");
//!
//! let toml = r#"
//! [server]
//! base_url = "https://status.example.com"
//! "#;
//! let config: SitewatchConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.server.websocket_url(), "wss://status.example.com/ws");
//! ```

pub mod error;
pub mod logging;
pub mod reconnect;
pub mod server;

pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use reconnect::ReconnectConfig;
pub use server::ServerConfig;

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Unified configuration for the dashboard client.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SitewatchConfig {
    /// Monitoring server endpoints
    pub server: ServerConfig,
    /// Push channel reconnection schedule
    pub reconnect: ReconnectConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl SitewatchConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Invalid values are silently ignored (defaults are kept).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(server) = std::env::var("SITEWATCH_SERVER") {
            self.server.base_url = server;
        }
        if let Ok(level) = std::env::var("SITEWATCH_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("SITEWATCH_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        match url::Url::parse(&self.server.base_url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {
                if parsed.host_str().is_none() {
                    return Err(ConfigError::Validation {
                        field: "server.base_url".to_string(),
                        message: "URL must include a host".to_string(),
                    });
                }
            }
            Ok(parsed) => {
                return Err(ConfigError::Validation {
                    field: "server.base_url".to_string(),
                    message: format!("unsupported scheme '{}'", parsed.scheme()),
                });
            }
            Err(e) => {
                return Err(ConfigError::Validation {
                    field: "server.base_url".to_string(),
                    message: e.to_string(),
                });
            }
        }

        if !self.server.websocket_path.starts_with('/') {
            return Err(ConfigError::Validation {
                field: "server.websocket_path".to_string(),
                message: "path must start with '/'".to_string(),
            });
        }

        if self.server.request_timeout_seconds == 0 {
            return Err(ConfigError::Validation {
                field: "server.request_timeout_seconds".to_string(),
                message: "timeout must be non-zero".to_string(),
            });
        }

        if self.reconnect.initial_delay_ms == 0 {
            return Err(ConfigError::Validation {
                field: "reconnect.initial_delay_ms".to_string(),
                message: "delay must be non-zero".to_string(),
            });
        }

        if self.reconnect.initial_delay() > self.reconnect.max_delay() {
            return Err(ConfigError::Validation {
                field: "reconnect.max_delay_seconds".to_string(),
                message: "max delay must not be shorter than the initial delay".to_string(),
            });
        }

        Ok(())
    }
}
