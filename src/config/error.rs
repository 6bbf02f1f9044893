//! Errors raised while loading or validating `sitewatch.toml`

use std::path::PathBuf;
use thiserror::Error;

/// Startup configuration failures. None of these are recoverable at runtime.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config file not found: {} (create one with `sitewatch config init`)", .0.display())]
    NotFound(PathBuf),

    #[error("Config file is not valid TOML: {0}")]
    Parse(String),

    #[error("Invalid value for '{field}': {message}")]
    Validation { field: String, message: String },
}
