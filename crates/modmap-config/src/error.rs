//! Error types for alias configuration and loading.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config not found")]
    NotFound,

    // Alias entry errors (malformed configuration)
    #[error("alias entry #{index} is missing required field '{field}'")]
    MissingAliasField { index: usize, field: &'static str },

    #[error("alias entry #{index} has an empty '{field}'")]
    EmptyAliasField { index: usize, field: &'static str },

    #[error("invalid config value for '{field}'{}", hint.as_ref().map(|h| format!(": {h}")).unwrap_or_default())]
    InvalidValue { field: String, hint: Option<String> },

    #[error("config file not readable: {0}")]
    Unreadable(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
