//! Configuration error types

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::filter::FilterError;
use crate::schema::SchemaError;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while reading or validating the configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Config file is not valid JSON for the config layout
    #[error("Invalid config JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Schema section is unusable
    #[error("{0}")]
    Schema(#[from] SchemaError),

    /// A filter slot does not fit the schema
    #[error("{0}")]
    Filter(#[from] FilterError),

    /// Any other rejected value
    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl ConfigError {
    /// Returns the error code string
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::Io { .. } => "TABULA_CONFIG_IO",
            ConfigError::Json { .. } => "TABULA_CONFIG_JSON",
            ConfigError::Schema(_) => "TABULA_CONFIG_SCHEMA",
            ConfigError::Filter(_) => "TABULA_CONFIG_FILTER",
            ConfigError::Invalid(_) => "TABULA_CONFIG_INVALID",
        }
    }
}
