//! Load error types
//!
//! A load error leaves the store permanently not ready. It is reported
//! separately from query errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::schema::SchemaError;

/// Result type for load operations
pub type LoadResult<T> = Result<T, LoadError>;

/// Errors raised while loading the source into the store
#[derive(Debug, Error)]
pub enum LoadError {
    /// Source file could not be read
    #[error("Failed to read source {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Source contained no lines at all, not even a header
    #[error("Source is empty: expected a header line")]
    EmptySource,

    /// Schema is unusable
    #[error("{0}")]
    Schema(#[from] SchemaError),

    /// The store already holds a relation or a terminal failure
    #[error("Relation store is already initialized")]
    AlreadyInitialized,
}

impl LoadError {
    /// Returns the error code string
    pub fn code(&self) -> &'static str {
        match self {
            LoadError::Io { .. } => "TABULA_LOAD_IO",
            LoadError::EmptySource => "TABULA_LOAD_EMPTY",
            LoadError::Schema(_) => "TABULA_LOAD_SCHEMA",
            LoadError::AlreadyInitialized => "TABULA_LOAD_ALREADY_INITIALIZED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let err = LoadError::Io {
            path: PathBuf::from("/missing/subnets.csv"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        let display = err.to_string();
        assert!(display.contains("/missing/subnets.csv"));
        assert_eq!(err.code(), "TABULA_LOAD_IO");
    }

    #[test]
    fn test_schema_error_converts() {
        let err: LoadError = SchemaError::invalid("no fields").into();
        assert_eq!(err.code(), "TABULA_LOAD_SCHEMA");
        assert!(err.to_string().contains("no fields"));
    }
}
