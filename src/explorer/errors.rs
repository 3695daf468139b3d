//! Explorer error types
//!
//! Load failures are kept apart from query errors: the first leaves the
//! explorer permanently unusable, the second only sets the error line.

use thiserror::Error;

use crate::config::ConfigError;
use crate::executor::QueryError;
use crate::filter::FilterError;
use crate::relation::LoadError;
use crate::view::ViewError;

/// Result type for explorer operations
pub type ExplorerResult<T> = Result<T, ExplorerError>;

/// Errors surfaced by explorer operations
#[derive(Debug, Error)]
pub enum ExplorerError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("Load failed: {0}")]
    Load(#[from] LoadError),

    #[error("{}", .0.message())]
    Query(#[from] QueryError),

    #[error("{}", .0.message())]
    Filter(#[from] FilterError),

    #[error("{}", .0.message())]
    View(#[from] ViewError),
}

impl ExplorerError {
    /// Returns the error code string
    pub fn code(&self) -> &'static str {
        match self {
            ExplorerError::Config(e) => e.code(),
            ExplorerError::Load(e) => e.code(),
            ExplorerError::Query(e) => e.code().code(),
            ExplorerError::Filter(e) => e.code().code(),
            ExplorerError::View(e) => e.code().code(),
        }
    }

    /// Returns true if the failure came from a query
    pub fn is_query_error(&self) -> bool {
        matches!(self, ExplorerError::Query(_))
    }
}
