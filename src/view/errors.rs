//! View error types
//!
//! Error codes:
//! - TABULA_VIEW_NO_RESULT (REJECT)
//! - TABULA_VIEW_UNKNOWN_COLUMN (REJECT)

use std::fmt;

/// View-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewErrorCode {
    /// No result set to act on
    TabulaViewNoResult,
    /// Column is not in the current result set
    TabulaViewUnknownColumn,
}

impl ViewErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            ViewErrorCode::TabulaViewNoResult => "TABULA_VIEW_NO_RESULT",
            ViewErrorCode::TabulaViewUnknownColumn => "TABULA_VIEW_UNKNOWN_COLUMN",
        }
    }
}

impl fmt::Display for ViewErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// View error type
#[derive(Debug, Clone, PartialEq)]
pub struct ViewError {
    code: ViewErrorCode,
    message: String,
}

impl ViewError {
    pub fn no_result() -> Self {
        Self {
            code: ViewErrorCode::TabulaViewNoResult,
            message: "No result set to sort".to_string(),
        }
    }

    pub fn unknown_column(column: &str) -> Self {
        Self {
            code: ViewErrorCode::TabulaViewUnknownColumn,
            message: format!("Column '{}' is not in the current result", column),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> ViewErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REJECT] {}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for ViewError {}

/// Result type for view operations
pub type ViewResult<T> = Result<T, ViewError>;
