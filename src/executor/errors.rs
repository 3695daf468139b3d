//! Executor error types
//!
//! Error codes:
//! - TABULA_QUERY_* (REJECT) - planner rejections, passed through unchanged
//! - TABULA_NOT_READY (REJECT) - no relation loaded yet
//! - TABULA_EXECUTION_FAILED (ERROR) - a plan could not be evaluated
//!
//! An executor error is the user-facing query error: its message is shown
//! verbatim on the error line.

use std::fmt;

use crate::planner::{PlannerError, PlannerErrorCode};

/// Severity levels for executor errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Query rejected before touching any row
    Reject,
    /// Execution started and failed
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

/// Executor-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutorErrorCode {
    /// Rejected while parsing or binding
    Planner(PlannerErrorCode),
    /// Relation store has no relation
    TabulaNotReady,
    /// Evaluation failed on a row
    TabulaExecutionFailed,
}

impl ExecutorErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            ExecutorErrorCode::Planner(code) => code.code(),
            ExecutorErrorCode::TabulaNotReady => "TABULA_NOT_READY",
            ExecutorErrorCode::TabulaExecutionFailed => "TABULA_EXECUTION_FAILED",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            ExecutorErrorCode::TabulaExecutionFailed => Severity::Error,
            _ => Severity::Reject,
        }
    }
}

impl fmt::Display for ExecutorErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Executor error type with full context
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutorError {
    code: ExecutorErrorCode,
    message: String,
    /// Row position if applicable
    row: Option<usize>,
}

impl ExecutorError {
    /// Create a not-ready error
    pub fn not_ready(reason: impl Into<String>) -> Self {
        Self {
            code: ExecutorErrorCode::TabulaNotReady,
            message: reason.into(),
            row: None,
        }
    }

    /// Create an execution failed error
    pub fn execution_failed(reason: impl Into<String>) -> Self {
        Self {
            code: ExecutorErrorCode::TabulaExecutionFailed,
            message: reason.into(),
            row: None,
        }
    }

    /// Create an execution failed error pinned to a relation row
    pub fn row_failed(row: usize, reason: impl Into<String>) -> Self {
        Self {
            code: ExecutorErrorCode::TabulaExecutionFailed,
            message: format!("Row {}: {}", row, reason.into()),
            row: Some(row),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> ExecutorErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the row position if applicable
    pub fn row(&self) -> Option<usize> {
        self.row
    }

    /// Returns true for rejections that happened before any row was read
    pub fn is_rejection(&self) -> bool {
        self.severity() == Severity::Reject
    }
}

impl From<PlannerError> for ExecutorError {
    fn from(err: PlannerError) -> Self {
        Self {
            code: ExecutorErrorCode::Planner(err.code()),
            message: err.message().to_string(),
            row: None,
        }
    }
}

impl fmt::Display for ExecutorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.message
        )
    }
}

impl std::error::Error for ExecutorError {}

/// The error a query surfaces to the user
pub type QueryError = ExecutorError;

/// Result type for executor operations
pub type ExecutorResult<T> = Result<T, ExecutorError>;
