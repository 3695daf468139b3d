//! Planner error types
//!
//! Error codes:
//! - TABULA_QUERY_SYNTAX (REJECT)
//! - TABULA_QUERY_UNKNOWN_RELATION (REJECT)
//! - TABULA_QUERY_UNKNOWN_COLUMN (REJECT)
//! - TABULA_QUERY_TYPE_MISMATCH (REJECT)
//!
//! Every planner error is detected before any row is read, so a rejected
//! query never touches the relation.

use std::fmt;

/// Severity levels for planner errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Query rejected
    Reject,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
        }
    }
}

/// Planner-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerErrorCode {
    /// Query text does not match the accepted grammar
    TabulaQuerySyntax,
    /// FROM names something other than the registered relation
    TabulaQueryUnknownRelation,
    /// Column not present in the schema or projection
    TabulaQueryUnknownColumn,
    /// Operands of incompatible types
    TabulaQueryTypeMismatch,
}

impl PlannerErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            PlannerErrorCode::TabulaQuerySyntax => "TABULA_QUERY_SYNTAX",
            PlannerErrorCode::TabulaQueryUnknownRelation => "TABULA_QUERY_UNKNOWN_RELATION",
            PlannerErrorCode::TabulaQueryUnknownColumn => "TABULA_QUERY_UNKNOWN_COLUMN",
            PlannerErrorCode::TabulaQueryTypeMismatch => "TABULA_QUERY_TYPE_MISMATCH",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        Severity::Reject
    }
}

impl fmt::Display for PlannerErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Planner error type with full context
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerError {
    code: PlannerErrorCode,
    message: String,
    /// Column name if applicable
    field: Option<String>,
}

impl PlannerError {
    /// Create a syntax error
    pub fn syntax(reason: impl Into<String>) -> Self {
        Self {
            code: PlannerErrorCode::TabulaQuerySyntax,
            message: reason.into(),
            field: None,
        }
    }

    /// Create an unknown relation error
    pub fn unknown_relation(name: impl Into<String>, expected: &str) -> Self {
        Self {
            code: PlannerErrorCode::TabulaQueryUnknownRelation,
            message: format!(
                "Table '{}' does not exist (the loaded relation is '{}')",
                name.into(),
                expected
            ),
            field: None,
        }
    }

    /// Create an unknown column error
    pub fn unknown_column(field: impl Into<String>) -> Self {
        let f = field.into();
        Self {
            code: PlannerErrorCode::TabulaQueryUnknownColumn,
            message: format!("Column '{}' does not exist", f),
            field: Some(f),
        }
    }

    /// Create a type mismatch error
    pub fn type_mismatch(reason: impl Into<String>) -> Self {
        Self {
            code: PlannerErrorCode::TabulaQueryTypeMismatch,
            message: reason.into(),
            field: None,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> PlannerErrorCode {
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

    /// Returns the column name if applicable
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }
}

impl fmt::Display for PlannerError {
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

impl std::error::Error for PlannerError {}

/// Result type for planner operations
pub type PlannerResult<T> = Result<T, PlannerError>;
