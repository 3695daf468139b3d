//! Schema error types
//!
//! Error codes:
//! - TABULA_SCHEMA_MALFORMED (REJECT)
//! - TABULA_SCHEMA_INVALID (REJECT)

use std::fmt;

/// Severity levels for schema errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Schema rejected, nothing loaded
    Reject,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
        }
    }
}

/// Schema-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// Schema text could not be parsed
    TabulaSchemaMalformed,
    /// Schema parsed but is structurally unusable
    TabulaSchemaInvalid,
}

impl SchemaErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::TabulaSchemaMalformed => "TABULA_SCHEMA_MALFORMED",
            SchemaErrorCode::TabulaSchemaInvalid => "TABULA_SCHEMA_INVALID",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        Severity::Reject
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Schema error with context
#[derive(Debug, Clone)]
pub struct SchemaError {
    code: SchemaErrorCode,
    message: String,
}

impl SchemaError {
    /// Create a malformed schema error
    pub fn malformed(source: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            code: SchemaErrorCode::TabulaSchemaMalformed,
            message: format!("Malformed schema '{}': {}", source.into(), reason.into()),
        }
    }

    /// Create an invalid schema error
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self {
            code: SchemaErrorCode::TabulaSchemaInvalid,
            message: reason.into(),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> SchemaErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for SchemaError {
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

impl std::error::Error for SchemaError {}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            SchemaErrorCode::TabulaSchemaMalformed.code(),
            "TABULA_SCHEMA_MALFORMED"
        );
        assert_eq!(
            SchemaErrorCode::TabulaSchemaInvalid.code(),
            "TABULA_SCHEMA_INVALID"
        );
    }

    #[test]
    fn test_error_display() {
        let err = SchemaError::invalid("duplicate field 'uid'");
        let display = err.to_string();
        assert!(display.contains("REJECT"));
        assert!(display.contains("TABULA_SCHEMA_INVALID"));
        assert!(display.contains("uid"));
    }
}
