//! Filter error types
//!
//! Error codes:
//! - TABULA_FILTER_UNKNOWN_SLOT (REJECT)
//! - TABULA_FILTER_INVALID_SLOT (REJECT)

use std::fmt;

/// Severity levels for filter errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Request rejected, state unchanged
    Reject,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
        }
    }
}

/// Filter-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterErrorCode {
    /// Value set on a slot that is not configured
    TabulaFilterUnknownSlot,
    /// Slot definition does not fit the schema
    TabulaFilterInvalidSlot,
}

impl FilterErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            FilterErrorCode::TabulaFilterUnknownSlot => "TABULA_FILTER_UNKNOWN_SLOT",
            FilterErrorCode::TabulaFilterInvalidSlot => "TABULA_FILTER_INVALID_SLOT",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        Severity::Reject
    }
}

impl fmt::Display for FilterErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Filter error type
#[derive(Debug, Clone, PartialEq)]
pub struct FilterError {
    code: FilterErrorCode,
    message: String,
    slot: String,
}

impl FilterError {
    /// Create an unknown slot error
    pub fn unknown_slot(slot: impl Into<String>, known: &[&str]) -> Self {
        let slot = slot.into();
        Self {
            code: FilterErrorCode::TabulaFilterUnknownSlot,
            message: format!(
                "Unknown filter '{}' (expected one of: {})",
                slot,
                known.join(", ")
            ),
            slot,
        }
    }

    /// Create an invalid slot error
    pub fn invalid_slot(slot: impl Into<String>, reason: impl Into<String>) -> Self {
        let slot = slot.into();
        Self {
            code: FilterErrorCode::TabulaFilterInvalidSlot,
            message: format!("Filter '{}': {}", slot, reason.into()),
            slot,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> FilterErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the slot name
    pub fn slot(&self) -> &str {
        &self.slot
    }
}

impl fmt::Display for FilterError {
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

impl std::error::Error for FilterError {}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;
