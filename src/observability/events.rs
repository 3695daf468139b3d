//! Observability events for tabula
//!
//! Every observable occurrence has a typed name here; log lines use
//! `Event::as_str` rather than ad hoc strings.

use std::fmt;

use super::logger::Severity;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration loaded
    ConfigLoaded,

    // Load
    /// Source could not be loaded; store stays not ready
    LoadFailed,
    /// Header line names differ from the schema
    HeaderMismatch,
    /// Some numeric cells decoded to the sentinel
    CellsNotANumber,

    // Query
    /// Query executed successfully
    QueryExecuted,
    /// Query rejected (parse, unknown column, type mismatch, not ready)
    QueryRejected,
    /// Query planned for EXPLAIN only
    QueryExplained,

    // Interaction
    /// Filter slots composed into query text
    FiltersComposed,
    /// Result view re-sorted
    SortApplied,
    /// Explorer reset to the default query
    Reset,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::LoadFailed => "LOAD_FAILED",
            Event::HeaderMismatch => "HEADER_MISMATCH",
            Event::CellsNotANumber => "CELLS_NOT_A_NUMBER",
            Event::QueryExecuted => "QUERY_COMPLETE",
            Event::QueryRejected => "QUERY_REJECTED",
            Event::QueryExplained => "QUERY_EXPLAINED",
            Event::FiltersComposed => "FILTERS_COMPOSED",
            Event::SortApplied => "SORT_APPLIED",
            Event::Reset => "RESET",
        }
    }

    /// Returns the severity this event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::LoadFailed => Severity::Error,
            Event::HeaderMismatch | Event::CellsNotANumber | Event::QueryRejected => {
                Severity::Warn
            }
            Event::FiltersComposed | Event::SortApplied => Severity::Trace,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
