//! Query Executor subsystem for tabula
//!
//! Evaluates query text against the loaded relation and produces a new,
//! independently owned result set.
//!
//! # Invariants
//!
//! - The relation is read, never written
//! - Same text against the same relation yields the same rows
//! - Rejections (syntax, unknown names, type mismatch) happen before any row
//!   is read

mod errors;
mod executor;
mod filters;
mod result;
mod sorter;

pub use errors::{ExecutorError, ExecutorErrorCode, ExecutorResult, QueryError, Severity};
pub use executor::QueryExecutor;
pub use filters::PredicateFilter;
pub use result::ResultSet;
pub use sorter::ResultSorter;
