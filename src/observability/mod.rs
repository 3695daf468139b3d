//! Observability subsystem for tabula
//!
//! This module provides:
//! - Structured logging (JSON lines on stderr; stdout belongs to the table)
//! - Monotonic counters for loads, queries, sorts and filter compositions
//! - Lifecycle event names and scoped BEGIN/COMPLETE logging
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on query results
//! 3. No async or background threads
//! 4. Deterministic output
//!
//! # Usage
//!
//! ```ignore
//! use tabula::observability::{Logger, MetricsRegistry, ObservationScope};
//!
//! Logger::info("QUERY_COMPLETE", &[("rows", "42")]);
//!
//! let metrics = MetricsRegistry::new();
//! metrics.increment_queries_executed();
//!
//! let scope = ObservationScope::with_fields("LOAD", &[("relation", "data")]);
//! // ... do work ...
//! scope.complete_with_fields(&[("rows", "42")]);
//! ```

mod events;
mod logger;
mod metrics;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};
pub use scope::{format_millis, ObservationScope, Timer};

/// Log a lifecycle event with fields, at the event's own severity
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
