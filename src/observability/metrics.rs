//! Metrics registry for tabula
//!
//! - Counters only
//! - Monotonic increase, except the loaded row gauge which is set once per load
//! - Reset only on process start

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Metrics registry containing all operational counters
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Rows in the loaded relation
    rows_loaded: AtomicU64,
    /// Failed loads
    load_failures: AtomicU64,
    /// Successful query count
    queries_executed: AtomicU64,
    /// Rejected query count
    queries_rejected: AtomicU64,
    /// Header sort clicks
    sorts_applied: AtomicU64,
    /// Filter compositions
    filters_composed: AtomicU64,
    /// Resets to the default query
    resets: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the size of a freshly loaded relation
    pub fn set_rows_loaded(&self, rows: u64) {
        self.rows_loaded.store(rows, Ordering::Relaxed);
    }

    /// Increment load failures
    pub fn increment_load_failures(&self) {
        self.load_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment queries executed
    pub fn increment_queries_executed(&self) {
        self.queries_executed.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment queries rejected
    pub fn increment_queries_rejected(&self) {
        self.queries_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment sorts applied
    pub fn increment_sorts_applied(&self) {
        self.sorts_applied.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment filter compositions
    pub fn increment_filters_composed(&self) {
        self.filters_composed.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment resets
    pub fn increment_resets(&self) {
        self.resets.fetch_add(1, Ordering::Relaxed);
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            rows_loaded: self.rows_loaded.load(Ordering::Relaxed),
            load_failures: self.load_failures.load(Ordering::Relaxed),
            queries_executed: self.queries_executed.load(Ordering::Relaxed),
            queries_rejected: self.queries_rejected.load(Ordering::Relaxed),
            sorts_applied: self.sorts_applied.load(Ordering::Relaxed),
            filters_composed: self.filters_composed.load(Ordering::Relaxed),
            resets: self.resets.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub rows_loaded: u64,
    pub load_failures: u64,
    pub queries_executed: u64,
    pub queries_rejected: u64,
    pub sorts_applied: u64,
    pub filters_composed: u64,
    pub resets: u64,
}
