//! Result types for query execution

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use crate::record::{Record, Value};

/// Ordered, named-column output of one query.
///
/// A result set owns its rows; it never aliases the relation.
#[derive(Debug, Clone, Serialize)]
pub struct ResultSet {
    /// Output column names in order
    pub columns: Vec<String>,
    /// Rows in result order
    pub rows: Vec<Record>,
    /// Time spent executing
    #[serde(rename = "elapsed_ms", serialize_with = "serialize_millis")]
    pub elapsed: Duration,
    /// Query text as executed
    pub query: String,
    /// When the query finished
    pub executed_at: DateTime<Utc>,
}

impl ResultSet {
    /// Creates a result set stamped with the current time
    pub fn new(
        columns: Vec<String>,
        rows: Vec<Record>,
        elapsed: Duration,
        query: impl Into<String>,
    ) -> Self {
        Self {
            columns,
            rows,
            elapsed,
            query: query.into(),
            executed_at: Utc::now(),
        }
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Value at `(row, column)`
    pub fn value(&self, row: usize, column: usize) -> Option<&Value> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    /// All values of one column, in row order
    pub fn column_values(&self, column: usize) -> Vec<&Value> {
        self.rows.iter().filter_map(|r| r.get(column)).collect()
    }
}

fn serialize_millis<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(elapsed.as_secs_f64() * 1000.0)
}
