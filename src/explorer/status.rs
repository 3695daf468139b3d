//! Status line shown under the result table

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::executor::ResultSet;
use crate::observability::format_millis;

/// Row count and execution time of the last successful query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusLine {
    pub rows: usize,
    #[serde(skip)]
    pub elapsed: Duration,
}

impl StatusLine {
    pub fn of(result: &ResultSet) -> Self {
        Self {
            rows: result.len(),
            elapsed: result.elapsed,
        }
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} rows · {}ms", self.rows, format_millis(self.elapsed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_line_text() {
        let status = StatusLine {
            rows: 64,
            elapsed: Duration::from_micros(2300),
        };
        assert_eq!(status.to_string(), "64 rows · 2.3ms");
    }
}
