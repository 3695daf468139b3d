//! Result sorting
//!
//! Every sort is stable and uses `Value::total_cmp`, so rows with equal keys
//! keep their input order.

use std::cmp::Ordering;

use crate::planner::SortDirection;
use crate::record::{Record, Value};

/// Sorts records by precomputed keys or by a column
pub struct ResultSorter;

impl ResultSorter {
    /// Sorts `(keys, record)` pairs, most significant key first.
    pub fn sort_keyed(rows: &mut [(Vec<Value>, Record)], directions: &[SortDirection]) {
        rows.sort_by(|(a, _), (b, _)| Self::compare_keys(a, b, directions));
    }

    /// Sorts records by the value at `column`.
    pub fn sort_by_column(rows: &mut [Record], column: usize, direction: SortDirection) {
        rows.sort_by(|a, b| {
            let ordering = match (a.get(column), b.get(column)) {
                (Some(x), Some(y)) => x.total_cmp(y),
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            };
            Self::directed(ordering, direction)
        });
    }

    fn compare_keys(a: &[Value], b: &[Value], directions: &[SortDirection]) -> Ordering {
        a.iter()
            .zip(b)
            .zip(directions)
            .map(|((x, y), direction)| Self::directed(x.total_cmp(y), *direction))
            .find(|o| *o != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }

    fn directed(ordering: Ordering, direction: SortDirection) -> Ordering {
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}
