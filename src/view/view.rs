//! Result view: the current result set plus its transient sort directive

use crate::executor::{ResultSet, ResultSorter};
use crate::observability::{log_event_with_fields, Event};
use crate::planner::SortDirection;

use super::errors::{ViewError, ViewResult};
use super::format::TableRenderer;

/// Column and direction applied to the current result set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortDirective {
    /// Sorted column, `None` when the result is in query order
    pub column: Option<String>,
    pub ascending: bool,
}

impl SortDirective {
    /// No sort applied
    pub fn none() -> Self {
        Self {
            column: None,
            ascending: true,
        }
    }

    /// Returns true if a column is sorted
    pub fn is_active(&self) -> bool {
        self.column.is_some()
    }

    /// Header marker for `column`, if it is the sorted one
    pub fn marker_for(&self, column: &str) -> Option<&'static str> {
        match &self.column {
            Some(c) if c == column => Some(if self.ascending { "↑" } else { "↓" }),
            _ => None,
        }
    }

    fn direction(&self) -> SortDirection {
        if self.ascending {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        }
    }
}

impl Default for SortDirective {
    fn default() -> Self {
        Self::none()
    }
}

/// Holds the one live result set
#[derive(Debug, Default)]
pub struct ResultView {
    current: Option<ResultSet>,
    directive: SortDirective,
}

impl ResultView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the result set and clears the sort directive
    pub fn replace(&mut self, result: ResultSet) {
        self.current = Some(result);
        self.directive = SortDirective::none();
    }

    /// Returns the current result set
    pub fn current_result_set(&self) -> Option<&ResultSet> {
        self.current.as_ref()
    }

    /// Returns the active sort directive
    pub fn sort_directive(&self) -> &SortDirective {
        &self.directive
    }

    /// Sorts the current result set on `column`.
    ///
    /// The same column again flips the direction; a new column starts
    /// ascending. The executor is not consulted.
    pub fn apply_sort(&mut self, column: &str) -> ViewResult<()> {
        let result = self.current.as_mut().ok_or_else(ViewError::no_result)?;
        let index = result
            .column_index(column)
            .ok_or_else(|| ViewError::unknown_column(column))?;

        if self.directive.column.as_deref() == Some(column) {
            self.directive.ascending = !self.directive.ascending;
        } else {
            self.directive = SortDirective {
                column: Some(column.to_string()),
                ascending: true,
            };
        }

        ResultSorter::sort_by_column(&mut result.rows, index, self.directive.direction());

        log_event_with_fields(
            Event::SortApplied,
            &[
                ("column", column),
                ("direction", self.directive.direction().as_str()),
            ],
        );
        Ok(())
    }

    /// Renders the current result set as a table
    pub fn render(&self) -> String {
        match &self.current {
            Some(result) => TableRenderer::render(result, &self.directive),
            None => TableRenderer::EMPTY.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Record, Value};
    use std::time::Duration;

    fn result(values: &[i64]) -> ResultSet {
        ResultSet::new(
            vec!["n".into(), "label".into()],
            values
                .iter()
                .map(|v| Record::new(vec![Value::Integer(*v), Value::text(v.to_string())]))
                .collect(),
            Duration::ZERO,
            "SELECT * FROM data",
        )
    }

    fn column(view: &ResultView, index: usize) -> Vec<Value> {
        let rs = view.current_result_set().unwrap();
        rs.column_values(index).into_iter().cloned().collect()
    }

    #[test]
    fn test_toggle_same_column() {
        let mut view = ResultView::new();
        view.replace(result(&[2, 10, 1]));

        view.apply_sort("n").unwrap();
        assert!(view.sort_directive().ascending);
        assert_eq!(
            column(&view, 0),
            vec![Value::Integer(1), Value::Integer(2), Value::Integer(10)]
        );

        view.apply_sort("n").unwrap();
        assert!(!view.sort_directive().ascending);
        assert_eq!(
            column(&view, 0),
            vec![Value::Integer(10), Value::Integer(2), Value::Integer(1)]
        );
    }

    #[test]
    fn test_new_column_starts_ascending() {
        let mut view = ResultView::new();
        view.replace(result(&[2, 10, 1]));
        view.apply_sort("n").unwrap();
        view.apply_sort("n").unwrap();
        view.apply_sort("label").unwrap();

        assert_eq!(view.sort_directive().column.as_deref(), Some("label"));
        assert!(view.sort_directive().ascending);
        // Text column sorts lexicographically
        assert_eq!(
            column(&view, 1),
            vec![Value::text("1"), Value::text("10"), Value::text("2")]
        );
    }

    #[test]
    fn test_replace_resets_directive() {
        let mut view = ResultView::new();
        view.replace(result(&[1, 2]));
        view.apply_sort("n").unwrap();
        view.replace(result(&[3]));
        assert_eq!(view.sort_directive(), &SortDirective::none());
    }

    #[test]
    fn test_sort_errors_leave_state() {
        let mut view = ResultView::new();
        assert_eq!(
            view.apply_sort("n").unwrap_err().code(),
            crate::view::ViewErrorCode::TabulaViewNoResult
        );

        view.replace(result(&[1]));
        assert!(view.apply_sort("nope").is_err());
        assert!(!view.sort_directive().is_active());
    }
}
