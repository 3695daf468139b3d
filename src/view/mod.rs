//! Result View subsystem for tabula
//!
//! Owns the current result set. Sorting here reorders that set in place and
//! never re-runs the query; a new result set always arrives unsorted.

mod errors;
mod format;
mod view;

pub use errors::{ViewError, ViewErrorCode, ViewResult};
pub use format::{CellFormat, TableRenderer};
pub use view::{ResultView, SortDirective};
