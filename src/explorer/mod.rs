//! Explorer: the interactive controller
//!
//! Ties the relation store, executor, filter compiler and result view into
//! the operations a user performs: load, run, filter, reset, sort, explain.

mod errors;
mod explorer;
mod status;

pub use errors::{ExplorerError, ExplorerResult};
pub use explorer::Explorer;
pub use status::StatusLine;
