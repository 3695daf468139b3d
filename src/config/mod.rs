//! Configuration for tabula
//!
//! A JSON file describing the source, its schema, the default ordering and
//! the filter inputs.

mod config;
mod errors;

pub use config::ExplorerConfig;
pub use errors::{ConfigError, ConfigResult};
