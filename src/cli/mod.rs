//! CLI module for tabula
//!
//! Provides command-line interface for:
//! - query: load, run one query, print the table or JSON
//! - explain: plan a query against the configured schema
//! - explore: interactive session on stdin

mod args;
mod commands;
mod errors;
mod io;
mod session;

pub use args::{Cli, Command};
pub use commands::{explain, explore, query, run, run_command, setup, QueryRequest};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_error, write_response, write_text};
pub use session::{run_session, SessionCommand};
