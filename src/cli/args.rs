//! CLI argument definitions using clap
//!
//! Commands:
//! - tabula query [--config <path>] [--data <file>] [--sql <text>]
//!   [--filter slot=value]... [--sort col]... [--json]
//! - tabula explain [--config <path>] [--sql <text>] [--json]
//! - tabula explore [--config <path>] [--data <file>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// tabula - query a small delimited dataset interactively
#[derive(Parser, Debug)]
#[command(name = "tabula")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Minimum log severity written to stderr (overrides the config)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load the data, run one query and print the result
    Query {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Data file (defaults to the configured path)
        #[arg(long)]
        data: Option<PathBuf>,

        /// Query text (defaults to the composed filter query)
        #[arg(long)]
        sql: Option<String>,

        /// Filter input as slot=value, repeatable
        #[arg(long = "filter", value_parser = parse_filter)]
        filters: Vec<(String, String)>,

        /// Column to sort the result on; repeat to toggle direction
        #[arg(long)]
        sort: Vec<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Plan a query without loading data
    Explain {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Query text (defaults to the default query)
        #[arg(long)]
        sql: Option<String>,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Interactive session reading commands from stdin
    Explore {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Data file (defaults to the configured path)
        #[arg(long)]
        data: Option<PathBuf>,
    },
}

/// Parses `slot=value`; the value may be empty
fn parse_filter(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((slot, value)) if !slot.trim().is_empty() => {
            Ok((slot.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected slot=value, got '{}'", arg)),
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query_command() {
        let cli = Cli::try_parse_from([
            "tabula",
            "query",
            "--filter",
            "name=apex",
            "--filter",
            "min_price=",
            "--sort",
            "subnet_uid",
            "--json",
        ])
        .unwrap();

        match cli.command {
            Command::Query {
                filters, sort, json, sql, ..
            } => {
                assert_eq!(
                    filters,
                    vec![
                        ("name".to_string(), "apex".to_string()),
                        ("min_price".to_string(), String::new()),
                    ]
                );
                assert_eq!(sort, vec!["subnet_uid"]);
                assert!(json);
                assert!(sql.is_none());
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_bad_filter_rejected() {
        assert!(Cli::try_parse_from(["tabula", "query", "--filter", "apex"]).is_err());
        assert!(Cli::try_parse_from(["tabula", "query", "--filter", "=apex"]).is_err());
    }

    #[test]
    fn test_global_log_level() {
        let cli = Cli::try_parse_from(["tabula", "explain", "--log-level", "info"]).unwrap();
        assert_eq!(cli.log_level.as_deref(), Some("info"));
    }
}
