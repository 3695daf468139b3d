//! CLI command implementations
//!
//! Each command loads the config, applies the log level, and drives an
//! `Explorer` (or, for explain, only the planner).

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::config::ExplorerConfig;
use crate::executor::QueryExecutor;
use crate::explorer::Explorer;
use crate::observability::{Logger, Severity};
use crate::relation::Relation;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use super::io::{stdout, write_error, write_response, write_text};
use super::session::{print_view, run_session};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command, cli.log_level.as_deref())
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command, log_level: Option<&str>) -> CliResult<()> {
    match cmd {
        Command::Query {
            config,
            data,
            sql,
            filters,
            sort,
            json,
        } => {
            let config = setup(config.as_deref(), log_level)?;
            let request = QueryRequest {
                data,
                sql,
                filters,
                sort,
                json,
            };
            query(&config, &request, &mut stdout())
        }
        Command::Explain { config, sql, json } => {
            let config = setup(config.as_deref(), log_level)?;
            explain(&config, sql.as_deref(), json, &mut stdout())
        }
        Command::Explore { config, data } => {
            let config = setup(config.as_deref(), log_level)?;
            explore(&config, data.as_deref())
        }
    }
}

/// Loads the config and sets the process log level.
///
/// `--log-level` wins over the config file.
pub fn setup(config_path: Option<&Path>, log_level: Option<&str>) -> CliResult<ExplorerConfig> {
    let config = ExplorerConfig::load_or_default(config_path)?;
    let severity: Severity = match log_level {
        Some(level) => level.parse().map_err(CliError::config_error)?,
        None => config.log_severity()?,
    };
    Logger::set_min_severity(severity);
    Ok(config)
}

/// Options of one `query` invocation
#[derive(Debug, Clone, Default)]
pub struct QueryRequest {
    pub data: Option<PathBuf>,
    pub sql: Option<String>,
    pub filters: Vec<(String, String)>,
    pub sort: Vec<String>,
    pub json: bool,
}

/// Loads the data, runs one query and writes the result to `out`.
///
/// Filters compose the query unless `--sql` is given; the two are
/// mutually exclusive.
pub fn query<W: Write>(
    config: &ExplorerConfig,
    request: &QueryRequest,
    out: &mut W,
) -> CliResult<()> {
    if request.sql.is_some() && !request.filters.is_empty() {
        return Err(CliError::invalid_argument("use either --sql or --filter, not both"));
    }

    let result = run_query(config, request);
    let explorer = match result {
        Ok(explorer) => explorer,
        Err(err) => {
            if request.json {
                write_error(out, err.code_str(), err.message())?;
            }
            return Err(err);
        }
    };

    if request.json {
        let data = serde_json::json!({
            "result": explorer.current_result_set(),
            "query": explorer.query_text(),
            "sort": explorer.view().sort_directive().column,
            "ascending": explorer.view().sort_directive().ascending,
        });
        write_response(out, data)
    } else {
        print_view(&explorer, out)
    }
}

fn run_query(config: &ExplorerConfig, request: &QueryRequest) -> CliResult<Explorer> {
    let mut explorer = Explorer::new(config)?;
    let data = request.data.as_deref().unwrap_or(config.data_path.as_path());
    explorer.load_file(data)?;

    for (slot, value) in &request.filters {
        explorer.set_filter(slot, value)?;
    }
    if let Some(sql) = &request.sql {
        explorer.run_query(sql)?;
    }
    for column in &request.sort {
        explorer.apply_sort(column)?;
    }

    Ok(explorer)
}

/// Plans a query against the configured schema without loading data
pub fn explain<W: Write>(
    config: &ExplorerConfig,
    sql: Option<&str>,
    json: bool,
    out: &mut W,
) -> CliResult<()> {
    let text = match sql {
        Some(text) => text.to_string(),
        None => config.filter_compiler()?.default_query(),
    };

    let relation = Relation::new(config.relation.clone(), config.schema.clone(), Vec::new());
    let plan = QueryExecutor::new(&relation).explain(&text);

    if json {
        write_response(out, serde_json::to_value(&plan)?)
    } else {
        write_text(out, plan.to_string().trim_end())
    }
}

/// Starts an interactive session on stdin/stdout
pub fn explore(config: &ExplorerConfig, data: Option<&Path>) -> CliResult<()> {
    let mut explorer = Explorer::new(config)?;
    let data = data.unwrap_or(config.data_path.as_path());
    explorer.load_file(data)?;

    let stdin = io::stdin();
    run_session(&mut explorer, stdin.lock(), &mut stdout())
}
