//! Interactive explore session
//!
//! One line per action. Bare text runs as a query; lines starting with `:`
//! are commands. A failed action prints its error and the session goes on.

use std::io::{BufRead, Write};

use crate::explorer::Explorer;

use super::errors::CliResult;
use super::io::write_text;

const HELP: &str = "\
commands:
  <query text>          run a query
  :run                  re-run the current query text
  :reset                clear filters and run the default query
  :sort <column>        sort the current result (repeat to flip)
  :filter <slot> [val]  set a filter input (no value clears it)
  :explain [query]      plan the current or given query
  :stats                show counters
  :help                 show this text
  :quit                 leave";

/// One parsed session line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Query(String),
    Run,
    Reset,
    Sort(String),
    Filter { slot: String, value: String },
    Explain(Option<String>),
    Stats,
    Help,
    Quit,
    Empty,
}

impl SessionCommand {
    /// Parses one input line
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(SessionCommand::Empty);
        }
        let Some(rest) = line.strip_prefix(':') else {
            return Ok(SessionCommand::Query(line.to_string()));
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };

        match name {
            "run" | "r" => Ok(SessionCommand::Run),
            "reset" => Ok(SessionCommand::Reset),
            "sort" if !arg.is_empty() => Ok(SessionCommand::Sort(arg.to_string())),
            "sort" => Err("usage: :sort <column>".to_string()),
            "filter" if !arg.is_empty() => {
                let (slot, value) = arg.split_once(char::is_whitespace).unwrap_or((arg, ""));
                Ok(SessionCommand::Filter {
                    slot: slot.to_string(),
                    value: value.trim().to_string(),
                })
            }
            "filter" => Err("usage: :filter <slot> [value]".to_string()),
            "explain" if arg.is_empty() => Ok(SessionCommand::Explain(None)),
            "explain" => Ok(SessionCommand::Explain(Some(arg.to_string()))),
            "stats" => Ok(SessionCommand::Stats),
            "help" | "h" => Ok(SessionCommand::Help),
            "quit" | "q" | "exit" => Ok(SessionCommand::Quit),
            other => Err(format!("unknown command ':{}' (try :help)", other)),
        }
    }
}

/// Runs commands from `input` until `:quit` or end of input.
pub fn run_session<R: BufRead, W: Write>(
    explorer: &mut Explorer,
    input: R,
    out: &mut W,
) -> CliResult<()> {
    print_view(explorer, out)?;

    for line in input.lines() {
        let line = line?;
        let command = match SessionCommand::parse(&line) {
            Ok(command) => command,
            Err(usage) => {
                write_text(out, &usage)?;
                continue;
            }
        };

        let outcome = match command {
            SessionCommand::Empty => continue,
            SessionCommand::Quit => break,
            SessionCommand::Help => {
                write_text(out, HELP)?;
                continue;
            }
            SessionCommand::Stats => {
                write_text(out, &serde_json::to_string_pretty(&explorer.metrics())?)?;
                continue;
            }
            SessionCommand::Explain(text) => {
                let text = text.unwrap_or_else(|| explorer.query_text().to_string());
                match explorer.explain(&text) {
                    Ok(plan) => write_text(out, plan.to_string().trim_end())?,
                    Err(e) => write_text(out, &format!("error: {}", e))?,
                }
                continue;
            }
            SessionCommand::Query(text) => explorer.run_query(&text),
            SessionCommand::Run => explorer.run_current(),
            SessionCommand::Reset => explorer.reset(),
            SessionCommand::Sort(column) => explorer.apply_sort(&column),
            SessionCommand::Filter { slot, value } => {
                let result = explorer.set_filter(&slot, &value);
                if result.is_ok() {
                    write_text(out, explorer.query_text())?;
                }
                result
            }
        };

        match outcome {
            Ok(()) => print_view(explorer, out)?,
            Err(e) => write_text(out, &format!("error: {}", e))?,
        }
    }

    Ok(())
}

/// Prints the table and the status line
pub fn print_view<W: Write>(explorer: &Explorer, out: &mut W) -> CliResult<()> {
    write_text(out, &explorer.render())?;
    if let Some(status) = explorer.status_line() {
        write_text(out, &status.to_string())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExplorerConfig;
    use crate::filter::{FilterSlot, SlotKind};
    use crate::planner::SortSpec;
    use crate::schema::{FieldDef, Schema};
    use std::io::Cursor;

    fn explorer() -> Explorer {
        let config = ExplorerConfig {
            schema: Schema::new(vec![FieldDef::int("uid"), FieldDef::text("name")]),
            default_order: SortSpec::desc("uid"),
            filters: vec![FilterSlot::new("name", SlotKind::Substring, "name")],
            ..ExplorerConfig::default()
        };
        let mut explorer = Explorer::new(&config).unwrap();
        explorer.load("uid,name\n1,Alpha\n2,Beta\n").unwrap();
        explorer
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(SessionCommand::parse("  "), Ok(SessionCommand::Empty));
        assert_eq!(
            SessionCommand::parse("SELECT * FROM data"),
            Ok(SessionCommand::Query("SELECT * FROM data".into()))
        );
        assert_eq!(
            SessionCommand::parse(":filter name  al pha "),
            Ok(SessionCommand::Filter {
                slot: "name".into(),
                value: "al pha".into()
            })
        );
        assert_eq!(
            SessionCommand::parse(":filter name"),
            Ok(SessionCommand::Filter {
                slot: "name".into(),
                value: String::new()
            })
        );
        assert_eq!(SessionCommand::parse(":sort uid"), Ok(SessionCommand::Sort("uid".into())));
        assert!(SessionCommand::parse(":sort").is_err());
        assert!(SessionCommand::parse(":bogus").is_err());
    }

    #[test]
    fn test_session_runs_until_quit() {
        let mut explorer = explorer();
        let input =
            Cursor::new(":filter name be\n:sort uid\nSELECT nope FROM data\n:quit\n:reset\n");
        let mut out = Vec::new();
        run_session(&mut explorer, input, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("2 rows"));
        assert!(text.contains("LOWER(name) LIKE '%be%'"));
        assert!(text.contains("uid ↑"));
        assert!(text.contains("error: Column 'nope' does not exist"));
        // :reset after :quit is never read
        assert_eq!(explorer.metrics().resets, 0);
    }
}
