//! Explorer controller
//!
//! Owns the relation store, the query text, the filter inputs and the
//! result view. Every interaction is a method call here; nothing is shared.

use std::path::Path;

use crate::config::ExplorerConfig;
use crate::executor::{ExecutorError, QueryExecutor, ResultSet};
use crate::filter::{FilterCompiler, FilterState};
use crate::observability::{log_event_with_fields, Event, MetricsRegistry, MetricsSnapshot};
use crate::planner::ExplainPlan;
use crate::relation::{LoadError, LoadState, Relation, RelationStore};
use crate::schema::Schema;
use crate::view::ResultView;

use super::errors::ExplorerResult;
use super::status::StatusLine;

/// Interactive session over one relation
pub struct Explorer {
    relation_name: String,
    schema: Schema,
    store: RelationStore,
    compiler: FilterCompiler,
    filters: FilterState,
    query_text: String,
    view: ResultView,
    status: Option<StatusLine>,
    error: Option<String>,
    metrics: MetricsRegistry,
}

impl Explorer {
    /// Creates an explorer with nothing loaded
    pub fn new(config: &ExplorerConfig) -> ExplorerResult<Self> {
        config.validate()?;
        let compiler = config.filter_compiler()?;
        let query_text = compiler.default_query();

        Ok(Self {
            relation_name: config.relation.clone(),
            schema: config.schema.clone(),
            store: RelationStore::new(),
            compiler,
            filters: FilterState::new(),
            query_text,
            view: ResultView::new(),
            status: None,
            error: None,
            metrics: MetricsRegistry::new(),
        })
    }

    /// Decodes and registers `raw`, then runs the default query.
    pub fn load(&mut self, raw: &str) -> ExplorerResult<()> {
        let loaded = self
            .store
            .load(&self.relation_name, self.schema.clone(), raw)
            .map(Relation::len);
        self.after_load(loaded)
    }

    /// Reads the source file and loads it.
    pub fn load_file(&mut self, path: &Path) -> ExplorerResult<()> {
        let loaded = self
            .store
            .load_file(&self.relation_name, self.schema.clone(), path)
            .map(Relation::len);
        self.after_load(loaded)
    }

    fn after_load(&mut self, loaded: Result<usize, LoadError>) -> ExplorerResult<()> {
        match loaded {
            Ok(rows) => {
                self.metrics.set_rows_loaded(rows as u64);
                let text = self.query_text.clone();
                self.run_query(&text)
            }
            Err(err) => {
                self.metrics.increment_load_failures();
                Err(err.into())
            }
        }
    }

    /// Runs `text`, which also becomes the current query text.
    ///
    /// The error line is cleared first. On failure the previous result set
    /// and status line stay as they were.
    pub fn run_query(&mut self, text: &str) -> ExplorerResult<()> {
        self.query_text = text.to_string();
        self.error = None;

        match self.execute(text) {
            Ok(result) => {
                self.metrics.increment_queries_executed();
                self.status = Some(StatusLine::of(&result));
                self.view.replace(result);
                Ok(())
            }
            Err(err) => {
                self.metrics.increment_queries_rejected();
                self.error = Some(err.message().to_string());
                Err(err.into())
            }
        }
    }

    /// Re-runs the current query text unmodified
    pub fn run_current(&mut self) -> ExplorerResult<()> {
        let text = self.query_text.clone();
        self.run_query(&text)
    }

    /// Sets one filter input, recomposes the query text and runs it.
    pub fn set_filter(&mut self, slot: &str, value: &str) -> ExplorerResult<()> {
        self.compiler.set(&mut self.filters, slot, value)?;
        self.metrics.increment_filters_composed();
        let text = self.compiler.compose(&self.filters);
        self.run_query(&text)
    }

    /// Clears every filter input and runs the default query
    pub fn reset(&mut self) -> ExplorerResult<()> {
        self.filters.clear();
        self.metrics.increment_resets();
        let text = self.compiler.default_query();
        log_event_with_fields(Event::Reset, &[("query", text.as_str())]);
        self.run_query(&text)
    }

    /// Sorts the current result set on `column`
    pub fn apply_sort(&mut self, column: &str) -> ExplorerResult<()> {
        self.view.apply_sort(column)?;
        self.metrics.increment_sorts_applied();
        Ok(())
    }

    /// Plans `text` without running it
    pub fn explain(&self, text: &str) -> ExplorerResult<ExplainPlan> {
        let relation = self.relation()?;
        Ok(QueryExecutor::new(relation).explain(text))
    }

    fn execute(&self, text: &str) -> Result<ResultSet, ExecutorError> {
        QueryExecutor::new(self.relation()?).execute(text)
    }

    fn relation(&self) -> Result<&Relation, ExecutorError> {
        match self.store.state() {
            LoadState::Ready(relation) => Ok(relation),
            LoadState::NotReady => Err(ExecutorError::not_ready("No data loaded yet")),
            LoadState::Failed(reason) => Err(ExecutorError::not_ready(format!(
                "Data failed to load: {}",
                reason
            ))),
        }
    }

    /// Query text the next `run_current` executes
    pub fn query_text(&self) -> &str {
        &self.query_text
    }

    /// Query text restored by `reset`
    pub fn default_query(&self) -> String {
        self.compiler.default_query()
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Configured filter names in clause order
    pub fn filter_names(&self) -> Vec<&str> {
        self.compiler.slot_names()
    }

    pub fn view(&self) -> &ResultView {
        &self.view
    }

    /// Current result set, if any query has succeeded
    pub fn current_result_set(&self) -> Option<&ResultSet> {
        self.view.current_result_set()
    }

    /// Renders the current table
    pub fn render(&self) -> String {
        self.view.render()
    }

    pub fn status_line(&self) -> Option<&StatusLine> {
        self.status.as_ref()
    }

    /// Message of the last failed query, cleared by the next attempt
    pub fn error_line(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Returns true once the relation is loaded
    pub fn is_ready(&self) -> bool {
        self.store.is_ready()
    }

    /// Load failure reason, if the source could not be loaded
    pub fn load_failure(&self) -> Option<&str> {
        match self.store.state() {
            LoadState::Failed(reason) => Some(reason),
            _ => None,
        }
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}
