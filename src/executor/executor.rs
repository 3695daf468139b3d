//! Query executor
//!
//! Execution flow (strict order):
//! 1. Parse and bind the query text against the relation
//! 2. Filter records in relation order
//! 3. Sort on the ORDER BY keys (stable)
//! 4. Apply limit
//! 5. Project output columns
//!
//! Execution is read-only: the relation is never modified, and a failure at
//! any step leaves nothing behind.

use crate::observability::{format_millis, log_event_with_fields, Event, Timer};
use crate::planner::{parse, ExplainPlan, QueryPlan, QueryPlanner};
use crate::record::{Record, Value};
use crate::relation::Relation;

use super::errors::{ExecutorError, ExecutorResult};
use super::filters::PredicateFilter;
use super::result::ResultSet;
use super::sorter::ResultSorter;

/// Query executor over one relation
pub struct QueryExecutor<'a> {
    relation: &'a Relation,
}

impl<'a> QueryExecutor<'a> {
    /// Creates a new executor
    pub fn new(relation: &'a Relation) -> Self {
        Self { relation }
    }

    /// Parses and binds `text` without reading any row
    pub fn plan(&self, text: &str) -> ExecutorResult<QueryPlan> {
        let query = parse(text)?;
        Ok(QueryPlanner::new(self.relation).plan(&query)?)
    }

    /// Explains `text`; planning failures become a rejected explain plan.
    pub fn explain(&self, text: &str) -> ExplainPlan {
        let plan = parse(text).and_then(|q| QueryPlanner::new(self.relation).plan(&q));
        let explain = match &plan {
            Ok(plan) => ExplainPlan::from_plan(plan),
            Err(err) => ExplainPlan::from_error(err),
        };
        log_event_with_fields(
            Event::QueryExplained,
            &[("accepted", if explain.accepted { "true" } else { "false" })],
        );
        explain
    }

    /// Executes query text and returns a fresh result set.
    pub fn execute(&self, text: &str) -> ExecutorResult<ResultSet> {
        let timer = Timer::new();

        let result = self.plan(text).and_then(|plan| self.run(&plan));
        let (columns, rows) = match result {
            Ok(output) => output,
            Err(err) => {
                log_event_with_fields(
                    Event::QueryRejected,
                    &[("code", err.code().code()), ("reason", err.message())],
                );
                return Err(err);
            }
        };

        let elapsed = timer.elapsed();
        let row_count = rows.len().to_string();
        let elapsed_ms = format_millis(elapsed);
        log_event_with_fields(
            Event::QueryExecuted,
            &[
                ("elapsed_ms", elapsed_ms.as_str()),
                ("relation", self.relation.name()),
                ("rows", row_count.as_str()),
            ],
        );

        Ok(ResultSet::new(columns, rows, elapsed, text.trim()))
    }

    /// Runs a bound plan against the relation.
    pub fn run(&self, plan: &QueryPlan) -> ExecutorResult<(Vec<String>, Vec<Record>)> {
        // Step 2: filter
        let mut selected: Vec<&Record> = Vec::new();
        for (position, record) in self.relation.records().iter().enumerate() {
            let keep = match &plan.filter {
                Some(condition) => PredicateFilter::matches(record, condition)
                    .map_err(|e| ExecutorError::row_failed(position, e.message()))?,
                None => true,
            };
            if keep {
                selected.push(record);
            }
        }

        // Step 3: sort
        if !plan.sort.is_empty() {
            let mut keyed = selected
                .into_iter()
                .map(|record| -> ExecutorResult<(Vec<Value>, Record)> {
                    let keys = plan
                        .sort
                        .iter()
                        .map(|k| PredicateFilter::evaluate(record, &k.expr))
                        .collect::<ExecutorResult<Vec<Value>>>()?;
                    Ok((keys, record.clone()))
                })
                .collect::<ExecutorResult<Vec<_>>>()?;
            let directions: Vec<_> = plan.sort.iter().map(|k| k.direction).collect();
            ResultSorter::sort_keyed(&mut keyed, &directions);
            return self.finish(plan, keyed.into_iter().map(|(_, r)| r).collect());
        }

        self.finish(plan, selected.into_iter().cloned().collect())
    }

    /// Steps 4-5: limit, then project
    fn finish(
        &self,
        plan: &QueryPlan,
        mut rows: Vec<Record>,
    ) -> ExecutorResult<(Vec<String>, Vec<Record>)> {
        if let Some(limit) = plan.limit {
            rows.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        }

        let projected = rows
            .iter()
            .map(|record| {
                plan.columns
                    .iter()
                    .map(|c| PredicateFilter::evaluate(record, &c.expr))
                    .collect::<ExecutorResult<Vec<Value>>>()
                    .map(Record::new)
            })
            .collect::<ExecutorResult<Vec<Record>>>()?;

        Ok((plan.column_names(), projected))
    }
}
