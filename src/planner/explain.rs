//! Explain plan output
//!
//! Produces deterministic, human-readable explain output.

use std::fmt;

use serde::Serialize;

use super::errors::PlannerError;
use super::planner::QueryPlan;

/// Explain plan output
#[derive(Debug, Clone, Serialize)]
pub struct ExplainPlan {
    /// Whether planning succeeded
    pub accepted: bool,
    /// Relation scanned (if accepted)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relation: Option<String>,
    /// Output columns in order
    pub columns: Vec<String>,
    /// Top-level AND terms of the filter
    pub predicates: Vec<String>,
    /// Sort keys, most significant first
    pub sort: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    /// Rejection reason (if rejected)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    /// Rejection error code (if rejected)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_code: Option<String>,
}

impl ExplainPlan {
    /// Creates an explain plan from a successful query plan
    pub fn from_plan(plan: &QueryPlan) -> Self {
        Self {
            accepted: true,
            relation: Some(plan.relation.clone()),
            columns: plan.column_names(),
            predicates: plan.filter_terms.clone(),
            sort: plan
                .sort
                .iter()
                .map(|k| format!("{} {}", k.label, k.direction.as_str()))
                .collect(),
            limit: plan.limit,
            rejection_reason: None,
            rejection_code: None,
        }
    }

    /// Creates an explain plan from a planning error
    pub fn from_error(err: &PlannerError) -> Self {
        Self {
            accepted: false,
            relation: None,
            columns: Vec::new(),
            predicates: Vec::new(),
            sort: Vec::new(),
            limit: None,
            rejection_reason: Some(err.message().to_string()),
            rejection_code: Some(err.code().code().to_string()),
        }
    }
}

impl fmt::Display for ExplainPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== EXPLAIN PLAN ===")?;

        if self.accepted {
            writeln!(f, "Status: ACCEPTED")?;
            if let Some(relation) = &self.relation {
                writeln!(f, "Relation: {}", relation)?;
            }
            writeln!(f, "Columns: {}", self.columns.join(", "))?;
            if !self.predicates.is_empty() {
                writeln!(f, "Predicates:")?;
                for pred in &self.predicates {
                    writeln!(f, "  - {}", pred)?;
                }
            }
            if !self.sort.is_empty() {
                writeln!(f, "Sort: {}", self.sort.join(", "))?;
            }
            if let Some(limit) = self.limit {
                writeln!(f, "Limit: {}", limit)?;
            }
        } else {
            writeln!(f, "Status: REJECTED")?;
            if let Some(code) = &self.rejection_code {
                writeln!(f, "Error Code: {}", code)?;
            }
            if let Some(reason) = &self.rejection_reason {
                writeln!(f, "Reason: {}", reason)?;
            }
        }

        Ok(())
    }
}
