//! Predicate evaluation for query execution
//!
//! Any comparison touching a NotANumber cell is false, except `!=` which is
//! true. LIKE on a non-text value never matches.

use std::cmp::Ordering;

use crate::planner::{
    BoundCondition, BoundExpr, FilterOp, LikePattern, PatternSource, ScalarFunction,
};
use crate::record::{Record, Value};

use super::errors::{ExecutorError, ExecutorResult};

/// Evaluates bound conditions against records
pub struct PredicateFilter;

impl PredicateFilter {
    /// Checks if a record satisfies the condition
    pub fn matches(record: &Record, condition: &BoundCondition) -> ExecutorResult<bool> {
        match condition {
            BoundCondition::And(l, r) => {
                Ok(Self::matches(record, l)? && Self::matches(record, r)?)
            }
            BoundCondition::Or(l, r) => Ok(Self::matches(record, l)? || Self::matches(record, r)?),
            BoundCondition::Not(c) => Ok(!Self::matches(record, c)?),
            BoundCondition::Compare { left, op, right } => {
                let a = Self::evaluate(record, left)?;
                let b = Self::evaluate(record, right)?;
                Ok(Self::compare(&a, *op, &b))
            }
            BoundCondition::Like {
                expr,
                pattern,
                negated,
            } => {
                let text = match Self::evaluate(record, expr)? {
                    Value::Text(s) => s,
                    _ => return Ok(false),
                };
                let matched = match pattern {
                    PatternSource::Compiled(p) => p.matches(&text),
                    PatternSource::Dynamic(e) => match Self::evaluate(record, e)? {
                        Value::Text(p) => LikePattern::compile(&p)
                            .map_err(|err| ExecutorError::execution_failed(err.message()))?
                            .matches(&text),
                        _ => return Ok(false),
                    },
                };
                Ok(matched != *negated)
            }
        }
    }

    /// Evaluates an expression against a record
    pub fn evaluate(record: &Record, expr: &BoundExpr) -> ExecutorResult<Value> {
        match expr {
            BoundExpr::Column { index, name } => record.get(*index).cloned().ok_or_else(|| {
                ExecutorError::execution_failed(format!(
                    "Record has {} values, no value for column '{}'",
                    record.len(),
                    name
                ))
            }),
            BoundExpr::Literal(v) => Ok(v.clone()),
            BoundExpr::Function { func, arg } => Ok(match Self::evaluate(record, arg)? {
                Value::Text(s) => Value::Text(match func {
                    ScalarFunction::Lower => s.to_lowercase(),
                    ScalarFunction::Upper => s.to_uppercase(),
                }),
                other => other,
            }),
        }
    }

    /// Compares two values under a comparison operator
    fn compare(a: &Value, op: FilterOp, b: &Value) -> bool {
        if matches!(a, Value::NotANumber) || matches!(b, Value::NotANumber) {
            return op == FilterOp::NotEq;
        }

        let ordering = match (a, b) {
            (Value::Integer(x), Value::Integer(y)) => Some(x.cmp(y)),
            (Value::Text(x), Value::Text(y)) => Some(x.cmp(y)),
            (x, y) => match (x.as_f64(), y.as_f64()) {
                (Some(x), Some(y)) => x.partial_cmp(&y),
                _ => None,
            },
        };

        let Some(ordering) = ordering else {
            return false;
        };

        match op {
            FilterOp::Eq => ordering == Ordering::Equal,
            FilterOp::NotEq => ordering != Ordering::Equal,
            FilterOp::Lt => ordering == Ordering::Less,
            FilterOp::Lte => ordering != Ordering::Greater,
            FilterOp::Gt => ordering == Ordering::Greater,
            FilterOp::Gte => ordering != Ordering::Less,
            FilterOp::Like | FilterOp::NotLike => false,
        }
    }
}
