//! Query planner
//!
//! Binds a parsed query to the one registered relation:
//!
//! 1. The FROM name must be the registered relation
//! 2. Every column reference must exist in the schema
//! 3. Every comparison must relate operands of the same kind
//!    (numeric with numeric, text with text)
//! 4. ORDER BY keys resolve to projection names first, then schema columns
//!
//! Planning is deterministic and reads no rows, so every rejection happens
//! before execution starts.

use crate::record::Value;
use crate::schema::{FieldType, Schema};

use super::ast::{
    Condition, Expr, FilterOp, Literal, Projection, Query, ScalarFunction, SelectItem,
    SortDirection,
};
use super::errors::{PlannerError, PlannerResult};
use super::like::LikePattern;

/// The relation catalog seen by the planner (read-only)
pub trait Catalog {
    /// Name the relation is registered under
    fn relation_name(&self) -> &str;
    /// Schema of the relation
    fn schema(&self) -> &Schema;
}

/// Static kind of an expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprType {
    Numeric,
    Text,
}

impl ExprType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExprType::Numeric => "numeric",
            ExprType::Text => "text",
        }
    }

    fn of_field(field_type: FieldType) -> Self {
        if field_type.is_numeric() {
            ExprType::Numeric
        } else {
            ExprType::Text
        }
    }
}

/// Expression with columns resolved to record positions
#[derive(Debug, Clone, PartialEq)]
pub enum BoundExpr {
    Column { index: usize, name: String },
    Literal(Value),
    Function { func: ScalarFunction, arg: Box<BoundExpr> },
}

/// Right-hand side of a LIKE
#[derive(Debug, Clone, PartialEq)]
pub enum PatternSource {
    /// Literal pattern compiled once at plan time
    Compiled(LikePattern),
    /// Pattern computed per row
    Dynamic(BoundExpr),
}

/// Condition with bound operands
#[derive(Debug, Clone, PartialEq)]
pub enum BoundCondition {
    Compare {
        left: BoundExpr,
        op: FilterOp,
        right: BoundExpr,
    },
    Like {
        expr: BoundExpr,
        pattern: PatternSource,
        negated: bool,
    },
    And(Box<BoundCondition>, Box<BoundCondition>),
    Or(Box<BoundCondition>, Box<BoundCondition>),
    Not(Box<BoundCondition>),
}

/// One output column of the plan
#[derive(Debug, Clone, PartialEq)]
pub struct OutputColumn {
    pub name: String,
    pub expr: BoundExpr,
    pub expr_type: ExprType,
}

/// One resolved ORDER BY key
#[derive(Debug, Clone, PartialEq)]
pub struct SortKey {
    /// Name as written in the query
    pub label: String,
    pub expr: BoundExpr,
    pub direction: SortDirection,
}

/// Immutable query plan (no runtime state)
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlan {
    /// Relation to scan
    pub relation: String,
    /// Output columns in order
    pub columns: Vec<OutputColumn>,
    /// Row filter, if any
    pub filter: Option<BoundCondition>,
    /// Sort keys, most significant first
    pub sort: Vec<SortKey>,
    /// Maximum rows returned
    pub limit: Option<u64>,
    /// Top-level AND terms of the filter as text
    pub filter_terms: Vec<String>,
}

impl QueryPlan {
    /// Output column names
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }
}

/// Query planner that produces deterministic plans
pub struct QueryPlanner<'a, C: Catalog> {
    catalog: &'a C,
}

impl<'a, C: Catalog> QueryPlanner<'a, C> {
    /// Creates a new planner
    pub fn new(catalog: &'a C) -> Self {
        Self { catalog }
    }

    /// Plans a query, returning an immutable plan or error.
    pub fn plan(&self, query: &Query) -> PlannerResult<QueryPlan> {
        let expected = self.catalog.relation_name();
        if !query.relation.eq_ignore_ascii_case(expected) {
            return Err(PlannerError::unknown_relation(&query.relation, expected));
        }

        let columns = self.bind_projection(&query.projection)?;

        let filter = query
            .filter
            .as_ref()
            .map(|c| self.bind_condition(c))
            .transpose()?;

        let sort = query
            .order_by
            .iter()
            .map(|spec| {
                let expr = self.resolve_sort_field(&spec.field, &query.projection, &columns)?;
                Ok(SortKey {
                    label: spec.field.clone(),
                    expr,
                    direction: spec.direction,
                })
            })
            .collect::<PlannerResult<Vec<_>>>()?;

        Ok(QueryPlan {
            relation: expected.to_string(),
            columns,
            filter,
            sort,
            limit: query.limit,
            filter_terms: query
                .filter
                .as_ref()
                .map(|c| c.conjuncts().iter().map(ToString::to_string).collect())
                .unwrap_or_default(),
        })
    }

    fn bind_projection(&self, projection: &Projection) -> PlannerResult<Vec<OutputColumn>> {
        match projection {
            Projection::All => Ok(self
                .catalog
                .schema()
                .fields()
                .iter()
                .enumerate()
                .map(|(index, field)| OutputColumn {
                    name: field.name.clone(),
                    expr: BoundExpr::Column {
                        index,
                        name: field.name.clone(),
                    },
                    expr_type: ExprType::of_field(field.field_type),
                })
                .collect()),
            Projection::Items(items) => items
                .iter()
                .map(|item: &SelectItem| {
                    let (expr, expr_type) = self.bind_expr(&item.expr)?;
                    Ok(OutputColumn {
                        name: item.output_name(),
                        expr,
                        expr_type,
                    })
                })
                .collect(),
        }
    }

    fn bind_expr(&self, expr: &Expr) -> PlannerResult<(BoundExpr, ExprType)> {
        match expr {
            Expr::Column(name) => {
                let schema = self.catalog.schema();
                let index = schema
                    .index_of(name)
                    .ok_or_else(|| PlannerError::unknown_column(name))?;
                let field_type = schema.fields()[index].field_type;
                Ok((
                    BoundExpr::Column {
                        index,
                        name: name.clone(),
                    },
                    ExprType::of_field(field_type),
                ))
            }
            Expr::Literal(lit) => Ok(match lit {
                Literal::Integer(i) => (BoundExpr::Literal(Value::Integer(*i)), ExprType::Numeric),
                Literal::Float(f) => (BoundExpr::Literal(Value::float(*f)), ExprType::Numeric),
                Literal::Text(s) => (BoundExpr::Literal(Value::text(s.as_str())), ExprType::Text),
            }),
            Expr::Function { func, arg } => {
                let (bound, arg_type) = self.bind_expr(arg)?;
                if arg_type != ExprType::Text {
                    return Err(PlannerError::type_mismatch(format!(
                        "{} expects a text argument, but '{}' is {}",
                        func.as_str(),
                        arg,
                        arg_type.as_str()
                    )));
                }
                Ok((
                    BoundExpr::Function {
                        func: *func,
                        arg: Box::new(bound),
                    },
                    ExprType::Text,
                ))
            }
        }
    }

    fn bind_condition(&self, condition: &Condition) -> PlannerResult<BoundCondition> {
        match condition {
            Condition::And(l, r) => Ok(BoundCondition::And(
                Box::new(self.bind_condition(l)?),
                Box::new(self.bind_condition(r)?),
            )),
            Condition::Or(l, r) => Ok(BoundCondition::Or(
                Box::new(self.bind_condition(l)?),
                Box::new(self.bind_condition(r)?),
            )),
            Condition::Not(c) => Ok(BoundCondition::Not(Box::new(self.bind_condition(c)?))),
            Condition::Compare(pred) => {
                let (left, left_type) = self.bind_expr(&pred.left)?;
                let (right, right_type) = self.bind_expr(&pred.right)?;

                if pred.op.is_pattern() {
                    if left_type != ExprType::Text || right_type != ExprType::Text {
                        return Err(PlannerError::type_mismatch(format!(
                            "{} requires text operands, but '{}' is {} and '{}' is {}",
                            pred.op.op_name(),
                            pred.left,
                            left_type.as_str(),
                            pred.right,
                            right_type.as_str()
                        )));
                    }
                    let pattern = match &right {
                        BoundExpr::Literal(Value::Text(p)) => {
                            PatternSource::Compiled(LikePattern::compile(p)?)
                        }
                        _ => PatternSource::Dynamic(right),
                    };
                    return Ok(BoundCondition::Like {
                        expr: left,
                        pattern,
                        negated: pred.op == FilterOp::NotLike,
                    });
                }

                if left_type != right_type {
                    return Err(PlannerError::type_mismatch(format!(
                        "Cannot compare '{}' ({}) with '{}' ({})",
                        pred.left,
                        left_type.as_str(),
                        pred.right,
                        right_type.as_str()
                    )));
                }

                Ok(BoundCondition::Compare {
                    left,
                    op: pred.op,
                    right,
                })
            }
        }
    }

    fn resolve_sort_field(
        &self,
        field: &str,
        projection: &Projection,
        columns: &[OutputColumn],
    ) -> PlannerResult<BoundExpr> {
        if let Projection::Items(_) = projection {
            if let Some(column) = columns.iter().find(|c| c.name == field) {
                return Ok(column.expr.clone());
            }
        }

        let index = self
            .catalog
            .schema()
            .index_of(field)
            .ok_or_else(|| PlannerError::unknown_column(field))?;
        Ok(BoundExpr::Column {
            index,
            name: field.to_string(),
        })
    }
}
