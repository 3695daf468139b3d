//! Query planning
//!
//! Turns query text into a bound, type-checked plan:
//!
//! - `lexer` splits text into tokens
//! - `parser` builds the query AST
//! - `planner` resolves names against the relation catalog and checks types
//! - `explain` renders a plan (or its rejection) for humans
//!
//! Planning reads no rows. The same text against the same schema always
//! yields the same plan.

mod ast;
mod errors;
mod explain;
mod lexer;
mod like;
mod parser;
mod planner;

pub use ast::{
    Condition, Expr, FilterOp, Literal, Predicate, Projection, Query, ScalarFunction, SelectItem,
    SortDirection, SortSpec,
};
pub use errors::{PlannerError, PlannerErrorCode, PlannerResult, Severity};
pub use explain::ExplainPlan;
pub use lexer::{quote_identifier, tokenize, Lexer, Token};
pub use like::LikePattern;
pub use parser::{parse, Parser};
pub use planner::{
    BoundCondition, BoundExpr, Catalog, ExprType, OutputColumn, PatternSource, QueryPlan,
    QueryPlanner, SortKey,
};
