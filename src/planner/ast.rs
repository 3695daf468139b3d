//! Query AST structures
//!
//! The parsed, not yet bound, representation of one structured query.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::lexer::quote_identifier;

/// Literal constants appearing in query text
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Integer(i) => write!(f, "{}", i),
            Literal::Float(x) => write!(f, "{}", x),
            Literal::Text(s) => write!(f, "'{}'", s.replace('\'', "''")),
        }
    }
}

/// Scalar functions over text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarFunction {
    Lower,
    Upper,
}

impl ScalarFunction {
    /// Looks up a function by case-insensitive name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "LOWER" => Some(ScalarFunction::Lower),
            "UPPER" => Some(ScalarFunction::Upper),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScalarFunction::Lower => "LOWER",
            ScalarFunction::Upper => "UPPER",
        }
    }
}

/// Value expressions
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Column reference by name
    Column(String),
    /// Constant
    Literal(Literal),
    /// Function applied to one argument
    Function {
        func: ScalarFunction,
        arg: Box<Expr>,
    },
}

impl Expr {
    pub fn column(name: impl Into<String>) -> Self {
        Expr::Column(name.into())
    }

    pub fn integer(i: i64) -> Self {
        Expr::Literal(Literal::Integer(i))
    }

    pub fn float(f: f64) -> Self {
        Expr::Literal(Literal::Float(f))
    }

    pub fn text(s: impl Into<String>) -> Self {
        Expr::Literal(Literal::Text(s.into()))
    }

    pub fn lower(arg: Expr) -> Self {
        Expr::Function {
            func: ScalarFunction::Lower,
            arg: Box::new(arg),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Column(name) => write!(f, "{}", quote_identifier(name)),
            Expr::Literal(lit) => write!(f, "{}", lit),
            Expr::Function { func, arg } => write!(f, "{}({})", func.as_str(), arg),
        }
    }
}

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    NotEq,
    Lt,
    Lte,
    Gt,
    Gte,
    /// Case-insensitive pattern match (`%` any run, `_` one character)
    Like,
    NotLike,
}

impl FilterOp {
    /// Returns true for LIKE and NOT LIKE
    pub fn is_pattern(&self) -> bool {
        matches!(self, FilterOp::Like | FilterOp::NotLike)
    }

    /// Returns the operator as written in query text
    pub fn op_name(&self) -> &'static str {
        match self {
            FilterOp::Eq => "=",
            FilterOp::NotEq => "<>",
            FilterOp::Lt => "<",
            FilterOp::Lte => "<=",
            FilterOp::Gt => ">",
            FilterOp::Gte => ">=",
            FilterOp::Like => "LIKE",
            FilterOp::NotLike => "NOT LIKE",
        }
    }
}

/// A single comparison
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub left: Expr,
    pub op: FilterOp,
    pub right: Expr,
}

impl Predicate {
    pub fn new(left: Expr, op: FilterOp, right: Expr) -> Self {
        Self { left, op, right }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.op.op_name(), self.right)
    }
}

/// Boolean WHERE condition
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Compare(Predicate),
    And(Box<Condition>, Box<Condition>),
    Or(Box<Condition>, Box<Condition>),
    Not(Box<Condition>),
}

impl Condition {
    /// Flattens top-level ANDs into their conjuncts, in order
    pub fn conjuncts(&self) -> Vec<&Condition> {
        match self {
            Condition::And(l, r) => {
                let mut out = l.conjuncts();
                out.extend(r.conjuncts());
                out
            }
            other => vec![other],
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Compare(p) => write!(f, "{}", p),
            Condition::And(l, r) => write!(f, "{} AND {}", l, r),
            Condition::Or(l, r) => write!(f, "({} OR {})", l, r),
            Condition::Not(c) => write!(f, "NOT ({})", c),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Sort specification for one ORDER BY key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    /// Column or projection alias to sort by
    pub field: String,
    /// Sort direction
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", quote_identifier(&self.field), self.direction.as_str())
    }
}

/// One projected output column
#[derive(Debug, Clone, PartialEq)]
pub struct SelectItem {
    pub expr: Expr,
    pub alias: Option<String>,
}

impl SelectItem {
    /// Output column name: the alias, else the expression text
    pub fn output_name(&self) -> String {
        self.alias.clone().unwrap_or_else(|| self.expr.to_string())
    }
}

/// Projection list
#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    /// `*`: every schema field in declaration order
    All,
    Items(Vec<SelectItem>),
}

/// Parsed query
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub projection: Projection,
    /// Relation named in FROM
    pub relation: String,
    pub filter: Option<Condition>,
    pub order_by: Vec<SortSpec>,
    pub limit: Option<u64>,
}

impl Query {
    /// Creates `SELECT * FROM relation`
    pub fn select_all(relation: impl Into<String>) -> Self {
        Self {
            projection: Projection::All,
            relation: relation.into(),
            filter: None,
            order_by: Vec::new(),
            limit: None,
        }
    }

    /// ANDs a condition onto the filter
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.filter = Some(match self.filter.take() {
            Some(existing) => Condition::And(Box::new(existing), Box::new(condition)),
            None => condition,
        });
        self
    }

    /// Adds a sort key
    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.order_by.push(sort);
        self
    }

    /// Sets the limit
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl fmt::Display for Query {
    /// Renders canonical query text
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SELECT ")?;
        match &self.projection {
            Projection::All => write!(f, "*")?,
            Projection::Items(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item.expr)?;
                    if let Some(alias) = &item.alias {
                        write!(f, " AS {}", quote_identifier(alias))?;
                    }
                }
            }
        }
        write!(f, " FROM {}", quote_identifier(&self.relation))?;
        if let Some(filter) = &self.filter {
            write!(f, " WHERE {}", filter)?;
        }
        if !self.order_by.is_empty() {
            let keys: Vec<String> = self.order_by.iter().map(ToString::to_string).collect();
            write!(f, " ORDER BY {}", keys.join(", "))?;
        }
        if let Some(limit) = self.limit {
            write!(f, " LIMIT {}", limit)?;
        }
        Ok(())
    }
}
