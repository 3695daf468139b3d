//! Recursive-descent parser for the structured query subset
//!
//! ```text
//! query      := SELECT projection FROM ident [WHERE condition]
//!               [ORDER BY order_item {, order_item}] [LIMIT integer] [;]
//! projection := '*' | item {, item}
//! item       := expr [AS ident]
//! condition  := conjunct {OR conjunct}
//! conjunct   := factor {AND factor}
//! factor     := NOT factor | '(' condition ')' | comparison
//! comparison := expr op expr | expr [NOT] LIKE expr
//! expr       := ident | func '(' expr ')' | number | '-' number | string
//! order_item := ident [ASC | DESC]
//! ```

use super::ast::{
    Condition, Expr, FilterOp, Literal, Predicate, Projection, Query, ScalarFunction, SelectItem,
    SortDirection, SortSpec,
};
use super::errors::{PlannerError, PlannerResult};
use super::lexer::{tokenize, Token};

/// Parses query text into a `Query`
pub fn parse(text: &str) -> PlannerResult<Query> {
    let tokens = tokenize(text)?;
    Parser::new(tokens).parse_query()
}

/// Token-stream parser
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    /// Creates a parser over tokens ending in `Token::Eof`
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Parses one complete query
    pub fn parse_query(&mut self) -> PlannerResult<Query> {
        self.expect(Token::Select)?;
        let projection = self.parse_projection()?;

        self.expect(Token::From)?;
        let relation = self.next_ident()?;

        let filter = if self.next_is(&Token::Where) {
            Some(self.parse_condition()?)
        } else {
            None
        };

        let mut order_by = Vec::new();
        if self.next_is(&Token::Order) {
            self.expect(Token::By)?;
            loop {
                order_by.push(self.parse_order_item()?);
                if !self.next_is(&Token::Comma) {
                    break;
                }
            }
        }

        let limit = if self.next_is(&Token::Limit) {
            match self.next() {
                Token::IntegerLiteral(n) if n >= 0 => Some(n as u64),
                other => {
                    return Err(PlannerError::syntax(format!(
                        "Expected a non-negative integer after LIMIT, found {}",
                        other.describe()
                    )))
                }
            }
        } else {
            None
        };

        self.next_is(&Token::Semicolon);
        match self.peek() {
            Token::Eof => Ok(Query {
                projection,
                relation,
                filter,
                order_by,
                limit,
            }),
            other => Err(PlannerError::syntax(format!(
                "Unexpected {} after end of query",
                other.describe()
            ))),
        }
    }

    fn parse_projection(&mut self) -> PlannerResult<Projection> {
        if self.next_is(&Token::Asterisk) {
            return Ok(Projection::All);
        }

        let mut items = Vec::new();
        loop {
            let expr = self.parse_expr()?;
            let alias = if self.next_is(&Token::As) {
                Some(self.next_ident()?)
            } else {
                None
            };
            items.push(SelectItem { expr, alias });

            if !self.next_is(&Token::Comma) {
                return Ok(Projection::Items(items));
            }
        }
    }

    fn parse_condition(&mut self) -> PlannerResult<Condition> {
        let mut left = self.parse_conjunct()?;
        while self.next_is(&Token::Or) {
            let right = self.parse_conjunct()?;
            left = Condition::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_conjunct(&mut self) -> PlannerResult<Condition> {
        let mut left = self.parse_factor()?;
        while self.next_is(&Token::And) {
            let right = self.parse_factor()?;
            left = Condition::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_factor(&mut self) -> PlannerResult<Condition> {
        if self.next_is(&Token::Not) {
            return Ok(Condition::Not(Box::new(self.parse_factor()?)));
        }

        if self.next_is(&Token::LeftParen) {
            let inner = self.parse_condition()?;
            self.expect(Token::RightParen)?;
            return Ok(inner);
        }

        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> PlannerResult<Condition> {
        let left = self.parse_expr()?;

        let op = match self.next() {
            Token::Equal => FilterOp::Eq,
            Token::NotEqual => FilterOp::NotEq,
            Token::LessThan => FilterOp::Lt,
            Token::LessThanEq => FilterOp::Lte,
            Token::GreaterThan => FilterOp::Gt,
            Token::GreaterThanEq => FilterOp::Gte,
            Token::Like => FilterOp::Like,
            Token::Not => {
                self.expect(Token::Like)?;
                FilterOp::NotLike
            }
            other => {
                return Err(PlannerError::syntax(format!(
                    "Expected a comparison operator after '{}', found {}",
                    left,
                    other.describe()
                )))
            }
        };

        let right = self.parse_expr()?;
        Ok(Condition::Compare(Predicate::new(left, op, right)))
    }

    fn parse_expr(&mut self) -> PlannerResult<Expr> {
        match self.next() {
            Token::Identifier(name) => {
                if !self.next_is(&Token::LeftParen) {
                    return Ok(Expr::Column(name));
                }
                let func = ScalarFunction::from_name(&name).ok_or_else(|| {
                    PlannerError::syntax(format!("Unknown function '{}'", name))
                })?;
                let arg = self.parse_expr()?;
                self.expect(Token::RightParen)?;
                Ok(Expr::Function {
                    func,
                    arg: Box::new(arg),
                })
            }
            Token::IntegerLiteral(i) => Ok(Expr::Literal(Literal::Integer(i))),
            Token::FloatLiteral(f) => Ok(Expr::Literal(Literal::Float(f))),
            Token::StringLiteral(s) => Ok(Expr::Literal(Literal::Text(s))),
            Token::Minus => match self.next() {
                Token::IntegerLiteral(i) => Ok(Expr::Literal(Literal::Integer(-i))),
                Token::FloatLiteral(f) => Ok(Expr::Literal(Literal::Float(-f))),
                other => Err(PlannerError::syntax(format!(
                    "Expected a number after '-', found {}",
                    other.describe()
                ))),
            },
            other => Err(PlannerError::syntax(format!(
                "Expected a column, function or literal, found {}",
                other.describe()
            ))),
        }
    }

    fn parse_order_item(&mut self) -> PlannerResult<SortSpec> {
        let field = self.next_ident()?;
        let direction = if self.next_is(&Token::Desc) {
            SortDirection::Desc
        } else {
            self.next_is(&Token::Asc);
            SortDirection::Asc
        };
        Ok(SortSpec { field, direction })
    }

    fn peek(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&Token::Eof)
    }

    /// Consumes and returns the next token; `Eof` repeats forever
    fn next(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// Consumes the next token if it equals `token`
    fn next_is(&mut self, token: &Token) -> bool {
        if self.peek() == token {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn next_ident(&mut self) -> PlannerResult<String> {
        match self.next() {
            Token::Identifier(name) => Ok(name),
            other => Err(PlannerError::syntax(format!(
                "Expected an identifier, found {}",
                other.describe()
            ))),
        }
    }

    fn expect(&mut self, expected: Token) -> PlannerResult<()> {
        let found = self.next();
        if found == expected {
            Ok(())
        } else {
            Err(PlannerError::syntax(format!(
                "Expected {}, found {}",
                expected.describe(),
                found.describe()
            )))
        }
    }
}
