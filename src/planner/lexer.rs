//! Lexer for the structured query subset
//!
//! Recognizes:
//! - Keywords (case-insensitive): `SELECT`, `FROM`, `WHERE`, `AND`, `OR`,
//!   `NOT`, `LIKE`, `ORDER`, `BY`, `ASC`, `DESC`, `LIMIT`, `AS`
//! - Identifiers, bare or double-quoted
//! - Single-quoted strings, with `''` standing for one quote
//! - Integer and float literals
//! - Comparison operators and punctuation

use std::str::CharIndices;

use super::errors::{PlannerError, PlannerResult};

/// Token types
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Keywords
    Select,
    From,
    Where,
    And,
    Or,
    Not,
    Like,
    Order,
    By,
    Asc,
    Desc,
    Limit,
    As,

    // Identifiers and literals
    Identifier(String),
    StringLiteral(String),
    IntegerLiteral(i64),
    FloatLiteral(f64),

    // Operators
    Asterisk,      // *
    Minus,         // -
    Equal,         // =
    NotEqual,      // <> or !=
    LessThan,      // <
    LessThanEq,    // <=
    GreaterThan,   // >
    GreaterThanEq, // >=

    // Punctuation
    LeftParen,  // (
    RightParen, // )
    Comma,      // ,
    Semicolon,  // ;

    Eof,
}

impl Token {
    fn keyword(word: &str) -> Option<Token> {
        let token = match word.to_ascii_uppercase().as_str() {
            "SELECT" => Token::Select,
            "FROM" => Token::From,
            "WHERE" => Token::Where,
            "AND" => Token::And,
            "OR" => Token::Or,
            "NOT" => Token::Not,
            "LIKE" => Token::Like,
            "ORDER" => Token::Order,
            "BY" => Token::By,
            "ASC" => Token::Asc,
            "DESC" => Token::Desc,
            "LIMIT" => Token::Limit,
            "AS" => Token::As,
            _ => return None,
        };
        Some(token)
    }

    /// Text used in "expected X, found Y" messages
    pub fn describe(&self) -> String {
        match self {
            Token::Identifier(s) => format!("identifier '{}'", s),
            Token::StringLiteral(s) => format!("string '{}'", s),
            Token::IntegerLiteral(i) => format!("number {}", i),
            Token::FloatLiteral(f) => format!("number {}", f),
            Token::Eof => "end of query".to_string(),
            other => format!("'{}'", other.symbol()),
        }
    }

    fn symbol(&self) -> &'static str {
        match self {
            Token::Select => "SELECT",
            Token::From => "FROM",
            Token::Where => "WHERE",
            Token::And => "AND",
            Token::Or => "OR",
            Token::Not => "NOT",
            Token::Like => "LIKE",
            Token::Order => "ORDER",
            Token::By => "BY",
            Token::Asc => "ASC",
            Token::Desc => "DESC",
            Token::Limit => "LIMIT",
            Token::As => "AS",
            Token::Asterisk => "*",
            Token::Minus => "-",
            Token::Equal => "=",
            Token::NotEqual => "<>",
            Token::LessThan => "<",
            Token::LessThanEq => "<=",
            Token::GreaterThan => ">",
            Token::GreaterThanEq => ">=",
            Token::LeftParen => "(",
            Token::RightParen => ")",
            Token::Comma => ",",
            Token::Semicolon => ";",
            Token::Identifier(_)
            | Token::StringLiteral(_)
            | Token::IntegerLiteral(_)
            | Token::FloatLiteral(_)
            | Token::Eof => "",
        }
    }
}

/// Renders `name` so the lexer reads it back as one identifier.
///
/// Plain names stay bare. Keywords and names with other characters are
/// double-quoted, with embedded `"` doubled.
pub fn quote_identifier(name: &str) -> String {
    let plain = name
        .chars()
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && name.chars().all(|c| c.is_alphanumeric() || c == '_')
        && Token::keyword(name).is_none();
    if plain {
        name.to_string()
    } else {
        format!("\"{}\"", name.replace('"', "\"\""))
    }
}

/// Lexer over one query string
pub struct Lexer<'a> {
    input: &'a str,
    chars: CharIndices<'a>,
    current: Option<(usize, char)>,
    peeked: Option<(usize, char)>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input
    pub fn new(input: &'a str) -> Self {
        let mut chars = input.char_indices();
        let current = chars.next();
        let peeked = chars.next();
        Self {
            input,
            chars,
            current,
            peeked,
        }
    }

    /// Tokenize the entire input; the last token is always `Eof`
    pub fn tokenize(&mut self) -> PlannerResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token == Token::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    /// Get the next token
    pub fn next_token(&mut self) -> PlannerResult<Token> {
        self.skip_whitespace();

        let c = match self.current {
            None => return Ok(Token::Eof),
            Some((_, c)) => c,
        };

        match c {
            '(' => self.single_char_token(Token::LeftParen),
            ')' => self.single_char_token(Token::RightParen),
            ',' => self.single_char_token(Token::Comma),
            ';' => self.single_char_token(Token::Semicolon),
            '*' => self.single_char_token(Token::Asterisk),
            '-' => self.single_char_token(Token::Minus),
            '=' => self.single_char_token(Token::Equal),
            '<' => self.less_than_operator(),
            '>' => self.greater_than_operator(),
            '!' => self.not_equal_operator(),
            '\'' => self.string_literal(),
            '"' => self.quoted_identifier(),
            c if c.is_ascii_digit() => self.number_literal(),
            '.' if self.peek_char().is_some_and(|p| p.is_ascii_digit()) => self.number_literal(),
            c if c.is_alphabetic() || c == '_' => Ok(self.identifier_or_keyword()),
            _ => Err(PlannerError::syntax(format!("Unexpected character: '{}'", c))),
        }
    }

    fn advance(&mut self) {
        self.current = self.peeked.take();
        self.peeked = self.chars.next();
    }

    fn current_char(&self) -> Option<char> {
        self.current.map(|(_, c)| c)
    }

    fn peek_char(&self) -> Option<char> {
        self.peeked.map(|(_, c)| c)
    }

    fn position(&self) -> usize {
        self.current.map(|(i, _)| i).unwrap_or(self.input.len())
    }

    fn skip_whitespace(&mut self) {
        while self.current_char().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    fn single_char_token(&mut self, token: Token) -> PlannerResult<Token> {
        self.advance();
        Ok(token)
    }

    fn less_than_operator(&mut self) -> PlannerResult<Token> {
        self.advance();
        match self.current_char() {
            Some('=') => self.single_char_token(Token::LessThanEq),
            Some('>') => self.single_char_token(Token::NotEqual),
            _ => Ok(Token::LessThan),
        }
    }

    fn greater_than_operator(&mut self) -> PlannerResult<Token> {
        self.advance();
        if self.current_char() == Some('=') {
            self.single_char_token(Token::GreaterThanEq)
        } else {
            Ok(Token::GreaterThan)
        }
    }

    fn not_equal_operator(&mut self) -> PlannerResult<Token> {
        self.advance();
        if self.current_char() == Some('=') {
            self.single_char_token(Token::NotEqual)
        } else {
            Err(PlannerError::syntax("Expected '=' after '!'"))
        }
    }

    fn string_literal(&mut self) -> PlannerResult<Token> {
        let start = self.position();
        self.advance(); // opening quote
        let mut value = String::new();

        while let Some(c) = self.current_char() {
            if c == '\'' {
                if self.peek_char() == Some('\'') {
                    value.push('\'');
                    self.advance();
                    self.advance();
                } else {
                    self.advance(); // closing quote
                    return Ok(Token::StringLiteral(value));
                }
            } else {
                value.push(c);
                self.advance();
            }
        }

        Err(PlannerError::syntax(format!(
            "Unterminated string literal starting at position {}",
            start
        )))
    }

    fn quoted_identifier(&mut self) -> PlannerResult<Token> {
        let start = self.position();
        self.advance(); // opening quote
        let mut value = String::new();

        while let Some(c) = self.current_char() {
            if c == '"' {
                if self.peek_char() == Some('"') {
                    value.push('"');
                    self.advance();
                    self.advance();
                } else {
                    self.advance(); // closing quote
                    return Ok(Token::Identifier(value));
                }
            } else {
                value.push(c);
                self.advance();
            }
        }

        Err(PlannerError::syntax(format!(
            "Unterminated quoted identifier starting at position {}",
            start
        )))
    }

    fn number_literal(&mut self) -> PlannerResult<Token> {
        let start = self.position();
        let mut is_float = false;
        let mut seen_exponent = false;

        while let Some(c) = self.current_char() {
            if c.is_ascii_digit() {
                self.advance();
            } else if c == '.' && !is_float {
                is_float = true;
                self.advance();
            } else if (c == 'e' || c == 'E') && !seen_exponent {
                is_float = true;
                seen_exponent = true;
                self.advance();
                if matches!(self.current_char(), Some('+') | Some('-')) {
                    self.advance();
                }
            } else {
                break;
            }
        }

        let text = &self.input[start..self.position()];
        if is_float {
            text.parse::<f64>()
                .map(Token::FloatLiteral)
                .map_err(|e| PlannerError::syntax(format!("Invalid number '{}': {}", text, e)))
        } else if let Ok(i) = text.parse::<i64>() {
            Ok(Token::IntegerLiteral(i))
        } else {
            // Digits past the i64 range read as a float
            text.parse::<f64>()
                .map(Token::FloatLiteral)
                .map_err(|e| PlannerError::syntax(format!("Invalid number '{}': {}", text, e)))
        }
    }

    fn identifier_or_keyword(&mut self) -> Token {
        let start = self.position();
        while self
            .current_char()
            .is_some_and(|c| c.is_alphanumeric() || c == '_')
        {
            self.advance();
        }

        let word = &self.input[start..self.position()];
        Token::keyword(word).unwrap_or_else(|| Token::Identifier(word.to_string()))
    }
}

/// Tokenize a query string
pub fn tokenize(input: &str) -> PlannerResult<Vec<Token>> {
    Lexer::new(input).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_query_tokens() {
        let tokens = tokenize("SELECT * FROM data ORDER BY alpha_price_tao DESC").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Select,
                Token::Asterisk,
                Token::From,
                Token::Identifier("data".into()),
                Token::Order,
                Token::By,
                Token::Identifier("alpha_price_tao".into()),
                Token::Desc,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_keywords_case_insensitive() {
        let tokens = tokenize("select * from data where uid >= 5").unwrap();
        assert_eq!(tokens[0], Token::Select);
        assert_eq!(tokens[2], Token::From);
        assert_eq!(tokens[4], Token::Where);
        assert_eq!(tokens[6], Token::GreaterThanEq);
        assert_eq!(tokens[7], Token::IntegerLiteral(5));
    }

    #[test]
    fn test_operators() {
        let tokens = tokenize("= != <> < <= > >=").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Equal,
                Token::NotEqual,
                Token::NotEqual,
                Token::LessThan,
                Token::LessThanEq,
                Token::GreaterThan,
                Token::GreaterThanEq,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_string_literal_with_escaped_quote() {
        let tokens = tokenize("'%o''brien%'").unwrap();
        assert_eq!(tokens[0], Token::StringLiteral("%o'brien%".into()));
    }

    #[test]
    fn test_numbers() {
        let tokens = tokenize("42 0.001 .5 1e3").unwrap();
        assert_eq!(tokens[0], Token::IntegerLiteral(42));
        assert_eq!(tokens[1], Token::FloatLiteral(0.001));
        assert_eq!(tokens[2], Token::FloatLiteral(0.5));
        assert_eq!(tokens[3], Token::FloatLiteral(1000.0));
    }

    #[test]
    fn test_quoted_identifier() {
        let tokens = tokenize("\"order\"").unwrap();
        assert_eq!(tokens[0], Token::Identifier("order".into()));
    }

    #[test]
    fn test_quote_identifier() {
        assert_eq!(quote_identifier("subnet_uid"), "subnet_uid");
        assert_eq!(quote_identifier("desc"), "\"desc\"");
        assert_eq!(quote_identifier("Order"), "\"Order\"");
        assert_eq!(quote_identifier("net price"), "\"net price\"");
        assert_eq!(quote_identifier("9lives"), "\"9lives\"");
        assert_eq!(quote_identifier("a\"b"), "\"a\"\"b\"");
        assert_eq!(quote_identifier(""), "\"\"");

        for name in ["desc", "net price", "a\"b", "limit"] {
            let tokens = tokenize(&quote_identifier(name)).unwrap();
            assert_eq!(tokens, vec![Token::Identifier(name.into()), Token::Eof]);
        }
    }

    #[test]
    fn test_unterminated_string() {
        let err = tokenize("SELECT * FROM data WHERE name LIKE '%abc").unwrap_err();
        assert!(err.message().contains("Unterminated string"));
    }

    #[test]
    fn test_unexpected_character() {
        let err = tokenize("SELECT # FROM data").unwrap_err();
        assert!(err.message().contains("'#'"));
    }

    #[test]
    fn test_integer_overflow_reads_as_float() {
        let tokens = tokenize("99999999999999999999 100000000000000000000").unwrap();
        assert_eq!(tokens[0], Token::FloatLiteral(1e20));
        assert_eq!(tokens[1], Token::FloatLiteral(1e20));
        assert_eq!(
            tokenize("9223372036854775807").unwrap()[0],
            Token::IntegerLiteral(i64::MAX)
        );
    }
}
