//! LIKE pattern compilation
//!
//! `%` matches any run of characters, `_` exactly one. Matching is
//! case-insensitive and anchored at both ends.

use regex::{Regex, RegexBuilder};

use super::errors::{PlannerError, PlannerResult};

/// A compiled LIKE pattern
#[derive(Debug, Clone)]
pub struct LikePattern {
    source: String,
    regex: Regex,
}

impl LikePattern {
    /// Compiles a LIKE pattern
    pub fn compile(pattern: &str) -> PlannerResult<Self> {
        let mut expr = String::with_capacity(pattern.len() + 8);
        expr.push('^');
        let mut literal = [0u8; 4];
        for c in pattern.chars() {
            match c {
                '%' => expr.push_str(".*"),
                '_' => expr.push('.'),
                c => expr.push_str(&regex::escape(c.encode_utf8(&mut literal))),
            }
        }
        expr.push('$');

        let regex = RegexBuilder::new(&expr)
            .case_insensitive(true)
            .dot_matches_new_line(true)
            .build()
            .map_err(|e| {
                PlannerError::syntax(format!("Invalid LIKE pattern '{}': {}", pattern, e))
            })?;

        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// Returns true if `text` matches the whole pattern
    pub fn matches(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Returns the pattern as written
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl PartialEq for LikePattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}
