//! Filter slot definitions

use serde::{Deserialize, Serialize};

use crate::planner::quote_identifier;
use crate::schema::FieldType;

/// How a slot turns its raw value into a clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKind {
    /// `col = value`
    ExactMatch,
    /// `LOWER(col) LIKE '%value%'`
    Substring,
    /// `col >= value`
    Minimum,
    /// `col <= value`
    Maximum,
}

impl SlotKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotKind::ExactMatch => "exact_match",
            SlotKind::Substring => "substring",
            SlotKind::Minimum => "minimum",
            SlotKind::Maximum => "maximum",
        }
    }

    /// Returns true if the column must be numeric
    pub fn requires_numeric(&self) -> bool {
        matches!(self, SlotKind::Minimum | SlotKind::Maximum)
    }

    /// Returns true if the column must be text
    pub fn requires_text(&self) -> bool {
        matches!(self, SlotKind::Substring)
    }
}

/// One named filter input bound to a column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSlot {
    pub name: String,
    pub kind: SlotKind,
    pub column: String,
}

impl FilterSlot {
    pub fn new(name: impl Into<String>, kind: SlotKind, column: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            column: column.into(),
        }
    }

    /// Slots of the subnet metagraph explorer, in clause order
    pub fn metagraph_defaults() -> Vec<FilterSlot> {
        vec![
            FilterSlot::new("subnet", SlotKind::ExactMatch, "subnet_uid"),
            FilterSlot::new("name", SlotKind::Substring, "subnet_name"),
            FilterSlot::new("min_price", SlotKind::Minimum, "alpha_price_tao"),
            FilterSlot::new("min_incentive", SlotKind::Minimum, "top_miner_incentive"),
        ]
    }

    /// Builds this slot's clause for `raw`, or `None` when the slot is
    /// empty or its value does not parse.
    pub fn clause(&self, raw: &str, field_type: FieldType) -> Option<String> {
        let value = raw.trim();
        if value.is_empty() {
            return None;
        }

        let column = quote_identifier(&self.column);
        match self.kind {
            SlotKind::ExactMatch => {
                let literal = match field_type {
                    FieldType::Int => value.parse::<i64>().ok()?.to_string(),
                    FieldType::Float => number_literal(value)?,
                    FieldType::Text => quote(value),
                };
                Some(format!("{} = {}", column, literal))
            }
            SlotKind::Substring => Some(format!(
                "LOWER({}) LIKE {}",
                column,
                quote(&format!("%{}%", value.to_lowercase()))
            )),
            SlotKind::Minimum => Some(format!("{} >= {}", column, number_literal(value)?)),
            SlotKind::Maximum => Some(format!("{} <= {}", column, number_literal(value)?)),
        }
    }
}

/// Parses a finite decimal and prints it in a form the query grammar accepts
fn number_literal(value: &str) -> Option<String> {
    let n: f64 = value.parse().ok()?;
    if !n.is_finite() {
        return None;
    }
    Some(format!("{}", n))
}

/// Single-quotes `value`, doubling embedded quotes
fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_integer() {
        let slot = FilterSlot::new("subnet", SlotKind::ExactMatch, "subnet_uid");
        assert_eq!(
            slot.clause(" 12 ", FieldType::Int).as_deref(),
            Some("subnet_uid = 12")
        );
        assert_eq!(slot.clause("12abc", FieldType::Int), None);
        assert_eq!(slot.clause("   ", FieldType::Int), None);
    }

    #[test]
    fn test_substring_lowercases_and_escapes() {
        let slot = FilterSlot::new("name", SlotKind::Substring, "subnet_name");
        assert_eq!(
            slot.clause(" ApEx ", FieldType::Text).as_deref(),
            Some("LOWER(subnet_name) LIKE '%apex%'")
        );
        assert_eq!(
            slot.clause("o'neil", FieldType::Text).as_deref(),
            Some("LOWER(subnet_name) LIKE '%o''neil%'")
        );
    }

    #[test]
    fn test_numeric_bounds() {
        let min = FilterSlot::new("min", SlotKind::Minimum, "price");
        let max = FilterSlot::new("max", SlotKind::Maximum, "price");
        assert_eq!(min.clause("0.5", FieldType::Float).as_deref(), Some("price >= 0.5"));
        assert_eq!(max.clause("-2", FieldType::Float).as_deref(), Some("price <= -2"));
        assert_eq!(min.clause("abc", FieldType::Float), None);
        assert_eq!(min.clause("inf", FieldType::Float), None);
        assert_eq!(min.clause("NaN", FieldType::Float), None);
    }

    #[test]
    fn test_kind_serde() {
        let slot: FilterSlot =
            serde_json::from_str(r#"{"name":"max","kind":"maximum","column":"price"}"#).unwrap();
        assert_eq!(slot.kind, SlotKind::Maximum);
        assert!(slot.kind.requires_numeric());
    }
}
