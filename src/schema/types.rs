//! Schema type definitions
//!
//! Supported types:
//! - int: 64-bit signed integer
//! - float: 64-bit floating point
//! - text: UTF-8 string, passed through verbatim

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::errors::{SchemaError, SchemaResult};

/// Supported field types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// 64-bit signed integer
    Int,
    /// 64-bit floating point
    Float,
    /// UTF-8 text
    Text,
}

impl FieldType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::Int => "int",
            FieldType::Float => "float",
            FieldType::Text => "text",
        }
    }

    /// Returns true for int and float
    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldType::Int | FieldType::Float)
    }
}

/// A named, typed field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Field name
    pub name: String,
    /// Field data type
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

impl FieldDef {
    /// Create an int field
    pub fn int(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: FieldType::Int,
        }
    }

    /// Create a float field
    pub fn float(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: FieldType::Float,
        }
    }

    /// Create a text field
    pub fn text(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: FieldType::Text,
        }
    }
}

/// Ordered field list describing every record of a relation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    fields: Vec<FieldDef>,
}

impl Schema {
    /// Create a schema from fields in declaration order
    pub fn new(fields: Vec<FieldDef>) -> Self {
        Self { fields }
    }

    /// The subnet metagraph layout the explorer ships with
    pub fn metagraph() -> Self {
        Self::new(vec![
            FieldDef::int("subnet_uid"),
            FieldDef::text("subnet_name"),
            FieldDef::int("owner_uid"),
            FieldDef::float("alpha_price_tao"),
            FieldDef::float("tao_emission_per_tempo"),
            FieldDef::float("alpha_emission_per_tempo"),
            FieldDef::float("emission_share_pct"),
            FieldDef::int("top_miner_uid"),
            FieldDef::float("top_miner_incentive"),
        ])
    }

    /// Parse a schema from its JSON form: `[{"name": "uid", "type": "int"}, ...]`
    pub fn from_json(source: &str, content: &str) -> SchemaResult<Self> {
        let schema: Schema = serde_json::from_str(content)
            .map_err(|e| SchemaError::malformed(source, format!("Invalid JSON: {}", e)))?;
        schema.validate_structure()?;
        Ok(schema)
    }

    /// Returns the fields in declaration order
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Returns the number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the schema declares no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the position of a field by exact name
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Returns a field definition by exact name
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns the field names in order
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Validates that the schema is usable: at least one field, no empty or
    /// duplicate names.
    pub fn validate_structure(&self) -> SchemaResult<()> {
        if self.fields.is_empty() {
            return Err(SchemaError::invalid("Schema must declare at least one field"));
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if field.name.trim().is_empty() {
                return Err(SchemaError::invalid("Field names must not be empty"));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::invalid(format!(
                    "Duplicate field '{}'",
                    field.name
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metagraph_schema_valid() {
        let schema = Schema::metagraph();
        assert!(schema.validate_structure().is_ok());
        assert_eq!(schema.len(), 9);
        assert_eq!(schema.index_of("alpha_price_tao"), Some(3));
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let schema = Schema::new(vec![FieldDef::int("uid"), FieldDef::text("uid")]);
        let err = schema.validate_structure().unwrap_err();
        assert!(err.message().contains("Duplicate"));
    }

    #[test]
    fn test_empty_schema_rejected() {
        assert!(Schema::new(Vec::new()).validate_structure().is_err());
    }

    #[test]
    fn test_from_json_preserves_order() {
        let schema = Schema::from_json(
            "inline",
            r#"[{"name":"uid","type":"int"},{"name":"name","type":"text"},{"name":"score","type":"float"}]"#,
        )
        .unwrap();
        assert_eq!(schema.field_names(), vec!["uid", "name", "score"]);
        assert_eq!(schema.field("score").unwrap().field_type, FieldType::Float);
    }

    #[test]
    fn test_from_json_rejects_unknown_type() {
        let err = Schema::from_json("inline", r#"[{"name":"uid","type":"bool"}]"#).unwrap_err();
        assert_eq!(err.code(), crate::schema::SchemaErrorCode::TabulaSchemaMalformed);
    }

    #[test]
    fn test_field_type_names() {
        assert_eq!(FieldType::Int.type_name(), "int");
        assert_eq!(FieldType::Float.type_name(), "float");
        assert_eq!(FieldType::Text.type_name(), "text");
        assert!(FieldType::Float.is_numeric());
        assert!(!FieldType::Text.is_numeric());
    }
}
