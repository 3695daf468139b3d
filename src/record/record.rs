//! Decoded rows

use serde::Serialize;

use super::value::Value;

/// One row of values, positionally aligned with a schema or result columns
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record {
    values: Vec<Value>,
}

impl Record {
    /// Creates a record from its values
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// Returns the value at a column position
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Returns all values in column order
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Returns the number of values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the record has no values
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<Vec<Value>> for Record {
    fn from(values: Vec<Value>) -> Self {
        Self::new(values)
    }
}
