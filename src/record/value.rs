//! Tagged cell values

use std::cmp::Ordering;
use std::fmt;

use serde::{Serialize, Serializer};

/// A single cell value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// 64-bit signed integer
    Integer(i64),
    /// 64-bit float, never NaN (see `Value::float`)
    Float(f64),
    /// UTF-8 text
    Text(String),
    /// Placeholder for a numeric cell that failed to parse
    NotANumber,
}

impl Value {
    /// Builds a float value, folding NaN into the `NotANumber` sentinel.
    pub fn float(f: f64) -> Self {
        if f.is_nan() {
            Value::NotANumber
        } else {
            Value::Float(f)
        }
    }

    /// Builds a text value
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    /// Returns true for Integer and Float cells.
    ///
    /// `NotANumber` is not numeric: it renders and sorts as a non-numeric
    /// cell even though it came from a numeric field.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Float(_))
    }

    /// Returns the numeric value as f64, if numeric
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the text content, if text
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the type name for messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::NotANumber => "nan",
        }
    }

    /// Total order used for every sort in the crate.
    ///
    /// Numbers compare numerically and come first, then `NotANumber` cells,
    /// then text compared lexicographically.
    pub fn total_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a.cmp(b),
            (a, b) if a.is_numeric() && b.is_numeric() => {
                // Both are numeric so as_f64 cannot fail
                let (x, y) = (a.as_f64().unwrap_or(0.0), b.as_f64().unwrap_or(0.0));
                x.total_cmp(&y)
            }
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Integer(_) | Value::Float(_) => 0,
            Value::NotANumber => 1,
            Value::Text(_) => 2,
        }
    }
}

impl fmt::Display for Value {
    /// Integral numbers print without a fraction, other floats with six
    /// decimal places.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(x) if x.is_infinite() => {
                if x.is_sign_positive() {
                    write!(f, "Infinity")
                } else {
                    write!(f, "-Infinity")
                }
            }
            // -0.0 compares equal to zero and prints as "0"
            Value::Float(x) if *x == 0.0 => write!(f, "0"),
            Value::Float(x) if x.fract() == 0.0 => write!(f, "{:.0}", x),
            Value::Float(x) => write!(f, "{:.6}", x),
            Value::Text(s) => write!(f, "{}", s),
            Value::NotANumber => write!(f, "NaN"),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::Float(x) if x.is_finite() => serializer.serialize_f64(*x),
            Value::Float(_) => serializer.serialize_str(&self.to_string()),
            Value::Text(s) => serializer.serialize_str(s),
            Value::NotANumber => serializer.serialize_none(),
        }
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}
