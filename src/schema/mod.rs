//! Schema subsystem for tabula
//!
//! A schema is declared once, from the known structure of the source data.
//! It is never inferred from cell contents.
//!
//! # Design Principles
//!
//! - Ordered: field order is declaration order and drives positional decoding
//! - Closed: every record of a relation carries exactly these fields
//! - Three types only: int, float, text

mod errors;
mod types;

pub use errors::{SchemaError, SchemaErrorCode, SchemaResult};
pub use types::{FieldDef, FieldType, Schema};
