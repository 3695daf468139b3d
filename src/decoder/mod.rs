//! Row Decoder subsystem for tabula
//!
//! Turns raw delimited text into typed records according to a declared schema.
//!
//! # Format
//!
//! - One header line, discarded (compared against the schema only to report a mismatch)
//! - One record per non-blank line, fields separated by a single comma
//! - No quoting or escaping: a comma inside a value misaligns the row
//!
//! # Leniency
//!
//! Decoding never fails. A numeric cell that does not parse becomes
//! `Value::NotANumber`; a short line yields empty text and `NotANumber`
//! for the missing trailing positions; extra trailing values are ignored.

mod decoder;

pub use decoder::{DecodeReport, RowDecoder, FIELD_SEPARATOR};
