//! Positional delimited-text decoder

use crate::record::{Record, Value};
use crate::schema::{FieldType, Schema};

/// Field separator; there is no quoting support
pub const FIELD_SEPARATOR: char = ',';

/// Outcome of decoding one source, with counters for the lenient paths taken
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeReport {
    /// Decoded records in file order
    pub records: Vec<Record>,
    /// The discarded header line, if the input had any line at all
    pub header: Option<String>,
    /// Whether the header names match the schema field names, in order
    pub header_matches: bool,
    /// Data lines with fewer fields than the schema declares
    pub short_lines: usize,
    /// Data lines with more fields than the schema declares
    pub long_lines: usize,
    /// Numeric cells that fell back to the `NotANumber` sentinel
    pub nan_cells: usize,
}

/// Decodes delimited text into records
pub struct RowDecoder;

impl RowDecoder {
    /// Decodes `raw` against `schema`, returning the records only.
    pub fn decode(raw: &str, schema: &Schema) -> Vec<Record> {
        Self::decode_with_report(raw, schema).records
    }

    /// Decodes `raw` against `schema` and reports what the lenient paths did.
    ///
    /// The input is trimmed before splitting, so leading blank lines do not
    /// become the header and a trailing newline does not add a record.
    pub fn decode_with_report(raw: &str, schema: &Schema) -> DecodeReport {
        let mut lines = raw.trim().lines();

        let header = lines.next().map(|l| l.trim().to_string());
        let header_matches = header
            .as_deref()
            .map(|h| Self::header_matches(h, schema))
            .unwrap_or(false);

        let mut report = DecodeReport {
            records: Vec::new(),
            header,
            header_matches,
            short_lines: 0,
            long_lines: 0,
            nan_cells: 0,
        };

        for line in lines {
            if line.trim().is_empty() {
                continue;
            }

            let cells: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
            if cells.len() < schema.len() {
                report.short_lines += 1;
            } else if cells.len() > schema.len() {
                report.long_lines += 1;
            }

            let values: Vec<Value> = schema
                .fields()
                .iter()
                .enumerate()
                .map(|(i, field)| Self::decode_cell(cells.get(i).copied(), field.field_type))
                .collect();

            report.nan_cells += values
                .iter()
                .filter(|v| matches!(v, Value::NotANumber))
                .count();
            report.records.push(Record::new(values));
        }

        report
    }

    /// Decodes one cell. Missing numeric cells and unparseable numbers
    /// become `NotANumber`; missing text cells become empty text.
    pub fn decode_cell(cell: Option<&str>, field_type: FieldType) -> Value {
        match field_type {
            FieldType::Text => Value::Text(cell.unwrap_or("").to_string()),
            FieldType::Int => cell
                .and_then(|c| c.trim().parse::<i64>().ok())
                .map(Value::Integer)
                .unwrap_or(Value::NotANumber),
            FieldType::Float => cell
                .and_then(|c| c.trim().parse::<f64>().ok())
                .map(Value::float)
                .unwrap_or(Value::NotANumber),
        }
    }

    fn header_matches(header: &str, schema: &Schema) -> bool {
        let names: Vec<&str> = header.split(FIELD_SEPARATOR).map(str::trim).collect();
        names == schema.field_names()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldDef;

    fn uid_name_schema() -> Schema {
        Schema::new(vec![FieldDef::int("uid"), FieldDef::text("name")])
    }

    #[test]
    fn test_header_discarded() {
        let records = RowDecoder::decode("uid,name\n1,Alpha\n2,Beta\n", &uid_name_schema());
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0],
            Record::new(vec![Value::Integer(1), Value::text("Alpha")])
        );
        assert_eq!(
            records[1],
            Record::new(vec![Value::Integer(2), Value::text("Beta")])
        );
    }

    #[test]
    fn test_blank_lines_skipped() {
        let records = RowDecoder::decode("uid,name\n1,Alpha\n   \n\n2,Beta", &uid_name_schema());
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_crlf_line_endings() {
        let records = RowDecoder::decode("uid,name\r\n1,Alpha\r\n2,Beta\r\n", &uid_name_schema());
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].get(1), Some(&Value::text("Beta")));
    }

    #[test]
    fn test_bad_numeric_cell_is_sentinel() {
        let report = RowDecoder::decode_with_report("uid,name\nabc,Alpha\n", &uid_name_schema());
        assert_eq!(report.records[0].get(0), Some(&Value::NotANumber));
        // Neighbouring cells are unaffected
        assert_eq!(report.records[0].get(1), Some(&Value::text("Alpha")));
        assert_eq!(report.nan_cells, 1);
    }

    #[test]
    fn test_short_line_fills_trailing_fields() {
        let schema = Schema::new(vec![
            FieldDef::int("uid"),
            FieldDef::text("name"),
            FieldDef::float("score"),
        ]);
        let report = RowDecoder::decode_with_report("uid,name,score\n7\n", &schema);
        assert_eq!(report.short_lines, 1);
        assert_eq!(
            report.records[0],
            Record::new(vec![Value::Integer(7), Value::text(""), Value::NotANumber])
        );
    }

    #[test]
    fn test_embedded_separator_misaligns() {
        let schema = Schema::new(vec![FieldDef::text("name"), FieldDef::int("uid")]);
        let report = RowDecoder::decode_with_report("name,uid\nSmith, John,4\n", &schema);
        assert_eq!(report.long_lines, 1);
        assert_eq!(report.records[0].get(0), Some(&Value::text("Smith")));
        assert_eq!(report.records[0].get(1), Some(&Value::NotANumber));
    }

    #[test]
    fn test_text_passed_through_verbatim() {
        let records = RowDecoder::decode("uid,name\n1,  spaced  \n2,B\n", &uid_name_schema());
        assert_eq!(records[0].get(1), Some(&Value::text("  spaced  ")));
    }

    #[test]
    fn test_float_parsing() {
        assert_eq!(
            RowDecoder::decode_cell(Some("0.125"), FieldType::Float),
            Value::Float(0.125)
        );
        assert_eq!(
            RowDecoder::decode_cell(Some(" 3 "), FieldType::Float),
            Value::Float(3.0)
        );
        assert_eq!(
            RowDecoder::decode_cell(Some("NaN"), FieldType::Float),
            Value::NotANumber
        );
        assert_eq!(RowDecoder::decode_cell(None, FieldType::Int), Value::NotANumber);
    }

    #[test]
    fn test_header_mismatch_reported() {
        let report = RowDecoder::decode_with_report("id,label\n1,Alpha\n", &uid_name_schema());
        assert!(!report.header_matches);
        assert_eq!(report.records.len(), 1);

        let report = RowDecoder::decode_with_report("uid, name\n1,Alpha\n", &uid_name_schema());
        assert!(report.header_matches);
    }

    #[test]
    fn test_empty_input() {
        let report = RowDecoder::decode_with_report("", &uid_name_schema());
        assert!(report.records.is_empty());
        assert_eq!(report.header, None);
        assert!(!report.header_matches);
    }

    #[test]
    fn test_preserves_file_order_and_duplicates() {
        let records = RowDecoder::decode("uid,name\n3,C\n1,A\n3,C\n", &uid_name_schema());
        let uids: Vec<_> = records.iter().map(|r| r.get(0).cloned()).collect();
        assert_eq!(
            uids,
            vec![
                Some(Value::Integer(3)),
                Some(Value::Integer(1)),
                Some(Value::Integer(3))
            ]
        );
    }
}
