//! Row Decoder Property Tests
//!
//! - N data lines yield exactly N records, header excluded
//! - A malformed numeric cell becomes NotANumber without touching the
//!   other cells of its line
//! - Records keep file order

use tabula::decoder::RowDecoder;
use tabula::record::Value;
use tabula::schema::{FieldDef, Schema};

// =============================================================================
// Helper Functions
// =============================================================================

fn schema() -> Schema {
    Schema::new(vec![
        FieldDef::int("uid"),
        FieldDef::text("name"),
        FieldDef::float("price"),
    ])
}

fn source(lines: usize) -> String {
    let mut raw = String::from("uid,name,price\n");
    for i in 0..lines {
        raw.push_str(&format!("{},subnet-{},{}.25\n", i, i, i));
    }
    raw
}

// =============================================================================
// Record Count Tests
// =============================================================================

/// Every data line becomes one record; the header never does.
#[test]
fn test_record_count_matches_data_lines() {
    for n in [0, 1, 2, 17, 128] {
        let records = RowDecoder::decode(&source(n), &schema());
        assert_eq!(records.len(), n, "{} data lines", n);
    }
}

/// Records arrive in file order.
#[test]
fn test_records_keep_file_order() {
    let records = RowDecoder::decode(&source(5), &schema());
    let uids: Vec<&Value> = records.iter().filter_map(|r| r.get(0)).collect();
    assert_eq!(
        uids,
        vec![
            &Value::Integer(0),
            &Value::Integer(1),
            &Value::Integer(2),
            &Value::Integer(3),
            &Value::Integer(4),
        ]
    );
}

// =============================================================================
// Sentinel Tests
// =============================================================================

/// A bad numeric cell is isolated to that cell.
#[test]
fn test_bad_numeric_cell_is_isolated() {
    let raw = "uid,name,price\nx1,Alpha,0.5\n2,Beta,n/a\n";
    let records = RowDecoder::decode(raw, &schema());

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].get(0), Some(&Value::NotANumber));
    assert_eq!(records[0].get(1), Some(&Value::text("Alpha")));
    assert_eq!(records[0].get(2), Some(&Value::float(0.5)));

    assert_eq!(records[1].get(0), Some(&Value::Integer(2)));
    assert_eq!(records[1].get(2), Some(&Value::NotANumber));
}

/// Missing trailing cells still produce full-width records.
#[test]
fn test_short_line_is_padded() {
    let raw = "uid,name,price\n7\n";
    let records = RowDecoder::decode(raw, &schema());
    assert_eq!(records[0].len(), 3);
    assert_eq!(records[0].get(1), Some(&Value::text("")));
    assert_eq!(records[0].get(2), Some(&Value::NotANumber));
}

/// A mismatched header is discarded, not validated.
#[test]
fn test_mismatched_header_is_reported_not_rejected() {
    let raw = "a,b\n1,Alpha,2.0\n";
    let report = RowDecoder::decode_with_report(raw, &schema());
    assert!(!report.header_matches);
    assert_eq!(report.records.len(), 1);
}
