//! Explorer End-to-End Scenarios
//!
//! 1. Default query on a two-row source returns both rows, uid descending
//! 2. A minimum filter returns exactly the rows at or above it
//! 3. An unknown column sets the error line and keeps the previous status
//! 4. Reset restores the default query and reproduces scenario 1
//!
//! Plus the header sort toggle and type-aware ordering.

use tabula::config::ExplorerConfig;
use tabula::explorer::Explorer;
use tabula::filter::{FilterSlot, SlotKind};
use tabula::planner::SortSpec;
use tabula::record::{Record, Value};
use tabula::schema::{FieldDef, Schema};

// =============================================================================
// Helper Functions
// =============================================================================

fn uid_name_config() -> ExplorerConfig {
    ExplorerConfig {
        schema: Schema::new(vec![FieldDef::int("uid"), FieldDef::text("name")]),
        default_order: SortSpec::desc("uid"),
        filters: vec![
            FilterSlot::new("uid", SlotKind::ExactMatch, "uid"),
            FilterSlot::new("name", SlotKind::Substring, "name"),
            FilterSlot::new("min", SlotKind::Minimum, "uid"),
        ],
        ..ExplorerConfig::default()
    }
}

fn scenario_one() -> Explorer {
    let mut explorer = Explorer::new(&uid_name_config()).unwrap();
    explorer.load("uid,name\n1,Alpha\n2,Beta\n").unwrap();
    explorer
}

fn rows(explorer: &Explorer) -> Vec<Record> {
    explorer.current_result_set().unwrap().rows.clone()
}

fn expected_scenario_one() -> Vec<Record> {
    vec![
        Record::new(vec![Value::Integer(2), Value::text("Beta")]),
        Record::new(vec![Value::Integer(1), Value::text("Alpha")]),
    ]
}

// =============================================================================
// Scenarios
// =============================================================================

/// Scenario 1: default query after load.
#[test]
fn test_scenario_default_query() {
    let explorer = scenario_one();
    assert_eq!(explorer.query_text(), "SELECT * FROM data ORDER BY uid DESC");
    assert_eq!(rows(&explorer), expected_scenario_one());
    assert!(explorer.error_line().is_none());
}

/// Scenario 2: minimum filter on [3, 5, 7] keeps 5 and 7.
#[test]
fn test_scenario_minimum_filter() {
    let config = ExplorerConfig {
        schema: Schema::new(vec![FieldDef::int("v")]),
        default_order: SortSpec::desc("v"),
        filters: vec![FilterSlot::new("min", SlotKind::Minimum, "v")],
        ..ExplorerConfig::default()
    };
    let mut explorer = Explorer::new(&config).unwrap();
    explorer.load("v\n3\n5\n7\n").unwrap();

    explorer.set_filter("min", "5").unwrap();
    assert_eq!(
        explorer.query_text(),
        "SELECT * FROM data WHERE v >= 5 ORDER BY v DESC"
    );
    assert_eq!(
        rows(&explorer),
        vec![
            Record::new(vec![Value::Integer(7)]),
            Record::new(vec![Value::Integer(5)]),
        ]
    );
}

/// Scenario 3: unknown column keeps the previous result and status.
#[test]
fn test_scenario_unknown_column() {
    let mut explorer = scenario_one();
    let status_before = explorer.status_line().unwrap().rows;

    let err = explorer
        .run_query("SELECT * FROM data WHERE nonexistent = 1")
        .unwrap_err();
    assert!(err.is_query_error());
    assert!(!explorer.error_line().unwrap().is_empty());
    assert_eq!(explorer.status_line().unwrap().rows, status_before);
    assert_eq!(rows(&explorer), expected_scenario_one());

    explorer.run_query("SELECT * FROM data WHERE uid = 1").unwrap();
    assert!(explorer.error_line().is_none());
    assert_eq!(explorer.status_line().unwrap().rows, 1);
}

/// Reset after filters, sorts and queries reproduces scenario 1.
#[test]
fn test_scenario_reset() {
    let mut explorer = scenario_one();
    explorer.set_filter("name", "alp").unwrap();
    explorer.set_filter("min", "0").unwrap();
    explorer.apply_sort("name").unwrap();
    explorer.run_query("SELECT name FROM data").unwrap();

    explorer.reset().unwrap();
    assert_eq!(explorer.query_text(), "SELECT * FROM data ORDER BY uid DESC");
    assert!(explorer.filters().is_empty());
    assert_eq!(rows(&explorer), expected_scenario_one());
}

/// Clicking one header twice sorts ascending then descending.
#[test]
fn test_sort_toggle() {
    let mut explorer = scenario_one();
    explorer.apply_sort("uid").unwrap();
    assert!(explorer.view().sort_directive().ascending);
    assert_eq!(rows(&explorer)[0].get(0), Some(&Value::Integer(1)));

    explorer.apply_sort("uid").unwrap();
    assert!(!explorer.view().sort_directive().ascending);
    assert_eq!(rows(&explorer)[0].get(0), Some(&Value::Integer(2)));
    assert_eq!(explorer.metrics().sorts_applied, 2);
}

/// Numeric columns sort numerically: 2 before 10.
#[test]
fn test_sort_is_type_aware() {
    let mut explorer = Explorer::new(&uid_name_config()).unwrap();
    explorer.load("uid,name\n10,x\n2,y\n33,z\n").unwrap();
    explorer.apply_sort("uid").unwrap();

    let uids: Vec<Value> = rows(&explorer)
        .iter()
        .map(|r| r.get(0).cloned().unwrap())
        .collect();
    assert_eq!(
        uids,
        vec![Value::Integer(2), Value::Integer(10), Value::Integer(33)]
    );
}

/// A failed load is reported as a load failure, and queries report not ready.
#[test]
fn test_load_failure_is_distinct() {
    let mut explorer = Explorer::new(&uid_name_config()).unwrap();
    assert!(!explorer.load("\n\n").unwrap_err().is_query_error());

    let err = explorer.run_current().unwrap_err();
    assert!(err.is_query_error());
    assert_eq!(err.code(), "TABULA_NOT_READY");
    assert!(explorer.load_failure().is_some());
}

/// The rendered table marks the sorted column and right-aligns numbers.
#[test]
fn test_render_after_sort() {
    let mut explorer = scenario_one();
    explorer.apply_sort("name").unwrap();
    let table = explorer.render();
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines[0], "uid | name ↑");
    assert_eq!(lines[2], "  1 | Alpha");
    assert_eq!(lines[3], "  2 | Beta");
}

/// A keyword relation name and keyword columns still drive the default query.
#[test]
fn test_keyword_names_load_and_filter() {
    let config = ExplorerConfig {
        relation: "order".to_string(),
        schema: Schema::new(vec![FieldDef::int("limit"), FieldDef::text("desc")]),
        default_order: SortSpec::desc("limit"),
        filters: vec![FilterSlot::new("about", SlotKind::Substring, "desc")],
        ..ExplorerConfig::default()
    };
    config.validate().unwrap();

    let mut explorer = Explorer::new(&config).unwrap();
    explorer.load("limit,desc\n1,Alpha\n2,Beta\n").unwrap();
    assert_eq!(
        explorer.query_text(),
        "SELECT * FROM \"order\" ORDER BY \"limit\" DESC"
    );
    assert_eq!(rows(&explorer).len(), 2);
    assert!(explorer.error_line().is_none());

    explorer.set_filter("about", "alp").unwrap();
    assert_eq!(
        rows(&explorer),
        vec![Record::new(vec![Value::Integer(1), Value::text("Alpha")])]
    );
}
