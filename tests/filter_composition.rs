//! Filter Composition Tests
//!
//! - Every combination of present and absent slots composes valid text
//! - Clause order is fixed by slot order
//! - The all-empty case is the default query

use tabula::executor::QueryExecutor;
use tabula::filter::{FilterCompiler, FilterSlot, FilterState, SlotKind};
use tabula::planner::{parse, SortSpec};
use tabula::record::Value;
use tabula::relation::Relation;
use tabula::schema::{FieldDef, Schema};

const VALUES: [(&str, &[&str]); 4] = [
    ("subnet", &["", "3", " 12 ", "abc", "-1"]),
    ("name", &["", "apex", "O'Neil", "50%_off", "  "]),
    ("min_price", &["", "0.01", "1e-3", "1e20", "99999999999999999999", "cheap", "inf"]),
    ("min_incentive", &["", "0", "-0.5", "NaN"]),
];

/// Composed text parses and runs for every slot combination.
#[test]
fn test_every_combination_is_valid() {
    let schema = Schema::metagraph();
    let compiler = FilterCompiler::metagraph("data", &schema).unwrap();
    let relation = Relation::decode(
        "data",
        schema,
        "h\n1,apex,4,0.02,0.2,1.5,3.1,7,0.41\n3,o'neil,2,0.5,0.1,1.0,2.0,1,0.2\n",
    );
    let executor = QueryExecutor::new(&relation);

    let mut combinations = 0;
    for subnet in VALUES[0].1 {
        for name in VALUES[1].1 {
            for min_price in VALUES[2].1 {
                for min_incentive in VALUES[3].1 {
                    let mut state = FilterState::new();
                    compiler.set(&mut state, "subnet", subnet).unwrap();
                    compiler.set(&mut state, "name", name).unwrap();
                    compiler.set(&mut state, "min_price", min_price).unwrap();
                    compiler.set(&mut state, "min_incentive", min_incentive).unwrap();

                    let text = compiler.compose(&state);
                    assert!(parse(&text).is_ok(), "does not parse: {}", text);
                    assert!(executor.execute(&text).is_ok(), "does not run: {}", text);
                    assert!(text.ends_with(" ORDER BY alpha_price_tao DESC"));
                    combinations += 1;
                }
            }
        }
    }
    assert_eq!(combinations, 5 * 5 * 7 * 4);
}

/// Large numeric bounds compose to literals the executor accepts.
#[test]
fn test_large_numeric_bound_runs() {
    let schema = Schema::metagraph();
    let compiler = FilterCompiler::metagraph("data", &schema).unwrap();
    let relation = Relation::decode("data", schema, "h\n1,apex,4,0.02,0.2,1.5,3.1,7,0.41\n");
    let executor = QueryExecutor::new(&relation);

    for bound in ["1e20", "99999999999999999999", "-1e20"] {
        let mut state = FilterState::new();
        compiler.set(&mut state, "min_price", bound).unwrap();
        let text = compiler.compose(&state);
        let rs = executor.execute(&text).unwrap();
        assert_eq!(rs.len(), usize::from(bound.starts_with('-')), "{}", text);
    }
}

/// Keyword and spaced names compose to text that parses and runs.
#[test]
fn test_keyword_column_names_run() {
    let schema = Schema::new(vec![
        FieldDef::int("uid"),
        FieldDef::text("desc"),
        FieldDef::float("net price"),
    ]);
    let compiler = FilterCompiler::new(
        "limit",
        &schema,
        vec![
            FilterSlot::new("about", SlotKind::Substring, "desc"),
            FilterSlot::new("floor", SlotKind::Minimum, "net price"),
        ],
        SortSpec::asc("desc"),
    )
    .unwrap();
    let relation = Relation::decode(
        "limit",
        schema,
        "uid,desc,net price\n1,beta,3\n2,alpha,5\n3,gamma,1\n",
    );
    let executor = QueryExecutor::new(&relation);

    let mut state = FilterState::new();
    compiler.set(&mut state, "about", "A").unwrap();
    compiler.set(&mut state, "floor", "2").unwrap();
    let rs = executor.execute(&compiler.compose(&state)).unwrap();
    assert_eq!(
        rs.column_values(0),
        vec![&Value::Integer(2), &Value::Integer(1)]
    );

    let rs = executor.execute(&compiler.default_query()).unwrap();
    assert_eq!(rs.len(), 3);
}

/// All-empty input is the default query, with no WHERE clause.
#[test]
fn test_all_empty_is_default() {
    let compiler = FilterCompiler::metagraph("data", &Schema::metagraph()).unwrap();
    let mut state = FilterState::new();
    for (slot, _) in VALUES {
        compiler.set(&mut state, slot, "").unwrap();
    }
    assert_eq!(
        compiler.compose(&state),
        "SELECT * FROM data ORDER BY alpha_price_tao DESC"
    );
}

/// Quotes in the name input are escaped, so the filter still matches.
#[test]
fn test_quote_in_name_matches() {
    let schema = Schema::metagraph();
    let compiler = FilterCompiler::metagraph("data", &schema).unwrap();
    let relation = Relation::decode(
        "data",
        schema,
        "h\n3,O'Neil,2,0.5,0.1,1.0,2.0,1,0.2\n4,Other,2,0.5,0.1,1.0,2.0,1,0.2\n",
    );

    let mut state = FilterState::new();
    compiler.set(&mut state, "name", "o'n").unwrap();
    let rs = QueryExecutor::new(&relation)
        .execute(&compiler.compose(&state))
        .unwrap();
    assert_eq!(rs.len(), 1);
}

/// Clause order does not depend on the order inputs were set.
#[test]
fn test_clause_order_is_stable() {
    let compiler = FilterCompiler::metagraph("data", &Schema::metagraph()).unwrap();

    let mut forward = FilterState::new();
    let mut backward = FilterState::new();
    let inputs = [("subnet", "1"), ("name", "a"), ("min_price", "2"), ("min_incentive", "3")];
    for (slot, value) in inputs {
        compiler.set(&mut forward, slot, value).unwrap();
    }
    for (slot, value) in inputs.iter().rev() {
        compiler.set(&mut backward, slot, value).unwrap();
    }

    let text = compiler.compose(&forward);
    assert_eq!(text, compiler.compose(&backward));
    let subnet = text.find("subnet_uid =").unwrap();
    let name = text.find("LOWER(subnet_name)").unwrap();
    let price = text.find("alpha_price_tao >=").unwrap();
    let incentive = text.find("top_miner_incentive >=").unwrap();
    assert!(subnet < name && name < price && price < incentive);
}
