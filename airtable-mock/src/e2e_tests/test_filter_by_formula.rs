//! Test filtering listings with formulas.

use serde_json::json;

use crate::e2e_tests::helpers::*;
use crate::error::MockError;
use crate::formula::quote;
use crate::query::{ListQuery, Offset};

fn filtered(test: &TestBase, formula: &str) -> Vec<i64> {
    let response = test
        .client
        .list("table", &ListQuery::new().filter_by_formula(formula))
        .unwrap();
    numbers(&response.records)
}

fn yes_no_table() -> TestBase {
    let test = TestBase::new();
    test.create_all(
        "table",
        [
            json!({"number": 1, "filter": "yes", "other": "a"}),
            json!({"number": 2, "filter": "no", "other": "a"}),
            json!({"number": 3, "filter": "yes", "other": "b"}),
        ],
    );
    test
}

#[test]
fn test_filter_by_formula_greater() {
    let test = TestBase::new();
    test.create_all("table", (1..=3).map(|n| json!({"field1": n, "number": n})));

    assert_eq!(filtered(&test, "{field1} > 1"), vec![2, 3]);
}

#[test]
fn test_filter_by_formula_equal() {
    let test = yes_no_table();
    assert_eq!(filtered(&test, "filter = \"yes\""), vec![1, 3]);
    assert_eq!(filtered(&test, "{filter} != 'yes'"), vec![2]);
}

#[test]
fn test_filter_by_formula_decimal() {
    let test = yes_no_table();
    assert_eq!(filtered(&test, "number >= 1.99"), vec![2, 3]);
}

#[test]
fn test_filter_by_formula_and_or_not() {
    let test = yes_no_table();
    assert_eq!(filtered(&test, "AND(filter = \"yes\", other = \"b\")"), vec![3]);
    assert_eq!(filtered(&test, "OR({number} = 1, {other} = 'b')"), vec![1, 3]);
    assert_eq!(filtered(&test, "NOT({filter} = 'yes')"), vec![2]);
}

#[test]
fn test_filter_by_formula_offset() {
    let test = yes_no_table();

    // The offset counts filtered records, not table rows.
    let response = test
        .client
        .list(
            "table",
            &ListQuery::new()
                .filter_by_formula("filter = \"yes\"")
                .offset(Offset::new(1)),
        )
        .unwrap();

    assert_eq!(numbers(&response.records), vec![3]);
}

#[test]
fn test_filter_by_formula_doubled_quotes() {
    let test = TestBase::new();
    test.create_all(
        "table",
        [
            json!({"number": 1, "f": "a'b"}),
            json!({"number": 2, "f": "a''b"}),
            json!({"number": 3, "f": "ab"}),
        ],
    );

    assert_eq!(filtered(&test, "AND({f}='a''b', TRUE())"), vec![1]);
}

#[test]
fn test_filter_by_formula_special_characters() {
    let test = TestBase::new();
    let special = "'\"(=,)}{";
    test.create_all(
        "table",
        [
            json!({"number": 1, "filter": special}),
            json!({"number": 2, "filter": "no"}),
        ],
    );

    assert_eq!(filtered(&test, &format!("filter = {}", quote(special))), vec![1]);
    assert_eq!(filtered(&test, r#"filter = "'\"(=,)}{""#), vec![1]);
}

#[test]
fn test_filter_missing_field_is_empty() {
    let test = TestBase::new();
    test.create_all(
        "table",
        [json!({"number": 1, "status": "done"}), json!({"number": 2})],
    );

    assert_eq!(filtered(&test, "{status} = ''"), vec![2]);
    assert_eq!(filtered(&test, "{status} > 1"), vec![1]);
}

#[test]
fn test_filter_is_deterministic() {
    let test = TestBase::new();
    test.create_all(
        "table",
        (1..=20).map(|n| json!({"number": n, "label": format!("item {n}")})),
    );

    let first = filtered(&test, "OR({number} < 5, {label} = 'item 17')");
    for _ in 0..5 {
        assert_eq!(filtered(&test, "OR({number} < 5, {label} = 'item 17')"), first);
    }
    assert_eq!(first, vec![1, 2, 3, 4, 17]);
}

#[test]
fn test_filter_syntax_error() {
    let test = yes_no_table();

    let error = test
        .client
        .list("table", &ListQuery::new().filter_by_formula("AND(filter = 'yes'"))
        .unwrap_err();

    let MockError::FormulaSyntax(details) = error else {
        panic!("expected a formula syntax error, got {error:?}");
    };
    assert_eq!(details.position, 18);
}
