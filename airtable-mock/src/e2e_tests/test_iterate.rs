//! Test lazy iteration over pages.

use serde_json::json;

use crate::e2e_tests::helpers::*;
use crate::error::{MockError, Result};
use crate::query::ListQuery;
use crate::types::Record;

fn iterate_numbers(test: &TestBase, query: ListQuery) -> Vec<i64> {
    let records: Vec<Record> = test
        .client
        .iterate("table", query)
        .unwrap()
        .records()
        .collect::<Result<_>>()
        .unwrap();
    numbers(&records)
}

#[test]
fn test_iterate() {
    let test = TestBase::new();
    test.create_all("table", [json!({"number": 3}), json!({"number": 4})]);

    assert_eq!(iterate_numbers(&test, ListQuery::new()), vec![3, 4]);
}

#[test]
fn test_iterate_batches() {
    let test = TestBase::new();
    test.create_all("table", (1..=7).map(|n| json!({"number": n})));

    let pages: Vec<Vec<i64>> = test
        .client
        .iterate("table", ListQuery::new().batch_size(3))
        .unwrap()
        .map(|page| numbers(&page.unwrap()))
        .collect();

    assert_eq!(pages, vec![vec![1, 2, 3], vec![4, 5, 6], vec![7]]);
}

#[test]
fn test_iterate_filter_by_formula() {
    let test = TestBase::new();
    test.create_all("table", [json!({"number": 3}), json!({"number": 4})]);

    assert_eq!(
        iterate_numbers(&test, ListQuery::new().filter_by_formula("number > 3")),
        vec![4]
    );
}

#[test]
fn test_iterate_view() {
    let test = TestBase::new();
    test.create_all("table", [json!({"number": 3}), json!({"number": 4})]);
    test.client.create_view("table", "my-view", "number < 4").unwrap();

    assert_eq!(iterate_numbers(&test, ListQuery::new().view("my-view")), vec![3]);
}

#[test]
fn test_iterate_restarts_per_call() {
    let test = TestBase::new();
    test.create_all("table", (1..=3).map(|n| json!({"number": n})));

    let first = iterate_numbers(&test, ListQuery::new().batch_size(2));
    let second = iterate_numbers(&test, ListQuery::new().batch_size(2));

    assert_eq!(first, vec![1, 2, 3]);
    assert_eq!(first, second);
}

#[test]
fn test_iterate_unknown_table() {
    let test = TestBase::new();
    assert!(matches!(
        test.client.iterate("table", ListQuery::new()),
        Err(MockError::UnknownTable { .. })
    ));
}
