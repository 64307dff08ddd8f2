//! Test sharing and isolation between bases and clients.

use std::sync::Arc;

use serde_json::json;

use crate::client::Client;
use crate::e2e_tests::helpers::*;
use crate::error::MockError;
use crate::query::ListQuery;

#[test]
fn test_multiple_bases() {
    let test = TestBase::new();
    let other_base = Client::with_registry(Arc::clone(test.client.registry()), "second-base", "");

    test.create("table", json!({"number": 6}));
    other_base.create("table", fields(json!({"number": 7}))).unwrap();

    let first = test.client.list("table", &ListQuery::new()).unwrap();
    let second = other_base.list("table", &ListQuery::new()).unwrap();
    assert_eq!(numbers(&first.records), vec![6]);
    assert_eq!(numbers(&second.records), vec![7]);
}

#[test]
fn test_multiple_clients() {
    let test = TestBase::new();
    let same_base = Client::with_registry(Arc::clone(test.client.registry()), "base", "other-key");

    test.create("table", json!({"number": 8}));
    same_base.create("table", fields(json!({"number": 9}))).unwrap();

    let listed = test.client.list("table", &ListQuery::new()).unwrap();
    assert_eq!(numbers(&listed.records), vec![8, 9]);
}

#[test]
fn test_table_in_other_base_is_unknown() {
    let test = TestBase::new();
    let other_base = Client::with_registry(Arc::clone(test.client.registry()), "second-base", "");
    test.create("table", json!({"number": 1}));

    assert!(matches!(
        other_base.list("table", &ListQuery::new()),
        Err(MockError::UnknownTable { .. })
    ));
}
