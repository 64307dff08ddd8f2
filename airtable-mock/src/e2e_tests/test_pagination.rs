//! Test limit/offset pagination.

use serde_json::json;

use crate::config::MockConfig;
use crate::e2e_tests::helpers::*;
use crate::error::MockError;
use crate::query::{ListQuery, ListResponse, Offset};

fn five_records() -> TestBase {
    let test = TestBase::new();
    test.create_all("table", (1..=5).map(|n| json!({"number": n})));
    test
}

#[test]
fn test_get_limit() {
    let test = five_records();

    let response = test.client.list("table", &ListQuery::new().limit(2)).unwrap();
    assert_eq!(numbers(&response.records), vec![1, 2]);
    let offset = response.offset.expect("first page should continue");

    let response = test
        .client
        .list("table", &ListQuery::new().limit(2).offset(offset))
        .unwrap();
    assert_eq!(numbers(&response.records), vec![3, 4]);
    let offset = response.offset.expect("second page should continue");

    let response = test
        .client
        .list("table", &ListQuery::new().limit(2).offset(offset))
        .unwrap();
    assert_eq!(numbers(&response.records), vec![5]);
    assert_eq!(response.offset, None);
}

#[test]
fn test_offset_round_trips_through_json() {
    let test = five_records();

    let response = test.client.list("table", &ListQuery::new().limit(3)).unwrap();
    let wire = serde_json::to_string(&response).unwrap();
    let decoded: ListResponse = serde_json::from_str(&wire).unwrap();
    let offset = decoded.offset.unwrap();

    let rest = test
        .client
        .list("table", &ListQuery::new().offset(offset))
        .unwrap();
    assert_eq!(numbers(&rest.records), vec![4, 5]);
}

#[test]
fn test_pagination_with_filter() {
    let test = TestBase::new();
    test.create_all("table", (1..=10).map(|n| json!({"number": n})));
    let query = ListQuery::new().filter_by_formula("{number} > 4").limit(4);

    let first = test.client.list("table", &query).unwrap();
    assert_eq!(numbers(&first.records), vec![5, 6, 7, 8]);
    assert_eq!(first.offset, Some(Offset::new(4)));

    let second = test
        .client
        .list("table", &query.clone().offset(first.offset.unwrap()))
        .unwrap();
    assert_eq!(numbers(&second.records), vec![9, 10]);
    assert_eq!(second.offset, None);
}

#[test]
fn test_default_page_size() {
    let test = TestBase::with_config(MockConfig::default().with_max_page_size(3));
    test.create_all("table", (1..=5).map(|n| json!({"number": n})));

    let response = test.client.list("table", &ListQuery::new()).unwrap();
    assert_eq!(numbers(&response.records), vec![1, 2, 3]);
    assert_eq!(response.offset, Some(Offset::new(3)));

    let response = test.client.list("table", &ListQuery::new().limit(50)).unwrap();
    assert_eq!(response.records.len(), 3);
}

#[test]
fn test_service_page_cap() {
    let test = TestBase::new();
    test.create_all("table", (1..=120).map(|n| json!({"number": n})));

    let response = test.client.list("table", &ListQuery::new()).unwrap();
    assert_eq!(response.records.len(), 100);
    assert_eq!(response.offset, Some(Offset::new(100)));
}

#[test]
fn test_invalid_offset_token() {
    assert_eq!(
        "not-a-token".parse::<Offset>().unwrap_err(),
        MockError::InvalidOffset("not-a-token".to_owned())
    );
}
