//! Test creating records and fetching them back by id.

use serde_json::json;

use crate::e2e_tests::helpers::*;
use crate::error::MockError;
use crate::query::ListQuery;
use crate::types::RecordId;

#[test]
fn test_get_by_record_id() {
    let test = TestBase::new();
    let record = test.create("table", json!({"number": 1}));
    test.create("table", json!({"number": 2}));

    let fetched = test.client.get("table", &record.id).unwrap();

    assert_eq!(fetched, record);
    assert_eq!(fetched.fields, fields(json!({"number": 1})));
    assert_eq!(fetched.created_time, CREATED_TIME);
}

#[test]
fn test_create_returns_full_record() {
    let test = TestBase::new();
    let record = test.create(
        "table",
        json!({"Name": "Ada", "Attachments": [{"url": "https://example.com/a.png"}]}),
    );

    assert!(record.id.as_str().starts_with("rec"));
    assert_eq!(
        serde_json::to_value(&record).unwrap(),
        json!({
            "id": record.id.as_str(),
            "fields": {"Name": "Ada", "Attachments": [{"url": "https://example.com/a.png"}]},
            "createdTime": CREATED_TIME,
        })
    );
}

#[test]
fn test_numbers_keep_their_json_form() {
    let test = TestBase::new();
    let input = json!({"big": 9_007_199_254_740_993_u64, "n": 1, "ratio": 0.25});
    let record = test.create("table", input.clone());

    let fetched = test.client.get("table", &record.id).unwrap();

    assert_eq!(serde_json::to_value(&fetched.fields).unwrap(), input);
}

#[test]
fn test_list_returns_creation_order() {
    let test = TestBase::new();
    test.create_all("table", (1..=4).map(|n| json!({"number": n})));

    let response = test.client.list("table", &ListQuery::new()).unwrap();

    assert_eq!(numbers(&response.records), vec![1, 2, 3, 4]);
    assert_eq!(response.offset, None);
}

#[test]
fn test_get_missing_record() {
    let test = TestBase::new();
    test.create("table", json!({"number": 1}));

    let error = test
        .client
        .get("table", &RecordId::from_string("recDoesNotExist"))
        .unwrap_err();

    assert_eq!(
        error,
        MockError::NotFound {
            table: "table".to_owned(),
            record_id: "recDoesNotExist".to_owned(),
        }
    );
}

#[test]
fn test_get_missing_table() {
    let test = TestBase::new();

    let error = test.client.list("table", &ListQuery::new()).unwrap_err();

    assert_eq!(
        error,
        MockError::UnknownTable {
            base: "base".to_owned(),
            table: "table".to_owned(),
        }
    );
}

#[test]
fn test_ids_are_unique() {
    let test = TestBase::new();
    let records = test.create_all("table", (0..50).map(|n| json!({"number": n})));

    let mut ids: Vec<_> = records.iter().map(|r| r.id.clone()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 50);
}
