#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use serde_json::json;

use pmetrics_core::{SampleKind, SampleValue};
use pmetrics_exporter::source::postgres::{labels_from_json, SampleColumns};

#[test]
fn null_labels_are_empty() {
    assert!(labels_from_json(None).unwrap().is_empty());
    assert!(labels_from_json(Some(&json!(null))).unwrap().is_empty());
}

#[test]
fn scalars_keep_their_json_spelling() {
    let v = json!({ "queryid": 7369472039348_i64, "db": "app", "replica": false, "ratio": 0.5 });
    let labels = labels_from_json(Some(&v)).unwrap();
    assert_eq!(labels["queryid"], "7369472039348");
    assert_eq!(labels["db"], "app");
    assert_eq!(labels["replica"], "false");
    assert_eq!(labels["ratio"], "0.5");
}

#[test]
fn non_object_labels_fail_the_scrape() {
    let err = labels_from_json(Some(&json!(["a", "b"]))).expect_err("must fail");
    assert_eq!(err.kind().as_str(), "SOURCE_UNAVAILABLE");
}

fn columns(tag: &str, bucket: Option<i32>, value: i64) -> SampleColumns {
    SampleColumns {
        name: "pg_calls".into(),
        labels: Some(json!({ "queryid": 42 })),
        tag: tag.into(),
        bucket,
        value,
        query_text: Some("SELECT 1".into()),
    }
}

#[test]
fn known_rows_become_samples() {
    let row = columns("histogram", Some(16), 3).into_sample().unwrap().expect("kept");
    assert_eq!(row.name, "pg_calls");
    assert_eq!(row.kind, SampleKind::Histogram { le: 16 });
    assert_eq!(row.value, SampleValue::Int(3));
    assert_eq!(row.labels["queryid"], "42");
    assert_eq!(row.query_text.as_deref(), Some("SELECT 1"));
}

#[test]
fn int8_values_stay_exact() {
    let row = columns("gauge", Some(0), i64::MAX).into_sample().unwrap().unwrap();
    assert_eq!(row.value.to_string(), "9223372036854775807");
}

#[test]
fn unknown_type_tags_are_skipped() {
    assert!(columns("unknown", Some(0), 1).into_sample().unwrap().is_none());
    assert!(columns("summary", None, 1).into_sample().unwrap().is_none());
}

#[test]
fn histogram_rows_need_a_bucket() {
    assert!(columns("histogram", None, 1).into_sample().unwrap().is_none());
    assert!(columns("histogram_sum", None, 1).into_sample().unwrap().is_some());
}

#[test]
fn skipped_rows_do_not_look_at_labels() {
    let mut bad = columns("unknown", Some(0), 1);
    bad.labels = Some(json!("not an object"));
    assert!(bad.into_sample().unwrap().is_none());

    let mut bad = columns("counter", Some(0), 1);
    bad.labels = Some(json!("not an object"));
    let err = bad.into_sample().expect_err("known row with bad labels");
    assert_eq!(err.kind().as_str(), "SOURCE_UNAVAILABLE");
}
