//! JSON test vector loader shared by the exposition tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::fs;

use serde::Deserialize;

use pmetrics_core::{BucketCatalog, SampleKind, SampleRow, SampleValue};

#[derive(Debug, Deserialize)]
pub struct TestVector {
    pub description: String,
    pub catalog: Vec<i64>,
    pub samples: Vec<VectorSample>,
    pub expect_lines: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct VectorSample {
    pub name: String,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub bucket: Option<i64>,
    pub value: serde_json::Number,
    #[serde(default)]
    pub query_text: Option<String>,
}

impl TestVector {
    pub fn catalog(&self) -> BucketCatalog {
        BucketCatalog::new(self.catalog.iter().copied())
    }

    pub fn rows(&self) -> Vec<SampleRow> {
        self.samples
            .iter()
            .map(|s| SampleRow {
                name: s.name.clone(),
                labels: s.labels.clone(),
                kind: SampleKind::decode(&s.kind, s.bucket).expect("invalid type in test vector"),
                value: to_value(&s.value),
                query_text: s.query_text.clone(),
            })
            .collect()
    }

    pub fn expected_body(&self) -> String {
        let mut body = self.expect_lines.join("\n");
        body.push('\n');
        body
    }
}

/// Integers stay exact; anything else is a float.
fn to_value(n: &serde_json::Number) -> SampleValue {
    match n.as_i64() {
        Some(v) => SampleValue::Int(v),
        None => SampleValue::Float(n.as_f64().expect("finite number in test vector")),
    }
}

pub fn load(name: &str) -> TestVector {
    let s = fs::read_to_string(format!("tests/vectors/{name}")).unwrap();
    serde_json::from_str(&s).unwrap()
}

/// Every `*.json` file under `tests/vectors/`, sorted by name.
pub fn all_vector_files() -> Vec<String> {
    let mut files: Vec<String> = fs::read_dir("tests/vectors")
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .filter(|n| n.ends_with(".json"))
        .collect();
    files.sort();
    files
}
