//! Flat sample rows as read from the store.
//!
//! The store tags each row with a type string (`counter`, `gauge`,
//! `histogram`, `histogram_sum`) and an integer bucket column. Both are decoded
//! once into [`SampleKind`] when the row is ingested; nothing downstream looks
//! at the raw tag again.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Add;

use crate::error::{ExporterError, Result};

/// Label set of one series. Keys are unique and iterate in ascending order,
/// which makes equality and ordering independent of insertion order.
pub type Labels = BTreeMap<String, String>;

/// Label key under which associated query text is attached.
pub const QUERY_LABEL: &str = "query";

/// Decoded row type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleKind {
    Counter,
    Gauge,
    /// Raw (non-cumulative) count for the bucket with upper bound `le`.
    Histogram { le: i64 },
    /// Sum of all observations of a histogram series.
    HistogramSum,
}

impl SampleKind {
    /// Decode the store's type tag. `bucket` is only consulted for histograms.
    pub fn decode(tag: &str, bucket: Option<i64>) -> Result<Self> {
        match tag {
            "counter" => Ok(SampleKind::Counter),
            "gauge" => Ok(SampleKind::Gauge),
            "histogram" => bucket
                .map(|le| SampleKind::Histogram { le })
                .ok_or_else(|| {
                    ExporterError::SourceUnavailable("histogram row without bucket".into())
                }),
            "histogram_sum" => Ok(SampleKind::HistogramSum),
            other => Err(ExporterError::SourceUnavailable(format!(
                "unknown metric type: {other}"
            ))),
        }
    }
}

/// Sample value. The store reports `int8` counts and readings, which stay
/// exact as `Int`; anything fractional is carried as `Float`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleValue {
    Int(i64),
    Float(f64),
}

impl SampleValue {
    pub const ZERO: SampleValue = SampleValue::Int(0);

    pub fn as_f64(self) -> f64 {
        match self {
            SampleValue::Int(v) => v as f64,
            SampleValue::Float(v) => v,
        }
    }
}

impl Default for SampleValue {
    fn default() -> Self {
        SampleValue::ZERO
    }
}

impl Add for SampleValue {
    type Output = SampleValue;

    /// Integer sums stay integers until they would overflow `i64`.
    fn add(self, rhs: SampleValue) -> SampleValue {
        match (self, rhs) {
            (SampleValue::Int(a), SampleValue::Int(b)) => a
                .checked_add(b)
                .map(SampleValue::Int)
                .unwrap_or_else(|| SampleValue::Float(a as f64 + b as f64)),
            (a, b) => SampleValue::Float(a.as_f64() + b.as_f64()),
        }
    }
}

impl From<i64> for SampleValue {
    fn from(v: i64) -> Self {
        SampleValue::Int(v)
    }
}

impl From<f64> for SampleValue {
    fn from(v: f64) -> Self {
        SampleValue::Float(v)
    }
}

/// Prometheus spelling: integral floats carry no fraction, and the
/// non-finite values are `+Inf`, `-Inf` and `NaN`.
impl fmt::Display for SampleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            SampleValue::Int(v) => write!(f, "{v}"),
            SampleValue::Float(v) if v.is_nan() => f.write_str("NaN"),
            SampleValue::Float(v) if v == f64::INFINITY => f.write_str("+Inf"),
            SampleValue::Float(v) if v == f64::NEG_INFINITY => f.write_str("-Inf"),
            SampleValue::Float(v) => write!(f, "{v}"),
        }
    }
}

/// One row fetched from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleRow {
    pub name: String,
    pub labels: Labels,
    pub kind: SampleKind,
    pub value: SampleValue,
    /// Statement text joined in by `queryid`, when known.
    pub query_text: Option<String>,
}

impl SampleRow {
    pub fn new(name: impl Into<String>, kind: SampleKind, value: impl Into<SampleValue>) -> Self {
        Self {
            name: name.into(),
            labels: Labels::new(),
            kind,
            value: value.into(),
            query_text: None,
        }
    }

    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    pub fn with_query_text(mut self, text: impl Into<String>) -> Self {
        self.query_text = Some(text.into());
        self
    }
}

/// Identity of one series: metric name plus canonical label set.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MetricFamilyKey {
    pub name: String,
    pub labels: Labels,
}

impl MetricFamilyKey {
    pub fn new(name: impl Into<String>, labels: Labels) -> Self {
        Self {
            name: name.into(),
            labels,
        }
    }
}

/// Cut `s` to at most `max_chars` characters.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Fold SQL text onto one line: `\n`, `\r` and `\t` become spaces, runs of
/// spaces collapse to one, and the ends are trimmed.
pub fn compact_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for c in s.chars() {
        let c = if matches!(c, '\n' | '\r' | '\t') { ' ' } else { c };
        if c == ' ' {
            if prev_space {
                continue;
            }
            prev_space = true;
        } else {
            prev_space = false;
        }
        out.push(c);
    }
    out.trim().to_string()
}
