//! Sample aggregation.
//!
//! Groups the flat rows of one scrape into the structures the formatter
//! walks:
//! - counters and gauges stay a flat list, in input order;
//! - histogram bucket rows are grouped per series and summed per threshold;
//! - histogram sum rows are stored once per series (a later row replaces an
//!   earlier one).
//!
//! Query text is folded into the label set before the series key is built, so
//! two rows that differ only by their statement end up in different series.

use std::collections::BTreeMap;

use crate::sample::{
    compact_whitespace, truncate_chars, Labels, MetricFamilyKey, SampleKind, SampleRow,
    SampleValue, QUERY_LABEL,
};

/// Default limit for the `query` label, in characters.
pub const DEFAULT_QUERY_LABEL_MAX_LEN: usize = 200;

/// How query text is turned into a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateOptions {
    pub query_label_max_len: usize,
    pub compact_query_whitespace: bool,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            query_label_max_len: DEFAULT_QUERY_LABEL_MAX_LEN,
            compact_query_whitespace: false,
        }
    }
}

/// Simple metric kind (counter or gauge).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimpleKind {
    Counter,
    Gauge,
}

impl SimpleKind {
    pub fn type_name(self) -> &'static str {
        match self {
            SimpleKind::Counter => "counter",
            SimpleKind::Gauge => "gauge",
        }
    }
}

/// One counter or gauge line.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleSample {
    pub name: String,
    pub kind: SimpleKind,
    pub labels: Labels,
    pub value: SampleValue,
}

/// Per-scrape aggregation result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregation {
    pub simple: Vec<SimpleSample>,
    /// Raw per-threshold counts, keyed by series.
    pub histograms: BTreeMap<MetricFamilyKey, BTreeMap<i64, SampleValue>>,
    pub histogram_sums: BTreeMap<MetricFamilyKey, SampleValue>,
}

/// Incremental aggregator; feed rows with [`Aggregator::push`].
#[derive(Debug, Default)]
pub struct Aggregator {
    opts: AggregateOptions,
    out: Aggregation,
}

impl Aggregator {
    pub fn new(opts: AggregateOptions) -> Self {
        Self {
            opts,
            out: Aggregation::default(),
        }
    }

    pub fn push(&mut self, row: SampleRow) {
        let SampleRow {
            name,
            mut labels,
            kind,
            value,
            query_text,
        } = row;

        if let Some(text) = query_text.as_deref().filter(|t| !t.is_empty()) {
            labels.insert(QUERY_LABEL.to_string(), self.query_label(text));
        }

        match kind {
            SampleKind::Histogram { le } => {
                let buckets = self
                    .out
                    .histograms
                    .entry(MetricFamilyKey::new(name, labels))
                    .or_default();
                let slot = buckets.entry(le).or_default();
                *slot = *slot + value;
            }
            SampleKind::HistogramSum => {
                // Duplicate sum rows overwrite; bucket rows above accumulate.
                self.out
                    .histogram_sums
                    .insert(MetricFamilyKey::new(name, labels), value);
            }
            SampleKind::Counter => self.push_simple(name, SimpleKind::Counter, labels, value),
            SampleKind::Gauge => self.push_simple(name, SimpleKind::Gauge, labels, value),
        }
    }

    pub fn finish(self) -> Aggregation {
        self.out
    }

    fn push_simple(&mut self, name: String, kind: SimpleKind, labels: Labels, value: SampleValue) {
        self.out.simple.push(SimpleSample {
            name,
            kind,
            labels,
            value,
        });
    }

    fn query_label(&self, text: &str) -> String {
        let max = self.opts.query_label_max_len;
        if self.opts.compact_query_whitespace {
            truncate_chars(&compact_whitespace(text), max).to_string()
        } else {
            truncate_chars(text, max).to_string()
        }
    }
}

/// Aggregate a whole scrape in one call.
pub fn aggregate(rows: impl IntoIterator<Item = SampleRow>, opts: &AggregateOptions) -> Aggregation {
    let mut agg = Aggregator::new(*opts);
    for row in rows {
        agg.push(row);
    }
    agg.finish()
}
