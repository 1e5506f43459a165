//! Text renderer.
//!
//! Layout of one scrape body:
//! 1. counters and gauges in input order, each name preceded by its
//!    `# TYPE` line the first time it appears;
//! 2. histogram series in key order (name, then labels), each walking the
//!    full bucket catalog with cumulative counts, then `+Inf`, `_count` and
//!    `_sum`.
//!
//! A metric name gets exactly one `# TYPE` line per body, across both passes.

use std::collections::{BTreeMap, HashSet};
use std::fmt::Write;

use crate::aggregate::Aggregation;
use crate::catalog::BucketCatalog;
use crate::error::Result;
use crate::sample::{MetricFamilyKey, SampleValue};

use super::labels::{format_labels, format_labels_with_le};

/// Names that already have a `# TYPE` line in the body being rendered.
#[derive(Debug, Default)]
struct EmittedTypes<'a> {
    seen: HashSet<&'a str>,
}

impl<'a> EmittedTypes<'a> {
    fn declare(&mut self, out: &mut String, name: &'a str, type_name: &str) -> Result<()> {
        if self.seen.insert(name) {
            writeln!(out, "# TYPE {} {}", name, type_name)?;
        }
        Ok(())
    }
}

/// Render one scrape body. The result always ends with a newline.
pub fn render(agg: &Aggregation, catalog: &BucketCatalog) -> Result<String> {
    let mut out = String::new();
    let mut types = EmittedTypes::default();

    for s in &agg.simple {
        types.declare(&mut out, &s.name, s.kind.type_name())?;
        writeln!(
            out,
            "{}{} {}",
            s.name,
            format_labels(&s.labels),
            s.value
        )?;
    }

    for (key, buckets) in &agg.histograms {
        types.declare(&mut out, &key.name, "histogram")?;
        let sum = agg.histogram_sums.get(key).copied().unwrap_or_default();
        render_histogram(&mut out, key, buckets, sum, catalog)?;
    }

    if out.is_empty() {
        out.push('\n');
    }
    Ok(out)
}

fn render_histogram(
    out: &mut String,
    key: &MetricFamilyKey,
    buckets: &BTreeMap<i64, SampleValue>,
    sum: SampleValue,
    catalog: &BucketCatalog,
) -> Result<()> {
    let name = &key.name;
    let base = format_labels(&key.labels);

    let mut cumulative = SampleValue::ZERO;
    for &le in catalog.thresholds() {
        if let Some(raw) = buckets.get(&le) {
            cumulative = cumulative + *raw;
        }
        writeln!(
            out,
            "{}_bucket{} {}",
            name,
            format_labels_with_le(&key.labels, &le.to_string()),
            cumulative
        )?;
    }

    let outside = buckets.keys().filter(|le| !catalog.contains(**le)).count();
    if outside > 0 {
        tracing::warn!(
            metric = %name,
            outside,
            "histogram buckets outside catalog left out of +Inf and _count"
        );
    }

    writeln!(
        out,
        "{}_bucket{} {}",
        name,
        format_labels_with_le(&key.labels, "+Inf"),
        cumulative
    )?;
    writeln!(out, "{}_count{} {}", name, base, cumulative)?;
    writeln!(out, "{}_sum{} {}", name, base, sum)?;
    Ok(())
}
