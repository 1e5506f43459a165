//! Per-request scrape pipeline: fetch -> aggregate -> render.
//!
//! Each call owns all of its intermediate state; concurrent scrapes share
//! nothing but the source handle.

use std::time::{Duration, Instant};

use pmetrics_core::error::{ExporterError, Result};
use pmetrics_core::{aggregate, render, AggregateOptions};

use crate::source::MetricSource;

/// Run one scrape and return the complete exposition body.
pub async fn scrape(
    source: &dyn MetricSource,
    opts: &AggregateOptions,
    fetch_timeout: Duration,
) -> Result<String> {
    let started = Instant::now();

    let snapshot = tokio::time::timeout(fetch_timeout, source.snapshot())
        .await
        .map_err(|_| {
            ExporterError::SourceUnavailable(format!(
                "fetch timed out after {}ms",
                fetch_timeout.as_millis()
            ))
        })??;

    let samples = snapshot.samples.len();
    let agg = aggregate(snapshot.samples, opts);
    let body = render(&agg, &snapshot.catalog)?;

    tracing::debug!(
        samples,
        buckets = snapshot.catalog.len(),
        simple = agg.simple.len(),
        histograms = agg.histograms.len(),
        bytes = body.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "scrape rendered"
    );

    Ok(body)
}
