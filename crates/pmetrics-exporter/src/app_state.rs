//! Shared application state for the exporter.
//!
//! Holds the resolved config and the store handle. No per-scrape data lives
//! here.

use std::sync::Arc;
use std::time::Duration;

use pmetrics_core::AggregateOptions;

use crate::config::ExporterConfig;
use crate::source::MetricSource;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: ExporterConfig,
    source: Arc<dyn MetricSource>,
    aggregate_opts: AggregateOptions,
}

impl AppState {
    pub fn new(cfg: ExporterConfig, source: Arc<dyn MetricSource>) -> Self {
        let aggregate_opts = cfg.exporter.query_label.aggregate_options();
        Self {
            inner: Arc::new(AppStateInner {
                cfg,
                source,
                aggregate_opts,
            }),
        }
    }

    pub fn source(&self) -> Arc<dyn MetricSource> {
        Arc::clone(&self.inner.source)
    }

    pub fn aggregate_opts(&self) -> &AggregateOptions {
        &self.inner.aggregate_opts
    }

    pub fn fetch_timeout(&self) -> Duration {
        self.inner.cfg.exporter.fetch_timeout()
    }
}
