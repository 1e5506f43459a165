//! Upstream store interface.
//!
//! The exporter reads two things per scrape: the global bucket catalog and
//! the flat sample rows. Both come from a [`MetricSource`]; the Postgres
//! implementation lives in [`postgres`].

pub mod postgres;

use async_trait::async_trait;

use pmetrics_core::error::Result;
use pmetrics_core::{BucketCatalog, SampleRow};

pub use postgres::PostgresSource;

/// Everything one scrape needs from the store.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub catalog: BucketCatalog,
    pub samples: Vec<SampleRow>,
}

/// Read side of the metrics store.
#[async_trait]
pub trait MetricSource: Send + Sync {
    /// All histogram thresholds known to the store.
    async fn list_bucket_catalog(&self) -> Result<BucketCatalog>;

    /// All sample rows, with their query text joined in where known.
    async fn list_samples(&self) -> Result<Vec<SampleRow>>;

    /// Catalog and samples for one scrape. Sources that can serve both
    /// reads from one session should override this.
    async fn snapshot(&self) -> Result<Snapshot> {
        let catalog = self.list_bucket_catalog().await?;
        let samples = self.list_samples().await?;
        Ok(Snapshot { catalog, samples })
    }
}
