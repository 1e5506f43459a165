//! `MetricSource` backed by the pmetrics Postgres extension.
//!
//! One connection is opened per scrape and dropped afterwards, so a store
//! restart only fails the scrapes that overlap it.

use async_trait::async_trait;
use serde_json::Value;
use tokio_postgres::{Client, NoTls, Row};

use pmetrics_core::error::{ExporterError, Result};
use pmetrics_core::{BucketCatalog, Labels, SampleKind, SampleRow, SampleValue};

use super::{MetricSource, Snapshot};

const BUCKETS_SQL: &str = "SELECT bucket FROM pmetrics.list_histogram_buckets()";

const SAMPLES_SQL: &str = "
    SELECT
        m.name,
        m.labels,
        m.type,
        m.bucket,
        m.value,
        q.query_text
    FROM pmetrics.list_metrics() m
    LEFT JOIN pmetrics_stmts.list_queries() q
        ON (m.labels->>'queryid')::bigint = q.queryid
    ORDER BY m.name, m.type, m.labels::text, m.bucket
";

pub struct PostgresSource {
    database_url: String,
}

impl PostgresSource {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
        }
    }

    async fn connect(&self) -> Result<Client> {
        let (client, connection) = tokio_postgres::connect(&self.database_url, NoTls)
            .await
            .map_err(|e| unavailable("connect failed", e))?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::warn!(error = %e, "postgres connection closed with error");
            }
        });

        Ok(client)
    }
}

#[async_trait]
impl MetricSource for PostgresSource {
    async fn list_bucket_catalog(&self) -> Result<BucketCatalog> {
        let client = self.connect().await?;
        fetch_catalog(&client).await
    }

    async fn list_samples(&self) -> Result<Vec<SampleRow>> {
        let client = self.connect().await?;
        fetch_samples(&client).await
    }

    async fn snapshot(&self) -> Result<Snapshot> {
        let client = self.connect().await?;
        let catalog = fetch_catalog(&client).await?;
        let samples = fetch_samples(&client).await?;
        Ok(Snapshot { catalog, samples })
    }
}

async fn fetch_catalog(client: &Client) -> Result<BucketCatalog> {
    let rows = client
        .query(BUCKETS_SQL, &[])
        .await
        .map_err(|e| unavailable("failed to fetch histogram buckets", e))?;

    rows.iter()
        .map(|row| {
            row.try_get::<_, i32>("bucket")
                .map(i64::from)
                .map_err(|e| unavailable("failed to scan bucket", e))
        })
        .collect()
}

async fn fetch_samples(client: &Client) -> Result<Vec<SampleRow>> {
    let rows = client
        .query(SAMPLES_SQL, &[])
        .await
        .map_err(|e| unavailable("failed to fetch metrics", e))?;

    let mut out = Vec::with_capacity(rows.len());
    for row in &rows {
        if let Some(sample) = SampleColumns::from_row(row)?.into_sample()? {
            out.push(sample);
        }
    }
    Ok(out)
}

/// Raw columns of one `list_metrics()` row.
#[derive(Debug, Clone)]
pub struct SampleColumns {
    pub name: String,
    pub labels: Option<Value>,
    pub tag: String,
    pub bucket: Option<i32>,
    pub value: i64,
    pub query_text: Option<String>,
}

impl SampleColumns {
    fn from_row(row: &Row) -> Result<Self> {
        let scan = |e: tokio_postgres::Error| unavailable("failed to scan metric", e);
        Ok(Self {
            name: row.try_get("name").map_err(scan)?,
            labels: row.try_get("labels").map_err(scan)?,
            tag: row.try_get("type").map_err(scan)?,
            bucket: row.try_get("bucket").map_err(scan)?,
            value: row.try_get("value").map_err(scan)?,
            query_text: row.try_get("query_text").map_err(scan)?,
        })
    }

    /// Build the sample. Rows whose type tag does not decode (unknown tag,
    /// histogram without bucket) are skipped before labels are looked at;
    /// a malformed labels column on a known row fails the scrape.
    pub fn into_sample(self) -> Result<Option<SampleRow>> {
        let kind = match SampleKind::decode(&self.tag, self.bucket.map(i64::from)) {
            Ok(kind) => kind,
            Err(e) => {
                tracing::warn!(metric = %self.name, error = %e, "skipping sample row");
                return Ok(None);
            }
        };

        Ok(Some(SampleRow {
            labels: labels_from_json(self.labels.as_ref())?,
            name: self.name,
            kind,
            value: SampleValue::Int(self.value),
            query_text: self.query_text,
        }))
    }
}

/// Convert a `jsonb` labels column into a label set. String values are used
/// as-is; other scalars keep their JSON spelling (`"queryid": 42` => `42`).
pub fn labels_from_json(v: Option<&Value>) -> Result<Labels> {
    match v {
        None | Some(Value::Null) => Ok(Labels::new()),
        Some(Value::Object(map)) => Ok(map
            .iter()
            .map(|(k, v)| {
                let v = match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (k.clone(), v)
            })
            .collect()),
        Some(other) => Err(ExporterError::SourceUnavailable(format!(
            "failed to parse labels: expected a json object, got {other}"
        ))),
    }
}

fn unavailable(ctx: &str, e: tokio_postgres::Error) -> ExporterError {
    ExporterError::SourceUnavailable(format!("{ctx}: {e}"))
}
