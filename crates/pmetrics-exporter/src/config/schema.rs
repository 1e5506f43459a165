use std::net::SocketAddr;
use std::time::Duration;

use serde::Deserialize;

use pmetrics_core::aggregate::{AggregateOptions, DEFAULT_QUERY_LABEL_MAX_LEN};
use pmetrics_core::error::{ExporterError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterConfig {
    pub version: u32,

    #[serde(default)]
    pub exporter: ExporterSection,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            version: 1,
            exporter: ExporterSection::default(),
        }
    }
}

impl ExporterConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(ExporterError::Configuration(format!(
                "unsupported config version: {}",
                self.version
            )));
        }

        self.exporter.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Postgres connection string. Usually supplied through `DATABASE_URL`.
    #[serde(default)]
    pub database_url: Option<String>,

    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,

    #[serde(default)]
    pub query_label: QueryLabelSection,
}

impl Default for ExporterSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            database_url: None,
            fetch_timeout_ms: default_fetch_timeout_ms(),
            query_label: QueryLabelSection::default(),
        }
    }
}

impl ExporterSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        self.database_url()?;
        if !(100..=300000).contains(&self.fetch_timeout_ms) {
            return Err(ExporterError::Configuration(
                "exporter.fetch_timeout_ms must be between 100 and 300000".into(),
            ));
        }
        if !(1..=4096).contains(&self.query_label.max_len) {
            return Err(ExporterError::Configuration(
                "exporter.query_label.max_len must be between 1 and 4096".into(),
            ));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            ExporterError::Configuration(format!(
                "exporter.listen must be a valid socket address ({}): {e}",
                self.listen
            ))
        })
    }

    pub fn database_url(&self) -> Result<&str> {
        match self.database_url.as_deref() {
            Some(url) if !url.trim().is_empty() => Ok(url),
            _ => Err(ExporterError::Configuration(
                "DATABASE_URL environment variable is required".into(),
            )),
        }
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QueryLabelSection {
    #[serde(default = "default_query_max_len")]
    pub max_len: usize,

    /// Fold statement whitespace onto one line before truncating.
    #[serde(default)]
    pub compact_whitespace: bool,
}

impl Default for QueryLabelSection {
    fn default() -> Self {
        Self {
            max_len: default_query_max_len(),
            compact_whitespace: false,
        }
    }
}

impl QueryLabelSection {
    pub fn aggregate_options(&self) -> AggregateOptions {
        AggregateOptions {
            query_label_max_len: self.max_len,
            compact_query_whitespace: self.compact_whitespace,
        }
    }
}

fn default_listen() -> String {
    "0.0.0.0:9187".into()
}
fn default_fetch_timeout_ms() -> u64 {
    10000
}
fn default_query_max_len() -> usize {
    DEFAULT_QUERY_LABEL_MAX_LEN
}
