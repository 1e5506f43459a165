//! pmetrics exporter library entry.
//!
//! Wires config, the Postgres source, the scrape pipeline and the HTTP
//! endpoints together. Consumed by the binary (`main.rs`) and by integration
//! tests, which swap in their own `MetricSource`.

pub mod app_state;
pub mod config;
pub mod ops;
pub mod router;
pub mod scrape;
pub mod source;
