//! pmetrics core: sample model, aggregation, and Prometheus text exposition.
//!
//! This crate turns the flat metric rows read from the pmetrics store into the
//! text format scraped by Prometheus. It carries no transport, database, or
//! runtime dependencies so the engine can be exercised directly by tests and
//! reused by any serving boundary.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Every render is built from locals only, so concurrent scrapes never share
//! intermediate state.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod aggregate;
pub mod catalog;
pub mod error;
pub mod exposition;
pub mod sample;

/// Shared result type.
pub use error::{ExporterError, Result};

pub use aggregate::{aggregate, AggregateOptions, Aggregation, Aggregator};
pub use catalog::BucketCatalog;
pub use exposition::render;
pub use sample::{Labels, MetricFamilyKey, SampleKind, SampleRow, SampleValue};
