//! Top-level facade crate for the pmetrics exporter.
//!
//! Re-exports the exposition engine and the exporter service so users can depend on a single crate.

pub mod core {
    pub use pmetrics_core::*;
}

pub mod exporter {
    pub use pmetrics_exporter::*;
}
