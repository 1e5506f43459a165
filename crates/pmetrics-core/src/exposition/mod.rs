//! Prometheus text exposition (format version 0.0.4).
//!
//! - `labels`: label-block codec shared by every line kind.
//! - `text`: renders an [`Aggregation`](crate::aggregate::Aggregation) against
//!   the bucket catalog.
//!
//! Rendering writes into a buffer owned by the call; callers get either the
//! complete body or an error, never a prefix of it.

pub mod labels;
pub mod text;

/// Content type served alongside rendered text.
pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4";

pub use labels::{escape_label_value, format_labels, format_labels_with_le};
pub use text::render;
