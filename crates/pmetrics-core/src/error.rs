//! Shared error type across pmetrics crates.

use thiserror::Error;

/// Stable error categories, used for logs and for tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or invalid configuration (fatal at startup).
    Configuration,
    /// The store could not be reached or a query failed.
    SourceUnavailable,
    /// An invariant was violated while rendering.
    Format,
}

impl ErrorKind {
    /// String representation used in log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Configuration => "CONFIGURATION",
            ErrorKind::SourceUnavailable => "SOURCE_UNAVAILABLE",
            ErrorKind::Format => "FORMAT",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, ExporterError>;

/// Unified error type used by core and exporter.
#[derive(Debug, Error)]
pub enum ExporterError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("source unavailable: {0}")]
    SourceUnavailable(String),
    #[error("format error: {0}")]
    Format(String),
}

impl ExporterError {
    /// Map the error to its stable category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExporterError::Configuration(_) => ErrorKind::Configuration,
            ExporterError::SourceUnavailable(_) => ErrorKind::SourceUnavailable,
            ExporterError::Format(_) => ErrorKind::Format,
        }
    }
}

impl From<std::fmt::Error> for ExporterError {
    fn from(e: std::fmt::Error) -> Self {
        ExporterError::Format(format!("write failed: {e}"))
    }
}
