//! Bucket catalog tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use pmetrics_core::error::{ExporterError, Result};
use pmetrics_core::BucketCatalog;

#[test]
fn thresholds_are_sorted_and_distinct() {
    let catalog = BucketCatalog::new([64, 1, 8, 1, 0, 64]);
    assert_eq!(catalog.thresholds(), &[0, 1, 8, 64]);
    assert_eq!(catalog.len(), 4);
    assert!(catalog.contains(8));
    assert!(!catalog.contains(2));
    assert!(BucketCatalog::default().is_empty());
}

#[test]
fn collects_from_fallible_rows() {
    let ok: Result<BucketCatalog> = [Ok(10i64), Ok(2), Ok(10)].into_iter().collect();
    assert_eq!(ok.unwrap().thresholds(), &[2, 10]);

    let failed: Result<BucketCatalog> =
        [Ok(1i64), Err(ExporterError::SourceUnavailable("failed to scan bucket".into()))]
            .into_iter()
            .collect();
    assert_eq!(failed.expect_err("must fail").kind().as_str(), "SOURCE_UNAVAILABLE");
}
