//! Global histogram bucket catalog.
//!
//! The store reports every threshold it knows about, for all histograms at
//! once. Thresholds are kept sorted ascending and distinct so the formatter
//! can walk them in one pass.

/// Ordered, de-duplicated set of histogram bucket thresholds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BucketCatalog {
    thresholds: Vec<i64>,
}

impl BucketCatalog {
    /// Build a catalog from thresholds in any order; duplicates collapse.
    pub fn new(thresholds: impl IntoIterator<Item = i64>) -> Self {
        let mut thresholds: Vec<i64> = thresholds.into_iter().collect();
        thresholds.sort_unstable();
        thresholds.dedup();
        Self { thresholds }
    }

    /// Thresholds in ascending order.
    pub fn thresholds(&self) -> &[i64] {
        &self.thresholds
    }

    pub fn contains(&self, le: i64) -> bool {
        self.thresholds.binary_search(&le).is_ok()
    }

    pub fn len(&self) -> usize {
        self.thresholds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.thresholds.is_empty()
    }
}

impl FromIterator<i64> for BucketCatalog {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        Self::new(iter)
    }
}
