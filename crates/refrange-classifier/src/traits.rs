//! Traits for supplying reference bands to the classifier.
//!
//! This module defines the [`BandSource`] trait that any provider-backed
//! band table implements. The classifier only reads from it.
//!
//! # Example: Implementing BandSource for a provider snapshot
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use refrange_classifier::{BandSource, Classifier, ReferenceBand};
//!
//! struct Snapshot {
//!     metrics: BTreeMap<String, Vec<ReferenceBand>>,
//! }
//!
//! impl BandSource for Snapshot {
//!     fn bands(&self, metric_key: &str) -> Option<&[ReferenceBand]> {
//!         self.metrics.get(metric_key).map(Vec::as_slice)
//!     }
//! }
//!
//! let snapshot = Snapshot { metrics: BTreeMap::new() };
//! let classifier = Classifier::new(&snapshot);
//! assert!(!snapshot.has_metric("waist"));
//! ```

use std::collections::HashMap;

use crate::band::ReferenceBand;

/// Source of reference bands, keyed by metric.
///
/// Bands are read-only for the classifier; their order within a metric is the
/// provider's order and only matters between bands of the same tier.
pub trait BandSource: Send + Sync {
    /// Gets the bands defined for a metric.
    ///
    /// Returns `None` if the metric is unknown. A known metric may have zero
    /// bands.
    fn bands(&self, metric_key: &str) -> Option<&[ReferenceBand]>;

    /// Checks if the metric is known.
    fn has_metric(&self, metric_key: &str) -> bool {
        self.bands(metric_key).is_some()
    }
}

impl BandSource for HashMap<String, Vec<ReferenceBand>> {
    fn bands(&self, metric_key: &str) -> Option<&[ReferenceBand]> {
        self.get(metric_key).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_map_source() {
        let mut map: HashMap<String, Vec<ReferenceBand>> = HashMap::new();
        map.insert(
            "waist".to_string(),
            vec![ReferenceBand::new("정상", "남 90미만 / 여 85미만").unwrap()],
        );

        assert!(map.has_metric("waist"));
        assert!(!map.has_metric("bmi"));
        assert_eq!(map.bands("waist").map(<[_]>::len), Some(1));
    }
}
