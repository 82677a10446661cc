//! In-memory reference band table built from provider records.

use std::collections::HashMap;

use tracing::warn;

use crate::band::{BandEntry, ReferenceBand};
use crate::traits::BandSource;

/// Reference bands for every metric of one provider snapshot.
///
/// # Example
///
/// ```rust
/// use refrange_classifier::{BandEntry, BandSource, ReferenceBandTable};
///
/// let mut table = ReferenceBandTable::new();
/// let loaded = table.insert_entries(
///     "bmi",
///     vec![
///         BandEntry::new("정상(A)", "18.5~24.9"),
///         BandEntry::new("정상(B)", "18.5미만/25~29.9"),
///         BandEntry::new("질환의심", "30이상"),
///     ],
/// );
///
/// assert_eq!(loaded, 3);
/// assert_eq!(table.bands("bmi").unwrap().len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReferenceBandTable {
    metrics: HashMap<String, Vec<ReferenceBand>>,
}

impl ReferenceBandTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the bands of a metric, replacing any previous ones.
    pub fn insert_bands(&mut self, metric_key: impl Into<String>, bands: Vec<ReferenceBand>) {
        self.metrics.insert(metric_key.into(), bands);
    }

    /// Sets the bands of a metric from provider `{name, value}` pairs.
    ///
    /// Entries whose label belongs to no tier family are skipped with a
    /// warning. The metric is registered even if every entry is skipped.
    /// Returns the number of bands kept.
    pub fn insert_entries<I>(&mut self, metric_key: impl Into<String>, entries: I) -> usize
    where
        I: IntoIterator<Item = BandEntry>,
    {
        let metric_key = metric_key.into();
        let bands: Vec<ReferenceBand> = entries
            .into_iter()
            .filter_map(|entry| match ReferenceBand::try_from(entry) {
                Ok(band) => Some(band),
                Err(err) => {
                    warn!(metric = %metric_key, error = %err, "skipping reference band");
                    None
                }
            })
            .collect();

        let kept = bands.len();
        self.metrics.insert(metric_key, bands);
        kept
    }

    /// Removes a metric, returning its bands.
    pub fn remove(&mut self, metric_key: &str) -> Option<Vec<ReferenceBand>> {
        self.metrics.remove(metric_key)
    }

    /// Returns an iterator over metric keys.
    pub fn metric_keys(&self) -> impl Iterator<Item = &str> {
        self.metrics.keys().map(String::as_str)
    }

    /// Returns the number of metrics.
    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    /// Returns true if the table has no metrics.
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}

impl BandSource for ReferenceBandTable {
    fn bands(&self, metric_key: &str) -> Option<&[ReferenceBand]> {
        self.metrics.get(metric_key).map(Vec::as_slice)
    }
}

impl FromIterator<(String, Vec<ReferenceBand>)> for ReferenceBandTable {
    fn from_iter<T: IntoIterator<Item = (String, Vec<ReferenceBand>)>>(iter: T) -> Self {
        Self {
            metrics: iter.into_iter().collect(),
        }
    }
}
