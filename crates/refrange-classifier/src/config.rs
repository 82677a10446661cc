//! Configuration types for the classifier.

use std::collections::HashSet;

/// Metric keys treated as paired (systolic/diastolic) by default.
pub const DEFAULT_PAIRED_METRICS: [&str; 4] = ["bloodPressure", "blood_pressure", "BP", "혈압"];

/// What to report when a value matches none of a metric's bands and the
/// metric defines no Normal band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Report Normal with no matched band. Lab metrics that only publish
    /// abnormal/borderline thresholds rely on this.
    #[default]
    AssumeNormal,
    /// Report Unclassified so the caller can show "insufficient data".
    Unclassified,
}

/// Configuration for the classifier.
///
/// # Example
///
/// ```rust
/// use refrange_classifier::{CacheConfig, ClassifierConfig, FallbackPolicy};
///
/// let config = ClassifierConfig::builder()
///     .with_cache(CacheConfig::default())
///     .with_fallback(FallbackPolicy::Unclassified)
///     .with_paired_metric("bp_home")
///     .with_parallel(true)
///     .build();
///
/// assert!(config.is_paired("bp_home"));
/// assert!(config.is_paired("혈압"));
/// ```
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Cache configuration (None = caching disabled).
    pub cache: Option<CacheConfig>,
    /// Policy when nothing matches and no Normal band exists.
    pub fallback: FallbackPolicy,
    /// Metric keys whose values are `first/second` pairs.
    pub paired_metrics: HashSet<String>,
    /// Classify batches in parallel (requires `parallel` feature).
    pub parallel: bool,
}

impl ClassifierConfig {
    /// Creates a new builder for ClassifierConfig.
    pub fn builder() -> ClassifierConfigBuilder {
        ClassifierConfigBuilder::default()
    }

    /// Returns true if the metric is a paired measurement.
    pub fn is_paired(&self, metric_key: &str) -> bool {
        self.paired_metrics.contains(metric_key)
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            cache: None,
            fallback: FallbackPolicy::default(),
            paired_metrics: default_paired_metrics(),
            parallel: false,
        }
    }
}

fn default_paired_metrics() -> HashSet<String> {
    DEFAULT_PAIRED_METRICS
        .iter()
        .map(|key| key.to_string())
        .collect()
}

/// Builder for ClassifierConfig.
#[derive(Debug, Clone)]
pub struct ClassifierConfigBuilder {
    cache: Option<CacheConfig>,
    fallback: FallbackPolicy,
    paired_metrics: HashSet<String>,
    parallel: bool,
}

impl Default for ClassifierConfigBuilder {
    fn default() -> Self {
        let ClassifierConfig {
            cache,
            fallback,
            paired_metrics,
            parallel,
        } = ClassifierConfig::default();
        Self {
            cache,
            fallback,
            paired_metrics,
            parallel,
        }
    }
}

impl ClassifierConfigBuilder {
    /// Enables caching with the given configuration.
    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Sets the fallback policy.
    pub fn with_fallback(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback = fallback;
        self
    }

    /// Adds a paired metric key to the defaults.
    pub fn with_paired_metric(mut self, metric_key: impl Into<String>) -> Self {
        self.paired_metrics.insert(metric_key.into());
        self
    }

    /// Replaces the paired metric keys.
    pub fn with_paired_metrics<I, S>(mut self, metric_keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.paired_metrics = metric_keys.into_iter().map(Into::into).collect();
        self
    }

    /// Enables or disables parallel batch classification.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Builds the ClassifierConfig.
    pub fn build(self) -> ClassifierConfig {
        ClassifierConfig {
            cache: self.cache,
            fallback: self.fallback,
            paired_metrics: self.paired_metrics,
            parallel: self.parallel,
        }
    }
}

/// Configuration for the parsed-expression cache.
///
/// # Example
///
/// ```rust
/// use refrange_classifier::CacheConfig;
///
/// let cache = CacheConfig { max_entries: 4096 };
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of cached parsed expressions.
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { max_entries: 1024 }
    }
}
