//! Classifier implementation.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::band::{BandTier, ReferenceBand};
use crate::cache::{ExpressionCache, ExpressionKind, ParsedBand};
use crate::config::{ClassifierConfig, FallbackPolicy};
use crate::error::{ClassifierError, ClassifyResult};
use crate::matcher::BandMatcher;
use crate::measurement::Measurement;
use crate::result::ClassificationResult;
use crate::traits::BandSource;

/// Classifies a measurement against a metric's bands with default settings.
///
/// Bands are evaluated Abnormal, then Borderline, then Normal; the first band
/// that matches wins. If none matches, the result is Normal (no matched band)
/// when the metric defines no Normal band, and Unclassified otherwise. A value
/// that no band could judge (text against numeric bands, say) is always
/// Unclassified.
///
/// # Example
///
/// ```rust
/// use refrange::Gender;
/// use refrange_classifier::{classify, Measurement, ReferenceBand, Tier};
///
/// let bands = vec![
///     ReferenceBand::new("정상", "남 90미만 / 여 85미만").unwrap(),
///     ReferenceBand::new("질환의심", "남 90이상 / 여 85이상").unwrap(),
/// ];
///
/// let male = classify(&Measurement::new("waist", "87", Gender::Male), &bands);
/// assert_eq!(male.tier, Tier::Normal);
///
/// let female = classify(&Measurement::new("waist", "87", Gender::Female), &bands);
/// assert_eq!(female.tier, Tier::Abnormal);
/// ```
pub fn classify(measurement: &Measurement, bands: &[ReferenceBand]) -> ClassificationResult {
    classify_with(&ClassifierConfig::default(), None, measurement, bands)
}

/// Classification engine bound to a band source.
///
/// # Example
///
/// ```rust
/// use refrange::Gender;
/// use refrange_classifier::{
///     BandEntry, CacheConfig, Classifier, ClassifierConfig, Measurement, ReferenceBandTable, Tier,
/// };
///
/// let mut table = ReferenceBandTable::new();
/// table.insert_entries(
///     "bloodPressure",
///     vec![
///         BandEntry::new("정상", "120미만 이며/80미만"),
///         BandEntry::new("질환의심", "140이상 또는 /90이상"),
///     ],
/// );
///
/// let config = ClassifierConfig::builder()
///     .with_cache(CacheConfig::default())
///     .build();
/// let classifier = Classifier::with_config(&table, config);
///
/// let result = classifier
///     .classify(&Measurement::new("bloodPressure", "135/95", Gender::Male))
///     .unwrap();
/// assert_eq!(result.tier, Tier::Abnormal);
/// ```
pub struct Classifier<'a> {
    /// Reference to the band source.
    source: &'a dyn BandSource,
    /// Classifier configuration.
    config: ClassifierConfig,
    /// Parsed-expression cache (optional).
    cache: Option<Arc<ExpressionCache>>,
}

impl<'a> Classifier<'a> {
    /// Creates a classifier with default configuration.
    pub fn new(source: &'a dyn BandSource) -> Self {
        Self::with_config(source, ClassifierConfig::default())
    }

    /// Creates a classifier with custom configuration.
    pub fn with_config(source: &'a dyn BandSource, config: ClassifierConfig) -> Self {
        let cache = config
            .cache
            .as_ref()
            .map(|c| Arc::new(ExpressionCache::new(c.clone())));
        Self {
            source,
            config,
            cache,
        }
    }

    /// Returns a reference to the cache if enabled.
    pub fn cache(&self) -> Option<&ExpressionCache> {
        self.cache.as_deref()
    }

    /// Returns a reference to the classifier configuration.
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classifies a measurement using the bands of its metric.
    ///
    /// # Errors
    ///
    /// [`ClassifierError::UnknownMetric`] if the source has no entry for the
    /// measurement's metric key. Problems with individual bands never error.
    pub fn classify(&self, measurement: &Measurement) -> ClassifyResult<ClassificationResult> {
        let bands = self
            .source
            .bands(&measurement.metric_key)
            .ok_or_else(|| ClassifierError::UnknownMetric(measurement.metric_key.clone()))?;
        Ok(self.classify_bands(measurement, bands))
    }

    /// Classifies a measurement against explicitly supplied bands.
    pub fn classify_bands(
        &self,
        measurement: &Measurement,
        bands: &[ReferenceBand],
    ) -> ClassificationResult {
        classify_with(&self.config, self.cache.as_deref(), measurement, bands)
    }

    /// Checks whether a single band matches a measurement.
    pub fn band_matches(&self, measurement: &Measurement, band: &ReferenceBand) -> bool {
        let matcher = BandMatcher::new(measurement);
        band_matches(
            &matcher,
            self.expression_kind(measurement),
            self.cache.as_deref(),
            band,
        )
    }

    /// Classifies many measurements.
    ///
    /// Results are in input order. Runs on the rayon thread pool when the
    /// `parallel` feature is enabled and [`ClassifierConfig::parallel`] is set.
    pub fn classify_batch(
        &self,
        measurements: &[Measurement],
    ) -> Vec<ClassifyResult<ClassificationResult>> {
        if self.config.parallel {
            self.classify_parallel(measurements)
        } else {
            measurements.iter().map(|m| self.classify(m)).collect()
        }
    }

    #[cfg(feature = "parallel")]
    fn classify_parallel(
        &self,
        measurements: &[Measurement],
    ) -> Vec<ClassifyResult<ClassificationResult>> {
        use rayon::prelude::*;
        measurements.par_iter().map(|m| self.classify(m)).collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn classify_parallel(
        &self,
        measurements: &[Measurement],
    ) -> Vec<ClassifyResult<ClassificationResult>> {
        measurements.iter().map(|m| self.classify(m)).collect()
    }

    fn expression_kind(&self, measurement: &Measurement) -> ExpressionKind {
        expression_kind(&self.config, measurement)
    }
}

fn expression_kind(config: &ClassifierConfig, measurement: &Measurement) -> ExpressionKind {
    if config.is_paired(&measurement.metric_key) {
        ExpressionKind::Paired
    } else {
        ExpressionKind::Scalar
    }
}

fn classify_with(
    config: &ClassifierConfig,
    cache: Option<&ExpressionCache>,
    measurement: &Measurement,
    bands: &[ReferenceBand],
) -> ClassificationResult {
    if bands.is_empty() {
        debug!(metric = %measurement.metric_key, "metric defines no reference bands");
        return ClassificationResult::unclassified();
    }

    let kind = expression_kind(config, measurement);
    let matcher = BandMatcher::new(measurement);

    // Stable sort keeps provider order within a tier.
    let mut ordered: Vec<&ReferenceBand> = bands.iter().collect();
    ordered.sort_by_key(|band| band.tier().priority());

    let mut comparable = false;
    for band in ordered {
        let Some(parsed) = parse_band(kind, cache, band) else {
            continue;
        };
        if matches_parsed(&matcher, &parsed) {
            return ClassificationResult::matched(band.clone());
        }
        comparable |= parsed.accepts(matcher.value());
    }

    let has_normal = bands.iter().any(|band| band.tier() == BandTier::Normal);
    if has_normal {
        warn!(
            metric = %measurement.metric_key,
            value = %measurement.raw_value,
            "value matched no reference band, including the normal band"
        );
        return ClassificationResult::unclassified();
    }

    // The fallback only covers values that some band could judge.
    if !comparable {
        warn!(
            metric = %measurement.metric_key,
            value = %measurement.raw_value,
            "value cannot be compared with any reference band"
        );
        return ClassificationResult::unclassified();
    }

    match config.fallback {
        FallbackPolicy::AssumeNormal => ClassificationResult::assumed_normal(),
        FallbackPolicy::Unclassified => ClassificationResult::unclassified(),
    }
}

fn band_matches(
    matcher: &BandMatcher<'_>,
    kind: ExpressionKind,
    cache: Option<&ExpressionCache>,
    band: &ReferenceBand,
) -> bool {
    parse_band(kind, cache, band).is_some_and(|parsed| matches_parsed(matcher, &parsed))
}

fn matches_parsed(matcher: &BandMatcher<'_>, parsed: &ParsedBand) -> bool {
    match parsed {
        ParsedBand::Scalar(expr) => matcher.matches_expression(expr),
        ParsedBand::Paired(expr) => matcher.matches_paired(expr),
    }
}

fn parse_band(
    kind: ExpressionKind,
    cache: Option<&ExpressionCache>,
    band: &ReferenceBand,
) -> Option<Arc<ParsedBand>> {
    let parsed = match cache {
        Some(cache) => cache.get_or_parse(kind, band.expression()),
        None => ParsedBand::parse(kind, band.expression()).map(Arc::new),
    };

    match parsed {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            debug!(
                band = band.name(),
                expression = band.expression(),
                error = %err,
                "skipping unparseable reference band"
            );
            None
        }
    }
}
