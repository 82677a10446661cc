//! Classification result types.

use crate::band::{BandTier, ReferenceBand};

/// Output tier of a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tier {
    /// Within the normal range.
    Normal,
    /// Borderline.
    Borderline,
    /// Abnormal / suspected disease.
    Abnormal,
    /// Not enough information to decide.
    Unclassified,
}

impl Tier {
    /// Status word shown by summary widgets.
    ///
    /// | Tier | Label |
    /// |------|-------|
    /// | Normal | `정상` |
    /// | Borderline | `경계` |
    /// | Abnormal | `이상` |
    /// | Unclassified | `측정` |
    pub fn status_label(&self) -> &'static str {
        match self {
            Tier::Normal => "정상",
            Tier::Borderline => "경계",
            Tier::Abnormal => "이상",
            Tier::Unclassified => "측정",
        }
    }
}

impl From<BandTier> for Tier {
    fn from(tier: BandTier) -> Self {
        match tier {
            BandTier::Normal => Tier::Normal,
            BandTier::Borderline => Tier::Borderline,
            BandTier::Abnormal => Tier::Abnormal,
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tier::Normal => write!(f, "normal"),
            Tier::Borderline => write!(f, "borderline"),
            Tier::Abnormal => write!(f, "abnormal"),
            Tier::Unclassified => write!(f, "unclassified"),
        }
    }
}

/// Result of classifying one measurement.
///
/// # Example
///
/// ```rust
/// use refrange::Gender;
/// use refrange_classifier::{classify, Measurement, ReferenceBand, Tier};
///
/// let bands = vec![
///     ReferenceBand::new("정상", "100미만").unwrap(),
///     ReferenceBand::new("질환의심", "126이상").unwrap(),
/// ];
/// let result = classify(&Measurement::new("glucose", "130", Gender::Male), &bands);
///
/// assert_eq!(result.tier, Tier::Abnormal);
/// assert_eq!(result.band_name(), Some("질환의심"));
/// assert_eq!(result.status_label(), "이상");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassificationResult {
    /// Classified tier.
    pub tier: Tier,
    /// The band that matched, if any.
    pub matched_band: Option<ReferenceBand>,
}

impl ClassificationResult {
    /// A result for a matched band.
    pub fn matched(band: ReferenceBand) -> Self {
        Self {
            tier: band.tier().into(),
            matched_band: Some(band),
        }
    }

    /// Normal by convention, with no matched band.
    pub fn assumed_normal() -> Self {
        Self {
            tier: Tier::Normal,
            matched_band: None,
        }
    }

    /// Unclassified, with no matched band.
    pub fn unclassified() -> Self {
        Self {
            tier: Tier::Unclassified,
            matched_band: None,
        }
    }

    /// Returns true if a band matched.
    pub fn is_match(&self) -> bool {
        self.matched_band.is_some()
    }

    /// Raw label of the matched band.
    pub fn band_name(&self) -> Option<&str> {
        self.matched_band.as_ref().map(ReferenceBand::name)
    }

    /// Status word for the tier.
    pub fn status_label(&self) -> &'static str {
        self.tier.status_label()
    }
}
