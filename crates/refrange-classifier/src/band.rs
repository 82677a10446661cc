//! Reference bands and tier assignment from provider labels.

use crate::error::{ClassifierError, ClassifyResult};

/// Clinical tier of a reference band, in evaluation priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BandTier {
    /// `질환의심`, `이상`, `질환`
    Abnormal,
    /// `정상(B)`, `정상(경계)`, `경계`
    Borderline,
    /// `정상`, `정상(A)`
    Normal,
}

impl BandTier {
    /// All tiers, highest priority first.
    pub const PRIORITY_ORDER: [BandTier; 3] =
        [BandTier::Abnormal, BandTier::Borderline, BandTier::Normal];

    /// Evaluation priority; lower values are checked first.
    pub fn priority(&self) -> u8 {
        match self {
            BandTier::Abnormal => 0,
            BandTier::Borderline => 1,
            BandTier::Normal => 2,
        }
    }

    /// Assigns a tier from a provider band label.
    ///
    /// Borderline families are checked before Normal, because `정상(B)` also
    /// contains `정상`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use refrange_classifier::BandTier;
    ///
    /// assert_eq!(BandTier::from_label("정상(A)"), Some(BandTier::Normal));
    /// assert_eq!(BandTier::from_label("정상(B)"), Some(BandTier::Borderline));
    /// assert_eq!(BandTier::from_label("질환의심"), Some(BandTier::Abnormal));
    /// assert_eq!(BandTier::from_label("참고치"), None);
    /// ```
    pub fn from_label(label: &str) -> Option<BandTier> {
        let label: String = label
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();

        if label.contains("경계") || label.contains("borderline") {
            return Some(BandTier::Borderline);
        }
        if label.contains("정상") && (label.contains("(b)") || label.ends_with('b')) {
            return Some(BandTier::Borderline);
        }
        if label.contains("질환")
            || label.contains("의심")
            || label.contains("이상")
            || label.contains("비정상")
            || label.contains("abnormal")
        {
            return Some(BandTier::Abnormal);
        }
        if label.contains("정상") || label.contains("normal") {
            return Some(BandTier::Normal);
        }
        None
    }
}

impl std::fmt::Display for BandTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BandTier::Abnormal => write!(f, "abnormal"),
            BandTier::Borderline => write!(f, "borderline"),
            BandTier::Normal => write!(f, "normal"),
        }
    }
}

/// A raw `{name, value}` pair as published by the health-data provider.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BandEntry {
    /// Band label, e.g. `정상(B)`.
    pub name: String,
    /// Band expression, e.g. `18.5미만/25~29.9`.
    pub value: String,
}

impl BandEntry {
    /// Creates a provider entry.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A named reference band for one metric.
///
/// The tier is derived from the label once, at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReferenceBand {
    name: String,
    tier: BandTier,
    expression: String,
}

impl ReferenceBand {
    /// Creates a band, assigning its tier from the label.
    ///
    /// Returns [`ClassifierError::UnknownBandLabel`] if the label belongs to no
    /// known tier family.
    pub fn new(name: impl Into<String>, expression: impl Into<String>) -> ClassifyResult<Self> {
        let name = name.into();
        match BandTier::from_label(&name) {
            Some(tier) => Ok(Self {
                name,
                tier,
                expression: expression.into(),
            }),
            None => Err(ClassifierError::UnknownBandLabel(name)),
        }
    }

    /// Creates a band with an explicit tier.
    pub fn with_tier(
        name: impl Into<String>,
        tier: BandTier,
        expression: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            tier,
            expression: expression.into(),
        }
    }

    /// Raw provider label.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Assigned tier.
    pub fn tier(&self) -> BandTier {
        self.tier
    }

    /// Raw reference-range expression.
    pub fn expression(&self) -> &str {
        &self.expression
    }
}

impl TryFrom<BandEntry> for ReferenceBand {
    type Error = ClassifierError;

    fn try_from(entry: BandEntry) -> Result<Self, Self::Error> {
        ReferenceBand::new(entry.name, entry.value)
    }
}
