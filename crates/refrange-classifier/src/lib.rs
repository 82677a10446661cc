//! # refrange-classifier
//!
//! Tier classification of clinical measurements against provider reference
//! bands.
//!
//! This crate takes the band expressions parsed by [`refrange`] and decides,
//! for one measurement of one patient, whether the value is Normal,
//! Borderline, Abnormal or cannot be classified.
//!
//! ## Key Features
//!
//! - **Deterministic priority** - Abnormal, then Borderline, then Normal; first match wins
//! - **Gender-aware** - `남 90미만 / 여 85미만` resolves per patient
//! - **Paired metrics** - blood pressure `135/95` against `140이상 또는 /90이상`
//! - **Qualitative results** - `음성`, `양성`, `정상, 비활동성`
//! - **Configurable caching** - LRU cache of parsed band expressions
//! - **Optional parallelism** - Enable `parallel` feature for batch classification
//!
//! ## Quick Start
//!
//! ```rust
//! use refrange::Gender;
//! use refrange_classifier::{classify, Measurement, ReferenceBand, Tier};
//!
//! let bands = vec![
//!     ReferenceBand::new("정상(A)", "18.5~24.9").unwrap(),
//!     ReferenceBand::new("정상(B)", "18.5미만/25~29.9").unwrap(),
//!     ReferenceBand::new("질환의심", "30이상").unwrap(),
//! ];
//!
//! let result = classify(&Measurement::new("bmi", "27", Gender::Female), &bands);
//! assert_eq!(result.tier, Tier::Borderline);
//! assert_eq!(result.band_name(), Some("정상(B)"));
//! ```
//!
//! ## With Configuration
//!
//! ```rust
//! use refrange::Gender;
//! use refrange_classifier::{
//!     BandEntry, CacheConfig, Classifier, ClassifierConfig, FallbackPolicy, Measurement,
//!     ReferenceBandTable, Tier,
//! };
//!
//! let mut table = ReferenceBandTable::new();
//! table.insert_entries("glucose", vec![BandEntry::new("질환의심", "126이상")]);
//!
//! let config = ClassifierConfig::builder()
//!     .with_cache(CacheConfig { max_entries: 4096 })
//!     .with_fallback(FallbackPolicy::Unclassified)
//!     .build();
//!
//! let classifier = Classifier::with_config(&table, config);
//! let result = classifier
//!     .classify(&Measurement::new("glucose", "95", Gender::Male))
//!     .unwrap();
//! assert_eq!(result.tier, Tier::Unclassified);
//! ```
//!
//! ## Band Labels
//!
//! | Label | Tier |
//! |-------|------|
//! | `정상`, `정상(A)`, `normal` | Normal |
//! | `정상(B)`, `정상B`, `경계`, `borderline` | Borderline |
//! | `질환의심`, `이상`, `비정상`, `abnormal` | Abnormal |
//!
//! ## Feature Flags
//!
//! - `parallel` - Enables parallel batch classification using rayon
//! - `serde` - Serialize/deserialize bands, tables and results
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    refrange-classifier                       │
//! │                                                              │
//! │  Classifier                                                  │
//! │  ├── look up bands (via BandSource trait)                   │
//! │  ├── order bands Abnormal → Borderline → Normal             │
//! │  ├── parse expressions (refrange, optionally cached)        │
//! │  ├── match value (BandMatcher: scalar / paired / text)      │
//! │  └── return ClassificationResult                            │
//! │                                                              │
//! │  Dependencies:                                               │
//! │  └── refrange - reference range expression parser           │
//! └─────────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod band;
mod cache;
mod classifier;
mod config;
mod error;
mod matcher;
mod measurement;
mod paired;
mod qualitative;
mod result;
mod table;
mod traits;

// Public re-exports
pub use band::{BandEntry, BandTier, ReferenceBand};
pub use cache::{normalize_cache_key, CacheStats, ExpressionCache, ExpressionKind, ParsedBand};
pub use classifier::{classify, Classifier};
pub use config::{
    CacheConfig, ClassifierConfig, ClassifierConfigBuilder, FallbackPolicy, DEFAULT_PAIRED_METRICS,
};
pub use error::{ClassifierError, ClassifyResult};
pub use matcher::BandMatcher;
pub use measurement::{MeasuredValue, Measurement};
pub use paired::{classify_paired, paired_matches};
pub use qualitative::matches_qualitative;
pub use result::{ClassificationResult, Tier};
pub use table::ReferenceBandTable;
pub use traits::BandSource;

// Re-export commonly used types from dependencies for convenience
pub use refrange::{Gender, RangeExpression};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_api_accessible() {
        // Verify all public types are accessible
        let _: Option<CacheConfig> = None;
        let _: Option<ClassifierConfig> = None;
        let _: Option<ClassificationResult> = None;
        let _: Option<CacheStats> = None;
        let _: Option<ClassifyResult<()>> = None;
    }

    #[test]
    fn test_re_exports() {
        let _gender: Gender = Gender::Female;
        let expr: RangeExpression = refrange::parse("남 90미만 / 여 85미만").unwrap();
        assert!(expr.is_gendered());
    }
}
