//! Error types for classification.

use thiserror::Error;

/// Errors that can occur while classifying a measurement.
///
/// Band-level problems (an unparseable expression, a paired band given a
/// scalar value) are never errors: they count as "no match" for that band.
/// Only caller mistakes surface here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassifierError {
    /// Reference-range parse error from the refrange parser.
    #[error("reference-range parse error: {0}")]
    Parse(#[from] refrange::RangeError),

    /// The band source has no entry for the metric.
    #[error("unknown metric: {0}")]
    UnknownMetric(String),

    /// A band label belongs to none of the known tier families.
    #[error("unrecognized band label: {0}")]
    UnknownBandLabel(String),
}

/// Result type for classifier operations.
pub type ClassifyResult<T> = std::result::Result<T, ClassifierError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_unknown_metric() {
        let err = ClassifierError::UnknownMetric("waist".to_string());
        assert_eq!(err.to_string(), "unknown metric: waist");
    }

    #[test]
    fn test_error_display_unknown_band_label() {
        let err = ClassifierError::UnknownBandLabel("참고치".to_string());
        assert_eq!(err.to_string(), "unrecognized band label: 참고치");
    }

    #[test]
    fn test_error_from_range_error() {
        let range_err = refrange::RangeError::EmptyExpression;
        let err: ClassifierError = range_err.into();
        assert!(matches!(err, ClassifierError::Parse(_)));
        assert_eq!(
            err.to_string(),
            "reference-range parse error: empty reference-range expression"
        );
    }
}
