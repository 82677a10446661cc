//! Measurements and their parsed values.

use refrange::{parse_quantity, Gender};

/// One measured data point to classify.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Measurement {
    /// Metric identifier, used to look up bands and to detect paired metrics.
    pub metric_key: String,
    /// Raw value as recorded: one number, `sys/dia`, or a qualitative token.
    pub raw_value: String,
    /// Patient gender.
    pub gender: Gender,
}

impl Measurement {
    /// Creates a measurement.
    pub fn new(
        metric_key: impl Into<String>,
        raw_value: impl Into<String>,
        gender: Gender,
    ) -> Self {
        Self {
            metric_key: metric_key.into(),
            raw_value: raw_value.into(),
            gender,
        }
    }

    /// Parses the raw value.
    pub fn value(&self) -> MeasuredValue {
        MeasuredValue::parse(&self.raw_value)
    }
}

/// The interpreted form of a raw measurement value.
#[derive(Debug, Clone, PartialEq)]
pub enum MeasuredValue {
    /// A single number.
    Scalar(f64),
    /// Two numbers joined by `/`, e.g. systolic/diastolic.
    Paired(f64, f64),
    /// Anything else, trimmed.
    Text(String),
}

impl MeasuredValue {
    /// Interprets a raw value. A trailing unit (`87cm`, `95 mg/dL`,
    /// `118/79 mmHg`) is discarded.
    ///
    /// # Example
    ///
    /// ```rust
    /// use refrange_classifier::MeasuredValue;
    ///
    /// assert_eq!(MeasuredValue::parse("27.3"), MeasuredValue::Scalar(27.3));
    /// assert_eq!(MeasuredValue::parse("7.2%"), MeasuredValue::Scalar(7.2));
    /// assert_eq!(MeasuredValue::parse("118/79"), MeasuredValue::Paired(118.0, 79.0));
    /// assert_eq!(MeasuredValue::parse(" 음성 "), MeasuredValue::Text("음성".to_string()));
    /// ```
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();

        if let Some(value) = parse_quantity(raw) {
            return MeasuredValue::Scalar(value);
        }

        if let Some((first, second)) = raw.split_once('/') {
            if let (Some(first), Some(second)) = (parse_quantity(first), parse_quantity(second)) {
                return MeasuredValue::Paired(first, second);
            }
        }

        MeasuredValue::Text(raw.to_string())
    }

    /// Returns the number if this is a scalar value.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            MeasuredValue::Scalar(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns both numbers if this is a paired value.
    pub fn as_pair(&self) -> Option<(f64, f64)> {
        match self {
            MeasuredValue::Paired(first, second) => Some((*first, *second)),
            _ => None,
        }
    }
}
