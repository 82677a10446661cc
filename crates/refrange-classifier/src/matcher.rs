//! Evaluation of parsed band expressions against one measurement.

use refrange::{Clause, PairedExpression, RangeExpression};

use crate::measurement::{MeasuredValue, Measurement};
use crate::paired::paired_matches;
use crate::qualitative::matches_qualitative;

/// Answers "does this measurement satisfy this band?" for parsed expressions.
///
/// The raw value is parsed once when the matcher is created and reused for
/// every band of the metric.
///
/// # Example
///
/// ```rust
/// use refrange::{parse, Gender};
/// use refrange_classifier::{BandMatcher, Measurement};
///
/// let measurement = Measurement::new("bmi", "27", Gender::Female);
/// let matcher = BandMatcher::new(&measurement);
///
/// let expr = parse("18.5미만/25~29.9").unwrap();
/// assert!(matcher.matches_expression(&expr));
/// ```
#[derive(Debug, Clone)]
pub struct BandMatcher<'m> {
    measurement: &'m Measurement,
    value: MeasuredValue,
}

impl<'m> BandMatcher<'m> {
    /// Creates a matcher for a measurement.
    pub fn new(measurement: &'m Measurement) -> Self {
        Self {
            measurement,
            value: measurement.value(),
        }
    }

    /// The parsed measurement value.
    pub fn value(&self) -> &MeasuredValue {
        &self.value
    }

    /// Evaluates a single-valued band expression for the measurement's gender.
    ///
    /// A gender-specific expression without a branch for the patient's gender
    /// does not match.
    pub fn matches_expression(&self, expr: &RangeExpression) -> bool {
        match expr.for_gender(self.measurement.gender) {
            Some(RangeExpression::Clause(clause)) => self.matches_clause(clause),
            Some(RangeExpression::AnyOf(clauses)) => {
                clauses.iter().any(|clause| self.matches_clause(clause))
            }
            Some(RangeExpression::AllOf(clauses)) => {
                !clauses.is_empty() && clauses.iter().all(|clause| self.matches_clause(clause))
            }
            // Gender branches never nest.
            Some(RangeExpression::ByGender { .. }) | None => false,
        }
    }

    /// Evaluates one clause.
    ///
    /// Numeric clauses need a scalar value; textual clauses need a textual
    /// value and are matched qualitatively. A number never matches text.
    pub fn matches_clause(&self, clause: &Clause) -> bool {
        match (&clause.interval, &self.value) {
            (Some(interval), MeasuredValue::Scalar(x)) => interval.contains(*x),
            (None, MeasuredValue::Text(text)) => matches_qualitative(text, &clause.text),
            _ => false,
        }
    }

    /// Evaluates a paired band expression. A non-paired value never matches.
    pub fn matches_paired(&self, expr: &PairedExpression) -> bool {
        match self.value {
            MeasuredValue::Paired(first, second) => paired_matches(expr, first, second),
            _ => false,
        }
    }
}
