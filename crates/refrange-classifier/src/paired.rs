//! Combinator for two-part measurements such as blood pressure.

use refrange::PairedExpression;
use tracing::debug;

use crate::measurement::MeasuredValue;

/// Checks a `sys/dia` value against a paired band expression.
///
/// Returns `false` when the value is not exactly two numbers or when the band
/// does not split into two sides.
///
/// # Example
///
/// ```rust
/// use refrange_classifier::classify_paired;
///
/// assert!(classify_paired("118/79", "120미만 이며/80미만"));
/// assert!(!classify_paired("118/85", "120미만 이며/80미만"));
/// assert!(classify_paired("135/95", "140이상 또는 /90이상"));
/// ```
pub fn classify_paired(raw_value: &str, band_expr: &str) -> bool {
    let Some((first, second)) = MeasuredValue::parse(raw_value).as_pair() else {
        debug!(value = raw_value, "paired band given a non-paired value");
        return false;
    };

    match refrange::parse_paired(band_expr) {
        Ok(expr) => paired_matches(&expr, first, second),
        Err(err) => {
            debug!(expression = band_expr, error = %err, "skipping unparseable paired band");
            false
        }
    }
}

/// Evaluates both sides of a parsed paired expression and combines them.
///
/// A side that is not a numeric threshold never holds.
pub fn paired_matches(expr: &PairedExpression, first: f64, second: f64) -> bool {
    let first_holds = expr.first.interval.is_some_and(|i| i.contains(first));
    let second_holds = expr.second.interval.is_some_and(|i| i.contains(second));
    expr.connective.combine(first_holds, second_holds)
}
