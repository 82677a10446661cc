//! Text matching for non-numeric results.

/// Checks a qualitative value against a reference string.
///
/// Matching is trimmed and case-insensitive:
/// 1. exact match;
/// 2. if the reference contains commas, equality with any listed element;
/// 3. otherwise, containment of the value in the reference.
///
/// An empty value never matches.
///
/// # Example
///
/// ```rust
/// use refrange_classifier::matches_qualitative;
///
/// assert!(matches_qualitative("음성", "음성"));
/// assert!(!matches_qualitative("양성", "음성"));
/// assert!(matches_qualitative("비활동성", "정상, 비활동성"));
/// ```
pub fn matches_qualitative(value: &str, ref_value: &str) -> bool {
    let value = value.trim().to_lowercase();
    let reference = ref_value.trim().to_lowercase();

    if value.is_empty() || reference.is_empty() {
        return false;
    }
    if value == reference {
        return true;
    }
    if reference.contains(',') {
        return reference.split(',').map(str::trim).any(|item| item == value);
    }
    reference.contains(&value)
}
