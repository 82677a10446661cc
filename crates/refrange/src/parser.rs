//! Reference-range parser implementation using nom.
//!
//! The grammar is small and closed: an expression is split on `/` into
//! segments, gender markers select a branch, connectives (`이며`, `또는`)
//! decide how segments combine, and each remaining clause is tried against an
//! ordered list of threshold recognizers.

use std::ops::Bound;

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{char, digit1, multispace0, satisfy},
    combinator::{all_consuming, map, map_opt, not, opt, peek, recognize, value},
    multi::many0,
    sequence::{delimited, pair, preceded, separated_pair, terminated, tuple},
    IResult,
};

use crate::ast::{Clause, Connective, Gender, PairedExpression, ParsedInterval, RangeExpression};
use crate::error::{RangeError, RangeResult};

/// Parse a reference-range expression for a single-valued metric.
///
/// # Arguments
/// * `input` - The band expression as supplied by the provider
///
/// # Returns
/// The parsed expression or an error if its structure cannot be interpreted
///
/// # Examples
///
/// ```rust
/// use refrange::{parse, RangeExpression};
///
/// // Single threshold
/// let expr = parse("100미만").unwrap();
/// assert!(matches!(expr, RangeExpression::Clause(_)));
///
/// // Alternatives
/// let expr = parse("18.5미만/25~29.9").unwrap();
/// assert!(matches!(expr, RangeExpression::AnyOf(_)));
///
/// // Gender branches
/// let expr = parse("남 90미만 / 여 85미만").unwrap();
/// assert!(expr.is_gendered());
/// ```
pub fn parse(input: &str) -> RangeResult<RangeExpression> {
    let input = input.trim();
    if input.is_empty() {
        return Err(RangeError::EmptyExpression);
    }

    if let Some(expr) = gender_dispatch(input)? {
        return Ok(expr);
    }

    alternatives(input)
}

/// Parse a band expression for a paired measurement (e.g. blood pressure).
///
/// The expression must have exactly two `/`-separated sides. A connective at
/// the seam decides how they combine; without one the sides are OR-ed.
///
/// # Examples
///
/// ```rust
/// use refrange::{parse_paired, Connective};
///
/// let expr = parse_paired("120미만 이며/80미만").unwrap();
/// assert_eq!(expr.connective, Connective::And);
///
/// let expr = parse_paired("140이상 또는 /90이상").unwrap();
/// assert_eq!(expr.connective, Connective::Or);
/// ```
pub fn parse_paired(input: &str) -> RangeResult<PairedExpression> {
    let input = input.trim();
    if input.is_empty() {
        return Err(RangeError::EmptyExpression);
    }

    let segments = split_segments(input, '/');
    let [left, right] = segments.as_slice() else {
        return Err(RangeError::NotPaired {
            segments: segments.len(),
        });
    };

    let (left_connective, left) = strip_connective(left);
    let (right_connective, right) = strip_connective(right);

    Ok(PairedExpression {
        first: Clause::new(left),
        second: Clause::new(right),
        connective: left_connective.or(right_connective).unwrap_or_default(),
    })
}

/// Parse a single clause into a numeric interval.
///
/// Returns `None` if the clause is not a numeric threshold; callers treat it
/// as qualitative text.
///
/// | Form | Interval |
/// |------|----------|
/// | `n미만` | `(-∞, n)` |
/// | `n이상` | `[n, ∞)` |
/// | `n이하` | `(-∞, n]` |
/// | `n초과` | `(n, ∞)` |
/// | `a이상 b미만` | `[a, b)` (any lower/upper suffix pair) |
/// | `a~b`, `a-b` | `[a, b]` |
/// | `>=n`, `<=n`, `>n`, `<n` | half-line |
///
/// A unit may follow the number (`90cm 미만`) or the whole clause (`5.7~6.4 %`).
///
/// # Examples
///
/// ```rust
/// use refrange::parse_threshold;
///
/// let interval = parse_threshold("90미만").unwrap();
/// assert!(interval.contains(89.0));
/// assert!(!interval.contains(90.0));
///
/// assert!(parse_threshold("음성").is_none());
/// ```
pub fn parse_threshold(clause: &str) -> Option<ParsedInterval> {
    all_consuming(threshold)(clause)
        .ok()
        .map(|(_, interval)| interval)
}

/// Resolve an expression for one gender into its alternative-free clauses.
///
/// Gender markers are applied first; the selected branch is then split into
/// its `/` alternatives. An expression with no branch for `gender` resolves to
/// an empty list.
///
/// # Examples
///
/// ```rust
/// use refrange::{resolve_clauses, Gender};
///
/// let clauses = resolve_clauses("남 90미만 / 여 85미만", Gender::Female).unwrap();
/// assert_eq!(clauses, vec!["85미만".to_string()]);
///
/// let clauses = resolve_clauses("18.5미만/25~29.9", Gender::Male).unwrap();
/// assert_eq!(clauses, vec!["18.5미만".to_string(), "25~29.9".to_string()]);
/// ```
pub fn resolve_clauses(input: &str, gender: Gender) -> RangeResult<Vec<String>> {
    let expr = parse(input)?;
    Ok(expr
        .for_gender(gender)
        .map(|branch| {
            branch
                .clauses()
                .into_iter()
                .map(|clause| clause.text.clone())
                .collect()
        })
        .unwrap_or_default())
}

// ============================================================================
// Segment splitting
// ============================================================================

fn split_segments(input: &str, separator: char) -> Vec<&str> {
    input
        .split(separator)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

fn alternatives(input: &str) -> RangeResult<RangeExpression> {
    let segments = split_segments(input, '/');

    match segments.as_slice() {
        [] => Err(RangeError::EmptyExpression),
        [single] => Ok(RangeExpression::Clause(Clause::new(strip_connective(single).1))),
        many => {
            let mut all_required = false;
            let clauses: Vec<Clause> = many
                .iter()
                .map(|segment| {
                    let (connective, text) = strip_connective(segment);
                    if connective == Some(Connective::And) {
                        all_required = true;
                    }
                    Clause::new(text)
                })
                .collect();

            if all_required {
                Ok(RangeExpression::AllOf(clauses))
            } else {
                Ok(RangeExpression::AnyOf(clauses))
            }
        }
    }
}

// ============================================================================
// Gender dispatch
// ============================================================================

fn gender_dispatch(input: &str) -> RangeResult<Option<RangeExpression>> {
    // '/' is tried first when present, then ','.
    let separators = if input.contains('/') {
        ['/', ',']
    } else {
        [',', '/']
    };

    for separator in separators {
        let segments = split_segments(input, separator);
        let tagged: Vec<(Option<Gender>, &str)> =
            segments.iter().map(|s| gender_marker(s)).collect();

        if tagged.iter().all(|(gender, _)| gender.is_none()) {
            continue;
        }

        // A marker left inside a segment means the separators are mixed,
        // as in `남 13~17, 여 12~16 / 기타`.
        let other = if separator == '/' { ',' } else { '/' };
        if let Some(&(_, text)) = tagged.iter().find(|(_, text)| has_gender_marker(text, other)) {
            return Err(RangeError::ParseError {
                position: input.find(text).unwrap_or(0),
                message: format!("segment '{}' mixes gender branches", text),
            });
        }

        return by_gender(input, &tagged).map(Some);
    }

    Ok(None)
}

fn has_gender_marker(text: &str, separator: char) -> bool {
    split_segments(text, separator)
        .iter()
        .any(|segment| gender_marker(segment).0.is_some())
}

fn by_gender(input: &str, tagged: &[(Option<Gender>, &str)]) -> RangeResult<RangeExpression> {
    let mut male: Option<&str> = None;
    let mut female: Option<&str> = None;
    let mut unmarked: Vec<&str> = Vec::new();

    for &(gender, text) in tagged {
        let (gender, slot) = match gender {
            Some(g @ Gender::Male) => (g, &mut male),
            Some(g @ Gender::Female) => (g, &mut female),
            None => {
                unmarked.push(text);
                continue;
            }
        };
        if slot.replace(text).is_some() {
            return Err(RangeError::DuplicateGender(gender));
        }
    }

    // One unmarked segment next to a marked one belongs to the other gender.
    match unmarked.as_slice() {
        [] => {}
        [text] if male.is_none() && female.is_some() => male = Some(*text),
        [text] if female.is_none() && male.is_some() => female = Some(*text),
        [text, ..] => {
            return Err(RangeError::ParseError {
                position: input.find(text).unwrap_or(0),
                message: format!("segment '{}' has no gender marker", text),
            });
        }
    }

    let branch = |text: Option<&str>| -> RangeResult<Option<Box<RangeExpression>>> {
        text.map(|t| alternatives(t).map(Box::new)).transpose()
    };

    Ok(RangeExpression::ByGender {
        male: branch(male)?,
        female: branch(female)?,
    })
}

/// Splits a gender marker off a segment, either as a prefix (`남 90미만`,
/// `여자: 85미만`, `(남) 90미만`) or as a parenthesized suffix (`90미만(남)`).
fn gender_marker(segment: &str) -> (Option<Gender>, &str) {
    if let Ok((rest, gender)) = gender_prefix(segment) {
        return (Some(gender), rest.trim());
    }

    let trimmed = segment.trim_end();
    if trimmed.ends_with(')') {
        if let Some(open) = trimmed.rfind('(') {
            if let Ok((_, gender)) = all_consuming(parenthesized_gender)(&trimmed[open..]) {
                return (Some(gender), trimmed[..open].trim());
            }
        }
    }

    (None, segment)
}

fn gender_word(input: &str) -> IResult<&str, Gender> {
    alt((
        value(Gender::Male, alt((tag("남성"), tag("남자"), tag("남")))),
        value(Gender::Female, alt((tag("여성"), tag("여자"), tag("여")))),
    ))(input)
}

fn parenthesized_gender(input: &str) -> IResult<&str, Gender> {
    alt((
        delimited(char('('), gender_word, char(')')),
        delimited(char('['), gender_word, char(']')),
    ))(input)
}

fn gender_prefix(input: &str) -> IResult<&str, Gender> {
    let (input, gender) = alt((
        parenthesized_gender,
        // A bare marker must not run into another syllable (e.g. `여부`).
        terminated(gender_word, peek(not(satisfy(is_hangul_syllable)))),
    ))(input)?;
    let (input, _) = ws(input)?;
    let (input, _) = opt(char(':'))(input)?;
    let (input, _) = ws(input)?;
    Ok((input, gender))
}

fn is_hangul_syllable(c: char) -> bool {
    ('\u{AC00}'..='\u{D7A3}').contains(&c)
}

// ============================================================================
// Connectives
// ============================================================================

fn connective(input: &str) -> IResult<&str, Connective> {
    alt((
        value(Connective::And, alt((tag("이며"), tag("그리고")))),
        value(Connective::Or, alt((tag("또는"), tag("혹은")))),
    ))(input)
}

/// Strips a connective keyword from either end of a segment.
fn strip_connective(segment: &str) -> (Option<Connective>, &str) {
    let segment = segment.trim();

    if let Ok((rest, found)) = terminated(connective, ws)(segment) {
        return (Some(found), rest.trim());
    }

    for (keyword, found) in [
        ("이며", Connective::And),
        ("그리고", Connective::And),
        ("또는", Connective::Or),
        ("혹은", Connective::Or),
    ] {
        if let Some(rest) = segment.strip_suffix(keyword) {
            return (Some(found), rest.trim_end());
        }
    }

    (None, segment)
}

// ============================================================================
// Threshold clauses
// ============================================================================

fn threshold(input: &str) -> IResult<&str, ParsedInterval> {
    delimited(
        ws,
        terminated(
            alt((
                bounded_threshold,
                suffix_threshold,
                range_threshold,
                operator_threshold,
            )),
            opt(preceded(ws, unit)),
        ),
        ws,
    )(input)
}

/// `n미만`, `n이상`, `n이하`, `n초과`, optionally with a unit before the
/// suffix (`90cm 미만`)
fn suffix_threshold(input: &str) -> IResult<&str, ParsedInterval> {
    let (input, n) = terminated(number, opt(preceded(ws, unit)))(input)?;
    let (input, _) = ws(input)?;
    alt((
        value(ParsedInterval::below(n), tag("미만")),
        value(ParsedInterval::at_least(n), tag("이상")),
        value(ParsedInterval::at_most(n), tag("이하")),
        value(ParsedInterval::above(n), tag("초과")),
    ))(input)
}

/// Two suffix clauses bounding both ends, e.g. `100이상 126미만`
fn bounded_threshold(input: &str) -> IResult<&str, ParsedInterval> {
    map_opt(
        separated_pair(suffix_threshold, ws, suffix_threshold),
        |(a, b)| join_half_lines(a, b),
    )(input)
}

/// Joins a lower half-line with an upper half-line, in either order.
fn join_half_lines(a: ParsedInterval, b: ParsedInterval) -> Option<ParsedInterval> {
    let (lower, upper) = match (a, b) {
        (
            ParsedInterval {
                lower,
                upper: Bound::Unbounded,
            },
            ParsedInterval {
                lower: Bound::Unbounded,
                upper,
            },
        )
        | (
            ParsedInterval {
                lower: Bound::Unbounded,
                upper,
            },
            ParsedInterval {
                lower,
                upper: Bound::Unbounded,
            },
        ) => (lower, upper),
        _ => return None,
    };
    if matches!(lower, Bound::Unbounded) || matches!(upper, Bound::Unbounded) {
        return None;
    }
    Some(ParsedInterval { lower, upper })
}

/// `a~b` or `a-b`
fn range_threshold(input: &str) -> IResult<&str, ParsedInterval> {
    map(
        separated_pair(
            number,
            delimited(ws, alt((char('~'), char('～'), char('-'))), ws),
            number,
        ),
        |(a, b)| ParsedInterval::closed(a, b),
    )(input)
}

#[derive(Debug, Clone, Copy)]
enum ComparisonOp {
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
}

fn comparison_operator(input: &str) -> IResult<&str, ComparisonOp> {
    alt((
        // Order matters - longer matches first
        value(ComparisonOp::LessThanOrEqual, alt((tag("<="), tag("≤")))),
        value(ComparisonOp::GreaterThanOrEqual, alt((tag(">="), tag("≥")))),
        value(ComparisonOp::LessThan, char('<')),
        value(ComparisonOp::GreaterThan, char('>')),
    ))(input)
}

/// `>=n`, `<=n`, `>n`, `<n`
fn operator_threshold(input: &str) -> IResult<&str, ParsedInterval> {
    let (input, op) = comparison_operator(input)?;
    let (input, n) = preceded(ws, number)(input)?;

    let interval = match op {
        ComparisonOp::LessThan => ParsedInterval::below(n),
        ComparisonOp::LessThanOrEqual => ParsedInterval::at_most(n),
        ComparisonOp::GreaterThan => ParsedInterval::above(n),
        ComparisonOp::GreaterThanOrEqual => ParsedInterval::at_least(n),
    };
    Ok((input, interval))
}

/// Decimal number; non-finite values are rejected.
fn number(input: &str) -> IResult<&str, f64> {
    map_opt(
        recognize(pair(digit1, opt(pair(char('.'), digit1)))),
        |s: &str| s.parse::<f64>().ok().filter(|v| v.is_finite()),
    )(input)
}

/// Unit such as `mg`, `cm`, `%` or `mg/dL`.
fn unit(input: &str) -> IResult<&str, &str> {
    recognize(pair(unit_word, opt(pair(char('/'), unit_word))))(input)
}

fn unit_word(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphabetic() || c == '%')(input)
}

// ============================================================================
// Measured quantities
// ============================================================================

/// Parse a measured value such as `87`, `-1.5`, `1,200`, `7.2%` or `95 mg/dL`.
///
/// A trailing unit is accepted and discarded. Returns `None` for anything
/// that is not exactly one finite number with an optional unit.
///
/// # Examples
///
/// ```rust
/// use refrange::parse_quantity;
///
/// assert_eq!(parse_quantity("7.2%"), Some(7.2));
/// assert_eq!(parse_quantity("95 mg/dL"), Some(95.0));
/// assert_eq!(parse_quantity("1,200"), Some(1200.0));
/// assert_eq!(parse_quantity("음성"), None);
/// ```
pub fn parse_quantity(input: &str) -> Option<f64> {
    all_consuming(delimited(
        ws,
        terminated(signed_number, opt(preceded(ws, unit))),
        ws,
    ))(input)
    .ok()
    .map(|(_, n)| n)
}

/// Optionally signed decimal with `,` thousands separators.
fn signed_number(input: &str) -> IResult<&str, f64> {
    map_opt(
        recognize(tuple((
            opt(alt((char('-'), char('+')))),
            digit1,
            many0(pair(char(','), digit1)),
            opt(pair(char('.'), digit1)),
        ))),
        |s: &str| {
            s.replace(',', "")
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
        },
    )(input)
}

// ============================================================================
// Whitespace handling
// ============================================================================

/// Optional whitespace
fn ws(input: &str) -> IResult<&str, &str> {
    multispace0(input)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Threshold clauses
    // ========================================================================

    mod thresholds {
        use super::*;

        #[test]
        fn test_below() {
            let interval = parse_threshold("90미만").unwrap();
            assert_eq!(interval, ParsedInterval::below(90.0));
        }

        #[test]
        fn test_below_with_space_and_decimal() {
            let interval = parse_threshold(" 18.5 미만 ").unwrap();
            assert_eq!(interval, ParsedInterval::below(18.5));
        }

        #[test]
        fn test_at_least() {
            let interval = parse_threshold("140이상").unwrap();
            assert_eq!(interval, ParsedInterval::at_least(140.0));
        }

        #[test]
        fn test_at_most_and_above() {
            assert_eq!(parse_threshold("40이하"), Some(ParsedInterval::at_most(40.0)));
            assert_eq!(parse_threshold("1.2초과"), Some(ParsedInterval::above(1.2)));
        }

        #[test]
        fn test_tilde_range() {
            let interval = parse_threshold("25~29.9").unwrap();
            assert_eq!(interval, ParsedInterval::closed(25.0, 29.9));
        }

        #[test]
        fn test_hyphen_range() {
            let interval = parse_threshold("100 - 125").unwrap();
            assert!(interval.contains(100.0));
            assert!(interval.contains(125.0));
            assert!(!interval.contains(125.1));
        }

        #[test]
        fn test_operators() {
            assert_eq!(parse_threshold(">=126"), Some(ParsedInterval::at_least(126.0)));
            assert_eq!(parse_threshold("<= 40"), Some(ParsedInterval::at_most(40.0)));
            assert_eq!(parse_threshold("> 5"), Some(ParsedInterval::above(5.0)));
            assert_eq!(parse_threshold("<100"), Some(ParsedInterval::below(100.0)));
            assert_eq!(parse_threshold("≥ 6.5"), Some(ParsedInterval::at_least(6.5)));
        }

        #[test]
        fn test_trailing_unit() {
            assert_eq!(
                parse_threshold("5.7~6.4 %"),
                Some(ParsedInterval::closed(5.7, 6.4))
            );
            assert_eq!(parse_threshold("100미만 mg"), Some(ParsedInterval::below(100.0)));
        }

        #[test]
        fn test_not_numeric() {
            assert!(parse_threshold("음성").is_none());
            assert!(parse_threshold("정상, 비활동성").is_none());
            assert!(parse_threshold("").is_none());
        }

        #[test]
        fn test_trailing_garbage_rejected() {
            assert!(parse_threshold("90미만 이하").is_none());
            assert!(parse_threshold("약 90").is_none());
        }

        #[test]
        fn test_suffix_wins_over_hyphen_range() {
            // Only the suffix form fits; the hyphen reading must not be tried
            // on a partially consumed clause.
            assert_eq!(parse_threshold("90미만"), Some(ParsedInterval::below(90.0)));
            assert!(parse_threshold("90미만-100").is_none());
        }

        #[test]
        fn test_unit_before_suffix() {
            assert_eq!(parse_threshold("90cm 미만"), Some(ParsedInterval::below(90.0)));
            assert_eq!(parse_threshold("85 cm이상"), Some(ParsedInterval::at_least(85.0)));
            assert_eq!(
                parse_threshold("126mg/dL 이상"),
                Some(ParsedInterval::at_least(126.0))
            );
        }

        #[test]
        fn test_two_sided_suffix_clause() {
            let interval = parse_threshold("100이상 126미만").unwrap();
            assert_eq!(interval.lower, Bound::Included(100.0));
            assert_eq!(interval.upper, Bound::Excluded(126.0));
            assert!(interval.contains(100.0));
            assert!(interval.contains(125.9));
            assert!(!interval.contains(126.0));
            assert!(!interval.contains(1.0));
        }

        #[test]
        fn test_two_sided_suffix_clause_any_order() {
            let interval = parse_threshold("2.0이하 1.0초과").unwrap();
            assert_eq!(interval.lower, Bound::Excluded(1.0));
            assert_eq!(interval.upper, Bound::Included(2.0));
        }

        #[test]
        fn test_two_lower_bounds_rejected() {
            assert!(parse_threshold("100이상 126이상").is_none());
            assert!(parse_threshold("100미만 126이하").is_none());
        }
    }

    // ========================================================================
    // Measured quantities
    // ========================================================================

    mod quantities {
        use super::*;

        #[test]
        fn test_plain_numbers() {
            assert_eq!(parse_quantity("87"), Some(87.0));
            assert_eq!(parse_quantity(" 5.6 "), Some(5.6));
            assert_eq!(parse_quantity("-1.5"), Some(-1.5));
            assert_eq!(parse_quantity("1,200"), Some(1200.0));
        }

        #[test]
        fn test_trailing_unit_discarded() {
            assert_eq!(parse_quantity("7.2%"), Some(7.2));
            assert_eq!(parse_quantity("7.2 %"), Some(7.2));
            assert_eq!(parse_quantity("87cm"), Some(87.0));
            assert_eq!(parse_quantity("95 mg/dL"), Some(95.0));
        }

        #[test]
        fn test_not_a_quantity() {
            assert_eq!(parse_quantity("음성"), None);
            assert_eq!(parse_quantity("1+"), None);
            assert_eq!(parse_quantity(","), None);
            assert_eq!(parse_quantity("118/79"), None);
            assert_eq!(parse_quantity("cm"), None);
            assert_eq!(parse_quantity(""), None);
        }
    }

    // ========================================================================
    // Alternatives and connectives
    // ========================================================================

    mod alternatives {
        use super::*;

        #[test]
        fn test_single_clause() {
            let expr = parse("100미만").unwrap();
            match expr {
                RangeExpression::Clause(clause) => {
                    assert_eq!(clause.interval, Some(ParsedInterval::below(100.0)));
                }
                _ => panic!("Expected Clause"),
            }
        }

        #[test]
        fn test_or_alternatives() {
            let expr = parse("18.5미만/25~29.9").unwrap();
            match expr {
                RangeExpression::AnyOf(clauses) => {
                    assert_eq!(clauses.len(), 2);
                    assert_eq!(clauses[0].text, "18.5미만");
                    assert_eq!(clauses[1].text, "25~29.9");
                }
                _ => panic!("Expected AnyOf"),
            }
        }

        #[test]
        fn test_or_keyword_stripped() {
            let expr = parse("140이상 또는 /90이상").unwrap();
            match expr {
                RangeExpression::AnyOf(clauses) => {
                    assert_eq!(clauses[0].text, "140이상");
                    assert!(clauses.iter().all(Clause::is_numeric));
                }
                _ => panic!("Expected AnyOf"),
            }
        }

        #[test]
        fn test_and_connective_builds_all_of() {
            let expr = parse("60이상 이며/100미만").unwrap();
            match expr {
                RangeExpression::AllOf(clauses) => {
                    assert_eq!(clauses[0].interval, Some(ParsedInterval::at_least(60.0)));
                    assert_eq!(clauses[1].interval, Some(ParsedInterval::below(100.0)));
                }
                _ => panic!("Expected AllOf"),
            }
        }

        #[test]
        fn test_qualitative_alternatives() {
            let expr = parse("음성/약양성").unwrap();
            match expr {
                RangeExpression::AnyOf(clauses) => {
                    assert!(clauses.iter().all(|c| !c.is_numeric()));
                }
                _ => panic!("Expected AnyOf"),
            }
        }

        #[test]
        fn test_empty_segments_ignored() {
            let expr = parse("90미만/").unwrap();
            assert!(matches!(expr, RangeExpression::Clause(_)));
        }

        #[test]
        fn test_display_roundtrip_of_and() {
            let expr = parse("60이상   이며/100미만").unwrap();
            assert_eq!(expr.to_string(), "60이상 이며/100미만");
        }
    }

    // ========================================================================
    // Gender dispatch
    // ========================================================================

    mod gender {
        use super::*;

        #[test]
        fn test_prefix_markers() {
            let expr = parse("남 90미만 / 여 85미만").unwrap();
            let male = expr.for_gender(Gender::Male).unwrap();
            let female = expr.for_gender(Gender::Female).unwrap();
            assert_eq!(male.to_string(), "90미만");
            assert_eq!(female.to_string(), "85미만");
        }

        #[test]
        fn test_marker_with_colon_and_word() {
            let expr = parse("남자: 13~17 / 여자: 12~16").unwrap();
            assert_eq!(expr.for_gender(Gender::Male).unwrap().to_string(), "13~17");
            assert_eq!(expr.for_gender(Gender::Female).unwrap().to_string(), "12~16");
        }

        #[test]
        fn test_suffix_markers() {
            let expr = parse("90미만(남)/85미만(여)").unwrap();
            assert_eq!(expr.for_gender(Gender::Male).unwrap().to_string(), "90미만");
            assert_eq!(expr.for_gender(Gender::Female).unwrap().to_string(), "85미만");
        }

        #[test]
        fn test_comma_separated_gender_branches() {
            let expr = parse("남 1.2이하, 여 1.0이하").unwrap();
            assert_eq!(expr.for_gender(Gender::Male).unwrap().to_string(), "1.2이하");
            assert_eq!(expr.for_gender(Gender::Female).unwrap().to_string(), "1.0이하");
        }

        #[test]
        fn test_unmarked_side_goes_to_other_gender() {
            let expr = parse("남 90미만 / 85미만").unwrap();
            assert_eq!(expr.for_gender(Gender::Female).unwrap().to_string(), "85미만");
        }

        #[test]
        fn test_single_gender_only() {
            let expr = parse("여 85미만").unwrap();
            assert!(expr.for_gender(Gender::Male).is_none());
            assert!(expr.for_gender(Gender::Female).is_some());
        }

        #[test]
        fn test_duplicate_gender() {
            let result = parse("남 90미만 / 남 85미만");
            assert!(matches!(result, Err(RangeError::DuplicateGender(Gender::Male))));
        }

        #[test]
        fn test_too_many_unmarked_segments() {
            let result = parse("남 90미만 / 85미만 / 80미만");
            assert!(matches!(result, Err(RangeError::ParseError { .. })));
        }

        #[test]
        fn test_mixed_separators_rejected() {
            let result = parse("남 13~17, 여 12~16 / 기타");
            assert!(matches!(result, Err(RangeError::ParseError { position: 4, .. })));

            let result = parse("남 18.5미만/25이상, 여 17미만");
            assert!(matches!(result, Err(RangeError::ParseError { .. })));
        }

        #[test]
        fn test_commas_inside_gender_branch() {
            let expr = parse("남 정상, 비활동성 / 여 음성").unwrap();
            let male = expr.for_gender(Gender::Male).unwrap();
            assert_eq!(male.to_string(), "정상, 비활동성");
        }

        #[test]
        fn test_marker_must_not_run_into_word() {
            // `여부` is not a gender marker.
            let expr = parse("여부 확인").unwrap();
            assert!(!expr.is_gendered());
        }

        #[test]
        fn test_resolve_clauses() {
            let clauses = resolve_clauses("남 90미만 / 여 85미만", Gender::Male).unwrap();
            assert_eq!(clauses, vec!["90미만".to_string()]);

            let clauses = resolve_clauses("여 85미만", Gender::Male).unwrap();
            assert!(clauses.is_empty());
        }
    }

    // ========================================================================
    // Paired expressions
    // ========================================================================

    mod paired {
        use super::*;

        #[test]
        fn test_and_paired() {
            let expr = parse_paired("120미만 이며/80미만").unwrap();
            assert_eq!(expr.connective, Connective::And);
            assert_eq!(expr.first.interval, Some(ParsedInterval::below(120.0)));
            assert_eq!(expr.second.interval, Some(ParsedInterval::below(80.0)));
        }

        #[test]
        fn test_or_paired() {
            let expr = parse_paired("140이상 또는 /90이상").unwrap();
            assert_eq!(expr.connective, Connective::Or);
            assert_eq!(expr.first.interval, Some(ParsedInterval::at_least(140.0)));
        }

        #[test]
        fn test_connective_on_right_side() {
            let expr = parse_paired("120~139 / 또는 80~89").unwrap();
            assert_eq!(expr.connective, Connective::Or);
            assert_eq!(expr.second.text, "80~89");
        }

        #[test]
        fn test_missing_connective_defaults_to_or() {
            let expr = parse_paired("130이상/85이상").unwrap();
            assert_eq!(expr.connective, Connective::Or);
        }

        #[test]
        fn test_not_paired() {
            assert!(matches!(
                parse_paired("120미만"),
                Err(RangeError::NotPaired { segments: 1 })
            ));
            assert!(matches!(
                parse_paired("1/2/3"),
                Err(RangeError::NotPaired { segments: 3 })
            ));
        }

        #[test]
        fn test_display() {
            let expr = parse_paired("120미만 이며/80미만").unwrap();
            assert_eq!(expr.to_string(), "120미만 이며/80미만");
        }
    }

    // ========================================================================
    // Error handling
    // ========================================================================

    mod error_handling {
        use super::*;

        #[test]
        fn test_empty_input() {
            assert!(matches!(parse(""), Err(RangeError::EmptyExpression)));
            assert!(matches!(parse_paired(""), Err(RangeError::EmptyExpression)));
        }

        #[test]
        fn test_whitespace_only() {
            assert!(matches!(parse("   "), Err(RangeError::EmptyExpression)));
        }

        #[test]
        fn test_separators_only() {
            assert!(matches!(parse(" / / "), Err(RangeError::EmptyExpression)));
        }

        #[test]
        fn test_unparseable_clause_is_textual_not_error() {
            let expr = parse("해당없음").unwrap();
            match expr {
                RangeExpression::Clause(clause) => assert!(!clause.is_numeric()),
                _ => panic!("Expected Clause"),
            }
        }
    }
}
