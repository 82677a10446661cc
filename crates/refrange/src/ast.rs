//! Syntax tree types for reference-range expressions.

use std::ops::{Bound, RangeBounds};
use std::str::FromStr;

use crate::error::RangeError;
use crate::parser::parse_threshold;

// =============================================================================
// Gender
// =============================================================================

/// Patient gender used to select gender-specific reference branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Gender {
    /// Male (`M`, `남`).
    #[cfg_attr(feature = "serde", serde(rename = "M"))]
    Male,
    /// Female (`F`, `여`).
    #[cfg_attr(feature = "serde", serde(rename = "F"))]
    Female,
}

impl Gender {
    /// The Korean marker used for this gender in provider text.
    pub fn marker(&self) -> &'static str {
        match self {
            Gender::Male => "남",
            Gender::Female => "여",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Male => write!(f, "M"),
            Gender::Female => write!(f, "F"),
        }
    }
}

impl FromStr for Gender {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "M" | "m" | "male" | "Male" | "MALE" | "남" | "남자" | "남성" => Ok(Gender::Male),
            "F" | "f" | "female" | "Female" | "FEMALE" | "여" | "여자" | "여성" => {
                Ok(Gender::Female)
            }
            other => Err(RangeError::InvalidGender(other.to_string())),
        }
    }
}

// =============================================================================
// Intervals
// =============================================================================

/// A numeric interval derived from one threshold clause.
///
/// Infinite ends are represented by [`Bound::Unbounded`].
///
/// | Clause | Interval |
/// |--------|----------|
/// | `90미만` | `(-∞, 90)` |
/// | `140이상` | `[140, ∞)` |
/// | `18.5~24.9` | `[18.5, 24.9]` |
/// | `>=126` | `[126, ∞)` |
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParsedInterval {
    /// Lower end.
    pub lower: Bound<f64>,
    /// Upper end.
    pub upper: Bound<f64>,
}

impl ParsedInterval {
    /// `(-∞, n)`
    pub fn below(n: f64) -> Self {
        Self {
            lower: Bound::Unbounded,
            upper: Bound::Excluded(n),
        }
    }

    /// `(-∞, n]`
    pub fn at_most(n: f64) -> Self {
        Self {
            lower: Bound::Unbounded,
            upper: Bound::Included(n),
        }
    }

    /// `[n, ∞)`
    pub fn at_least(n: f64) -> Self {
        Self {
            lower: Bound::Included(n),
            upper: Bound::Unbounded,
        }
    }

    /// `(n, ∞)`
    pub fn above(n: f64) -> Self {
        Self {
            lower: Bound::Excluded(n),
            upper: Bound::Unbounded,
        }
    }

    /// `[min(a, b), max(a, b)]`
    pub fn closed(a: f64, b: f64) -> Self {
        Self {
            lower: Bound::Included(a.min(b)),
            upper: Bound::Included(a.max(b)),
        }
    }

    /// Lower bound value, `-∞` when unbounded.
    pub fn lower_bound(&self) -> f64 {
        match self.lower {
            Bound::Included(v) | Bound::Excluded(v) => v,
            Bound::Unbounded => f64::NEG_INFINITY,
        }
    }

    /// Upper bound value, `+∞` when unbounded.
    pub fn upper_bound(&self) -> f64 {
        match self.upper {
            Bound::Included(v) | Bound::Excluded(v) => v,
            Bound::Unbounded => f64::INFINITY,
        }
    }

    /// Whether the lower bound itself belongs to the interval.
    pub fn lower_inclusive(&self) -> bool {
        matches!(self.lower, Bound::Included(_))
    }

    /// Whether the upper bound itself belongs to the interval.
    pub fn upper_inclusive(&self) -> bool {
        matches!(self.upper, Bound::Included(_))
    }

    /// Checks if a value lies inside the interval. `NaN` never does.
    pub fn contains(&self, x: f64) -> bool {
        !x.is_nan() && <Self as RangeBounds<f64>>::contains(self, &x)
    }
}

impl RangeBounds<f64> for ParsedInterval {
    fn start_bound(&self) -> Bound<&f64> {
        self.lower.as_ref()
    }

    fn end_bound(&self) -> Bound<&f64> {
        self.upper.as_ref()
    }
}

impl std::fmt::Display for ParsedInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.lower {
            Bound::Included(v) => write!(f, "[{}", v)?,
            Bound::Excluded(v) => write!(f, "({}", v)?,
            Bound::Unbounded => write!(f, "(-∞")?,
        }
        match self.upper {
            Bound::Included(v) => write!(f, ", {}]", v),
            Bound::Excluded(v) => write!(f, ", {})", v),
            Bound::Unbounded => write!(f, ", ∞)"),
        }
    }
}

// =============================================================================
// Clauses and expressions
// =============================================================================

/// A single alternative-free, gender-free clause.
///
/// `interval` is `None` when the text is not a numeric threshold; such clauses
/// are matched as qualitative text (e.g. `음성`, `정상, 비활동성`).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Clause {
    /// Source text of the clause, trimmed.
    pub text: String,
    /// Numeric interval, if the clause is a threshold.
    pub interval: Option<ParsedInterval>,
}

impl Clause {
    /// Creates a clause from text, parsing its threshold if it has one.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into().trim().to_string();
        let interval = parse_threshold(&text);
        Self { text, interval }
    }

    /// Returns true if the clause is a numeric threshold.
    pub fn is_numeric(&self) -> bool {
        self.interval.is_some()
    }
}

impl std::fmt::Display for Clause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// A parsed reference-range expression for one band.
///
/// # Example
///
/// ```rust
/// use refrange::{parse, Gender, RangeExpression};
///
/// let expr = parse("남 90미만 / 여 85미만").unwrap();
/// assert!(matches!(expr, RangeExpression::ByGender { .. }));
///
/// let male = expr.for_gender(Gender::Male).unwrap();
/// assert_eq!(male.to_string(), "90미만");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RangeExpression {
    /// A single clause.
    Clause(Clause),
    /// `/`-separated alternatives; any one suffices.
    AnyOf(Vec<Clause>),
    /// `/`-separated clauses joined by `이며`; all must hold.
    AllOf(Vec<Clause>),
    /// Gender-specific branches. A missing branch never matches.
    ByGender {
        /// Branch for male patients.
        male: Option<Box<RangeExpression>>,
        /// Branch for female patients.
        female: Option<Box<RangeExpression>>,
    },
}

impl RangeExpression {
    /// Selects the branch that applies to `gender`.
    ///
    /// Expressions without gender markers apply to everyone and return
    /// themselves; a gender-specific expression without a branch for `gender`
    /// returns `None`.
    pub fn for_gender(&self, gender: Gender) -> Option<&RangeExpression> {
        match self {
            RangeExpression::ByGender { male, female } => match gender {
                Gender::Male => male.as_deref(),
                Gender::Female => female.as_deref(),
            },
            other => Some(other),
        }
    }

    /// Returns every clause in the expression, including all gender branches.
    pub fn clauses(&self) -> Vec<&Clause> {
        match self {
            RangeExpression::Clause(clause) => vec![clause],
            RangeExpression::AnyOf(clauses) | RangeExpression::AllOf(clauses) => {
                clauses.iter().collect()
            }
            RangeExpression::ByGender { male, female } => male
                .iter()
                .chain(female.iter())
                .flat_map(|branch| branch.clauses())
                .collect(),
        }
    }

    /// Returns true if the expression branches on gender.
    pub fn is_gendered(&self) -> bool {
        matches!(self, RangeExpression::ByGender { .. })
    }
}

impl std::fmt::Display for RangeExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RangeExpression::Clause(clause) => write!(f, "{}", clause),
            RangeExpression::AnyOf(clauses) => write_joined(f, clauses, "/"),
            RangeExpression::AllOf(clauses) => {
                write_joined(f, clauses, &format!(" {}/", Connective::And))
            }
            RangeExpression::ByGender { male, female } => {
                let mut first = true;
                for (gender, branch) in [(Gender::Male, male), (Gender::Female, female)] {
                    if let Some(branch) = branch {
                        if !first {
                            write!(f, " / ")?;
                        }
                        write!(f, "{} {}", gender.marker(), branch)?;
                        first = false;
                    }
                }
                Ok(())
            }
        }
    }
}

fn write_joined(
    f: &mut std::fmt::Formatter<'_>,
    clauses: &[Clause],
    separator: &str,
) -> std::fmt::Result {
    for (i, clause) in clauses.iter().enumerate() {
        if i > 0 {
            write!(f, "{}", separator)?;
        }
        write!(f, "{}", clause)?;
    }
    Ok(())
}

// =============================================================================
// Paired measurements
// =============================================================================

/// How the two sides of a paired expression are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Connective {
    /// `이며`: both sides must hold.
    And,
    /// `또는`: either side suffices.
    #[default]
    Or,
}

impl Connective {
    /// Combines the results of the two sides.
    pub fn combine(&self, first: bool, second: bool) -> bool {
        match self {
            Connective::And => first && second,
            Connective::Or => first || second,
        }
    }
}

impl std::fmt::Display for Connective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Connective::And => write!(f, "이며"),
            Connective::Or => write!(f, "또는"),
        }
    }
}

/// A band expression for a two-part measurement such as blood pressure.
///
/// Example: `120미만 이며/80미만` (systolic below 120 AND diastolic below 80).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PairedExpression {
    /// Clause for the first value (systolic).
    pub first: Clause,
    /// Clause for the second value (diastolic).
    pub second: Clause,
    /// How the two results are combined.
    pub connective: Connective,
}

impl std::fmt::Display for PairedExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}/{}", self.first, self.connective, self.second)
    }
}
