//! Error types for reference-range parsing.

use thiserror::Error;

use crate::ast::Gender;

/// Errors that can occur while parsing a reference-range expression.
///
/// A single clause that is simply not numeric is *not* an error: it becomes a
/// textual [`Clause`](crate::Clause) and is matched qualitatively. Errors are
/// reserved for expressions whose structure cannot be interpreted at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    /// Parse error at a specific position in the input.
    #[error("parse error at position {position}: {message}")]
    ParseError {
        /// Byte position in the input where the error occurred.
        position: usize,
        /// Description of the error.
        message: String,
    },

    /// Empty input provided (or only separators and whitespace).
    #[error("empty reference-range expression")]
    EmptyExpression,

    /// Two gender-marked segments claim the same gender.
    #[error("gender {0} is specified more than once")]
    DuplicateGender(Gender),

    /// A paired-measurement expression did not split into exactly two sides.
    #[error("expected two '/'-separated sides for a paired measurement, found {segments}")]
    NotPaired {
        /// Number of non-empty segments found.
        segments: usize,
    },

    /// Gender flag could not be recognized.
    #[error("invalid gender: {0}")]
    InvalidGender(String),
}

/// Result type for reference-range parsing.
pub type RangeResult<T> = std::result::Result<T, RangeError>;
