//! # refrange
//!
//! A Rust library for parsing the free-text clinical reference ranges found in
//! Korean health-screening results.
//!
//! Providers publish each tier of a metric as human-authored text rather than
//! structured min/max fields. This crate turns that text into a small AST:
//!
//! - **Threshold clauses**: `90미만`, `140이상`, `25~29.9`, `>=126`
//! - **Alternatives**: `18.5미만/25~29.9` (either clause)
//! - **Gender branches**: `남 90미만 / 여 85미만`
//! - **Paired measurements**: `120미만 이며/80미만` (systolic AND diastolic)
//!
//! ## Usage
//!
//! ```rust
//! use refrange::{parse, parse_paired, parse_threshold, Gender, RangeExpression};
//!
//! // A single threshold clause
//! let interval = parse_threshold("18.5미만").unwrap();
//! assert!(interval.contains(17.0));
//!
//! // A gender-specific band
//! let expr = parse("남 90미만 / 여 85미만").unwrap();
//! let female = expr.for_gender(Gender::Female).unwrap();
//! assert!(matches!(female, RangeExpression::Clause(_)));
//!
//! // A blood-pressure band
//! let bp = parse_paired("120미만 이며/80미만").unwrap();
//! assert!(bp.first.interval.unwrap().contains(118.0));
//! ```
//!
//! ## Grammar Quick Reference
//!
//! | Form | Meaning | Example |
//! |------|---------|---------|
//! | `n미만` | below (exclusive) | `100미만` |
//! | `n이상` | at least (inclusive) | `126이상` |
//! | `n이하` | at most (inclusive) | `40이하` |
//! | `n초과` | above (exclusive) | `1.2초과` |
//! | `a이상 b미만` | two-sided | `100이상 126미만` |
//! | `a~b`, `a-b` | closed range | `100~125` |
//! | `>=`, `<=`, `>`, `<` | half-line | `>=6.5` |
//! | `/` | alternatives (OR) | `18.5미만/25~29.9` |
//! | `이며` | conjunction (AND) | `120미만 이며/80미만` |
//! | `또는` | disjunction (OR) | `140이상 또는 /90이상` |
//! | `남`, `여` | gender branch | `남 90미만 / 여 85미만` |
//!
//! Units are tolerated after a number (`90cm 미만`) or a clause (`5.7~6.4 %`),
//! and [`parse_quantity`] reads measured values such as `7.2%` or `95 mg/dL`.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod ast;
mod error;
mod parser;

pub use ast::{
    Clause, Connective, Gender, PairedExpression, ParsedInterval, RangeExpression,
};
pub use error::{RangeError, RangeResult};
pub use parser::{parse, parse_paired, parse_quantity, parse_threshold, resolve_clauses};
