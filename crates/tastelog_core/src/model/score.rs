//! Score parsing and validation.
//!
//! # Responsibility
//! - Turn free-text score input into a validated decimal.
//! - Own the [1.0, 5.0] range constraint and the one-decimal rounding rule.
//!
//! # Invariants
//! - `parse_score` never returns a value outside [`SCORE_MIN`, `SCORE_MAX`].
//! - Accepted scores are always rounded to one decimal place.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Lowest score a record may carry.
pub const SCORE_MIN: f64 = 1.0;
/// Highest score a record may carry.
pub const SCORE_MAX: f64 = 5.0;

/// Typed failure for score input validation.
///
/// Callers loop on this instead of suppressing parse failures: the shell
/// reprompts until `parse_score` succeeds.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoreParseError {
    /// Input did not parse as a decimal number.
    NotNumeric(String),
    /// Input parsed but lies outside [`SCORE_MIN`, `SCORE_MAX`].
    OutOfRange(f64),
}

impl Display for ScoreParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotNumeric(input) => write!(f, "`{input}` is not a number"),
            Self::OutOfRange(value) => {
                write!(f, "score {value} is outside {SCORE_MIN}..={SCORE_MAX}")
            }
        }
    }
}

impl Error for ScoreParseError {}

/// Rounds a score to one decimal place.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Parses and validates free-text score input.
///
/// # Contract
/// - Surrounding whitespace is trimmed before parsing.
/// - Non-numeric input fails as `NotNumeric`.
/// - Values outside [`SCORE_MIN`, `SCORE_MAX`] fail as `OutOfRange` before
///   any rounding is applied.
/// - The accepted value is returned rounded to one decimal place.
pub fn parse_score(input: &str) -> Result<f64, ScoreParseError> {
    let trimmed = input.trim();
    let value: f64 = trimmed
        .parse()
        .map_err(|_| ScoreParseError::NotNumeric(trimmed.to_string()))?;

    if !(SCORE_MIN..=SCORE_MAX).contains(&value) {
        return Err(ScoreParseError::OutOfRange(value));
    }

    Ok(round_to_tenth(value))
}
