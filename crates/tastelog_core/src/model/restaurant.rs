//! Restaurant record model.
//!
//! # Responsibility
//! - Define the canonical rating record persisted by the repository layer.
//! - Validate name/score invariants before any write.
//!
//! # Invariants
//! - `id` is assigned by storage on insert and never changes afterwards.
//! - `name` is never empty.
//! - `score` stays inside [`SCORE_MIN`, `SCORE_MAX`].

use crate::model::score::{SCORE_MAX, SCORE_MIN};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage-assigned identifier for a persisted restaurant record.
pub type RestaurantId = i64;

/// Validation failure for restaurant writes.
#[derive(Debug, Clone, PartialEq)]
pub enum RestaurantValidationError {
    /// Name is empty or whitespace-only.
    EmptyName,
    /// Score lies outside the allowed range.
    ScoreOutOfRange(f64),
}

impl Display for RestaurantValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "restaurant name must not be empty"),
            Self::ScoreOutOfRange(score) => {
                write!(f, "score {score} is outside {SCORE_MIN}..={SCORE_MAX}")
            }
        }
    }
}

impl Error for RestaurantValidationError {}

/// A persisted rating record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    /// Stable storage-assigned id.
    pub id: RestaurantId,
    /// Display name.
    pub name: String,
    /// Rating in [1.0, 5.0], rounded to one decimal place.
    pub score: f64,
}

impl Restaurant {
    /// Checks record invariants before persistence.
    pub fn validate(&self) -> Result<(), RestaurantValidationError> {
        validate_fields(&self.name, self.score)
    }
}

/// A rating record that has not been persisted yet, so it carries no id.
#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantDraft {
    /// Display name.
    pub name: String,
    /// Rating in [1.0, 5.0].
    pub score: f64,
}

impl RestaurantDraft {
    /// Creates a draft from raw name and score input.
    pub fn new(name: impl Into<String>, score: f64) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }

    /// Checks draft invariants before persistence.
    pub fn validate(&self) -> Result<(), RestaurantValidationError> {
        validate_fields(&self.name, self.score)
    }
}

fn validate_fields(name: &str, score: f64) -> Result<(), RestaurantValidationError> {
    if name.trim().is_empty() {
        return Err(RestaurantValidationError::EmptyName);
    }
    if !(SCORE_MIN..=SCORE_MAX).contains(&score) {
        return Err(RestaurantValidationError::ScoreOutOfRange(score));
    }
    Ok(())
}
