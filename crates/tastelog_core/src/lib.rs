//! Core domain logic for tastelog.
//! This crate is the single source of truth for rating invariants.

pub mod csvio;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod viz;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::restaurant::{
    Restaurant, RestaurantDraft, RestaurantId, RestaurantValidationError,
};
pub use model::score::{parse_score, round_to_tenth, ScoreParseError, SCORE_MAX, SCORE_MIN};
pub use repo::restaurant_repo::{
    RepoError, RepoResult, RestaurantRepository, SqliteRestaurantRepository,
};
pub use service::restaurant_service::RestaurantService;
pub use viz::histogram::{bucket_scores, render_histogram, HistogramConfig, BIN_COUNT};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
