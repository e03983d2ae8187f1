//! Restaurant use-case service.
//!
//! # Responsibility
//! - Provide stable CRUD entry points for shell callers.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Service layer remains storage-agnostic.

use crate::model::restaurant::{Restaurant, RestaurantDraft, RestaurantId};
use crate::model::score::round_to_tenth;
use crate::repo::restaurant_repo::{RepoResult, RestaurantRepository};

/// Use-case service wrapper for restaurant CRUD operations.
pub struct RestaurantService<R: RestaurantRepository> {
    repo: R,
}

impl<R: RestaurantRepository> RestaurantService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registers a new restaurant and returns its storage-assigned id.
    ///
    /// # Contract
    /// - The score is rounded to one decimal place before persistence.
    /// - Name/range validation happens in the repository write path.
    pub fn register(&self, name: impl Into<String>, score: f64) -> RepoResult<RestaurantId> {
        let draft = RestaurantDraft::new(name, round_to_tenth(score));
        self.repo.create(&draft)
    }

    /// Gets one restaurant by stable id.
    pub fn get(&self, id: RestaurantId) -> RepoResult<Option<Restaurant>> {
        self.repo.get(id)
    }

    /// Lists all restaurants in insertion order.
    pub fn list(&self) -> RepoResult<Vec<Restaurant>> {
        self.repo.list()
    }

    /// Updates an existing restaurant by stable id.
    ///
    /// Returns repository-level not-found or validation errors unchanged.
    pub fn update(&self, record: &Restaurant) -> RepoResult<()> {
        self.repo.update(record)
    }

    /// Hard-deletes a restaurant by id.
    pub fn delete(&self, id: RestaurantId) -> RepoResult<()> {
        self.repo.delete(id)
    }

    /// Returns all scores for distribution rendering.
    pub fn scores(&self) -> RepoResult<Vec<f64>> {
        self.repo.scores()
    }
}
