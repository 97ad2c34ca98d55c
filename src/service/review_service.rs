//! Review use-case service.
//!
//! # Responsibility
//! - Provide stable lifecycle entry points for core callers.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation or cache contracts.
//! - Service layer remains storage-agnostic.

use crate::model::employee::EmployeeId;
use crate::model::review::{ReviewId, ReviewUpdate};
use crate::repo::review_repo::{RepoResult, ReviewRepository, SharedReview};

/// Use-case service wrapper for review lifecycle operations.
pub struct ReviewService<R: ReviewRepository> {
    repo: R,
}

impl<R: ReviewRepository> ReviewService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Ensures the backing table exists. Safe to call repeatedly.
    pub fn init_schema(&self) -> RepoResult<()> {
        self.repo.create_table()
    }

    /// Validates and persists a new review, returning the cached instance.
    pub fn create_review(
        &self,
        year: i64,
        summary: &str,
        employee_id: EmployeeId,
    ) -> RepoResult<SharedReview> {
        self.repo.create(year, summary, employee_id)
    }

    /// Applies field changes to a persisted review.
    ///
    /// Returns repository-level precondition, not-found, or validation
    /// errors unchanged.
    pub fn update_review(&self, review: &SharedReview, changes: &ReviewUpdate) -> RepoResult<()> {
        self.repo.update(review, changes)
    }

    /// Deletes a persisted review and clears its id.
    pub fn delete_review(&self, review: &SharedReview) -> RepoResult<()> {
        self.repo.delete(review)
    }

    /// Gets one review by id. A miss is `Ok(None)`.
    pub fn get_review(&self, id: ReviewId) -> RepoResult<Option<SharedReview>> {
        self.repo.find_by_id(id)
    }

    /// Lists every review in storage order.
    pub fn list_reviews(&self) -> RepoResult<Vec<SharedReview>> {
        self.repo.get_all()
    }

    /// Lists reviews filed for one employee, in storage order.
    pub fn reviews_for_employee(&self, employee_id: EmployeeId) -> RepoResult<Vec<SharedReview>> {
        self.repo.find_by_employee(employee_id)
    }
}
