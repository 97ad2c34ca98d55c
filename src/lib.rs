//! Core domain logic for performance review persistence.
//! This crate is the single source of truth for review validation invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::employee::{Employee, EmployeeId};
pub use model::review::{Review, ReviewId, ReviewUpdate, ReviewValidationError};
pub use repo::employee_repo::SqliteEmployeeRepository;
pub use repo::identity_cache::IdentityCache;
pub use repo::review_repo::{
    RepoError, RepoResult, ReviewRepository, SharedReview, SqliteReviewRepository,
};
pub use service::review_service::ReviewService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
