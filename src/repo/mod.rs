//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for reviews.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repository writes enforce review validation before persistence.
//! - Every read path resolves rows through the repository's identity cache,
//!   so one persisted row maps to at most one live instance per repository.

pub mod employee_repo;
pub mod identity_cache;
pub mod review_repo;
