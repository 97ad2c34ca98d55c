//! Domain model for review persistence.
//!
//! # Responsibility
//! - Define the validated `Review` entity and its lifecycle states.
//! - Define the partial `Employee` collaborator referenced by foreign key.
//!
//! # Invariants
//! - A `Review` value in memory is always valid; invalid field values are
//!   rejected at construction and on every update.
//! - `Review::id` is `Some` exactly while the instance is persisted.

pub mod employee;
pub mod review;
