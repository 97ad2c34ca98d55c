//! Identity cache for persisted reviews.
//!
//! # Responsibility
//! - Map row ids to the canonical live instance for that row.
//!
//! # Invariants
//! - At most one entry per id; the entry is the instance every read path
//!   must hand back for that id.
//! - Purely in-process state: the cache says nothing about what other
//!   connections or processes have done to the table.

use crate::model::review::ReviewId;
use crate::repo::review_repo::SharedReview;
use std::collections::HashMap;
use std::rc::Rc;

/// Map from primary key to the canonical in-memory review.
///
/// Owned by a repository instance rather than held in static storage, so
/// tests and independent sessions stay isolated from each other.
#[derive(Debug, Default)]
pub struct IdentityCache {
    entries: HashMap<ReviewId, SharedReview>,
}

impl IdentityCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the canonical instance for `id`, if one is live.
    pub fn get(&self, id: ReviewId) -> Option<SharedReview> {
        self.entries.get(&id).map(Rc::clone)
    }

    /// Registers `review` as the canonical instance for `id`.
    pub fn insert(&mut self, id: ReviewId, review: SharedReview) {
        self.entries.insert(id, review);
    }

    /// Evicts the entry for `id`, returning it if present.
    pub fn remove(&mut self, id: ReviewId) -> Option<SharedReview> {
        self.entries.remove(&id)
    }

    pub fn contains(&self, id: ReviewId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every entry. Existing handles stay alive but are no longer
    /// canonical.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
