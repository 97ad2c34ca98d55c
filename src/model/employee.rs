//! Employee collaborator model.
//!
//! Deliberately partial: reviews reference employees by foreign key, and the
//! only review-facing behavior an employee carries is the `reviews` accessor.

use crate::repo::review_repo::{RepoError, RepoResult, ReviewRepository, SharedReview};
use serde::{Deserialize, Serialize};

/// Stable row identifier for a persisted employee.
pub type EmployeeId = i64;

/// One employee row, as far as the review layer needs to know it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    id: Option<EmployeeId>,
    pub name: String,
}

impl Employee {
    /// Creates an unsaved employee.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }

    pub fn id(&self) -> Option<EmployeeId> {
        self.id
    }

    /// All reviews filed for this employee, in storage order, each resolved
    /// through the repository's identity cache.
    ///
    /// Fails with `RepoError::NotPersisted` when this employee was never
    /// saved (there is no id to query by).
    pub fn reviews<R: ReviewRepository>(&self, repo: &R) -> RepoResult<Vec<SharedReview>> {
        match self.id {
            Some(id) => repo.find_by_employee(id),
            None => Err(RepoError::NotPersisted),
        }
    }

    pub(crate) fn mark_persisted(&mut self, id: EmployeeId) {
        self.id = Some(id);
    }
}
