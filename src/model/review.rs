//! Review domain model.
//!
//! # Responsibility
//! - Define the canonical performance review record.
//! - Own all field validation rules, applied on construction and update.
//!
//! # Invariants
//! - `year >= 2000` for every constructed instance.
//! - `summary` is never blank after trimming.
//! - `id` is `Some` exactly while the review is persisted; only the
//!   repository layer stamps or clears it.

use crate::model::employee::EmployeeId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable row identifier for a persisted review.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type ReviewId = i64;

/// Earliest year a review may cover.
pub const MIN_REVIEW_YEAR: i64 = 2000;

/// Field-level validation failure for review data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewValidationError {
    Year,
    Summary,
    EmployeeId,
}

impl Display for ReviewValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Year => write!(
                f,
                "Year must be an integer greater than or equal to {MIN_REVIEW_YEAR}."
            ),
            Self::Summary => write!(f, "Summary must be a non-empty string."),
            Self::EmployeeId => write!(f, "Employee ID must be an integer."),
        }
    }
}

impl Error for ReviewValidationError {}

/// Optional field changes for a review update.
///
/// `None` fields are left untouched. Provided fields are validated as a
/// group before any of them is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewUpdate {
    pub year: Option<i64>,
    pub summary: Option<String>,
    pub employee_id: Option<EmployeeId>,
}

/// One performance review for one employee.
///
/// Fields are private so every mutation path funnels through validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawReview")]
pub struct Review {
    id: Option<ReviewId>,
    year: i64,
    summary: String,
    employee_id: EmployeeId,
}

/// Unvalidated wire shape used to re-run validation on deserialization.
#[derive(Debug, Deserialize)]
struct RawReview {
    #[serde(default)]
    id: Option<ReviewId>,
    year: i64,
    summary: String,
    employee_id: Option<EmployeeId>,
}

impl TryFrom<RawReview> for Review {
    type Error = ReviewValidationError;

    fn try_from(raw: RawReview) -> Result<Self, Self::Error> {
        let employee_id = raw.employee_id.ok_or(ReviewValidationError::EmployeeId)?;
        let mut review = Review::new(raw.year, raw.summary, employee_id)?;
        review.id = raw.id;
        Ok(review)
    }
}

impl Review {
    /// Creates an unsaved review after validating every field.
    ///
    /// # Invariants
    /// - `id` starts as `None` until the repository persists the instance.
    pub fn new(
        year: i64,
        summary: impl Into<String>,
        employee_id: EmployeeId,
    ) -> Result<Self, ReviewValidationError> {
        let summary = summary.into();
        validate_year(year)?;
        validate_summary(&summary)?;
        Ok(Self {
            id: None,
            year,
            summary,
            employee_id,
        })
    }

    /// Storage row id, `None` while unsaved or after deletion.
    pub fn id(&self) -> Option<ReviewId> {
        self.id
    }

    pub fn year(&self) -> i64 {
        self.year
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn employee_id(&self) -> EmployeeId {
        self.employee_id
    }

    /// Replaces the review year after validation.
    pub fn set_year(&mut self, year: i64) -> Result<(), ReviewValidationError> {
        validate_year(year)?;
        self.year = year;
        Ok(())
    }

    /// Replaces the summary after validation.
    pub fn set_summary(&mut self, summary: impl Into<String>) -> Result<(), ReviewValidationError> {
        let summary = summary.into();
        validate_summary(&summary)?;
        self.summary = summary;
        Ok(())
    }

    /// Points the review at a different employee.
    pub fn set_employee_id(&mut self, employee_id: EmployeeId) {
        self.employee_id = employee_id;
    }

    /// Applies an update atomically: all provided fields are validated
    /// before any field is mutated, so a failing update changes nothing.
    pub fn apply_update(&mut self, changes: &ReviewUpdate) -> Result<(), ReviewValidationError> {
        if let Some(year) = changes.year {
            validate_year(year)?;
        }
        if let Some(summary) = changes.summary.as_deref() {
            validate_summary(summary)?;
        }

        if let Some(year) = changes.year {
            self.year = year;
        }
        if let Some(summary) = changes.summary.as_deref() {
            self.summary = summary.to_string();
        }
        if let Some(employee_id) = changes.employee_id {
            self.employee_id = employee_id;
        }
        Ok(())
    }

    /// Stamps the storage-assigned id after a successful insert.
    pub(crate) fn mark_persisted(&mut self, id: ReviewId) {
        self.id = Some(id);
    }

    /// Clears the id after the backing row is deleted.
    pub(crate) fn mark_deleted(&mut self) {
        self.id = None;
    }
}

fn validate_year(year: i64) -> Result<(), ReviewValidationError> {
    if year < MIN_REVIEW_YEAR {
        return Err(ReviewValidationError::Year);
    }
    Ok(())
}

fn validate_summary(summary: &str) -> Result<(), ReviewValidationError> {
    if summary.trim().is_empty() {
        return Err(ReviewValidationError::Summary);
    }
    Ok(())
}
