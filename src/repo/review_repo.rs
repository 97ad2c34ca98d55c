//! Review repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the `reviews` table.
//! - Keep SQL details inside the core persistence boundary.
//! - Enforce the identity-cache invariant: all read paths funnel through
//!   one row-resolution path.
//!
//! # Invariants
//! - Write paths validate review fields before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - `save` refuses already-persisted instances; `update`/`delete` refuse
//!   never-persisted ones.

use crate::db::DbError;
use crate::model::employee::EmployeeId;
use crate::model::review::{Review, ReviewId, ReviewUpdate, ReviewValidationError};
use crate::repo::identity_cache::IdentityCache;
use rusqlite::{params, Connection, Row};
use std::cell::RefCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

const REVIEW_SELECT_SQL: &str = "SELECT
    id,
    year,
    summary,
    employee_id
FROM reviews";

/// Canonical handle to a review tracked by an identity cache.
///
/// Pointer equality (`Rc::ptr_eq`) is the identity guarantee: two loads of
/// the same row from the same repository return the same allocation.
pub type SharedReview = Rc<RefCell<Review>>;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for review persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ReviewValidationError),
    Db(DbError),
    NotFound(ReviewId),
    AlreadyPersisted(ReviewId),
    NotPersisted,
    StaleInstance(ReviewId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "review not found: {id}"),
            Self::AlreadyPersisted(id) => {
                write!(f, "review is already persisted as row {id}; refusing to insert a duplicate")
            }
            Self::NotPersisted => write!(f, "review has no row id; save it first"),
            Self::StaleInstance(id) => write!(
                f,
                "review {id} is not the canonical instance known to this repository"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted review data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_)
            | Self::AlreadyPersisted(_)
            | Self::NotPersisted
            | Self::StaleInstance(_)
            | Self::InvalidData(_) => None,
        }
    }
}

impl From<ReviewValidationError> for RepoError {
    fn from(value: ReviewValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for review lifecycle and query operations.
pub trait ReviewRepository {
    /// Creates the `reviews` table if it does not exist.
    fn create_table(&self) -> RepoResult<()>;
    /// Drops the `reviews` table if it exists.
    fn drop_table(&self) -> RepoResult<()>;
    /// Validates, constructs, inserts, and returns the cached instance.
    fn create(&self, year: i64, summary: &str, employee_id: EmployeeId)
        -> RepoResult<SharedReview>;
    /// Inserts an unsaved review, stamping its storage-assigned id.
    fn save(&self, review: &SharedReview) -> RepoResult<ReviewId>;
    /// Applies field changes and writes the row.
    fn update(&self, review: &SharedReview, changes: &ReviewUpdate) -> RepoResult<()>;
    /// Deletes the row, evicts the cache entry, and clears the id.
    fn delete(&self, review: &SharedReview) -> RepoResult<()>;
    /// Looks up one row by primary key. A miss is `Ok(None)`, not an error.
    fn find_by_id(&self, id: ReviewId) -> RepoResult<Option<SharedReview>>;
    /// Returns every row in storage order.
    fn get_all(&self) -> RepoResult<Vec<SharedReview>>;
    /// Returns every row with a matching `employee_id`, in storage order.
    fn find_by_employee(&self, employee_id: EmployeeId) -> RepoResult<Vec<SharedReview>>;
}

/// SQLite-backed review repository with a per-instance identity cache.
pub struct SqliteReviewRepository<'conn> {
    conn: &'conn Connection,
    cache: RefCell<IdentityCache>,
}

impl<'conn> SqliteReviewRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            conn,
            cache: RefCell::new(IdentityCache::new()),
        }
    }

    /// Number of live cache entries, exposed for diagnostics and tests.
    pub fn cached_count(&self) -> usize {
        self.cache.borrow().len()
    }

    /// The single row-to-instance resolution path.
    ///
    /// The cached instance wins; otherwise the row is validated into a new
    /// instance which is stamped, cached, and returned. Every read path
    /// funnels through here, which is what upholds the identity invariant.
    fn resolve_row(&self, row: &Row<'_>) -> RepoResult<SharedReview> {
        let id: ReviewId = row.get("id")?;
        if let Some(cached) = self.cache.borrow().get(id) {
            return Ok(cached);
        }

        let year: i64 = row.get("year")?;
        let summary: String = row.get("summary")?;
        let employee_id = row
            .get::<_, Option<EmployeeId>>("employee_id")?
            .ok_or_else(|| {
                RepoError::InvalidData(format!("NULL employee_id in reviews row {id}"))
            })?;

        let mut review = Review::new(year, summary, employee_id)
            .map_err(|err| RepoError::InvalidData(format!("reviews row {id}: {err}")))?;
        review.mark_persisted(id);

        let shared = Rc::new(RefCell::new(review));
        self.cache.borrow_mut().insert(id, Rc::clone(&shared));
        Ok(shared)
    }

    fn collect_rows(
        &self,
        sql: &str,
        bind: &[&dyn rusqlite::ToSql],
    ) -> RepoResult<Vec<SharedReview>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(bind)?;
        let mut reviews = Vec::new();
        while let Some(row) = rows.next()? {
            reviews.push(self.resolve_row(row)?);
        }
        Ok(reviews)
    }
}

impl ReviewRepository for SqliteReviewRepository<'_> {
    fn create_table(&self) -> RepoResult<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS reviews (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                year INTEGER NOT NULL,
                summary TEXT NOT NULL,
                employee_id INTEGER,
                FOREIGN KEY (employee_id) REFERENCES employees (id)
            );",
        )?;
        Ok(())
    }

    fn drop_table(&self) -> RepoResult<()> {
        self.conn.execute_batch("DROP TABLE IF EXISTS reviews;")?;
        self.cache.borrow_mut().clear();
        Ok(())
    }

    fn create(
        &self,
        year: i64,
        summary: &str,
        employee_id: EmployeeId,
    ) -> RepoResult<SharedReview> {
        let review = Rc::new(RefCell::new(Review::new(year, summary, employee_id)?));
        self.save(&review)?;
        Ok(review)
    }

    fn save(&self, review: &SharedReview) -> RepoResult<ReviewId> {
        if let Some(id) = review.borrow().id() {
            return Err(RepoError::AlreadyPersisted(id));
        }

        {
            let current = review.borrow();
            self.conn.execute(
                "INSERT INTO reviews (year, summary, employee_id)
                 VALUES (?1, ?2, ?3);",
                params![current.year(), current.summary(), current.employee_id()],
            )?;
        }

        let id = self.conn.last_insert_rowid();
        review.borrow_mut().mark_persisted(id);
        self.cache.borrow_mut().insert(id, Rc::clone(review));
        Ok(id)
    }

    fn update(&self, review: &SharedReview, changes: &ReviewUpdate) -> RepoResult<()> {
        let id = review.borrow().id().ok_or(RepoError::NotPersisted)?;

        review.borrow_mut().apply_update(changes)?;

        let changed = {
            let current = review.borrow();
            self.conn.execute(
                "UPDATE reviews
                 SET year = ?1, summary = ?2, employee_id = ?3
                 WHERE id = ?4;",
                params![
                    current.year(),
                    current.summary(),
                    current.employee_id(),
                    id
                ],
            )?
        };

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn delete(&self, review: &SharedReview) -> RepoResult<()> {
        let id = review.borrow().id().ok_or(RepoError::NotPersisted)?;

        match self.cache.borrow().get(id) {
            Some(canonical) if Rc::ptr_eq(&canonical, review) => {}
            _ => return Err(RepoError::StaleInstance(id)),
        }

        let changed = self
            .conn
            .execute("DELETE FROM reviews WHERE id = ?1;", [id])?;

        // The row is gone either way; the cache must not keep a canonical
        // mapping for a row known to be deleted.
        self.cache.borrow_mut().remove(id);
        review.borrow_mut().mark_deleted();

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn find_by_id(&self, id: ReviewId) -> RepoResult<Option<SharedReview>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{REVIEW_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(self.resolve_row(row)?));
        }
        Ok(None)
    }

    fn get_all(&self) -> RepoResult<Vec<SharedReview>> {
        self.collect_rows(&format!("{REVIEW_SELECT_SQL};"), &[])
    }

    fn find_by_employee(&self, employee_id: EmployeeId) -> RepoResult<Vec<SharedReview>> {
        self.collect_rows(
            &format!("{REVIEW_SELECT_SQL} WHERE employee_id = ?1;"),
            &[&employee_id],
        )
    }
}
