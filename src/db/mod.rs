//! SQLite storage bootstrap.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the review core.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON`, so the `reviews ->
//!   employees` reference is enforced by the engine.
//! - Every statement issued on these connections autocommits; there are no
//!   multi-statement transactions in this crate.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Storage-engine failure surfaced unmodified to the caller.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
