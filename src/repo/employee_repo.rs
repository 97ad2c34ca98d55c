//! Minimal employee persistence.
//!
//! Just enough of an `employees` table to satisfy the foreign key carried by
//! `reviews` and to hand out persisted `Employee` values for the `reviews`
//! accessor. Review-side behavior lives in `review_repo`.

use crate::model::employee::{Employee, EmployeeId};
use crate::repo::review_repo::RepoResult;
use rusqlite::Connection;

/// SQLite-backed employee repository.
pub struct SqliteEmployeeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEmployeeRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Creates the `employees` table if it does not exist.
    pub fn create_table(&self) -> RepoResult<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS employees (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Drops the `employees` table if it exists.
    pub fn drop_table(&self) -> RepoResult<()> {
        self.conn.execute_batch("DROP TABLE IF EXISTS employees;")?;
        Ok(())
    }

    /// Inserts a new employee and returns it with its row id stamped.
    pub fn create(&self, name: &str) -> RepoResult<Employee> {
        self.conn.execute(
            "INSERT INTO employees (name) VALUES (?1);",
            [name],
        )?;
        let mut employee = Employee::new(name);
        employee.mark_persisted(self.conn.last_insert_rowid());
        Ok(employee)
    }

    /// Looks up one employee by primary key. A miss is `Ok(None)`.
    pub fn find_by_id(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM employees WHERE id = ?1;")?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            let name: String = row.get("name")?;
            let mut employee = Employee::new(name);
            employee.mark_persisted(row.get("id")?);
            return Ok(Some(employee));
        }
        Ok(None)
    }
}
