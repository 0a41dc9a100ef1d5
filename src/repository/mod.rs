//! Data access for the `employees`, `attendance` and `users` tables.
//!
//! Handlers only see these traits; the pool lives inside the implementation
//! handed to the app at startup.

pub mod mysql;

#[cfg(test)]
pub mod memory;

pub use mysql::MySqlRepository;

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::model::attendance::{AttendanceRecord, AttendanceWrite};
use crate::model::employee::{Employee, EmployeeChanges, NewEmployee};
use crate::model::stats::{EmployeeSummary, StatusCounts};
use crate::model::user::User;

#[derive(Debug, Error)]
pub enum RepoError {
    /// A unique index rejected the write.
    #[error("Duplicate entry: {0}")]
    Duplicate(String),

    #[error("{0}")]
    Database(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return RepoError::Duplicate(db_err.message().to_string());
            }
        }
        RepoError::Database(err.to_string())
    }
}

pub type RepoResult<T> = Result<T, RepoError>;

#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// All employees, ordered by name.
    async fn list(&self) -> RepoResult<Vec<Employee>>;
    async fn find_by_id(&self, id: u64) -> RepoResult<Option<Employee>>;
    async fn find_by_code(&self, code: &str) -> RepoResult<Option<Employee>>;
    /// Inserts an Active employee and returns its id.
    async fn insert(&self, employee: &NewEmployee) -> RepoResult<u64>;
    /// Returns the number of matched rows.
    async fn update(&self, id: u64, changes: &EmployeeChanges) -> RepoResult<u64>;
    /// Soft delete: marks the employee Inactive. Returns the number of matched rows.
    async fn deactivate(&self, id: u64) -> RepoResult<u64>;
    async fn summary(&self) -> RepoResult<EmployeeSummary>;
}

#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    /// All records, newest date first, then by shift label.
    async fn list(&self) -> RepoResult<Vec<AttendanceRecord>>;
    async fn find_by_id(&self, id: u64) -> RepoResult<Option<AttendanceRecord>>;
    /// Records with `start <= date <= end`, same ordering as [`list`](Self::list).
    async fn list_between(&self, start: NaiveDate, end: NaiveDate)
    -> RepoResult<Vec<AttendanceRecord>>;
    /// Returns the new record id; [`RepoError::Duplicate`] when the
    /// (worker, date, shift) triple is taken.
    async fn insert(&self, row: &AttendanceWrite) -> RepoResult<u64>;
    /// Overwrites every column of the row. Returns the number of matched rows.
    async fn update(&self, id: u64, row: &AttendanceWrite) -> RepoResult<u64>;
    async fn delete(&self, id: u64) -> RepoResult<u64>;
    async fn status_counts(&self) -> RepoResult<StatusCounts>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;
    /// Stores a user with the default role and returns its id.
    async fn insert(&self, username: &str, password_hash: &str) -> RepoResult<u64>;
}
