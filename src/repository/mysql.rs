use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::MySqlPool;
use tracing::debug;

use super::{AttendanceRepository, EmployeeRepository, RepoResult, UserRepository};
use crate::model::attendance::{AttendanceRecord, AttendanceWrite};
use crate::model::employee::{Employee, EmployeeChanges, NewEmployee};
use crate::model::stats::{EmployeeSummary, StatusCounts};
use crate::model::user::User;

const ATTENDANCE_COLUMNS: &str = "id, employee_name, employee_id, worker_id, shift, date, status, \
     check_in, check_out, hours_worked, notes, created_at";

const EMPLOYEE_COLUMNS: &str = "id, employee_id, name, shift, email, phone, status, created_at";

#[derive(Clone)]
pub struct MySqlRepository {
    pool: MySqlPool,
}

impl MySqlRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeRepository for MySqlRepository {
    async fn list(&self) -> RepoResult<Vec<Employee>> {
        let sql = format!("SELECT {EMPLOYEE_COLUMNS} FROM employees ORDER BY name ASC");
        let rows = sqlx::query_as::<_, Employee>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: u64) -> RepoResult<Option<Employee>> {
        let sql = format!("SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = ?");
        let row = sqlx::query_as::<_, Employee>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_code(&self, code: &str) -> RepoResult<Option<Employee>> {
        let sql = format!("SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE employee_id = ? LIMIT 1");
        let row = sqlx::query_as::<_, Employee>(&sql)
            .bind(code)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert(&self, employee: &NewEmployee) -> RepoResult<u64> {
        let result = sqlx::query(
            r#"
            INSERT INTO employees (employee_id, name, shift, email, phone, status)
            VALUES (?, ?, ?, ?, ?, 'Active')
            "#,
        )
        .bind(&employee.employee_code)
        .bind(&employee.name)
        .bind(&employee.shift)
        .bind(&employee.email)
        .bind(&employee.phone)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_id())
    }

    async fn update(&self, id: u64, changes: &EmployeeChanges) -> RepoResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE employees
            SET name = ?, shift = ?, email = ?, phone = ?, status = ?
            WHERE id = ?
            "#,
        )
        .bind(&changes.name)
        .bind(&changes.shift)
        .bind(&changes.email)
        .bind(&changes.phone)
        .bind(&changes.status)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn deactivate(&self, id: u64) -> RepoResult<u64> {
        let result = sqlx::query("UPDATE employees SET status = 'Inactive' WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn summary(&self) -> RepoResult<EmployeeSummary> {
        let summary = sqlx::query_as::<_, EmployeeSummary>(
            r#"
            SELECT
                COUNT(*) AS total_employees,
                COUNT(CASE WHEN shift = 'Morning' THEN 1 END) AS morning_shift,
                COUNT(CASE WHEN shift = 'Afternoon' THEN 1 END) AS afternoon_shift,
                COUNT(CASE WHEN shift = 'Night' THEN 1 END) AS night_shift,
                COUNT(CASE WHEN status = 'Active' THEN 1 END) AS active_employees,
                COUNT(CASE WHEN status = 'Inactive' THEN 1 END) AS inactive_employees
            FROM employees
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(summary)
    }
}

#[async_trait]
impl AttendanceRepository for MySqlRepository {
    async fn list(&self) -> RepoResult<Vec<AttendanceRecord>> {
        let sql = format!("SELECT {ATTENDANCE_COLUMNS} FROM attendance ORDER BY date DESC, shift ASC");
        let rows = sqlx::query_as::<_, AttendanceRecord>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: u64) -> RepoResult<Option<AttendanceRecord>> {
        let sql = format!("SELECT {ATTENDANCE_COLUMNS} FROM attendance WHERE id = ?");
        let row = sqlx::query_as::<_, AttendanceRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepoResult<Vec<AttendanceRecord>> {
        let sql = format!(
            "SELECT {ATTENDANCE_COLUMNS} FROM attendance \
             WHERE date BETWEEN ? AND ? ORDER BY date DESC, shift ASC"
        );
        debug!(%start, %end, "Fetching attendance range");

        let rows = sqlx::query_as::<_, AttendanceRecord>(&sql)
            .bind(start)
            .bind(end)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn insert(&self, row: &AttendanceWrite) -> RepoResult<u64> {
        let result = sqlx::query(
            r#"
            INSERT INTO attendance
            (employee_name, employee_id, worker_id, shift, date, status, check_in, check_out, hours_worked, notes)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&row.employee_name)
        .bind(&row.employee_code)
        .bind(row.worker_id)
        .bind(&row.shift)
        .bind(row.date)
        .bind(&row.status)
        .bind(&row.check_in)
        .bind(&row.check_out)
        .bind(row.hours_worked)
        .bind(&row.notes)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_id())
    }

    async fn update(&self, id: u64, row: &AttendanceWrite) -> RepoResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE attendance
            SET employee_name = ?, employee_id = ?, worker_id = ?, shift = ?, date = ?,
                status = ?, check_in = ?, check_out = ?, hours_worked = ?, notes = ?
            WHERE id = ?
            "#,
        )
        .bind(&row.employee_name)
        .bind(&row.employee_code)
        .bind(row.worker_id)
        .bind(&row.shift)
        .bind(row.date)
        .bind(&row.status)
        .bind(&row.check_in)
        .bind(&row.check_out)
        .bind(row.hours_worked)
        .bind(&row.notes)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: u64) -> RepoResult<u64> {
        let result = sqlx::query("DELETE FROM attendance WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn status_counts(&self) -> RepoResult<StatusCounts> {
        let counts = sqlx::query_as::<_, StatusCounts>(
            r#"
            SELECT
                COUNT(*) AS total_records,
                COUNT(CASE WHEN status = 'Present' THEN 1 END) AS present_count,
                COUNT(CASE WHEN status = 'Absent' THEN 1 END) AS absent_count,
                COUNT(CASE WHEN status = 'Late' THEN 1 END) AS late_count,
                COUNT(CASE WHEN status = 'Half Day' THEN 1 END) AS half_day_count,
                ROUND(AVG(hours_worked), 2) AS avg_hours
            FROM attendance
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(counts)
    }
}

#[async_trait]
impl UserRepository for MySqlRepository {
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password, role
            FROM users
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn insert(&self, username: &str, password_hash: &str) -> RepoResult<u64> {
        let result = sqlx::query("INSERT INTO users (username, password, role) VALUES (?, ?, 'user')")
            .bind(username)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;

        Ok(result.last_insert_id())
    }
}
