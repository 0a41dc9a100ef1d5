//! In-process store with the same uniqueness rules as the MySQL schema.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};

use super::{AttendanceRepository, EmployeeRepository, RepoError, RepoResult, UserRepository};
use crate::model::attendance::{AttendanceRecord, AttendanceWrite};
use crate::model::employee::{Employee, EmployeeChanges, NewEmployee};
use crate::model::labels::{AttendanceStatus, EmployeeStatus, Shift};
use crate::model::stats::{EmployeeSummary, StatusCounts};
use crate::model::user::User;
use crate::service::stats::round2;

#[derive(Default)]
struct Tables {
    employees: Vec<Employee>,
    attendance: Vec<AttendanceRecord>,
    users: Vec<User>,
    next_employee_id: u64,
    next_attendance_id: u64,
    next_user_id: u64,
}

#[derive(Default)]
pub struct MemoryRepository {
    tables: Mutex<Tables>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Tables> {
        self.tables.lock().unwrap()
    }
}

fn to_record(id: u64, row: &AttendanceWrite) -> AttendanceRecord {
    AttendanceRecord {
        id,
        employee_name: row.employee_name.clone(),
        employee_code: row.employee_code.clone(),
        worker_id: row.worker_id,
        shift: row.shift.clone(),
        date: row.date,
        status: row.status.clone(),
        check_in: row.check_in,
        check_out: row.check_out,
        hours_worked: row.hours_worked,
        notes: Some(row.notes.clone()),
        created_at: Some(Utc::now()),
    }
}

fn sort_records(records: &mut [AttendanceRecord]) {
    records.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.shift.cmp(&b.shift)));
}

fn slot_taken(tables: &Tables, row: &AttendanceWrite, except: Option<u64>) -> bool {
    tables.attendance.iter().any(|r| {
        Some(r.id) != except
            && r.worker_id == row.worker_id
            && r.date == row.date
            && r.shift == row.shift
    })
}

#[async_trait]
impl EmployeeRepository for MemoryRepository {
    async fn list(&self) -> RepoResult<Vec<Employee>> {
        let mut employees = self.lock().employees.clone();
        employees.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(employees)
    }

    async fn find_by_id(&self, id: u64) -> RepoResult<Option<Employee>> {
        Ok(self.lock().employees.iter().find(|e| e.id == id).cloned())
    }

    async fn find_by_code(&self, code: &str) -> RepoResult<Option<Employee>> {
        Ok(self
            .lock()
            .employees
            .iter()
            .find(|e| e.employee_code == code)
            .cloned())
    }

    async fn insert(&self, employee: &NewEmployee) -> RepoResult<u64> {
        let mut tables = self.lock();
        if tables
            .employees
            .iter()
            .any(|e| e.employee_code == employee.employee_code)
        {
            return Err(RepoError::Duplicate(format!(
                "'{}' for key 'employees.uq_employees_employee_id'",
                employee.employee_code
            )));
        }

        tables.next_employee_id += 1;
        let id = tables.next_employee_id;
        tables.employees.push(Employee {
            id,
            employee_code: employee.employee_code.clone(),
            name: employee.name.clone(),
            shift: employee.shift.clone(),
            email: employee.email.clone(),
            phone: employee.phone.clone(),
            status: EmployeeStatus::Active.to_string(),
            created_at: Some(Utc::now()),
        });
        Ok(id)
    }

    async fn update(&self, id: u64, changes: &EmployeeChanges) -> RepoResult<u64> {
        let mut tables = self.lock();
        let Some(employee) = tables.employees.iter_mut().find(|e| e.id == id) else {
            return Ok(0);
        };
        employee.name = changes.name.clone();
        employee.shift = changes.shift.clone();
        employee.email = changes.email.clone();
        employee.phone = changes.phone.clone();
        employee.status = changes.status.clone();
        Ok(1)
    }

    async fn deactivate(&self, id: u64) -> RepoResult<u64> {
        let mut tables = self.lock();
        let Some(employee) = tables.employees.iter_mut().find(|e| e.id == id) else {
            return Ok(0);
        };
        employee.status = EmployeeStatus::Inactive.to_string();
        Ok(1)
    }

    async fn summary(&self) -> RepoResult<EmployeeSummary> {
        let tables = self.lock();
        let employees = &tables.employees;

        Ok(EmployeeSummary {
            total_employees: employees.len() as i64,
            morning_shift: count_where(employees, |e| e.shift == Shift::Morning.as_ref()),
            afternoon_shift: count_where(employees, |e| e.shift == Shift::Afternoon.as_ref()),
            night_shift: count_where(employees, |e| e.shift == Shift::Night.as_ref()),
            active_employees: count_where(employees, |e| {
                e.status == EmployeeStatus::Active.as_ref()
            }),
            inactive_employees: count_where(employees, |e| {
                e.status == EmployeeStatus::Inactive.as_ref()
            }),
        })
    }
}

fn count_where<T>(items: &[T], pred: impl Fn(&T) -> bool) -> i64 {
    items.iter().filter(|item| pred(item)).count() as i64
}

#[async_trait]
impl AttendanceRepository for MemoryRepository {
    async fn list(&self) -> RepoResult<Vec<AttendanceRecord>> {
        let mut records = self.lock().attendance.clone();
        sort_records(&mut records);
        Ok(records)
    }

    async fn find_by_id(&self, id: u64) -> RepoResult<Option<AttendanceRecord>> {
        Ok(self.lock().attendance.iter().find(|r| r.id == id).cloned())
    }

    async fn list_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepoResult<Vec<AttendanceRecord>> {
        let mut records: Vec<_> = self
            .lock()
            .attendance
            .iter()
            .filter(|r| r.date >= start && r.date <= end)
            .cloned()
            .collect();
        sort_records(&mut records);
        Ok(records)
    }

    async fn insert(&self, row: &AttendanceWrite) -> RepoResult<u64> {
        let mut tables = self.lock();
        if slot_taken(&tables, row, None) {
            return Err(RepoError::Duplicate(
                "key 'attendance.uq_attendance_worker_date_shift'".to_string(),
            ));
        }

        tables.next_attendance_id += 1;
        let id = tables.next_attendance_id;
        tables.attendance.push(to_record(id, row));
        Ok(id)
    }

    async fn update(&self, id: u64, row: &AttendanceWrite) -> RepoResult<u64> {
        let mut tables = self.lock();
        if !tables.attendance.iter().any(|r| r.id == id) {
            return Ok(0);
        }
        if slot_taken(&tables, row, Some(id)) {
            return Err(RepoError::Duplicate(
                "key 'attendance.uq_attendance_worker_date_shift'".to_string(),
            ));
        }

        if let Some(existing) = tables.attendance.iter_mut().find(|r| r.id == id) {
            let created_at = existing.created_at;
            *existing = AttendanceRecord {
                created_at,
                ..to_record(id, row)
            };
        }
        Ok(1)
    }

    async fn delete(&self, id: u64) -> RepoResult<u64> {
        let mut tables = self.lock();
        let before = tables.attendance.len();
        tables.attendance.retain(|r| r.id != id);
        Ok((before - tables.attendance.len()) as u64)
    }

    async fn status_counts(&self) -> RepoResult<StatusCounts> {
        let tables = self.lock();
        let records = &tables.attendance;
        let count = |status: AttendanceStatus| count_where(records, |r| r.status == status.as_ref());

        let avg_hours = if records.is_empty() {
            None
        } else {
            let total: f64 = records.iter().map(|r| r.hours_worked).sum();
            Some(round2(total / records.len() as f64))
        };

        Ok(StatusCounts {
            total_records: records.len() as i64,
            present_count: count(AttendanceStatus::Present),
            absent_count: count(AttendanceStatus::Absent),
            late_count: count(AttendanceStatus::Late),
            half_day_count: count(AttendanceStatus::HalfDay),
            avg_hours,
        })
    }
}

#[async_trait]
impl UserRepository for MemoryRepository {
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn insert(&self, username: &str, password_hash: &str) -> RepoResult<u64> {
        let mut tables = self.lock();
        if tables.users.iter().any(|u| u.username == username) {
            return Err(RepoError::Duplicate(format!(
                "'{username}' for key 'users.uq_users_username'"
            )));
        }

        tables.next_user_id += 1;
        let id = tables.next_user_id;
        tables.users.push(User {
            id,
            username: username.to_string(),
            password: password_hash.to_string(),
            role: "user".to_string(),
        });
        Ok(id)
    }
}
