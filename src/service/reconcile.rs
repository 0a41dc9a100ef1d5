//! Resolves a submitted attendance event against the employee master record.
//!
//! The employee's code, internal id, and (unless the caller overrides them)
//! name and shift are copied onto the attendance row. Check-in/out must be
//! clock times; status is free text and check-out is never compared to check-in.

use chrono::NaiveTime;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::model::attendance::{AttendancePayload, AttendanceWrite};
use crate::model::employee::Employee;
use crate::repository::{AttendanceRepository, EmployeeRepository, RepoError};
use crate::utils::hours::parse_clock;

const DUPLICATE_MESSAGE: &str = "Attendance record already exists for this employee, date, and shift";

/// Empty strings count as "not supplied", like a missing field.
fn supplied(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Accepts `HH:MM` or `HH:MM:SS`.
fn clock(field: &str, value: Option<String>) -> Result<Option<NaiveTime>, ApiError> {
    match supplied(value) {
        None => Ok(None),
        Some(text) => parse_clock(&text).map(Some).ok_or_else(|| {
            ApiError::Validation(format!("{field} must be a time in HH:MM format"))
        }),
    }
}

/// Fills the row from the payload and the resolved employee.
pub fn resolve(
    payload: AttendancePayload,
    employee: &Employee,
) -> Result<AttendanceWrite, ApiError> {
    Ok(AttendanceWrite {
        employee_name: supplied(payload.employee_name).unwrap_or_else(|| employee.name.clone()),
        employee_code: employee.employee_code.clone(),
        worker_id: employee.id,
        shift: supplied(payload.shift).unwrap_or_else(|| employee.shift.clone()),
        date: payload.date,
        status: payload.status,
        check_in: clock("check_in", payload.check_in)?,
        check_out: clock("check_out", payload.check_out)?,
        hours_worked: payload.hours_worked.unwrap_or(0.0),
        notes: payload.notes.unwrap_or_default(),
    })
}

/// Looks the employee up by code and builds the row to write.
pub async fn reconcile(
    employees: &dyn EmployeeRepository,
    mut payload: AttendancePayload,
) -> Result<AttendanceWrite, ApiError> {
    let code = supplied(payload.employee_code.take())
        .ok_or_else(|| ApiError::Validation("employee_id is required".to_string()))?;

    let employee = employees
        .find_by_code(&code)
        .await?
        .ok_or_else(|| ApiError::NotFound("Employee not found".to_string()))?;

    debug!(employee_code = %code, worker_id = employee.id, "Employee resolved");

    resolve(payload, &employee)
}

fn duplicate_as_conflict(err: RepoError) -> ApiError {
    match err {
        RepoError::Duplicate(_) => ApiError::Conflict(DUPLICATE_MESSAGE.to_string()),
        other => other.into(),
    }
}

/// Creates a record and returns its id.
pub async fn create_attendance(
    employees: &dyn EmployeeRepository,
    attendance: &dyn AttendanceRepository,
    payload: AttendancePayload,
) -> Result<u64, ApiError> {
    let row = reconcile(employees, payload).await?;

    let id = attendance.insert(&row).await.map_err(duplicate_as_conflict)?;

    info!(id, worker_id = row.worker_id, date = %row.date, shift = %row.shift, "Attendance created");
    Ok(id)
}

/// Re-resolves the employee and overwrites record `id`.
pub async fn update_attendance(
    employees: &dyn EmployeeRepository,
    attendance: &dyn AttendanceRepository,
    id: u64,
    payload: AttendancePayload,
) -> Result<(), ApiError> {
    let row = reconcile(employees, payload).await?;

    let affected = attendance
        .update(id, &row)
        .await
        .map_err(duplicate_as_conflict)?;

    if affected == 0 {
        return Err(ApiError::NotFound("Record not found".to_string()));
    }

    info!(id, worker_id = row.worker_id, "Attendance updated");
    Ok(())
}
