use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::utils::hours::working_hours_between;

/// One attendance row.
///
/// `employee_name`, `employee_code` and `shift` are a snapshot of the employee
/// taken when the row was written. Renaming or moving an employee later does
/// not touch existing rows.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct AttendanceRecord {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = "John Smith")]
    pub employee_name: String,

    #[serde(rename = "employee_id")]
    #[sqlx(rename = "employee_id")]
    #[schema(example = "EMP001")]
    pub employee_code: String,

    /// Internal key of the employee the row was resolved to.
    #[schema(example = 1)]
    pub worker_id: u64,

    #[schema(example = "Morning")]
    pub shift: String,

    #[schema(value_type = String, example = "2026-01-15")]
    pub date: NaiveDate,

    #[schema(example = "Present")]
    pub status: String,

    #[schema(value_type = Option<String>, example = "06:15:00")]
    pub check_in: Option<NaiveTime>,

    #[schema(value_type = Option<String>, example = "14:00:00")]
    pub check_out: Option<NaiveTime>,

    #[schema(example = 7.75)]
    pub hours_worked: f64,

    #[schema(nullable = true)]
    pub notes: Option<String>,

    #[schema(value_type = Option<String>)]
    pub created_at: Option<DateTime<Utc>>,
}

impl AttendanceRecord {
    /// Elapsed hours derived from the check-in/check-out clock times.
    pub fn derived_hours(&self) -> Option<f64> {
        match (self.check_in, self.check_out) {
            (Some(check_in), Some(check_out)) => Some(working_hours_between(check_in, check_out)),
            _ => None,
        }
    }

    /// Hours used for dashboard totals: the clock-derived value when both
    /// times are known, the stored `hours_worked` otherwise.
    pub fn effective_hours(&self) -> f64 {
        self.derived_hours().unwrap_or(self.hours_worked)
    }
}

/// Read model returned by the attendance endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct AttendanceEntry {
    #[serde(flatten)]
    pub record: AttendanceRecord,

    #[schema(nullable = true, example = 7.75)]
    pub working_hours: Option<f64>,
}

impl From<AttendanceRecord> for AttendanceEntry {
    fn from(record: AttendanceRecord) -> Self {
        let working_hours = record.derived_hours();
        Self {
            record,
            working_hours,
        }
    }
}

/// Attendance submission as posted by the client, before reconciliation.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[schema(example = json!({
    "employee_id": "EMP001",
    "date": "2026-01-15",
    "status": "Present",
    "check_in": "06:15",
    "check_out": "14:00",
    "hours_worked": 7.75
}))]
pub struct AttendancePayload {
    #[serde(rename = "employee_id")]
    pub employee_code: Option<String>,
    pub employee_name: Option<String>,
    pub shift: Option<String>,
    #[schema(value_type = String, example = "2026-01-15")]
    pub date: NaiveDate,
    pub status: String,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub hours_worked: Option<f64>,
    pub notes: Option<String>,
}

/// Fully resolved row values, ready to insert or to overwrite an existing row.
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceWrite {
    pub employee_name: String,
    pub employee_code: String,
    pub worker_id: u64,
    pub shift: String,
    pub date: NaiveDate,
    pub status: String,
    pub check_in: Option<NaiveTime>,
    pub check_out: Option<NaiveTime>,
    pub hours_worked: f64,
    pub notes: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DateRangeQuery {
    /// Inclusive lower bound, `YYYY-MM-DD`
    #[param(value_type = Option<String>, example = "2026-01-01")]
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound, `YYYY-MM-DD`
    #[param(value_type = Option<String>, example = "2026-01-31")]
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DayQuery {
    /// Restrict to one day, `YYYY-MM-DD`
    #[param(value_type = Option<String>, example = "2026-01-15")]
    pub date: Option<NaiveDate>,
}
