use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::Serialize;
use strum::IntoEnumIterator;
use utoipa::ToSchema;

use crate::model::attendance::AttendanceRecord;
use crate::model::employee::Employee;
use crate::model::labels::{AttendanceStatus, Shift};
use crate::model::stats::StatusCounts;

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Share of `total`, truncated to 2 decimals so the shares never add up to
/// more than 100.
pub fn percent_of(count: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    (count * 10_000 / total) as f64 / 100.0
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AttendanceSummary {
    #[serde(flatten)]
    pub counts: StatusCounts,
    pub present_percent: f64,
    pub absent_percent: f64,
    pub late_percent: f64,
    pub half_day_percent: f64,
}

impl From<StatusCounts> for AttendanceSummary {
    fn from(counts: StatusCounts) -> Self {
        let total = counts.total_records;
        Self {
            present_percent: percent_of(counts.present_count, total),
            absent_percent: percent_of(counts.absent_count, total),
            late_percent: percent_of(counts.late_count, total),
            half_day_percent: percent_of(counts.half_day_count, total),
            counts,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ShiftTotals {
    #[schema(example = "Morning")]
    pub shift: String,
    pub present: i64,
    pub absent: i64,
    /// Working hours of Present records, rounded to 2 decimals.
    pub total_hours: f64,
}

/// Per-shift dashboard totals, always one entry per shift in day order.
pub fn shift_totals(records: &[AttendanceRecord]) -> Vec<ShiftTotals> {
    Shift::iter()
        .map(|shift| {
            let in_shift = records.iter().filter(|r| r.shift == shift.as_ref());
            let mut present = 0;
            let mut absent = 0;
            let mut hours = 0.0;

            for record in in_shift {
                if record.status == AttendanceStatus::Present.as_ref() {
                    present += 1;
                    hours += record.effective_hours();
                } else if record.status == AttendanceStatus::Absent.as_ref() {
                    absent += 1;
                }
            }

            ShiftTotals {
                shift: shift.to_string(),
                present,
                absent,
                total_hours: round2(hours),
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum TimeIssueKind {
    #[serde(rename = "Late Arrival")]
    LateArrival,
    #[serde(rename = "Early Departure")]
    EarlyDeparture,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TimeIssue {
    pub employee_name: String,
    #[serde(rename = "employee_id")]
    pub employee_code: String,
    pub shift: String,
    #[schema(value_type = String, example = "2026-01-15")]
    pub date: NaiveDate,
    pub issue: TimeIssueKind,
    #[schema(value_type = String, example = "06:45:00")]
    pub time: NaiveTime,
}

/// Scheduled (start, end) hour of a shift. Unknown labels fall back to Night.
fn shift_hours(label: &str) -> (u32, u32) {
    match Shift::from_str(label).unwrap_or(Shift::Night) {
        Shift::Morning => (6, 14),
        Shift::Afternoon => (14, 22),
        Shift::Night => (22, 6),
    }
}

/// Present records that started more than 30 minutes late, or ended more
/// than one hour before the scheduled end hour.
pub fn time_issues(records: &[AttendanceRecord]) -> Vec<TimeIssue> {
    let mut issues = Vec::new();

    for record in records {
        if record.status != AttendanceStatus::Present.as_ref() {
            continue;
        }
        let Some(check_in) = record.check_in else {
            continue;
        };
        let (start, end) = shift_hours(&record.shift);

        let issue = |issue, time| TimeIssue {
            employee_name: record.employee_name.clone(),
            employee_code: record.employee_code.clone(),
            shift: record.shift.clone(),
            date: record.date,
            issue,
            time,
        };

        if check_in.hour() > start || (check_in.hour() == start && check_in.minute() > 30) {
            issues.push(issue(TimeIssueKind::LateArrival, check_in));
        }

        if let Some(check_out) = record.check_out {
            if (check_out.hour() as i32) < end as i32 - 1 {
                issues.push(issue(TimeIssueKind::EarlyDeparture, check_out));
            }
        }
    }

    issues
}

/// One employee's share of Present records.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct EmployeeAttendance {
    #[schema(example = 1)]
    pub worker_id: u64,
    #[serde(rename = "employee_id")]
    #[schema(example = "EMP001")]
    pub employee_code: String,
    pub name: String,
    pub shift: String,
    pub present_count: i64,
    pub total_count: i64,
    /// Present records over all of the employee's records, in percent.
    #[schema(example = 87.5)]
    pub attendance_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct EmployeeAttendanceReport {
    pub total_workers: i64,
    pub present: i64,
    pub absent: i64,
    /// Workers minus records in scope, never below zero.
    pub not_marked: i64,
    pub employees: Vec<EmployeeAttendance>,
    #[schema(nullable = true)]
    pub most_present: Option<EmployeeAttendance>,
    #[schema(nullable = true)]
    pub least_present: Option<EmployeeAttendance>,
}

/// Attendance rate of every employee over `records`, with the best and worst
/// performer. Ties keep the employee listed first.
pub fn employee_attendance_rates(
    employees: &[Employee],
    records: &[AttendanceRecord],
) -> EmployeeAttendanceReport {
    let is_present = |r: &AttendanceRecord| r.status == AttendanceStatus::Present.as_ref();

    let rows: Vec<EmployeeAttendance> = employees
        .iter()
        .map(|employee| {
            let own = records.iter().filter(|r| r.worker_id == employee.id);
            let (mut present_count, mut total_count) = (0, 0);
            for record in own {
                total_count += 1;
                if is_present(record) {
                    present_count += 1;
                }
            }
            let attendance_rate = if total_count > 0 {
                round2(present_count as f64 * 100.0 / total_count as f64)
            } else {
                0.0
            };

            EmployeeAttendance {
                worker_id: employee.id,
                employee_code: employee.employee_code.clone(),
                name: employee.name.clone(),
                shift: employee.shift.clone(),
                present_count,
                total_count,
                attendance_rate,
            }
        })
        .collect();

    let mut most_present: Option<&EmployeeAttendance> = None;
    let mut least_present: Option<&EmployeeAttendance> = None;
    for row in &rows {
        if most_present.is_none_or(|best| row.attendance_rate > best.attendance_rate) {
            most_present = Some(row);
        }
        if least_present.is_none_or(|worst| row.attendance_rate < worst.attendance_rate) {
            least_present = Some(row);
        }
    }

    let total_workers = employees.len() as i64;
    EmployeeAttendanceReport {
        total_workers,
        present: records.iter().filter(|&r| is_present(r)).count() as i64,
        absent: records
            .iter()
            .filter(|r| r.status == AttendanceStatus::Absent.as_ref())
            .count() as i64,
        not_marked: (total_workers - records.len() as i64).max(0),
        most_present: most_present.cloned(),
        least_present: least_present.cloned(),
        employees: rows,
    }
}
