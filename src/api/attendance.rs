use crate::{
    auth::auth::AuthUser,
    error::ApiError,
    model::attendance::{
        AttendanceEntry, AttendancePayload, AttendanceRecord, DateRangeQuery, DayQuery,
    },
    models::{ApiResponse, CreatedId},
    repository::{AttendanceRepository, EmployeeRepository},
    service::{
        reconcile,
        stats::{self, AttendanceSummary},
    },
};
use actix_web::{HttpResponse, web};
use tracing::{debug, info};

fn entries(records: Vec<AttendanceRecord>) -> Vec<AttendanceEntry> {
    records.into_iter().map(AttendanceEntry::from).collect()
}

async fn records_for_day(
    attendance: &dyn AttendanceRepository,
    query: &DayQuery,
) -> Result<Vec<AttendanceRecord>, ApiError> {
    let records = match query.date {
        Some(day) => attendance.list_between(day, day).await?,
        None => attendance.list().await?,
    };
    Ok(records)
}

/// List attendance records
#[utoipa::path(
    get,
    path = "/api/attendance",
    responses(
        (status = 200, description = "All records, newest date first", body = Vec<AttendanceEntry>),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn list_attendance(
    attendance: web::Data<dyn AttendanceRepository>,
) -> Result<HttpResponse, ApiError> {
    let records = attendance.list().await?;
    debug!(count = records.len(), "Fetched attendance");

    Ok(HttpResponse::Ok().json(ApiResponse::ok(entries(records))))
}

/// Get attendance record by ID
#[utoipa::path(
    get,
    path = "/api/attendance/{id}",
    params(("id" = u64, Path, description = "Attendance record ID")),
    responses(
        (status = 200, description = "Record found", body = AttendanceEntry),
        (status = 404, description = "Record not found", body = Object, example = json!({
            "success": false,
            "message": "Record not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn get_attendance(
    attendance: web::Data<dyn AttendanceRepository>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let record = attendance
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Record not found".to_string()))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(AttendanceEntry::from(record))))
}

/// Attendance records within an inclusive date range
#[utoipa::path(
    get,
    path = "/api/attendance/date-range",
    params(DateRangeQuery),
    responses(
        (status = 200, description = "Records in range", body = Vec<AttendanceEntry>),
        (status = 400, description = "startDate and endDate are required"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn attendance_by_date_range(
    attendance: web::Data<dyn AttendanceRepository>,
    query: web::Query<DateRangeQuery>,
) -> Result<HttpResponse, ApiError> {
    let (Some(start), Some(end)) = (query.start_date, query.end_date) else {
        return Err(ApiError::Validation(
            "startDate and endDate are required".to_string(),
        ));
    };

    let records = attendance.list_between(start, end).await?;
    debug!(%start, %end, count = records.len(), "Fetched attendance range");

    Ok(HttpResponse::Ok().json(ApiResponse::ok(entries(records))))
}

/// Create attendance record
#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = AttendancePayload,
    responses(
        (status = 201, description = "Attendance record created successfully", body = CreatedId),
        (status = 400, description = "employee_id is required"),
        (status = 404, description = "Employee not found"),
        (status = 409, description = "Attendance record already exists for this employee, date, and shift"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn create_attendance(
    auth: AuthUser,
    employees: web::Data<dyn EmployeeRepository>,
    attendance: web::Data<dyn AttendanceRepository>,
    body: web::Json<AttendancePayload>,
) -> Result<HttpResponse, ApiError> {
    let id = reconcile::create_attendance(
        employees.get_ref(),
        attendance.get_ref(),
        body.into_inner(),
    )
    .await?;

    info!(id, user_id = auth.user_id, "Attendance record created");

    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        CreatedId { id },
        "Attendance record created successfully",
    )))
}

/// Update attendance record
#[utoipa::path(
    put,
    path = "/api/attendance/{id}",
    params(("id" = u64, Path, description = "Attendance record ID")),
    request_body = AttendancePayload,
    responses(
        (status = 200, description = "Attendance record updated successfully"),
        (status = 400, description = "employee_id is required"),
        (status = 404, description = "Employee or record not found"),
        (status = 409, description = "Another record already uses this employee, date, and shift"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn update_attendance(
    auth: AuthUser,
    employees: web::Data<dyn EmployeeRepository>,
    attendance: web::Data<dyn AttendanceRepository>,
    path: web::Path<u64>,
    body: web::Json<AttendancePayload>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    reconcile::update_attendance(
        employees.get_ref(),
        attendance.get_ref(),
        id,
        body.into_inner(),
    )
    .await?;

    info!(id, user_id = auth.user_id, "Attendance record updated");

    Ok(HttpResponse::Ok().json(ApiResponse::message(
        "Attendance record updated successfully",
    )))
}

/// Delete attendance record
#[utoipa::path(
    delete,
    path = "/api/attendance/{id}",
    params(("id" = u64, Path, description = "Attendance record ID")),
    responses(
        (status = 200, description = "Attendance record deleted successfully"),
        (status = 404, description = "Record not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn delete_attendance(
    auth: AuthUser,
    attendance: web::Data<dyn AttendanceRepository>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    if attendance.delete(id).await? == 0 {
        return Err(ApiError::NotFound("Record not found".to_string()));
    }

    info!(id, user_id = auth.user_id, "Attendance record deleted");

    Ok(HttpResponse::Ok().json(ApiResponse::message(
        "Attendance record deleted successfully",
    )))
}

/// Status breakdown over the whole attendance table
#[utoipa::path(
    get,
    path = "/api/attendance/stats/summary",
    responses(
        (status = 200, description = "Counts, average hours and percentages", body = AttendanceSummary),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn attendance_summary(
    attendance: web::Data<dyn AttendanceRepository>,
) -> Result<HttpResponse, ApiError> {
    let counts = attendance.status_counts().await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(AttendanceSummary::from(counts))))
}

/// Present/absent counts and working hours per shift
#[utoipa::path(
    get,
    path = "/api/attendance/stats/shifts",
    params(DayQuery),
    responses(
        (status = 200, description = "One entry per shift", body = Vec<ShiftTotals>),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn shift_summary(
    attendance: web::Data<dyn AttendanceRepository>,
    query: web::Query<DayQuery>,
) -> Result<HttpResponse, ApiError> {
    let records = records_for_day(attendance.get_ref(), &query).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(stats::shift_totals(&records))))
}

/// Late arrivals and early departures
#[utoipa::path(
    get,
    path = "/api/attendance/stats/issues",
    params(DayQuery),
    responses(
        (status = 200, description = "Flagged check-in/check-out times", body = Vec<TimeIssue>),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn time_issues(
    attendance: web::Data<dyn AttendanceRepository>,
    query: web::Query<DayQuery>,
) -> Result<HttpResponse, ApiError> {
    let records = records_for_day(attendance.get_ref(), &query).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(stats::time_issues(&records))))
}

/// Per-employee attendance rates, best and worst attendee, unmarked workers
#[utoipa::path(
    get,
    path = "/api/attendance/stats/employees",
    params(DayQuery),
    responses(
        (status = 200, description = "Attendance rate of every employee", body = EmployeeAttendanceReport),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn employee_rates(
    employees: web::Data<dyn EmployeeRepository>,
    attendance: web::Data<dyn AttendanceRepository>,
    query: web::Query<DayQuery>,
) -> Result<HttpResponse, ApiError> {
    let workers = employees.list().await?;
    let records = records_for_day(attendance.get_ref(), &query).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(stats::employee_attendance_rates(
        &workers, &records,
    ))))
}
