use crate::model::attendance::{AttendanceEntry, AttendancePayload, AttendanceRecord};
use crate::model::employee::{CreateEmployee, Employee, UpdateEmployee};
use crate::model::stats::{EmployeeSummary, StatusCounts};
use crate::models::{
    CreatedId, LoginReqDto, LoginResponse, RegisterReqDto, RegisteredUser, UserInfo,
};
use crate::service::stats::{
    AttendanceSummary, EmployeeAttendance, EmployeeAttendanceReport, ShiftTotals, TimeIssue,
    TimeIssueKind,
};
use utoipa::Modify;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shift Attendance API",
        version = "1.0.0",
        description = r#"
## Shift Attendance Service

Backend for a manufacturing floor that runs three shifts a day.

### Key Features
- **Employee Management**
  - Register, update, list and deactivate workers
- **Attendance Management**
  - Record one entry per worker, date and shift
  - Entries are reconciled against the employee registry before they are stored
- **Dashboards**
  - Status breakdown, per-shift totals, late arrivals and early departures
  - Per-employee attendance rates

### Security
All `/api/employees` and `/api/attendance` endpoints require a **Bearer token**
obtained from `/api/auth/login`.

### Response Format
Every response is wrapped in `{ "success": bool, "data"?: ..., "message"?: ... }`.

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::health::health,

        crate::auth::handlers::login,
        crate::auth::handlers::register,
        crate::auth::handlers::logout,

        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::get_employee_by_code,
        crate::api::employee::create_employee,
        crate::api::employee::update_employee,
        crate::api::employee::delete_employee,
        crate::api::employee::employee_summary,

        crate::api::attendance::list_attendance,
        crate::api::attendance::get_attendance,
        crate::api::attendance::attendance_by_date_range,
        crate::api::attendance::create_attendance,
        crate::api::attendance::update_attendance,
        crate::api::attendance::delete_attendance,
        crate::api::attendance::attendance_summary,
        crate::api::attendance::shift_summary,
        crate::api::attendance::time_issues,
        crate::api::attendance::employee_rates
    ),
    components(
        schemas(
            LoginReqDto,
            LoginResponse,
            RegisterReqDto,
            RegisteredUser,
            UserInfo,
            CreatedId,
            Employee,
            CreateEmployee,
            UpdateEmployee,
            EmployeeSummary,
            AttendanceRecord,
            AttendanceEntry,
            AttendancePayload,
            StatusCounts,
            AttendanceSummary,
            ShiftTotals,
            TimeIssue,
            TimeIssueKind,
            EmployeeAttendance,
            EmployeeAttendanceReport
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness probe"),
        (name = "Auth", description = "Login, registration and logout"),
        (name = "Employee", description = "Employee registry APIs"),
        (name = "Attendance", description = "Attendance records and dashboards"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_every_route_and_the_bearer_scheme() {
        let doc = ApiDoc::openapi();

        for path in [
            "/api/health",
            "/api/auth/login",
            "/api/employees/{id}",
            "/api/employees/employee-id/{code}",
            "/api/attendance/date-range",
            "/api/attendance/stats/issues",
            "/api/attendance/stats/employees",
        ] {
            assert!(doc.paths.paths.contains_key(path), "{path}");
        }

        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
