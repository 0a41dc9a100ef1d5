use crate::{
    auth::auth::AuthUser,
    error::ApiError,
    model::{
        employee::{CreateEmployee, EmployeeChanges, NewEmployee, UpdateEmployee},
        labels::EmployeeStatus,
    },
    models::ApiResponse,
    repository::{EmployeeRepository, RepoError},
};
use actix_web::{HttpResponse, web};
use tracing::{debug, info};

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn employee_not_found() -> ApiError {
    ApiError::NotFound("Employee not found".to_string())
}

fn code_taken() -> ApiError {
    ApiError::Conflict("Employee ID already exists".to_string())
}

/// List employees
#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "All employees ordered by name", body = Vec<Employee>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee",
    security(("bearer_auth" = []))
)]
pub async fn list_employees(
    employees: web::Data<dyn EmployeeRepository>,
) -> Result<HttpResponse, ApiError> {
    let rows = employees.list().await?;
    debug!(count = rows.len(), "Fetched employees");

    Ok(HttpResponse::Ok().json(ApiResponse::ok(rows)))
}

/// Get Employee by ID
#[utoipa::path(
    get,
    path = "/api/employees/{id}",
    params(("id" = u64, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "success": false,
            "message": "Employee not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee",
    security(("bearer_auth" = []))
)]
pub async fn get_employee(
    employees: web::Data<dyn EmployeeRepository>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let employee = employees
        .find_by_id(path.into_inner())
        .await?
        .ok_or_else(employee_not_found)?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(employee)))
}

/// Get Employee by employee code
#[utoipa::path(
    get,
    path = "/api/employees/employee-id/{code}",
    params(("code" = String, Path, description = "External employee code")),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee",
    security(("bearer_auth" = []))
)]
pub async fn get_employee_by_code(
    employees: web::Data<dyn EmployeeRepository>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let employee = employees
        .find_by_code(&path.into_inner())
        .await?
        .ok_or_else(employee_not_found)?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(employee)))
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created successfully", body = Employee),
        (status = 400, description = "Employee ID, name, and shift are required"),
        (status = 409, description = "Employee ID already exists"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee",
    security(("bearer_auth" = []))
)]
pub async fn create_employee(
    auth: AuthUser,
    employees: web::Data<dyn EmployeeRepository>,
    payload: web::Json<CreateEmployee>,
) -> Result<HttpResponse, ApiError> {
    let payload = payload.into_inner();

    let (Some(employee_code), Some(name), Some(shift)) = (
        present(payload.employee_code),
        present(payload.name),
        present(payload.shift),
    ) else {
        return Err(ApiError::Validation(
            "Employee ID, name, and shift are required".to_string(),
        ));
    };

    if employees.find_by_code(&employee_code).await?.is_some() {
        return Err(code_taken());
    }

    let new_employee = NewEmployee {
        employee_code,
        name,
        shift,
        email: present(payload.email),
        phone: present(payload.phone),
    };

    let id = employees
        .insert(&new_employee)
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(_) => code_taken(),
            other => other.into(),
        })?;

    info!(id, employee_code = %new_employee.employee_code, user_id = auth.user_id, "Employee created");

    let created = employees.find_by_id(id).await?.ok_or_else(employee_not_found)?;

    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        created,
        "Employee created successfully",
    )))
}

/// Update Employee
#[utoipa::path(
    put,
    path = "/api/employees/{id}",
    params(("id" = u64, Path, description = "Employee ID")),
    request_body = UpdateEmployee,
    responses(
        (status = 200, description = "Employee updated successfully"),
        (status = 400, description = "Name and shift are required"),
        (status = 404, description = "Employee not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee",
    security(("bearer_auth" = []))
)]
pub async fn update_employee(
    auth: AuthUser,
    employees: web::Data<dyn EmployeeRepository>,
    path: web::Path<u64>,
    body: web::Json<UpdateEmployee>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let body = body.into_inner();

    let (Some(name), Some(shift)) = (present(body.name), present(body.shift)) else {
        return Err(ApiError::Validation("Name and shift are required".to_string()));
    };

    let changes = EmployeeChanges {
        name,
        shift,
        email: present(body.email),
        phone: present(body.phone),
        status: present(body.status).unwrap_or_else(|| EmployeeStatus::Active.to_string()),
    };

    if employees.update(id, &changes).await? == 0 {
        return Err(employee_not_found());
    }

    info!(id, user_id = auth.user_id, "Employee updated");

    Ok(HttpResponse::Ok().json(ApiResponse::message("Employee updated successfully")))
}

/// Delete Employee
///
/// Soft delete: the employee is marked Inactive and their attendance history stays.
#[utoipa::path(
    delete,
    path = "/api/employees/{id}",
    params(("id" = u64, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee deleted successfully"),
        (status = 404, description = "Employee not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee",
    security(("bearer_auth" = []))
)]
pub async fn delete_employee(
    auth: AuthUser,
    employees: web::Data<dyn EmployeeRepository>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    if employees.deactivate(id).await? == 0 {
        return Err(employee_not_found());
    }

    info!(id, user_id = auth.user_id, "Employee deactivated");

    Ok(HttpResponse::Ok().json(ApiResponse::message("Employee deleted successfully")))
}

/// Employee counts per shift and status
#[utoipa::path(
    get,
    path = "/api/employees/stats/summary",
    responses(
        (status = 200, description = "Employee statistics", body = EmployeeSummary),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee",
    security(("bearer_auth" = []))
)]
pub async fn employee_summary(
    employees: web::Data<dyn EmployeeRepository>,
) -> Result<HttpResponse, ApiError> {
    let summary = employees.summary().await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(summary)))
}
