use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "employee_id": "EMP001",
        "name": "John Smith",
        "shift": "Morning",
        "email": "john.smith@plant.local",
        "phone": "+15550100",
        "status": "Active",
        "created_at": "2026-01-01T08:00:00Z"
    })
)]
pub struct Employee {
    #[schema(example = 1)]
    pub id: u64,

    /// External employee code, unique across the plant.
    #[serde(rename = "employee_id")]
    #[sqlx(rename = "employee_id")]
    #[schema(example = "EMP001")]
    pub employee_code: String,

    #[schema(example = "John Smith")]
    pub name: String,

    #[schema(example = "Morning")]
    pub shift: String,

    #[schema(nullable = true)]
    pub email: Option<String>,

    #[schema(nullable = true)]
    pub phone: Option<String>,

    #[schema(example = "Active")]
    pub status: String,

    #[schema(value_type = Option<String>, example = "2026-01-01T08:00:00Z")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Registration body. Required fields are optional here so a missing one
/// becomes a validation message instead of a decode error.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateEmployee {
    #[serde(rename = "employee_id")]
    #[schema(example = "EMP010")]
    pub employee_code: Option<String>,
    #[schema(example = "Maria Rodriguez")]
    pub name: Option<String>,
    #[schema(example = "Afternoon")]
    pub shift: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateEmployee {
    pub name: Option<String>,
    pub shift: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[schema(example = "Active")]
    pub status: Option<String>,
}

/// Row values for a new employee after presence checks.
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub employee_code: String,
    pub name: String,
    pub shift: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Full replacement of the mutable employee columns.
#[derive(Debug, Clone)]
pub struct EmployeeChanges {
    pub name: String,
    pub shift: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: String,
}
