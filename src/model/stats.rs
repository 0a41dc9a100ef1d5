use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Raw status breakdown of the attendance table, as counted by the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct StatusCounts {
    pub total_records: i64,
    pub present_count: i64,
    pub absent_count: i64,
    pub late_count: i64,
    pub half_day_count: i64,
    /// Rounded to 2 decimals; null on an empty table.
    pub avg_hours: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct EmployeeSummary {
    pub total_employees: i64,
    pub morning_shift: i64,
    pub afternoon_shift: i64,
    pub night_shift: i64,
    pub active_employees: i64,
    pub inactive_employees: i64,
}
