//! Fixed labels stored as text in the `shift` and `status` columns.
//!
//! Request payloads keep these fields as free text; the enums are used where
//! the service has to count or group by a known label.

use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Display, EnumString, EnumIter, AsRefStr)]
pub enum Shift {
    Morning,
    Afternoon,
    Night,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Display, EnumString, EnumIter, AsRefStr)]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    #[strum(serialize = "Half Day")]
    HalfDay,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Display, EnumString, AsRefStr)]
pub enum EmployeeStatus {
    Active,
    Inactive,
}
