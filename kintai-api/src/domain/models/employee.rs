use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::EmployeeId;

/// Role handed to the core by the authentication layer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum EmployeeRole {
    Employee,
    Admin,
}

/// An employee as the directory stores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub employee_number: String,
    /// Contractual monthly target, bounded 140-180 at creation.
    pub required_monthly_hours: i32,
    pub role: EmployeeRole,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Data for registering an employee; the directory assigns id and timestamps.
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub name: String,
    pub employee_number: String,
    pub required_monthly_hours: i32,
    pub role: EmployeeRole,
}
