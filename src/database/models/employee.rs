use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::macros::string_enum;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub gender: Option<String>,
    pub join_date: Option<NaiveDate>,
    pub role: EmployeeRole,
    pub department: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

string_enum! {
    #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
    #[serde(rename_all = "lowercase")]
    pub enum EmployeeRole {
        Admin => "admin",
        Hr => "hr",
        Manager => "manager",
        Employee => "employee",
    }
}

impl Default for EmployeeRole {
    fn default() -> Self {
        EmployeeRole::Employee
    }
}

impl EmployeeRole {
    /// Approve/reject powers for leave and activity requests.
    pub fn can_approve(&self) -> bool {
        matches!(
            self,
            EmployeeRole::Admin | EmployeeRole::Hr | EmployeeRole::Manager
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub employee: EmployeeInfo,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeInfo {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: EmployeeRole,
    pub department: Option<String>,
}

impl From<Employee> for EmployeeInfo {
    fn from(employee: Employee) -> Self {
        Self {
            id: employee.id,
            email: employee.email,
            name: employee.name,
            role: employee.role,
            department: employee.department,
        }
    }
}
