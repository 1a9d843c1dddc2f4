use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::macros::string_enum;

string_enum! {
    #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
    #[serde(rename_all = "snake_case")]
    pub enum LeaveType {
        Sick => "sick",
        Vacation => "vacation",
        Personal => "personal",
        PaidLeave => "paid_leave",
        Maternity => "maternity",
        Paternity => "paternity",
        Unpaid => "unpaid",
        Emergency => "emergency",
        Birthday => "birthday",
        Anniversary => "anniversary",
        CompOff => "comp_off",
        Overseas => "overseas",
    }
}

impl LeaveType {
    /// Types drawing on the shared annual paid-leave counter.
    pub fn consumes_paid_quota(&self) -> bool {
        matches!(
            self,
            LeaveType::Sick | LeaveType::Vacation | LeaveType::Personal | LeaveType::PaidLeave
        )
    }
}

string_enum! {
    #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
    #[serde(rename_all = "lowercase")]
    pub enum LeaveStatus {
        Pending => "pending",
        Approved => "approved",
        Rejected => "rejected",
        Cancelled => "cancelled",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Whole-day count stored for schema compatibility; half days round up.
    pub total_days: i32,
    /// True fractional duration in days (0.5 for a half day).
    pub duration: f32,
    pub reason: String,
    pub rejection_reason: Option<String>,
    pub notes: Option<String>,
    pub status: LeaveStatus,
    pub approved_by: Option<Uuid>,
    pub approval_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LeaveRequestInput {
    /// Elevated roles may file on behalf of another employee.
    pub employee_id: Option<Uuid>,
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    #[serde(default)]
    pub is_half_day: bool,
    pub half_day_period: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LeaveStatusUpdateInput {
    pub status: LeaveStatus,
    pub rejection_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeLeaveBalance {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub year: i32,
    pub paid_leave_quota: f32,
    pub paid_leave_used: f32,
    pub emergency_leave_used_count: i32,
    pub birthday_leave_used: bool,
    pub anniversary_leave_used: bool,
    pub maternity_leave_quota: f32,
    pub maternity_leave_used: f32,
    pub paternity_leave_quota: f32,
    pub paternity_leave_used: f32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
