use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::macros::string_enum;

string_enum! {
    #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
    #[serde(rename_all = "lowercase")]
    pub enum ActivityStatus {
        Pending => "pending",
        Approved => "approved",
        Rejected => "rejected",
    }
}

string_enum! {
    #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
    #[serde(rename_all = "lowercase")]
    pub enum ActivityKind {
        Wfh => "wfh",
        Partial => "partial",
        Regularization => "regularization",
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct WorkFromHomeRequest {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub date: NaiveDate,
    pub status: ActivityStatus,
    pub reason: String,
    pub approved_by: Option<Uuid>,
    pub approval_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PartialDayRequest {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    /// Absence length in hours.
    pub duration: f32,
    pub status: ActivityStatus,
    pub reason: String,
    pub approved_by: Option<Uuid>,
    pub approval_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RegularizationRequest {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub date: NaiveDate,
    pub clock_in: NaiveTime,
    pub clock_out: NaiveTime,
    pub reason: String,
    pub status: ActivityStatus,
    pub approved_by: Option<Uuid>,
    pub approval_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct WorkFromHomeInput {
    pub dates: Vec<NaiveDate>,
    pub reason: String,
    pub request_type: Option<String>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PartialDayInput {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub reason: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RegularizationInput {
    pub employee_id: Option<Uuid>,
    pub date: NaiveDate,
    pub clock_in: NaiveTime,
    pub clock_out: NaiveTime,
    pub reason: String,
}

string_enum! {
    #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
    #[serde(rename_all = "lowercase")]
    pub enum ActivityAction {
        Approve => "approve",
        Reject => "reject",
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ActivityDecisionInput {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub action: ActivityAction,
    pub notes: Option<String>,
}
