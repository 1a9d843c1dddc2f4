use actix_web::{HttpResponse, web};
use chrono::Utc;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::{
    ActivityAction, ActivityDecisionInput, PartialDayInput, RegularizationInput, WorkFromHomeInput,
};
use crate::database::repositories::ActivityRepository;
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::LeavePolicy;
use crate::services::activity_policy::{
    check_partial_day, check_regularization, check_wfh_date, check_wfh_quota, month_bounds,
    partial_day_minutes, quarter_bounds,
};
use crate::services::Claims;

/// Submit one or more work-from-home dates. Every date is validated
/// against the window and quarter-cap rules, and the whole batch inserts
/// atomically; one bad date rolls back the lot.
pub async fn create_wfh_request(
    claims: Claims,
    pool: web::Data<PgPool>,
    activity_repo: web::Data<ActivityRepository>,
    policy: web::Data<LeavePolicy>,
    input: web::Json<WorkFromHomeInput>,
) -> Result<HttpResponse, AppError> {
    let input = input.into_inner();
    let employee_id = claims.employee_id();

    if input.dates.is_empty() {
        return Err(AppError::BadRequest(
            "At least one date is required".to_string(),
        ));
    }
    if input.reason.trim().is_empty() {
        return Err(AppError::BadRequest("A reason is required".to_string()));
    }

    let today = Utc::now().date_naive();
    let (quarter_start, quarter_end) = quarter_bounds(today);

    let mut tx = pool.begin().await.map_err(AppError::from)?;

    let existing_hits = activity_repo
        .count_wfh_in_quarter(&mut tx, employee_id, quarter_start, quarter_end)
        .await?;

    let mut ids: Vec<Uuid> = Vec::with_capacity(input.dates.len());
    for (index, date) in input.dates.iter().enumerate() {
        let window = check_wfh_date(&policy, today, *date);
        if !window.valid {
            return reject_with_policy_error(tx, window.error).await;
        }
        // Earlier dates of this submission count against the cap too.
        let quota = check_wfh_quota(&policy, existing_hits + index as i64);
        if !quota.valid {
            return reject_with_policy_error(tx, quota.error).await;
        }

        let id = activity_repo
            .insert_wfh(&mut tx, employee_id, *date, &input.reason)
            .await?;
        ids.push(id);
    }

    tx.commit().await.map_err(AppError::from)?;

    Ok(HttpResponse::Created().json(ApiResponse::success(json!({ "ids": ids }))))
}

pub async fn create_partial_day_request(
    claims: Claims,
    pool: web::Data<PgPool>,
    activity_repo: web::Data<ActivityRepository>,
    policy: web::Data<LeavePolicy>,
    input: web::Json<PartialDayInput>,
) -> Result<HttpResponse, AppError> {
    let input = input.into_inner();
    let employee_id = claims.employee_id();

    if input.end_time <= input.start_time {
        return Err(AppError::BadRequest(
            "end_time must be after start_time".to_string(),
        ));
    }
    if input.reason.trim().is_empty() {
        return Err(AppError::BadRequest("A reason is required".to_string()));
    }

    let minutes = partial_day_minutes(input.start_time, input.end_time);
    let duration_hours = minutes as f32 / 60.0;
    let today = Utc::now().date_naive();
    let (month_start, month_end) = month_bounds(input.date);

    let mut tx = pool.begin().await.map_err(AppError::from)?;

    let existing_hours = activity_repo
        .sum_partial_day_hours(&mut tx, employee_id, month_start, month_end)
        .await?;

    let outcome = check_partial_day(&policy, today, input.date, existing_hours, minutes);
    if !outcome.valid {
        return reject_with_policy_error(tx, outcome.error).await;
    }

    let id = activity_repo
        .insert_partial_day(
            &mut tx,
            employee_id,
            input.date,
            input.start_time,
            input.end_time,
            duration_hours,
            &input.reason,
        )
        .await?;

    tx.commit().await.map_err(AppError::from)?;

    Ok(HttpResponse::Created().json(ApiResponse::success(json!({ "id": id }))))
}

pub async fn create_regularization_request(
    claims: Claims,
    activity_repo: web::Data<ActivityRepository>,
    input: web::Json<RegularizationInput>,
) -> Result<HttpResponse, AppError> {
    let input = input.into_inner();

    // Non-elevated callers are pinned to their own id.
    let employee_id = match input.employee_id {
        Some(id) if id != claims.employee_id() => {
            if !claims.can_approve() {
                return Err(AppError::Forbidden(
                    "Regularization can only be filed for yourself".to_string(),
                ));
            }
            id
        }
        _ => claims.employee_id(),
    };

    let outcome = check_regularization(input.clock_in, input.clock_out);
    if !outcome.valid {
        let error = outcome.error.as_deref().unwrap_or("Invalid request");
        return Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error(error)));
    }

    let id = activity_repo
        .insert_regularization(
            employee_id,
            input.date,
            input.clock_in,
            input.clock_out,
            &input.reason,
        )
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::success(json!({ "id": id }))))
}

/// The admin approval queue: pending rows from all three activity tables.
pub async fn list_pending_activity_requests(
    claims: Claims,
    activity_repo: web::Data<ActivityRepository>,
) -> Result<HttpResponse, AppError> {
    if !claims.can_approve() {
        return Err(AppError::Forbidden(
            "Insufficient permissions to view the approval queue".to_string(),
        ));
    }

    let wfh = activity_repo.list_pending_wfh().await?;
    let partial = activity_repo.list_pending_partial_days().await?;
    let regularization = activity_repo.list_pending_regularizations().await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(json!({
        "wfh": wfh,
        "partial": partial,
        "regularization": regularization,
    }))))
}

/// Admin decision over any of the three activity request tables.
pub async fn decide_activity_request(
    claims: Claims,
    activity_repo: web::Data<ActivityRepository>,
    input: web::Json<ActivityDecisionInput>,
) -> Result<HttpResponse, AppError> {
    if !claims.can_approve() {
        return Err(AppError::Forbidden(
            "Insufficient permissions to decide activity requests".to_string(),
        ));
    }

    let input = input.into_inner();
    let affected = activity_repo
        .decide(
            input.kind,
            input.id,
            input.action,
            claims.employee_id(),
            input.notes.as_deref(),
        )
        .await?;

    if affected == 0 {
        return Err(AppError::NotFound(
            "Request not found or already decided".to_string(),
        ));
    }

    let verb = match input.action {
        ActivityAction::Approve => "approved",
        ActivityAction::Reject => "rejected",
    };
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::message(&format!("Request {}", verb))))
}

/// Roll back a validation-failed batch and surface the policy message.
async fn reject_with_policy_error(
    tx: sqlx::Transaction<'_, sqlx::Postgres>,
    error: Option<String>,
) -> Result<HttpResponse, AppError> {
    if let Err(err) = tx.rollback().await {
        log::error!("Rollback after policy rejection failed: {}", err);
    }
    let error = error.as_deref().unwrap_or("Invalid request");
    Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error(error)))
}
