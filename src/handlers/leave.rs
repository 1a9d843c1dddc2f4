use actix_web::{HttpResponse, web};
use chrono::{Datelike, Utc};
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::{LeaveRequestInput, LeaveStatus, LeaveStatusUpdateInput};
use crate::database::repositories::{EmployeeRepository, LeaveBalanceRepository, LeaveRepository};
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::activity_policy::month_bounds;
use crate::services::leave_policy::{
    LeaveValidationContext, requested_days, validate_leave_request,
};
use crate::services::{Claims, LeavePolicy, Notifier};

#[derive(Debug, Deserialize)]
pub struct LeaveListQuery {
    pub employee_id: Option<Uuid>,
    pub status: Option<String>,
}

/// Submit a leave request. Balance lock, policy validation, the pending
/// row and the balance reservation all commit in one transaction; a second
/// concurrent request cannot sneak past the quota on a stale read.
pub async fn create_leave_request(
    claims: Claims,
    pool: web::Data<PgPool>,
    employee_repo: web::Data<EmployeeRepository>,
    balance_repo: web::Data<LeaveBalanceRepository>,
    leave_repo: web::Data<LeaveRepository>,
    policy: web::Data<LeavePolicy>,
    notifier: web::Data<Notifier>,
    input: web::Json<LeaveRequestInput>,
) -> Result<HttpResponse, AppError> {
    let input = input.into_inner();

    // Employees file for themselves; elevated roles may file for others.
    let employee_id = match input.employee_id {
        Some(id) if id != claims.employee_id() => {
            if !claims.can_approve() {
                return Err(AppError::Forbidden(
                    "Leave requests can only be filed for yourself".to_string(),
                ));
            }
            id
        }
        _ => claims.employee_id(),
    };

    if input.start_date > input.end_date {
        return Err(AppError::BadRequest(
            "start_date cannot be after end_date".to_string(),
        ));
    }
    if input.reason.trim().is_empty() {
        return Err(AppError::BadRequest("A reason is required".to_string()));
    }

    let employee = employee_repo
        .find_by_id(employee_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Employee not found".to_string()))?;

    let custom_duration = input.is_half_day.then_some(0.5);
    let duration = requested_days(input.start_date, input.end_date, custom_duration);
    let total_days = duration.ceil() as i32;
    let today = Utc::now().date_naive();
    let year = today.year();

    let mut tx = pool.begin().await.map_err(AppError::from)?;

    let balance = balance_repo
        .ensure_for_update(&mut tx, employee_id, year)
        .await?;

    // Emergency usage is counted in the month of the request's start date.
    let (month_start, month_end) = month_bounds(input.start_date);
    let emergency_taken = leave_repo
        .count_emergency_in_window(&mut tx, employee_id, month_start, month_end)
        .await?;

    let ctx = LeaveValidationContext {
        today,
        gender: employee.gender.clone(),
        join_date: employee.join_date,
        balance: (&balance).into(),
        emergency_taken_in_month: emergency_taken,
    };
    let outcome = validate_leave_request(
        &policy,
        &ctx,
        input.leave_type,
        input.start_date,
        input.end_date,
        custom_duration,
    );

    if !outcome.valid {
        if let Err(err) = tx.rollback().await {
            log::error!("Rollback after policy rejection failed: {}", err);
        }
        let error = outcome.error.as_deref().unwrap_or("Invalid leave request");
        return Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error(error)));
    }

    let request = leave_repo
        .create_request(
            &mut tx,
            employee_id,
            input.leave_type,
            input.start_date,
            input.end_date,
            total_days,
            duration,
            &input.reason,
            input.notes.as_deref(),
        )
        .await?;

    // Reserve the balance; no-op for types without a persistent counter.
    balance_repo
        .apply_usage(&mut tx, employee_id, year, input.leave_type, duration)
        .await?;

    tx.commit().await.map_err(AppError::from)?;

    notifier.leave_submitted(
        employee_id,
        &employee.email,
        input.leave_type.as_str(),
        duration,
    );

    let data = json!({ "id": request.id });
    let body = match outcome.warning.as_deref() {
        Some(warning) => ApiResponse::success_with_message(Some(data), warning),
        None => ApiResponse::success(data),
    };
    Ok(HttpResponse::Created().json(body))
}

/// Approve, reject or cancel a pending request. Reject and cancel refund
/// the reserved amount; approval confirms the reservation made at creation.
pub async fn update_leave_status(
    claims: Claims,
    pool: web::Data<PgPool>,
    leave_repo: web::Data<LeaveRepository>,
    balance_repo: web::Data<LeaveBalanceRepository>,
    employee_repo: web::Data<EmployeeRepository>,
    notifier: web::Data<Notifier>,
    path: web::Path<Uuid>,
    input: web::Json<LeaveStatusUpdateInput>,
) -> Result<HttpResponse, AppError> {
    let request_id = path.into_inner();
    let input = input.into_inner();

    // Authorization before any lookup or mutation; owners may only cancel.
    match input.status {
        LeaveStatus::Pending => {
            return Err(AppError::BadRequest(
                "A request cannot be moved back to pending".to_string(),
            ));
        }
        LeaveStatus::Approved | LeaveStatus::Rejected => {
            if !claims.can_approve() {
                return Err(AppError::Forbidden(
                    "Insufficient permissions to decide leave requests".to_string(),
                ));
            }
        }
        LeaveStatus::Cancelled => {}
    }

    let request = leave_repo
        .get_request_by_id(request_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Leave request not found".to_string()))?;

    if input.status == LeaveStatus::Cancelled
        && request.employee_id != claims.employee_id()
        && !claims.can_approve()
    {
        return Err(AppError::Forbidden(
            "Only the owner or an approver can cancel this request".to_string(),
        ));
    }

    if request.status != LeaveStatus::Pending {
        return Err(AppError::BadRequest(
            "Only pending requests can be updated".to_string(),
        ));
    }

    let rejection_reason = if input.status == LeaveStatus::Rejected {
        let reason = input
            .rejection_reason
            .as_deref()
            .map(str::trim)
            .unwrap_or("");
        if reason.chars().count() < 10 {
            return Err(AppError::BadRequest(
                "A rejection reason of at least 10 characters is required".to_string(),
            ));
        }
        Some(reason.to_string())
    } else {
        None
    };

    let approved_by =
        matches!(input.status, LeaveStatus::Approved | LeaveStatus::Rejected).then(|| claims.employee_id());

    let mut tx = pool.begin().await.map_err(AppError::from)?;

    let affected = leave_repo
        .set_status(
            &mut tx,
            request_id,
            input.status,
            approved_by,
            rejection_reason.as_deref(),
        )
        .await?;
    if affected == 0 {
        if let Err(err) = tx.rollback().await {
            log::error!("Rollback after stale status update failed: {}", err);
        }
        return Err(AppError::BadRequest(
            "Leave request is no longer pending".to_string(),
        ));
    }

    // Refund the reservation exactly once when leaving pending for a
    // non-approved terminal state. One-shot flags stay consumed.
    if matches!(input.status, LeaveStatus::Rejected | LeaveStatus::Cancelled) {
        balance_repo
            .apply_usage(
                &mut tx,
                request.employee_id,
                Utc::now().year(),
                request.leave_type,
                -request.duration,
            )
            .await?;
    }

    tx.commit().await.map_err(AppError::from)?;

    if let Ok(Some(employee)) = employee_repo.find_by_id(request.employee_id).await {
        notifier.leave_status_changed(employee.id, &employee.email, input.status.as_str());
    }

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::message(&format!(
        "Leave request {}",
        input.status
    ))))
}

/// The caller's balance row for the current year, created on first access.
pub async fn get_leave_balance(
    claims: Claims,
    balance_repo: web::Data<LeaveBalanceRepository>,
) -> Result<HttpResponse, AppError> {
    let year = Utc::now().year();
    let balance = balance_repo.ensure(claims.employee_id(), year).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(balance)))
}

pub async fn get_leave_request(
    claims: Claims,
    leave_repo: web::Data<LeaveRepository>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let request = leave_repo
        .get_request_by_id(path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Leave request not found".to_string()))?;

    if request.employee_id != claims.employee_id() && !claims.can_approve() {
        return Err(AppError::Forbidden(
            "Cannot view other employees' requests".to_string(),
        ));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(request)))
}

pub async fn list_leave_requests(
    claims: Claims,
    leave_repo: web::Data<LeaveRepository>,
    query: web::Query<LeaveListQuery>,
) -> Result<HttpResponse, AppError> {
    // Employees see their own history; approvers may filter freely.
    let employee_id = if claims.can_approve() {
        query.employee_id
    } else {
        Some(claims.employee_id())
    };

    let status = match query.status.as_deref() {
        Some(status_str) => Some(
            status_str
                .parse::<LeaveStatus>()
                .map_err(|_| AppError::BadRequest("Invalid status filter".to_string()))?,
        ),
        None => None,
    };

    let requests = leave_repo.list_requests(employee_id, status).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(requests)))
}
