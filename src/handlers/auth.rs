use actix_web::{HttpResponse, web};

use crate::AppState;
use crate::database::models::{EmployeeInfo, LoginInput};
use crate::database::repositories::EmployeeRepository;
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::Claims;

pub async fn login(
    state: web::Data<AppState>,
    input: web::Json<LoginInput>,
) -> Result<HttpResponse, AppError> {
    let response = state
        .auth_service
        .login(input.into_inner())
        .await
        .map_err(|err| {
            log::warn!("Login failed: {}", err);
            AppError::Unauthorized
        })?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(response)))
}

pub async fn me(
    claims: Claims,
    employee_repo: web::Data<EmployeeRepository>,
) -> Result<HttpResponse, AppError> {
    let employee = employee_repo
        .find_by_id(claims.employee_id())
        .await?
        .ok_or_else(|| AppError::NotFound("Employee not found".to_string()))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(EmployeeInfo::from(employee))))
}
