use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;

use crate::handlers::shared::ApiResponse;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Internal server error")]
    InternalServerError,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();

        // Infrastructure details stay in the server log; clients get a
        // generic message for 5xx.
        let message = match self {
            AppError::DatabaseError(err) => {
                log::error!("Request failed with database error: {}", err);
                "Internal server error".to_string()
            }
            AppError::InternalServerError => {
                log::error!("Request failed with internal error");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(status_code).json(ApiResponse::<()>::error(&message))
    }
}

impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> Self {
        AppError::DatabaseError(error)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        match error.downcast::<sqlx::Error>() {
            Ok(sqlx_err) => AppError::DatabaseError(sqlx_err),
            Err(other) => {
                log::error!("Unhandled error: {}", other);
                AppError::InternalServerError
            }
        }
    }
}
