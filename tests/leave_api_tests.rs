use actix_web::{App, http::StatusCode, test, web};
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

use hrms_be::database::models::EmployeeRole;
use hrms_be::database::repositories::{
    EmployeeRepository, LeaveBalanceRepository, LeaveRepository, NotificationRepository,
};
use hrms_be::handlers::leave;
use hrms_be::services::Notifier;
use hrms_be::LeavePolicy;

mod common;

macro_rules! leave_app {
    ($ctx:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($ctx.pool.clone()))
                .app_data(web::Data::new(EmployeeRepository::new($ctx.pool.clone())))
                .app_data(web::Data::new(LeaveBalanceRepository::new(
                    $ctx.pool.clone(),
                )))
                .app_data(web::Data::new(LeaveRepository::new($ctx.pool.clone())))
                .app_data(web::Data::new(Notifier::new(NotificationRepository::new(
                    $ctx.pool.clone(),
                ))))
                .app_data(web::Data::new(LeavePolicy::default()))
                .app_data(web::Data::new($ctx.config.clone()))
                .service(
                    web::scope("/api/v1/leave")
                        .route("", web::post().to(leave::create_leave_request))
                        .route("", web::get().to(leave::list_leave_requests))
                        .route("/balance", web::get().to(leave::get_leave_balance))
                        .route("/{id}", web::get().to(leave::get_leave_request))
                        .route("/{id}", web::patch().to(leave::update_leave_status)),
                ),
        )
        .await
    };
}

#[actix_web::test]
async fn create_leave_request_without_token_is_unauthorized() {
    // Arrange
    let ctx = common::TestContext::new();
    let app = leave_app!(ctx);

    // Act
    let req = test::TestRequest::post()
        .uri("/api/v1/leave")
        .set_json(json!({
            "leave_type": "vacation",
            "start_date": "2024-03-10",
            "end_date": "2024-03-12",
            "reason": "Family trip"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    // Assert
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn get_leave_balance_without_token_is_unauthorized() {
    // Arrange
    let ctx = common::TestContext::new();
    let app = leave_app!(ctx);

    // Act
    let req = test::TestRequest::get()
        .uri("/api/v1/leave/balance")
        .to_request();
    let resp = test::call_service(&app, req).await;

    // Assert
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn garbage_token_is_unauthorized() {
    // Arrange
    let ctx = common::TestContext::new();
    let app = leave_app!(ctx);

    // Act
    let req = test::TestRequest::get()
        .uri("/api/v1/leave/balance")
        .insert_header(("Authorization", "Bearer not-a-jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    // Assert
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn employee_cannot_approve_a_leave_request() {
    // Arrange
    let ctx = common::TestContext::new();
    let app = leave_app!(ctx);
    let token = ctx.token_for_role(EmployeeRole::Employee);

    // Act
    let req = test::TestRequest::patch()
        .uri(&format!("/api/v1/leave/{}", Uuid::new_v4()))
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .set_json(json!({ "status": "approved" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    // Assert
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn employee_cannot_reject_a_leave_request() {
    // Arrange
    let ctx = common::TestContext::new();
    let app = leave_app!(ctx);
    let token = ctx.token_for_role(EmployeeRole::Employee);

    // Act
    let req = test::TestRequest::patch()
        .uri(&format!("/api/v1/leave/{}", Uuid::new_v4()))
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .set_json(json!({
            "status": "rejected",
            "rejection_reason": "Not enough coverage that week"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    // Assert
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn status_cannot_be_reset_to_pending() {
    // Arrange
    let ctx = common::TestContext::new();
    let app = leave_app!(ctx);
    let token = ctx.token_for_role(EmployeeRole::Hr);

    // Act
    let req = test::TestRequest::patch()
        .uri(&format!("/api/v1/leave/{}", Uuid::new_v4()))
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .set_json(json!({ "status": "pending" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    // Assert
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn start_date_after_end_date_is_rejected() {
    // Arrange
    let ctx = common::TestContext::new();
    let app = leave_app!(ctx);
    let token = ctx.token_for_role(EmployeeRole::Employee);

    // Act
    let req = test::TestRequest::post()
        .uri("/api/v1/leave")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .set_json(json!({
            "leave_type": "vacation",
            "start_date": "2024-03-12",
            "end_date": "2024-03-10",
            "reason": "Family trip"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    // Assert
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn employee_cannot_file_leave_for_someone_else() {
    // Arrange
    let ctx = common::TestContext::new();
    let app = leave_app!(ctx);
    let token = ctx.token_for_role(EmployeeRole::Employee);

    // Act
    let req = test::TestRequest::post()
        .uri("/api/v1/leave")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .set_json(json!({
            "employee_id": Uuid::new_v4(),
            "leave_type": "vacation",
            "start_date": "2024-03-10",
            "end_date": "2024-03-12",
            "reason": "Family trip"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    // Assert
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}
