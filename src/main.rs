use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, Responder, get, middleware::Logger, web};
use anyhow::Result;

use hrms_be::database::{
    init_database,
    repositories::{
        ActivityRepository, EmployeeRepository, LeaveBalanceRepository, LeaveRepository,
        NotificationRepository,
    },
};
use hrms_be::handlers::{activity, auth, leave};
use hrms_be::middleware::RequestId;
use hrms_be::services::Notifier;
use hrms_be::{AppState, AuthService, Config, LeavePolicy};

#[get("/")]
async fn hello() -> impl Responder {
    HttpResponse::Ok().body("HRMS API v1.0")
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now()
    }))
}

#[actix_web::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logger
    env_logger::init();

    println!("🚀 Starting HRMS API server...");

    // Load configuration
    let config = Config::from_env()?;
    println!(
        "📋 Configuration loaded (environment: {})",
        config.environment
    );

    // Initialize database
    let pool = init_database(&config.database_url).await?;
    println!("✅ Database initialized");

    // Initialize repositories and services
    let employee_repository = EmployeeRepository::new(pool.clone());
    let balance_repository = LeaveBalanceRepository::new(pool.clone());
    let leave_repository = LeaveRepository::new(pool.clone());
    let activity_repository = ActivityRepository::new(pool.clone());
    let notification_repository = NotificationRepository::new(pool.clone());
    let auth_service = AuthService::new(config.clone(), employee_repository.clone());
    let notifier = Notifier::new(notification_repository);
    let policy = LeavePolicy::default();

    let app_state = web::Data::new(AppState { auth_service });
    let pool_data = web::Data::new(pool);
    let employee_repo_data = web::Data::new(employee_repository);
    let balance_repo_data = web::Data::new(balance_repository);
    let leave_repo_data = web::Data::new(leave_repository);
    let activity_repo_data = web::Data::new(activity_repository);
    let notifier_data = web::Data::new(notifier);
    let policy_data = web::Data::new(policy);
    let config_data = web::Data::new(config.clone());

    let server_address = config.server_address();
    println!("🌐 Server starting on http://{}", server_address);

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .app_data(pool_data.clone())
            .app_data(employee_repo_data.clone())
            .app_data(balance_repo_data.clone())
            .app_data(leave_repo_data.clone())
            .app_data(activity_repo_data.clone())
            .app_data(notifier_data.clone())
            .app_data(policy_data.clone())
            .app_data(config_data.clone())
            .wrap(
                Cors::default()
                    .allowed_origin("http://localhost:3000")
                    .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
                    .allowed_headers(vec![
                        "Authorization",
                        "Content-Type",
                        "Accept",
                        "X-Requested-With",
                        "X-Correlation-ID",
                    ])
                    .max_age(3600),
            )
            .wrap(RequestId)
            .wrap(Logger::new(
                r#"%a "%r" %s %b "%{Referer}i" "%{User-Agent}i" %T correlation_id=%{x-correlation-id}o"#,
            ))
            .service(hello)
            .service(health)
            .service(
                web::scope("/api/v1")
                    .service(
                        web::scope("/auth")
                            .route("/login", web::post().to(auth::login))
                            .route("/me", web::get().to(auth::me)),
                    )
                    .service(
                        web::scope("/leave")
                            .route("", web::post().to(leave::create_leave_request))
                            .route("", web::get().to(leave::list_leave_requests))
                            .route("/balance", web::get().to(leave::get_leave_balance))
                            .route("/{id}", web::get().to(leave::get_leave_request))
                            .route("/{id}", web::patch().to(leave::update_leave_status)),
                    )
                    .service(
                        web::scope("/activity")
                            .route(
                                "/work-from-home",
                                web::post().to(activity::create_wfh_request),
                            )
                            .route(
                                "/partial-day",
                                web::post().to(activity::create_partial_day_request),
                            )
                            .route(
                                "/admin/requests",
                                web::get().to(activity::list_pending_activity_requests),
                            )
                            .route(
                                "/admin/requests",
                                web::put().to(activity::decide_activity_request),
                            ),
                    )
                    .service(web::scope("/requests").route(
                        "/regularization",
                        web::post().to(activity::create_regularization_request),
                    )),
            )
    })
    .bind(&server_address)?
    .run()
    .await
    .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}
