use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use hrms_be::database::models::EmployeeRole;
use hrms_be::database::repositories::EmployeeRepository;
use hrms_be::{AuthService, Config};

/// Shared fixture for handler-level tests. The pool connects lazily and is
/// never reached: every request here short-circuits on an auth or
/// validation failure before touching the database.
pub struct TestContext {
    pub config: Config,
    pub pool: PgPool,
    pub auth_service: AuthService,
}

impl TestContext {
    pub fn new() -> Self {
        let config = Config {
            database_url: "postgres://localhost:5432/hrms_test".to_string(),
            jwt_secret: "test-jwt-secret-key-that-is-long-enough".to_string(),
            jwt_expiration_days: 1,
            host: "127.0.0.1".to_string(),
            port: 0,
            environment: "test".to_string(),
        };

        let pool = PgPoolOptions::new()
            .connect_lazy(&config.database_url)
            .expect("Failed to create lazy pool");

        let auth_service = AuthService::new(config.clone(), EmployeeRepository::new(pool.clone()));

        Self {
            config,
            pool,
            auth_service,
        }
    }

    pub fn token_for_role(&self, role: EmployeeRole) -> String {
        self.auth_service
            .generate_token(Uuid::new_v4(), "test@example.com", role)
            .expect("Failed to create test token")
    }
}
