use actix_web::{Error as ActixError, FromRequest, HttpRequest, dev::Payload, web::Data};
use anyhow::{Result, anyhow};
use bcrypt::verify;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::future::{Ready, ready};
use uuid::Uuid;

use crate::config::Config;
use crate::database::models::{AuthResponse, EmployeeRole, LoginInput};
use crate::database::repositories::EmployeeRepository;
use crate::error::AppError;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid, // employee id
    pub email: String,
    pub role: EmployeeRole,
    pub exp: usize, // expiration time
}

impl Claims {
    pub fn employee_id(&self) -> Uuid {
        self.sub
    }

    pub fn is_admin(&self) -> bool {
        self.role == EmployeeRole::Admin
    }

    /// Leave and activity approvals require an elevated role.
    pub fn can_approve(&self) -> bool {
        self.role.can_approve()
    }
}

impl FromRequest for Claims {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = req
            .headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "));

        let Some(token) = token else {
            return ready(Err(AppError::Unauthorized.into()));
        };

        let Some(config) = req.app_data::<Data<Config>>() else {
            return ready(Err(AppError::Unauthorized.into()));
        };

        match decode::<Claims>(
            token,
            &DecodingKey::from_secret(config.jwt_secret.as_ref()),
            &Validation::new(Algorithm::HS256),
        ) {
            Ok(token_data) => ready(Ok(token_data.claims)),
            Err(_) => ready(Err(AppError::Unauthorized.into())),
        }
    }
}

#[derive(Clone)]
pub struct AuthService {
    employee_repository: EmployeeRepository,
    config: Config,
}

impl AuthService {
    pub fn new(config: Config, employee_repository: EmployeeRepository) -> Self {
        Self {
            employee_repository,
            config,
        }
    }

    pub async fn login(&self, request: LoginInput) -> Result<AuthResponse> {
        let employee = self
            .employee_repository
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| anyhow!("Invalid email or password"))?;

        if !verify(&request.password, &employee.password_hash)? {
            return Err(anyhow!("Invalid email or password"));
        }

        let token = self.generate_token(employee.id, &employee.email, employee.role)?;

        Ok(AuthResponse {
            token,
            employee: employee.into(),
        })
    }

    pub fn generate_token(&self, employee_id: Uuid, email: &str, role: EmployeeRole) -> Result<String> {
        let expiration = Utc::now() + Duration::days(self.config.jwt_expiration_days);

        let claims = Claims {
            sub: employee_id,
            email: email.to_string(),
            role,
            exp: expiration.timestamp() as usize,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_ref()),
        )?;

        Ok(token)
    }
}
