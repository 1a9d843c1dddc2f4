use std::time::Duration;

use anyhow::Result;
use moka::future::Cache;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::{models::Employee, utils::sql};

const EMPLOYEE_CACHE_CAPACITY: u64 = 1_000;
const EMPLOYEE_CACHE_TTL_SECS: u64 = 120;

/// Employee lookups back every policy validation, so profiles are cached
/// with a short TTL.
#[derive(Clone)]
pub struct EmployeeRepository {
    pool: PgPool,
    cache: Cache<Uuid, Employee>,
}

impl EmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        let cache = Cache::builder()
            .max_capacity(EMPLOYEE_CACHE_CAPACITY)
            .time_to_live(Duration::from_secs(EMPLOYEE_CACHE_TTL_SECS))
            .build();
        Self { pool, cache }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Employee>> {
        if let Some(employee) = self.cache.get(&id).await {
            return Ok(Some(employee));
        }

        let employee = sqlx::query_as::<_, Employee>(&sql(r#"
            SELECT
                id,
                email,
                password_hash,
                name,
                gender,
                join_date,
                role,
                department,
                created_at,
                updated_at
            FROM
                employees
            WHERE
                id = ?
        "#))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(ref employee) = employee {
            self.cache.insert(id, employee.clone()).await;
        }

        Ok(employee)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Employee>> {
        let employee = sqlx::query_as::<_, Employee>(&sql(r#"
            SELECT
                id,
                email,
                password_hash,
                name,
                gender,
                join_date,
                role,
                department,
                created_at,
                updated_at
            FROM
                employees
            WHERE
                email = ?
        "#))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(employee)
    }
}
