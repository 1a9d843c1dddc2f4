use anyhow::Result;
use sqlx::PgPool;

use crate::database::{models::NotificationInput, utils::sql};

/// Outbox writer; rows are drained by the external mail relay.
#[derive(Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn enqueue(&self, input: NotificationInput) -> Result<()> {
        sqlx::query(&sql(r#"
            INSERT INTO
                notifications (employee_id, email, subject, body)
            VALUES
                (?, ?, ?, ?)
        "#))
        .bind(input.employee_id)
        .bind(&input.email)
        .bind(&input.subject)
        .bind(&input.body)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
