use anyhow::Result;
use chrono::{NaiveDate, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::database::{
    models::{LeaveRequest, LeaveStatus, LeaveType},
    utils::sql,
};

const REQUEST_COLUMNS: &str = r#"
    id,
    employee_id,
    leave_type,
    start_date,
    end_date,
    total_days,
    duration,
    reason,
    rejection_reason,
    notes,
    status,
    approved_by,
    approval_date,
    created_at,
    updated_at
"#;

#[derive(Clone)]
pub struct LeaveRepository {
    pool: PgPool,
}

impl LeaveRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a pending leave request. Runs inside the caller's transaction
    /// so the row and the balance reservation commit together.
    #[allow(clippy::too_many_arguments)]
    pub async fn create_request(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        employee_id: Uuid,
        leave_type: LeaveType,
        start_date: NaiveDate,
        end_date: NaiveDate,
        total_days: i32,
        duration: f32,
        reason: &str,
        notes: Option<&str>,
    ) -> Result<LeaveRequest> {
        let now = Utc::now();

        let request = sqlx::query_as::<_, LeaveRequest>(&sql(&format!(
            r#"
            INSERT INTO
                leave_requests (
                    employee_id,
                    leave_type,
                    start_date,
                    end_date,
                    total_days,
                    duration,
                    reason,
                    notes,
                    status,
                    created_at,
                    updated_at
                )
            VALUES
                (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING
                {}
            "#,
            REQUEST_COLUMNS
        )))
        .bind(employee_id)
        .bind(leave_type)
        .bind(start_date)
        .bind(end_date)
        .bind(total_days)
        .bind(duration)
        .bind(reason)
        .bind(notes)
        .bind(LeaveStatus::Pending)
        .bind(now)
        .bind(now)
        .fetch_one(&mut **tx)
        .await?;

        Ok(request)
    }

    pub async fn get_request_by_id(&self, id: Uuid) -> Result<Option<LeaveRequest>> {
        let request = sqlx::query_as::<_, LeaveRequest>(&sql(&format!(
            "SELECT {} FROM leave_requests WHERE id = ?",
            REQUEST_COLUMNS
        )))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(request)
    }

    /// Move a pending request to a terminal status. The `status = 'pending'`
    /// guard makes the transition race-safe; 0 rows affected means the
    /// request was already decided.
    pub async fn set_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
        status: LeaveStatus,
        approved_by: Option<Uuid>,
        rejection_reason: Option<&str>,
    ) -> Result<u64> {
        let now = Utc::now();
        let approval_date = approved_by.map(|_| now);

        let result = sqlx::query(&sql(r#"
            UPDATE
                leave_requests
            SET
                status = ?,
                approved_by = ?,
                approval_date = ?,
                rejection_reason = ?,
                updated_at = ?
            WHERE
                id = ?
                AND status = 'pending'
        "#))
        .bind(status)
        .bind(approved_by)
        .bind(approval_date)
        .bind(rejection_reason)
        .bind(now)
        .bind(id)
        .execute(&mut **tx)
        .await?;

        Ok(result.rows_affected())
    }

    /// Non-rejected, non-cancelled emergency requests starting within the
    /// given window. The month is derived from the new request's start date,
    /// not from today.
    pub async fn count_emergency_in_window(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        employee_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(&sql(r#"
            SELECT
                COUNT(*)
            FROM
                leave_requests
            WHERE
                employee_id = ?
                AND leave_type = 'emergency'
                AND start_date >= ?
                AND start_date <= ?
                AND status NOT IN ('rejected', 'cancelled')
        "#))
        .bind(employee_id)
        .bind(from)
        .bind(to)
        .fetch_one(&mut **tx)
        .await?;

        Ok(count)
    }

    /// List requests with optional filtering, newest first.
    pub async fn list_requests(
        &self,
        employee_id: Option<Uuid>,
        status: Option<LeaveStatus>,
    ) -> Result<Vec<LeaveRequest>> {
        let mut query = format!("SELECT {} FROM leave_requests", REQUEST_COLUMNS);
        let mut conditions = vec![];

        if employee_id.is_some() {
            conditions.push("employee_id = ?");
        }
        if status.is_some() {
            conditions.push("status = ?");
        }
        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }
        query.push_str(" ORDER BY created_at DESC");

        let prepared_sql = sql(&query);
        let mut prepared = sqlx::query_as::<_, LeaveRequest>(&prepared_sql);
        if let Some(id) = employee_id {
            prepared = prepared.bind(id);
        }
        if let Some(s) = status {
            prepared = prepared.bind(s);
        }

        let requests = prepared.fetch_all(&self.pool).await?;

        Ok(requests)
    }
}
