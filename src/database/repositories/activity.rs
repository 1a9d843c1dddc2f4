use anyhow::Result;
use chrono::{NaiveDate, NaiveTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::database::{
    models::{
        ActivityAction, ActivityKind, ActivityStatus, PartialDayRequest, RegularizationRequest,
        WorkFromHomeRequest,
    },
    utils::sql,
};

/// Rows for the three activity request tables (WFH, partial-day,
/// regularization). No balance record backs these; quotas are recomputed
/// from the request history at validation time.
#[derive(Clone)]
pub struct ActivityRepository {
    pool: PgPool,
}

impl ActivityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert one WFH row per date inside the caller's transaction so a
    /// multi-date submission lands atomically.
    pub async fn insert_wfh(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        employee_id: Uuid,
        date: NaiveDate,
        reason: &str,
    ) -> Result<Uuid> {
        let id = sqlx::query_scalar::<_, Uuid>(&sql(r#"
            INSERT INTO
                work_from_home_requests (employee_id, date, reason, status, created_at)
            VALUES
                (?, ?, ?, 'pending', ?)
            RETURNING
                id
        "#))
        .bind(employee_id)
        .bind(date)
        .bind(reason)
        .bind(Utc::now())
        .fetch_one(&mut **tx)
        .await?;

        Ok(id)
    }

    /// Non-rejected WFH hits inside a quarter window.
    pub async fn count_wfh_in_quarter(
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
                work_from_home_requests
            WHERE
                employee_id = ?
                AND date >= ?
                AND date <= ?
                AND status != 'rejected'
        "#))
        .bind(employee_id)
        .bind(from)
        .bind(to)
        .fetch_one(&mut **tx)
        .await?;

        Ok(count)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn insert_partial_day(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        employee_id: Uuid,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        duration_hours: f32,
        reason: &str,
    ) -> Result<Uuid> {
        let id = sqlx::query_scalar::<_, Uuid>(&sql(r#"
            INSERT INTO
                partial_day_requests (
                    employee_id,
                    date,
                    start_time,
                    end_time,
                    duration,
                    reason,
                    status,
                    created_at
                )
            VALUES
                (?, ?, ?, ?, ?, ?, 'pending', ?)
            RETURNING
                id
        "#))
        .bind(employee_id)
        .bind(date)
        .bind(start_time)
        .bind(end_time)
        .bind(duration_hours)
        .bind(reason)
        .bind(Utc::now())
        .fetch_one(&mut **tx)
        .await?;

        Ok(id)
    }

    /// Sum of non-rejected partial-day hours in a calendar-month window.
    pub async fn sum_partial_day_hours(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        employee_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<f32> {
        let hours = sqlx::query_scalar::<_, f32>(&sql(r#"
            SELECT
                COALESCE(SUM(duration), 0)::REAL
            FROM
                partial_day_requests
            WHERE
                employee_id = ?
                AND date >= ?
                AND date <= ?
                AND status != 'rejected'
        "#))
        .bind(employee_id)
        .bind(from)
        .bind(to)
        .fetch_one(&mut **tx)
        .await?;

        Ok(hours)
    }

    pub async fn insert_regularization(
        &self,
        employee_id: Uuid,
        date: NaiveDate,
        clock_in: NaiveTime,
        clock_out: NaiveTime,
        reason: &str,
    ) -> Result<Uuid> {
        let id = sqlx::query_scalar::<_, Uuid>(&sql(r#"
            INSERT INTO
                regularization_requests (
                    employee_id,
                    date,
                    clock_in,
                    clock_out,
                    reason,
                    status,
                    created_at
                )
            VALUES
                (?, ?, ?, ?, ?, 'pending', ?)
            RETURNING
                id
        "#))
        .bind(employee_id)
        .bind(date)
        .bind(clock_in)
        .bind(clock_out)
        .bind(reason)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    /// Pending WFH rows for the admin approval queue, oldest date first.
    pub async fn list_pending_wfh(&self) -> Result<Vec<WorkFromHomeRequest>> {
        let requests = sqlx::query_as::<_, WorkFromHomeRequest>(&sql(r#"
            SELECT
                id,
                employee_id,
                date,
                status,
                reason,
                approved_by,
                approval_date,
                notes,
                created_at
            FROM
                work_from_home_requests
            WHERE
                status = 'pending'
            ORDER BY
                date ASC
        "#))
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    pub async fn list_pending_partial_days(&self) -> Result<Vec<PartialDayRequest>> {
        let requests = sqlx::query_as::<_, PartialDayRequest>(&sql(r#"
            SELECT
                id,
                employee_id,
                date,
                start_time,
                end_time,
                duration,
                status,
                reason,
                approved_by,
                approval_date,
                notes,
                created_at
            FROM
                partial_day_requests
            WHERE
                status = 'pending'
            ORDER BY
                date ASC
        "#))
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    pub async fn list_pending_regularizations(&self) -> Result<Vec<RegularizationRequest>> {
        let requests = sqlx::query_as::<_, RegularizationRequest>(&sql(r#"
            SELECT
                id,
                employee_id,
                date,
                clock_in,
                clock_out,
                reason,
                status,
                approved_by,
                approval_date,
                notes,
                created_at
            FROM
                regularization_requests
            WHERE
                status = 'pending'
            ORDER BY
                date ASC
        "#))
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    /// Apply an admin decision to whichever activity table matches `kind`.
    /// Returns 0 rows affected when the id is unknown or already decided.
    pub async fn decide(
        &self,
        kind: ActivityKind,
        id: Uuid,
        action: ActivityAction,
        approved_by: Uuid,
        notes: Option<&str>,
    ) -> Result<u64> {
        let table = match kind {
            ActivityKind::Wfh => "work_from_home_requests",
            ActivityKind::Partial => "partial_day_requests",
            ActivityKind::Regularization => "regularization_requests",
        };
        let status = match action {
            ActivityAction::Approve => ActivityStatus::Approved,
            ActivityAction::Reject => ActivityStatus::Rejected,
        };

        let query = format!(
            r#"
            UPDATE
                {}
            SET
                status = ?,
                approved_by = ?,
                approval_date = ?,
                notes = ?
            WHERE
                id = ?
                AND status = 'pending'
            "#,
            table
        );

        let result = sqlx::query(&sql(&query))
            .bind(status)
            .bind(approved_by)
            .bind(Utc::now())
            .bind(notes)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
