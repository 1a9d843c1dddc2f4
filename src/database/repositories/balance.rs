use anyhow::Result;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::database::{
    models::{EmployeeLeaveBalance, LeaveType},
    utils::sql,
};

const BALANCE_COLUMNS: &str = r#"
    id,
    employee_id,
    year,
    paid_leave_quota,
    paid_leave_used,
    emergency_leave_used_count,
    birthday_leave_used,
    anniversary_leave_used,
    maternity_leave_quota,
    maternity_leave_used,
    paternity_leave_quota,
    paternity_leave_used,
    created_at,
    updated_at
"#;

#[derive(Clone)]
pub struct LeaveBalanceRepository {
    pool: PgPool,
}

impl LeaveBalanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch the balance row for (employee, year), creating it with default
    /// quotas on first access. Existing rows are never updated here.
    pub async fn ensure(&self, employee_id: Uuid, year: i32) -> Result<EmployeeLeaveBalance> {
        sqlx::query(&sql(r#"
            INSERT INTO
                employee_leave_balances (employee_id, year)
            VALUES
                (?, ?)
            ON CONFLICT (employee_id, year) DO NOTHING
        "#))
        .bind(employee_id)
        .bind(year)
        .execute(&self.pool)
        .await?;

        let balance = sqlx::query_as::<_, EmployeeLeaveBalance>(&sql(&format!(
            "SELECT {} FROM employee_leave_balances WHERE employee_id = ? AND year = ?",
            BALANCE_COLUMNS
        )))
        .bind(employee_id)
        .bind(year)
        .fetch_one(&self.pool)
        .await?;

        Ok(balance)
    }

    /// Transactional variant of `ensure` that row-locks the balance so a
    /// concurrent request cannot read a stale counter between the quota
    /// check and the usage update.
    pub async fn ensure_for_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        employee_id: Uuid,
        year: i32,
    ) -> Result<EmployeeLeaveBalance> {
        sqlx::query(&sql(r#"
            INSERT INTO
                employee_leave_balances (employee_id, year)
            VALUES
                (?, ?)
            ON CONFLICT (employee_id, year) DO NOTHING
        "#))
        .bind(employee_id)
        .bind(year)
        .execute(&mut **tx)
        .await?;

        let balance = sqlx::query_as::<_, EmployeeLeaveBalance>(&sql(&format!(
            "SELECT {} FROM employee_leave_balances WHERE employee_id = ? AND year = ? FOR UPDATE",
            BALANCE_COLUMNS
        )))
        .bind(employee_id)
        .bind(year)
        .fetch_one(&mut **tx)
        .await?;

        Ok(balance)
    }

    /// Apply an accepted request's effect to the balance row. A negative
    /// `delta_days` refunds a pending reservation on reject/cancel.
    ///
    /// The birthday/anniversary one-shot flags are set when consumed and
    /// deliberately never cleared on refund; they reset only with the new
    /// year's row.
    pub async fn apply_usage(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        employee_id: Uuid,
        year: i32,
        leave_type: LeaveType,
        delta_days: f32,
    ) -> Result<()> {
        self.ensure_for_update(tx, employee_id, year).await?;

        if leave_type.consumes_paid_quota() {
            sqlx::query(&sql(r#"
                UPDATE
                    employee_leave_balances
                SET
                    paid_leave_used = paid_leave_used + ?,
                    updated_at = now()
                WHERE
                    employee_id = ?
                    AND year = ?
            "#))
            .bind(delta_days)
            .bind(employee_id)
            .bind(year)
            .execute(&mut **tx)
            .await?;
            return Ok(());
        }

        let flag_column = match leave_type {
            LeaveType::Birthday => "birthday_leave_used",
            LeaveType::Anniversary => "anniversary_leave_used",
            // emergency/comp_off/overseas/maternity/paternity/unpaid keep no
            // counter here; their limits are re-derived per request.
            _ => return Ok(()),
        };

        if delta_days > 0.0 {
            let query = format!(
                r#"
                UPDATE
                    employee_leave_balances
                SET
                    {} = TRUE,
                    updated_at = now()
                WHERE
                    employee_id = ?
                    AND year = ?
                "#,
                flag_column
            );
            sqlx::query(&sql(&query))
                .bind(employee_id)
                .bind(year)
                .execute(&mut **tx)
                .await?;
        }

        Ok(())
    }
}
