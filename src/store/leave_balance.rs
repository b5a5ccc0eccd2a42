use sqlx::{SqliteConnection, SqlitePool};

use crate::error::{LeaveError, is_unique_violation};
use crate::model::leave_balance::LeaveBalance;

pub async fn create(
    pool: &SqlitePool,
    employee_id: &str,
    leave_type_id: i64,
    year: i64,
    entitled_days: f64,
    used_days: f64,
) -> Result<LeaveBalance, LeaveError> {
    if entitled_days < 0.0 {
        return Err(LeaveError::Validation(
            "entitled_days must not be negative".into(),
        ));
    }
    if used_days < 0.0 {
        return Err(LeaveError::Validation(
            "used_days must not be negative".into(),
        ));
    }

    let result = sqlx::query(
        r#"
        INSERT INTO leave_balances (employee_id, leave_type_id, year, entitled_days, used_days)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(employee_id)
    .bind(leave_type_id)
    .bind(year)
    .bind(entitled_days)
    .bind(used_days)
    .execute(pool)
    .await;

    let done = match result {
        Ok(done) => done,
        Err(e) if is_unique_violation(&e) => {
            return Err(LeaveError::Conflict(format!(
                "balance for ({employee_id}, {leave_type_id}, {year}) already exists"
            )));
        }
        Err(e) => return Err(e.into()),
    };

    let id = done.last_insert_rowid();
    get(pool, id)
        .await?
        .ok_or_else(|| LeaveError::NotFound(format!("balance {id} not found")))
}

pub async fn get(pool: &SqlitePool, id: i64) -> Result<Option<LeaveBalance>, LeaveError> {
    let row = sqlx::query_as::<_, LeaveBalance>("SELECT * FROM leave_balances WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

pub async fn get_for_key(
    pool: &SqlitePool,
    employee_id: &str,
    leave_type_id: i64,
    year: i64,
) -> Result<Option<LeaveBalance>, LeaveError> {
    let row = sqlx::query_as::<_, LeaveBalance>(
        "SELECT * FROM leave_balances WHERE employee_id = ? AND leave_type_id = ? AND year = ?",
    )
    .bind(employee_id)
    .bind(leave_type_id)
    .bind(year)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn list_for_employee(
    pool: &SqlitePool,
    employee_id: &str,
    year: Option<i64>,
) -> Result<Vec<LeaveBalance>, LeaveError> {
    let rows = match year {
        Some(y) => {
            sqlx::query_as::<_, LeaveBalance>(
                r#"
                SELECT * FROM leave_balances
                WHERE employee_id = ? AND year = ?
                ORDER BY leave_type_id
                "#,
            )
            .bind(employee_id)
            .bind(y)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, LeaveBalance>(
                r#"
                SELECT * FROM leave_balances
                WHERE employee_id = ?
                ORDER BY year DESC, leave_type_id
                "#,
            )
            .bind(employee_id)
            .fetch_all(pool)
            .await?
        }
    };

    Ok(rows)
}

/// Administrative adjustment of entitlement or used days.
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    entitled_days: Option<f64>,
    used_days: Option<f64>,
) -> Result<LeaveBalance, LeaveError> {
    let current = get(pool, id)
        .await?
        .ok_or_else(|| LeaveError::NotFound(format!("balance {id} not found")))?;

    let entitled = entitled_days.unwrap_or(current.entitled_days);
    let used = used_days.unwrap_or(current.used_days);
    if entitled < 0.0 || used < 0.0 {
        return Err(LeaveError::Validation(
            "entitled_days and used_days must not be negative".into(),
        ));
    }

    sqlx::query("UPDATE leave_balances SET entitled_days = ?, used_days = ? WHERE id = ?")
        .bind(entitled)
        .bind(used)
        .bind(id)
        .execute(pool)
        .await?;

    get(pool, id)
        .await?
        .ok_or_else(|| LeaveError::NotFound(format!("balance {id} not found")))
}

// --- coordinator-only primitives, transaction scoped ---

pub async fn get_for_key_tx(
    conn: &mut SqliteConnection,
    employee_id: &str,
    leave_type_id: i64,
    year: i64,
) -> Result<Option<LeaveBalance>, LeaveError> {
    let row = sqlx::query_as::<_, LeaveBalance>(
        "SELECT * FROM leave_balances WHERE employee_id = ? AND leave_type_id = ? AND year = ?",
    )
    .bind(employee_id)
    .bind(leave_type_id)
    .bind(year)
    .fetch_optional(conn)
    .await?;

    Ok(row)
}

pub async fn increment_used(
    conn: &mut SqliteConnection,
    id: i64,
    delta: f64,
) -> Result<(), LeaveError> {
    sqlx::query("UPDATE leave_balances SET used_days = used_days + ? WHERE id = ?")
        .bind(delta)
        .bind(id)
        .execute(conn)
        .await?;

    Ok(())
}

/// Decrement clamped at zero: used_days never goes negative no matter what
/// compensation is replayed.
pub async fn decrement_used(
    conn: &mut SqliteConnection,
    id: i64,
    delta: f64,
) -> Result<(), LeaveError> {
    sqlx::query("UPDATE leave_balances SET used_days = MAX(0, used_days - ?) WHERE id = ?")
        .bind(delta)
        .bind(id)
        .execute(conn)
        .await?;

    Ok(())
}
