use sqlx::SqlitePool;

use crate::error::{LeaveError, is_unique_violation};
use crate::model::leave_type::LeaveType;

pub async fn create(
    pool: &SqlitePool,
    name: &str,
    default_days: Option<i64>,
) -> Result<LeaveType, LeaveError> {
    if name.trim().is_empty() {
        return Err(LeaveError::Validation("name must not be empty".into()));
    }
    if let Some(days) = default_days {
        if days < 0 {
            return Err(LeaveError::Validation(
                "default_days_entitled must not be negative".into(),
            ));
        }
    }

    let result = sqlx::query("INSERT INTO leave_types (name, default_days_entitled) VALUES (?, ?)")
        .bind(name)
        .bind(default_days)
        .execute(pool)
        .await;

    let done = match result {
        Ok(done) => done,
        Err(e) if is_unique_violation(&e) => {
            return Err(LeaveError::Conflict(format!(
                "leave type '{name}' already exists"
            )));
        }
        Err(e) => return Err(e.into()),
    };

    let id = done.last_insert_rowid();
    get(pool, id)
        .await?
        .ok_or_else(|| LeaveError::NotFound(format!("leave type {id} not found")))
}

pub async fn get(pool: &SqlitePool, id: i64) -> Result<Option<LeaveType>, LeaveError> {
    let row = sqlx::query_as::<_, LeaveType>("SELECT * FROM leave_types WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

pub async fn list(pool: &SqlitePool, skip: i64, limit: i64) -> Result<Vec<LeaveType>, LeaveError> {
    let rows = sqlx::query_as::<_, LeaveType>(
        "SELECT * FROM leave_types ORDER BY id LIMIT ? OFFSET ?",
    )
    .bind(limit)
    .bind(skip)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    name: Option<&str>,
    default_days: Option<i64>,
) -> Result<LeaveType, LeaveError> {
    let current = get(pool, id)
        .await?
        .ok_or_else(|| LeaveError::NotFound(format!("leave type {id} not found")))?;

    let new_name = name.unwrap_or(&current.name);
    if new_name.trim().is_empty() {
        return Err(LeaveError::Validation("name must not be empty".into()));
    }
    if let Some(days) = default_days {
        if days < 0 {
            return Err(LeaveError::Validation(
                "default_days_entitled must not be negative".into(),
            ));
        }
    }
    let new_days = default_days.or(current.default_days_entitled);

    let result = sqlx::query("UPDATE leave_types SET name = ?, default_days_entitled = ? WHERE id = ?")
        .bind(new_name)
        .bind(new_days)
        .bind(id)
        .execute(pool)
        .await;

    match result {
        Ok(_) => {}
        Err(e) if is_unique_violation(&e) => {
            return Err(LeaveError::Conflict(format!(
                "leave type '{new_name}' already exists"
            )));
        }
        Err(e) => return Err(e.into()),
    }

    get(pool, id)
        .await?
        .ok_or_else(|| LeaveError::NotFound(format!("leave type {id} not found")))
}

/// Deletion is refused while any balance or request still references the
/// type.
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<(), LeaveError> {
    get(pool, id)
        .await?
        .ok_or_else(|| LeaveError::NotFound(format!("leave type {id} not found")))?;

    let in_use: i64 = sqlx::query_scalar(
        r#"
        SELECT (SELECT COUNT(*) FROM leave_balances WHERE leave_type_id = ?)
             + (SELECT COUNT(*) FROM leave_requests WHERE leave_type_id = ?)
        "#,
    )
    .bind(id)
    .bind(id)
    .fetch_one(pool)
    .await?;

    if in_use > 0 {
        return Err(LeaveError::Conflict(format!(
            "leave type {id} is referenced by balances or requests"
        )));
    }

    sqlx::query("DELETE FROM leave_types WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}
