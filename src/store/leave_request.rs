use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};

use crate::error::LeaveError;
use crate::model::leave_request::{LeaveRequest, NewLeaveRequest};
use crate::model::status::LeaveStatus;

// Helper enum for typed SQLx binding
enum FilterValue<'a> {
    Str(&'a str),
}

pub async fn insert(
    pool: &SqlitePool,
    employee_id: &str,
    payload: &NewLeaveRequest,
    request_date: DateTime<Utc>,
) -> Result<LeaveRequest, LeaveError> {
    let done = sqlx::query(
        r#"
        INSERT INTO leave_requests
            (employee_id, leave_type_id, status, start_date, end_date, num_days, reason, request_date)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(employee_id)
    .bind(payload.leave_type_id)
    .bind(LeaveStatus::Pending)
    .bind(payload.start_date)
    .bind(payload.end_date)
    .bind(payload.num_days)
    .bind(payload.reason.as_deref())
    .bind(request_date)
    .execute(pool)
    .await?;

    let id = done.last_insert_rowid();
    get(pool, id)
        .await?
        .ok_or_else(|| LeaveError::NotFound(format!("leave request {id} not found")))
}

pub async fn get(pool: &SqlitePool, id: i64) -> Result<Option<LeaveRequest>, LeaveError> {
    let row = sqlx::query_as::<_, LeaveRequest>("SELECT * FROM leave_requests WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

/// Filtered list. Employee-scoped lists come back newest first; pure
/// status-scoped lists oldest first (approval queue order).
pub async fn list(
    pool: &SqlitePool,
    employee_id: Option<&str>,
    status: Option<LeaveStatus>,
    skip: i64,
    limit: i64,
) -> Result<Vec<LeaveRequest>, LeaveError> {
    let mut where_sql = String::from(" WHERE 1=1");
    let mut args: Vec<FilterValue> = Vec::new();

    if let Some(emp_id) = employee_id {
        where_sql.push_str(" AND employee_id = ?");
        args.push(FilterValue::Str(emp_id));
    }

    if let Some(status) = status {
        where_sql.push_str(" AND status = ?");
        args.push(FilterValue::Str(status.as_str()));
    }

    let order = if employee_id.is_some() {
        "ORDER BY request_date DESC, id DESC"
    } else {
        "ORDER BY request_date ASC, id ASC"
    };

    let sql = format!(
        "SELECT * FROM leave_requests{where_sql} {order} LIMIT ? OFFSET ?"
    );

    let mut q = sqlx::query_as::<_, LeaveRequest>(&sql);
    for arg in args {
        q = match arg {
            FilterValue::Str(s) => q.bind(s.to_string()),
        };
    }

    let rows = q.bind(limit).bind(skip).fetch_all(pool).await?;

    Ok(rows)
}

// --- coordinator-only primitives, transaction scoped ---

pub async fn get_tx(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<Option<LeaveRequest>, LeaveError> {
    let row = sqlx::query_as::<_, LeaveRequest>("SELECT * FROM leave_requests WHERE id = ?")
        .bind(id)
        .fetch_optional(conn)
        .await?;

    Ok(row)
}

pub async fn set_status_tx(
    conn: &mut SqliteConnection,
    id: i64,
    status: LeaveStatus,
    approved_by_id: &str,
    processed_date: DateTime<Utc>,
    comments: Option<&str>,
) -> Result<LeaveRequest, LeaveError> {
    sqlx::query(
        r#"
        UPDATE leave_requests
        SET status = ?, approved_by_id = ?, processed_date = ?,
            comments = COALESCE(?, comments)
        WHERE id = ?
        "#,
    )
    .bind(status)
    .bind(approved_by_id)
    .bind(processed_date)
    .bind(comments)
    .bind(id)
    .execute(&mut *conn)
    .await?;

    get_tx(conn, id)
        .await?
        .ok_or_else(|| LeaveError::NotFound(format!("leave request {id} not found")))
}
