use sqlx::SqlitePool;

use crate::error::LeaveError;

/// Existence probe against the shared `employees` table. The employee module
/// owns those rows; the leave engine only verifies references.
pub async fn exists(pool: &SqlitePool, employee_id: &str) -> Result<bool, LeaveError> {
    let found: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM employees WHERE id = ?)")
        .bind(employee_id)
        .fetch_one(pool)
        .await?;

    Ok(found != 0)
}
