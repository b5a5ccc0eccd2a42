use serde::Serialize;
use sqlx::SqlitePool;
use utoipa::ToSchema;

use crate::error::LeaveError;
use crate::model::status::LeaveStatus;

#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct LeaveSummaryRow {
    #[schema(example = "Vacation")]
    pub leave_type_name: String,

    #[schema(example = 12.5)]
    pub total_days: f64,

    #[schema(example = 4)]
    pub request_count: i64,
}

/// Leave summary grouped by leave type. Without a filter the sum spans every
/// status, cancelled and rejected included, matching the historical report
/// consumers.
pub async fn leave_summary(
    pool: &SqlitePool,
    status_filter: Option<LeaveStatus>,
) -> Result<Vec<LeaveSummaryRow>, LeaveError> {
    let rows = match status_filter {
        Some(status) => {
            sqlx::query_as::<_, LeaveSummaryRow>(
                r#"
                SELECT lt.name AS leave_type_name,
                       SUM(lr.num_days) AS total_days,
                       COUNT(lr.id) AS request_count
                FROM leave_requests lr
                JOIN leave_types lt ON lt.id = lr.leave_type_id
                WHERE lr.status = ?
                GROUP BY lt.name
                ORDER BY lt.name
                "#,
            )
            .bind(status)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, LeaveSummaryRow>(
                r#"
                SELECT lt.name AS leave_type_name,
                       SUM(lr.num_days) AS total_days,
                       COUNT(lr.id) AS request_count
                FROM leave_requests lr
                JOIN leave_types lt ON lt.id = lr.leave_type_id
                GROUP BY lt.name
                ORDER BY lt.name
                "#,
            )
            .fetch_all(pool)
            .await?
        }
    };

    Ok(rows)
}
