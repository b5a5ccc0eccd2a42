use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::status::LeaveStatus;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct LeaveRequest {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = "E1")]
    pub employee_id: String,

    #[schema(example = 1)]
    pub leave_type_id: i64,

    #[schema(example = "pending")]
    pub status: LeaveStatus,

    #[schema(example = "2024-07-01", format = "date", value_type = String)]
    pub start_date: NaiveDate,

    #[schema(example = "2024-07-03", format = "date", value_type = String)]
    pub end_date: NaiveDate,

    #[schema(example = 3.0)]
    pub num_days: f64,

    #[schema(example = "family trip", nullable = true)]
    pub reason: Option<String>,

    #[schema(example = "2024-06-20T08:30:00Z", format = "date-time", value_type = String)]
    pub request_date: DateTime<Utc>,

    /// User that processed the request; null while pending.
    #[schema(example = "U-HR", nullable = true)]
    pub approved_by_id: Option<String>,

    #[schema(example = "2024-06-21T10:00:00Z", format = "date-time", value_type = String, nullable = true)]
    pub processed_date: Option<DateTime<Utc>>,

    #[schema(example = "enjoy", nullable = true)]
    pub comments: Option<String>,
}

/// Validated submit payload handed to the coordinator; the subject employee
/// comes from the caller's profile, never from the body.
#[derive(Debug, Clone)]
pub struct NewLeaveRequest {
    pub leave_type_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub num_days: f64,
    pub reason: Option<String>,
}
