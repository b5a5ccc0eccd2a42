use std::str::FromStr;

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::error::LeaveError;
use crate::model::status::LeaveStatus;

pub mod leave_balance;
pub mod leave_request;
pub mod leave_type;
pub mod report;

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct PageQuery {
    #[schema(example = 0)]
    /// Rows to skip
    pub skip: Option<i64>,
    #[schema(example = 50)]
    /// Page size (capped at 100)
    pub limit: Option<i64>,
}

impl PageQuery {
    pub fn skip(&self) -> i64 {
        self.skip.unwrap_or(0).max(0)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(50).clamp(1, 100)
    }
}

/// Payload status strings are validated here, at the edge; storage only ever
/// sees the closed enum.
pub(crate) fn parse_status(value: &str) -> Result<LeaveStatus, LeaveError> {
    LeaveStatus::from_str(value)
        .map_err(|_| LeaveError::Validation(format!("unknown status '{value}'")))
}
