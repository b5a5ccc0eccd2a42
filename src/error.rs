use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;
use serde_json::json;

/// Error taxonomy for the leave engine. Stores raise `Validation`/`NotFound`/
/// `Conflict`/`Unavailable`; the coordinator additionally raises
/// `InvalidTransition`. Only this type crosses into HTTP status codes.
#[derive(Debug, Display)]
pub enum LeaveError {
    #[display(fmt = "{}", _0)]
    Validation(String),

    #[display(fmt = "{}", _0)]
    NotFound(String),

    #[display(fmt = "{}", _0)]
    Conflict(String),

    #[display(fmt = "{}", _0)]
    InvalidTransition(String),

    #[display(fmt = "{}", _0)]
    Forbidden(String),

    #[display(fmt = "storage temporarily unavailable")]
    Unavailable,
}

impl std::error::Error for LeaveError {}

impl ResponseError for LeaveError {
    fn status_code(&self) -> StatusCode {
        match self {
            LeaveError::Validation(_) => StatusCode::BAD_REQUEST,
            LeaveError::NotFound(_) => StatusCode::NOT_FOUND,
            LeaveError::Conflict(_) => StatusCode::CONFLICT,
            LeaveError::InvalidTransition(_) => StatusCode::CONFLICT,
            LeaveError::Forbidden(_) => StatusCode::FORBIDDEN,
            LeaveError::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "detail": self.to_string()
        }))
    }
}

impl From<sqlx::Error> for LeaveError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => LeaveError::NotFound("row not found".into()),
            other => {
                tracing::error!(error = %other, "storage error");
                LeaveError::Unavailable
            }
        }
    }
}

/// True when the driver reports a UNIQUE constraint breach. Stores use this
/// to turn integrity violations into tagged `Conflict` results.
pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}
