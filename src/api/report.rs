use crate::api::parse_status;
use crate::auth::auth::AuthUser;
use crate::leave::report::{self, LeaveSummaryRow};
use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use sqlx::SqlitePool;
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct SummaryQuery {
    #[schema(example = "approved")]
    /// Restrict the aggregation to one status
    pub status_filter: Option<String>,
}

/* =========================
Leave summary (HR/Admin)
========================= */
#[utoipa::path(
    get,
    path = "/leave/reports/summary",
    params(SummaryQuery),
    responses(
        (status = 200, description = "Days and request counts per leave type", body = [LeaveSummaryRow]),
        (status = 400, description = "Unknown status"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave reports"
)]
pub async fn leave_summary(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    query: web::Query<SummaryQuery>,
) -> actix_web::Result<impl Responder> {
    auth.require_elevated()?;

    let status = match query.status_filter.as_deref() {
        Some(raw) => Some(parse_status(raw)?),
        None => None,
    };

    let summary = report::leave_summary(&pool, status).await?;

    Ok(HttpResponse::Ok().json(summary))
}
