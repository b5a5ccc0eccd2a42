use crate::api::{PageQuery, parse_status};
use crate::auth::auth::AuthUser;
use crate::error::LeaveError;
use crate::leave::coordinator::{self, Actor};
use crate::model::leave_request::{LeaveRequest, NewLeaveRequest};
use crate::model::status::LeaveStatus;
use crate::store::{employee, leave_request};
use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use sqlx::SqlitePool;
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, ToSchema)]
pub struct CreateLeaveRequest {
    #[schema(example = 1)]
    pub leave_type_id: i64,
    #[schema(example = "2024-07-01", format = "date", value_type = String)]
    pub start_date: chrono::NaiveDate,
    #[schema(example = "2024-07-03", format = "date", value_type = String)]
    pub end_date: chrono::NaiveDate,
    #[schema(example = 3.0)]
    pub num_days: f64,
    #[schema(example = "family trip", nullable = true)]
    pub reason: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct StatusUpdate {
    #[schema(example = "approved")]
    pub status: String,
    #[schema(example = "enjoy", nullable = true)]
    pub comments: Option<String>,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct RequestFilter {
    #[schema(example = "pending")]
    /// Filter by request status
    pub status_filter: Option<String>,
    #[schema(example = "E1")]
    /// Filter by employee id
    pub employee_id: Option<String>,
    #[schema(example = 0)]
    pub skip: Option<i64>,
    #[schema(example = 50)]
    pub limit: Option<i64>,
}

/* =========================
Submit leave request (self)
========================= */
#[utoipa::path(
    post,
    path = "/leave/requests",
    request_body(
        content = CreateLeaveRequest,
        description = "Leave request payload; the subject employee is the caller",
        content_type = "application/json"
    ),
    responses(
        (status = 201, description = "Leave request submitted", body = LeaveRequest),
        (status = 400, description = "Bad dates or non-positive num_days"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "No employee profile"),
        (status = 404, description = "Leave type not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave requests"
)]
pub async fn submit_request(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreateLeaveRequest>,
) -> actix_web::Result<impl Responder> {
    let employee_id = auth.require_employee_profile()?.to_string();

    if !employee::exists(&pool, &employee_id).await? {
        return Err(LeaveError::NotFound(format!("employee {employee_id} not found")).into());
    }

    let payload = payload.into_inner();
    let created = coordinator::submit(
        &pool,
        &employee_id,
        NewLeaveRequest {
            leave_type_id: payload.leave_type_id,
            start_date: payload.start_date,
            end_date: payload.end_date,
            num_days: payload.num_days,
            reason: payload.reason,
        },
    )
    .await?;

    Ok(HttpResponse::Created().json(created))
}

/* =========================
Own request history (self)
========================= */
#[utoipa::path(
    get,
    path = "/leave/requests/my",
    params(PageQuery),
    responses(
        (status = 200, description = "Own requests, newest first", body = [LeaveRequest]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "No employee profile")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave requests"
)]
pub async fn my_requests(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    query: web::Query<PageQuery>,
) -> actix_web::Result<impl Responder> {
    let employee_id = auth.require_employee_profile()?;

    let requests =
        leave_request::list(&pool, Some(employee_id), None, query.skip(), query.limit()).await?;

    Ok(HttpResponse::Ok().json(requests))
}

/// Fetch one request (subject or HR/Admin)
#[utoipa::path(
    get,
    path = "/leave/requests/{id}",
    params(
        ("id" = i64, Path, description = "Leave request id")
    ),
    responses(
        (status = 200, description = "Leave request found", body = LeaveRequest),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Leave request not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave requests"
)]
pub async fn get_request(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();

    let request = leave_request::get(&pool, id)
        .await?
        .ok_or_else(|| LeaveError::NotFound(format!("leave request {id} not found")))?;

    auth.require_self_or_elevated(&request.employee_id)?;

    Ok(HttpResponse::Ok().json(request))
}

/* =========================
Filtered request list (HR/Admin)
========================= */
#[utoipa::path(
    get,
    path = "/leave/requests",
    params(RequestFilter),
    responses(
        (status = 200, description = "Filtered request list", body = [LeaveRequest]),
        (status = 400, description = "No filter supplied or unknown status"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave requests"
)]
pub async fn list_requests(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    query: web::Query<RequestFilter>,
) -> actix_web::Result<impl Responder> {
    auth.require_elevated()?;

    if query.status_filter.is_none() && query.employee_id.is_none() {
        return Err(
            LeaveError::Validation("status_filter or employee_id is required".into()).into(),
        );
    }

    let status = match query.status_filter.as_deref() {
        Some(raw) => Some(parse_status(raw)?),
        None => None,
    };

    let page = PageQuery {
        skip: query.skip,
        limit: query.limit,
    };
    let requests = leave_request::list(
        &pool,
        query.employee_id.as_deref(),
        status,
        page.skip(),
        page.limit(),
    )
    .await?;

    Ok(HttpResponse::Ok().json(requests))
}

/* =========================
Transition request status
========================= */
#[utoipa::path(
    patch,
    path = "/leave/requests/{id}/status",
    request_body = StatusUpdate,
    params(
        ("id" = i64, Path, description = "Leave request id")
    ),
    responses(
        (status = 200, description = "Request transitioned", body = LeaveRequest),
        (status = 400, description = "Unknown status"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Leave request not found"),
        (status = 409, description = "Transition not allowed")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave requests"
)]
pub async fn update_status(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    payload: web::Json<StatusUpdate>,
) -> actix_web::Result<impl Responder> {
    let target = parse_status(&payload.status)?;

    // Cheap pre-check; the ownership rule for self-cancellation needs the
    // loaded request and lives in the coordinator.
    if !auth.is_elevated() && target != LeaveStatus::Cancelled {
        return Err(LeaveError::Forbidden("HR/Admin only".into()).into());
    }

    let payload = payload.into_inner();
    let updated = coordinator::transition(
        &pool,
        path.into_inner(),
        target,
        &Actor::from(&auth),
        payload.comments,
    )
    .await?;

    Ok(HttpResponse::Ok().json(updated))
}
