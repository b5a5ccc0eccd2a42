use crate::api::PageQuery;
use crate::auth::auth::AuthUser;
use crate::model::leave_type::LeaveType;
use crate::store::leave_type;
use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use sqlx::SqlitePool;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct CreateLeaveType {
    #[schema(example = "Vacation")]
    pub name: String,
    #[schema(example = 20, nullable = true)]
    pub default_days_entitled: Option<i64>,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateLeaveType {
    #[schema(example = "Sick leave", nullable = true)]
    pub name: Option<String>,
    #[schema(example = 10, nullable = true)]
    pub default_days_entitled: Option<i64>,
}

/* =========================
Create leave type (HR/Admin)
========================= */
#[utoipa::path(
    post,
    path = "/leave/types",
    request_body = CreateLeaveType,
    responses(
        (status = 201, description = "Leave type created", body = LeaveType),
        (status = 400, description = "Validation failure"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 409, description = "Duplicate name")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave types"
)]
pub async fn create_type(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreateLeaveType>,
) -> actix_web::Result<impl Responder> {
    auth.require_elevated()?;

    let created = leave_type::create(&pool, &payload.name, payload.default_days_entitled).await?;

    Ok(HttpResponse::Created().json(created))
}

/* =========================
List leave types (HR/Admin)
========================= */
#[utoipa::path(
    get,
    path = "/leave/types",
    params(PageQuery),
    responses(
        (status = 200, description = "Leave type list", body = [LeaveType]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave types"
)]
pub async fn list_types(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    query: web::Query<PageQuery>,
) -> actix_web::Result<impl Responder> {
    auth.require_elevated()?;

    let types = leave_type::list(&pool, query.skip(), query.limit()).await?;

    Ok(HttpResponse::Ok().json(types))
}

/// Fetch a single leave type
#[utoipa::path(
    get,
    path = "/leave/types/{id}",
    params(
        ("id" = i64, Path, description = "Leave type id")
    ),
    responses(
        (status = 200, description = "Leave type found", body = LeaveType),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Leave type not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave types"
)]
pub async fn get_type(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    auth.require_elevated()?;

    let id = path.into_inner();

    match leave_type::get(&pool, id).await? {
        Some(t) => Ok(HttpResponse::Ok().json(t)),
        None => Ok(HttpResponse::NotFound().json(serde_json::json!({
            "detail": format!("leave type {id} not found")
        }))),
    }
}

/// Update name or default entitlement
#[utoipa::path(
    put,
    path = "/leave/types/{id}",
    request_body = UpdateLeaveType,
    params(
        ("id" = i64, Path, description = "Leave type id")
    ),
    responses(
        (status = 200, description = "Leave type updated", body = LeaveType),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Leave type not found"),
        (status = 409, description = "Duplicate name")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave types"
)]
pub async fn update_type(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    payload: web::Json<UpdateLeaveType>,
) -> actix_web::Result<impl Responder> {
    auth.require_elevated()?;

    let updated = leave_type::update(
        &pool,
        path.into_inner(),
        payload.name.as_deref(),
        payload.default_days_entitled,
    )
    .await?;

    Ok(HttpResponse::Ok().json(updated))
}

/// Delete an unused leave type
#[utoipa::path(
    delete,
    path = "/leave/types/{id}",
    params(
        ("id" = i64, Path, description = "Leave type id")
    ),
    responses(
        (status = 204, description = "Leave type deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Leave type not found"),
        (status = 409, description = "Leave type still referenced")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave types"
)]
pub async fn delete_type(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    auth.require_elevated()?;

    leave_type::delete(&pool, path.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}
