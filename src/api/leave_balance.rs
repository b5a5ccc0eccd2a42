use crate::auth::auth::AuthUser;
use crate::error::LeaveError;
use crate::model::leave_balance::LeaveBalance;
use crate::store::{employee, leave_balance, leave_type};
use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use sqlx::SqlitePool;
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, ToSchema)]
pub struct CreateLeaveBalance {
    #[schema(example = "E1")]
    pub employee_id: String,
    #[schema(example = 1)]
    pub leave_type_id: i64,
    #[schema(example = 2024)]
    pub year: i64,
    #[schema(example = 20.0)]
    pub entitled_days: f64,
    #[schema(example = 0.0, nullable = true)]
    pub used_days: Option<f64>,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateLeaveBalance {
    #[schema(example = 25.0, nullable = true)]
    pub entitled_days: Option<f64>,
    #[schema(example = 3.0, nullable = true)]
    pub used_days: Option<f64>,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct BalanceQuery {
    #[schema(example = 2024)]
    /// Restrict to one year
    pub year: Option<i64>,
}

/* =========================
Provision a balance (HR/Admin)
========================= */
#[utoipa::path(
    post,
    path = "/leave/balances",
    request_body = CreateLeaveBalance,
    responses(
        (status = 201, description = "Balance created", body = LeaveBalance),
        (status = 400, description = "Validation failure"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Employee or leave type not found"),
        (status = 409, description = "Balance already provisioned for this key")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave balances"
)]
pub async fn create_balance(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreateLeaveBalance>,
) -> actix_web::Result<impl Responder> {
    auth.require_elevated()?;

    if !employee::exists(&pool, &payload.employee_id).await? {
        return Err(LeaveError::NotFound(format!(
            "employee {} not found",
            payload.employee_id
        ))
        .into());
    }
    leave_type::get(&pool, payload.leave_type_id)
        .await?
        .ok_or_else(|| {
            LeaveError::NotFound(format!("leave type {} not found", payload.leave_type_id))
        })?;

    let created = leave_balance::create(
        &pool,
        &payload.employee_id,
        payload.leave_type_id,
        payload.year,
        payload.entitled_days,
        payload.used_days.unwrap_or(0.0),
    )
    .await?;

    Ok(HttpResponse::Created().json(created))
}

/* =========================
Balances of one employee
========================= */
#[utoipa::path(
    get,
    path = "/leave/balances/employee/{employee_id}",
    params(
        ("employee_id" = String, Path, description = "Employee id"),
        BalanceQuery
    ),
    responses(
        (status = 200, description = "Balance list", body = [LeaveBalance]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave balances"
)]
pub async fn list_employee_balances(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
    query: web::Query<BalanceQuery>,
) -> actix_web::Result<impl Responder> {
    let employee_id = path.into_inner();
    auth.require_self_or_elevated(&employee_id)?;

    let balances = leave_balance::list_for_employee(&pool, &employee_id, query.year).await?;

    Ok(HttpResponse::Ok().json(balances))
}

/* =========================
Administrative adjustment (HR/Admin)
========================= */
#[utoipa::path(
    put,
    path = "/leave/balances/{id}",
    request_body = UpdateLeaveBalance,
    params(
        ("id" = i64, Path, description = "Balance id")
    ),
    responses(
        (status = 200, description = "Balance updated", body = LeaveBalance),
        (status = 400, description = "Validation failure"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Balance not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave balances"
)]
pub async fn update_balance(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    payload: web::Json<UpdateLeaveBalance>,
) -> actix_web::Result<impl Responder> {
    auth.require_elevated()?;

    let updated = leave_balance::update(
        &pool,
        path.into_inner(),
        payload.entitled_days,
        payload.used_days,
    )
    .await?;

    Ok(HttpResponse::Ok().json(updated))
}
