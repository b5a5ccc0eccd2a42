use chrono::{Datelike, Utc};
use sqlx::SqlitePool;
use tracing::warn;

use crate::auth::auth::AuthUser;
use crate::error::LeaveError;
use crate::leave::duration::duration;
use crate::model::leave_request::{LeaveRequest, NewLeaveRequest};
use crate::model::status::LeaveStatus;
use crate::store::{leave_balance, leave_request, leave_type};

/// Caller identity as the coordinator sees it. The HTTP layer has already
/// authenticated the user; the coordinator still owns the one gate rule that
/// needs the loaded request (an employee may cancel their own pending
/// request).
pub struct Actor {
    pub user_id: String,
    pub employee_id: Option<String>,
    pub elevated: bool,
}

impl From<&AuthUser> for Actor {
    fn from(user: &AuthUser) -> Self {
        Actor {
            user_id: user.user_id.clone(),
            employee_id: user.employee_id.clone(),
            elevated: user.is_elevated(),
        }
    }
}

/// The permitted transition set. Same-status re-issues are handled before
/// this check and never reach it.
pub fn transition_allowed(from: LeaveStatus, to: LeaveStatus) -> bool {
    use LeaveStatus::*;
    matches!(
        (from, to),
        (Pending, Approved)
            | (Pending, Rejected)
            | (Pending, Cancelled)
            | (Approved, Cancelled)
            | (Approved, Rejected)
    )
}

/// Create a request in PENDING for `employee_id`.
pub async fn submit(
    pool: &SqlitePool,
    employee_id: &str,
    payload: NewLeaveRequest,
) -> Result<LeaveRequest, LeaveError> {
    if payload.start_date > payload.end_date {
        return Err(LeaveError::Validation(
            "start_date cannot be after end_date".into(),
        ));
    }
    if payload.num_days <= 0.0 {
        return Err(LeaveError::Validation("num_days must be positive".into()));
    }

    leave_type::get(pool, payload.leave_type_id)
        .await?
        .ok_or_else(|| {
            LeaveError::NotFound(format!("leave type {} not found", payload.leave_type_id))
        })?;

    // num_days is trusted as supplied; a mismatch with the working-day count
    // is surfaced in the log only.
    let computed = duration(payload.start_date, payload.end_date, true);
    if (computed - payload.num_days).abs() > f64::EPSILON {
        warn!(
            num_days = payload.num_days,
            computed, "submitted num_days differs from working-day count"
        );
    }

    leave_request::insert(pool, employee_id, &payload, Utc::now()).await
}

/// Move a request to `target` and apply the paired balance adjustment, all
/// inside one transaction. The only writer of `LeaveRequest.status` and of
/// `LeaveBalance.used_days` after provisioning.
pub async fn transition(
    pool: &SqlitePool,
    request_id: i64,
    target: LeaveStatus,
    actor: &Actor,
    comments: Option<String>,
) -> Result<LeaveRequest, LeaveError> {
    let mut tx = pool.begin().await?;

    let request = leave_request::get_tx(&mut tx, request_id)
        .await?
        .ok_or_else(|| LeaveError::NotFound(format!("leave request {request_id} not found")))?;

    if !actor.elevated {
        let own = actor.employee_id.as_deref() == Some(request.employee_id.as_str());
        if !own || target != LeaveStatus::Cancelled {
            return Err(LeaveError::Forbidden("HR/Admin only".into()));
        }
        if request.status != LeaveStatus::Pending && request.status != target {
            return Err(LeaveError::Forbidden(
                "Only pending requests can be cancelled by their owner".into(),
            ));
        }
    }

    // Re-issuing the current status is a no-op that reports current state.
    if request.status == target {
        return Ok(request);
    }

    if !transition_allowed(request.status, target) {
        return Err(LeaveError::InvalidTransition(format!(
            "cannot move request {} from {} to {}",
            request.id, request.status, target
        )));
    }

    let delta = match (request.status, target) {
        (LeaveStatus::Pending, LeaveStatus::Approved) => request.num_days,
        (LeaveStatus::Approved, LeaveStatus::Cancelled)
        | (LeaveStatus::Approved, LeaveStatus::Rejected) => -request.num_days,
        _ => 0.0,
    };

    if delta != 0.0 {
        let year = i64::from(request.start_date.year());
        let balance = leave_balance::get_for_key_tx(
            &mut tx,
            &request.employee_id,
            request.leave_type_id,
            year,
        )
        .await?;

        match balance {
            Some(balance) => {
                if delta > 0.0 {
                    leave_balance::increment_used(&mut tx, balance.id, delta).await?;
                } else {
                    leave_balance::decrement_used(&mut tx, balance.id, -delta).await?;
                }
            }
            // Approval of an un-provisioned slot is allowed; provisioning
            // the balance row is the caller's responsibility.
            None => warn!(
                employee_id = %request.employee_id,
                leave_type_id = request.leave_type_id,
                year,
                "no balance row for this transition; skipping balance update"
            ),
        }
    }

    let updated = leave_request::set_status_tx(
        &mut tx,
        request.id,
        target,
        &actor.user_id,
        Utc::now(),
        comments.as_deref(),
    )
    .await?;

    tx.commit().await?;

    Ok(updated)
}
