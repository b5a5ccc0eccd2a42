use crate::config::Config;
use crate::error::LeaveError;
use crate::{model::role::Role, models::Claims};
use actix_web::{FromRequest, HttpRequest, dev::Payload, error::ErrorUnauthorized, web::Data};
use futures::future::{Ready, ready};
use jsonwebtoken::decode;
use jsonwebtoken::{DecodingKey, Validation};

pub struct AuthUser {
    pub user_id: String,
    pub username: String,
    pub role: Role,

    /// Present only if this user is linked to an employee record
    pub employee_id: Option<String>,
}

impl FromRequest for AuthUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let token = match req
            .headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
        {
            Some(t) => t,
            None => return ready(Err(ErrorUnauthorized("Missing token"))),
        };

        let config = match req.app_data::<Data<Config>>() {
            Some(c) => c,
            None => {
                return ready(Err(
                    actix_web::error::ErrorInternalServerError("Config missing"),
                ));
            }
        };

        let data = match decode::<Claims>(
            token,
            &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            &Validation::default(),
        ) {
            Ok(d) => d,
            Err(_) => return ready(Err(ErrorUnauthorized("Invalid token"))),
        };

        let role = match Role::from_id(data.claims.role) {
            Some(r) => r,
            None => return ready(Err(ErrorUnauthorized("Invalid role"))),
        };

        ready(Ok(AuthUser {
            user_id: data.claims.user_id,
            username: data.claims.sub,
            role,
            employee_id: data.claims.employee_id,
        }))
    }
}

impl AuthUser {
    /// Callers whose role grants cross-employee write access to leave
    /// resources.
    pub fn is_elevated(&self) -> bool {
        matches!(self.role, Role::Admin | Role::Hr)
    }

    pub fn require_elevated(&self) -> Result<(), LeaveError> {
        if self.is_elevated() {
            Ok(())
        } else {
            Err(LeaveError::Forbidden("HR/Admin only".into()))
        }
    }

    /// Caller must be the employee identified by `employee_id`.
    pub fn require_self(&self, employee_id: &str) -> Result<(), LeaveError> {
        if self.employee_id.as_deref() == Some(employee_id) {
            Ok(())
        } else {
            Err(LeaveError::Forbidden("Not your employee record".into()))
        }
    }

    pub fn require_self_or_elevated(&self, employee_id: &str) -> Result<(), LeaveError> {
        if self.is_elevated() {
            return Ok(());
        }
        self.require_self(employee_id)
    }

    /// The employee profile behind this caller, required for self-service
    /// operations.
    pub fn require_employee_profile(&self) -> Result<&str, LeaveError> {
        self.employee_id
            .as_deref()
            .ok_or_else(|| LeaveError::Forbidden("No employee profile".into()))
    }
}
