//! Login and current-user handlers.
//!
//! ```text
//! POST /api/login {"email":"GRD001","password":"secret"}
//! GET  /api/me     (Authorization: Bearer <token>)
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{
    Error, LoginCredentials, LoginOutcome, LoginValidationError, SessionClaims, UserSummary,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Authenticated;
use crate::inbound::http::envelope;
use crate::inbound::http::schemas::{CurrentUserEnvelope, ErrorSchema, LoginEnvelope};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{ValidationCode, field_error, non_blank};

pub const MISSING_LOGIN_FIELDS: &str = "Email/UserID and password are required";

/// Login body. `email` may hold either an email or a login id; `userid` is
/// accepted as an alias.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub userid: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl LoginRequest {
    fn credentials(&self) -> Result<LoginCredentials, Error> {
        let identifier = non_blank(self.email.as_deref()).or(non_blank(self.userid.as_deref()));
        let password = self.password.as_deref().filter(|p| !p.is_empty());
        let (Some(identifier), Some(password)) = (identifier, password) else {
            let field = if identifier.is_none() { "email" } else { "password" };
            return Err(field_error(
                MISSING_LOGIN_FIELDS,
                field,
                ValidationCode::MissingField,
            ));
        };
        LoginCredentials::try_from_parts(identifier, password).map_err(|err| {
            let (field, code) = match err {
                LoginValidationError::MissingIdentifier => ("email", ValidationCode::MissingField),
                LoginValidationError::MissingPassword => ("password", ValidationCode::MissingField),
                LoginValidationError::InvalidIdentifier => ("email", ValidationCode::InvalidValue),
            };
            field_error(err.to_string(), field, code)
        })
    }
}

/// Public account fields returned after login.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserSummaryResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
    #[schema(example = "admin")]
    pub role: String,
}

impl From<UserSummary> for UserSummaryResponse {
    fn from(user: UserSummary) -> Self {
        Self {
            id: user.id.get(),
            name: user.name,
            email: user.email,
            role: user.role.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserSummaryResponse,
}

impl From<LoginOutcome> for LoginResponse {
    fn from(outcome: LoginOutcome) -> Self {
        Self {
            token: outcome.token.as_str().to_owned(),
            user: outcome.user.into(),
        }
    }
}

/// Claims of the presented token.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CurrentUserResponse {
    pub id: i32,
    pub email: String,
    pub role: String,
    /// Issued-at, Unix seconds.
    pub iat: i64,
    /// Expiry, Unix seconds.
    pub exp: i64,
}

impl From<&SessionClaims> for CurrentUserResponse {
    fn from(claims: &SessionClaims) -> Self {
        Self {
            id: claims.id.get(),
            email: claims.email.clone(),
            role: claims.role.to_string(),
            iat: claims.iat,
            exp: claims.exp,
        }
    }
}

/// Verify credentials and issue a 24 hour bearer token.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginEnvelope),
        (status = 400, description = "Missing identifier or password", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = payload.credentials()?;
    let outcome = state.login.authenticate(&credentials).await?;
    Ok(envelope::ok(LoginResponse::from(outcome)))
}

/// Return the verified claims of the caller's token.
#[utoipa::path(
    get,
    path = "/api/me",
    responses(
        (status = 200, description = "Current user", body = CurrentUserEnvelope),
        (status = 401, description = "No token provided", body = ErrorSchema),
        (status = 403, description = "Invalid or expired token", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "currentUser"
)]
#[get("/me")]
pub async fn current_user(caller: Authenticated) -> ApiResult<HttpResponse> {
    Ok(envelope::ok(CurrentUserResponse::from(caller.claims())))
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
