//! Guard registry handlers. All routes require a bearer token.
//!
//! ```text
//! GET    /api/guards
//! POST   /api/guards       {"name":"Alice Smith","guard_id":"GRD001"}
//! GET    /api/guards/{id}
//! DELETE /api/guards/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Guard, GuardId, NewGuard};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Authenticated;
use crate::inbound::http::envelope;
use crate::inbound::http::schemas::{ErrorSchema, GuardEnvelope, GuardListEnvelope};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    ValidationCode, field_error, map_guard_validation, non_blank, parse_record_id,
};

pub const MISSING_GUARD_FIELDS: &str = "Name and guard_id are required";
pub const GUARD_DELETED: &str = "Guard deleted successfully";

#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CreateGuardRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    #[schema(example = "GRD001")]
    pub guard_id: Option<String>,
}

impl CreateGuardRequest {
    fn into_new_guard(self) -> ApiResult<NewGuard> {
        let (Some(name), Some(code)) = (
            non_blank(self.name.as_deref()),
            non_blank(self.guard_id.as_deref()),
        ) else {
            let field = if non_blank(self.name.as_deref()).is_none() {
                "name"
            } else {
                "guard_id"
            };
            return Err(field_error(
                MISSING_GUARD_FIELDS,
                field,
                ValidationCode::MissingField,
            ));
        };
        NewGuard::try_from_parts(name, code).map_err(map_guard_validation)
    }
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct GuardResponse {
    pub id: i32,
    pub name: String,
    pub guard_id: String,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
}

impl From<Guard> for GuardResponse {
    fn from(guard: Guard) -> Self {
        Self {
            id: guard.id.get(),
            name: guard.name.into(),
            guard_id: guard.code.into(),
            created_at: guard.created_at,
            updated_at: guard.updated_at,
        }
    }
}

fn guard_id(raw: &str) -> ApiResult<GuardId> {
    parse_record_id(raw).map(GuardId::new)
}

/// List all guards, newest first.
#[utoipa::path(
    get,
    path = "/api/guards",
    responses(
        (status = 200, description = "Guards", body = GuardListEnvelope),
        (status = 401, description = "No token provided", body = ErrorSchema),
        (status = 403, description = "Invalid or expired token", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["guards"],
    operation_id = "listGuards"
)]
#[get("")]
pub async fn list_guards(
    _caller: Authenticated,
    state: web::Data<HttpState>,
) -> ApiResult<HttpResponse> {
    let guards = state.guards.list().await?;
    let body: Vec<GuardResponse> = guards.into_iter().map(Into::into).collect();
    Ok(envelope::ok(body))
}

/// Fetch one guard by its numeric id.
#[utoipa::path(
    get,
    path = "/api/guards/{id}",
    params(("id" = i32, Path, description = "Guard id")),
    responses(
        (status = 200, description = "Guard", body = GuardEnvelope),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 404, description = "Guard not found", body = ErrorSchema)
    ),
    tags = ["guards"],
    operation_id = "getGuard"
)]
#[get("/{id}")]
pub async fn get_guard(
    _caller: Authenticated,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let guard = state.guards.get(guard_id(&path)?).await?;
    Ok(envelope::ok(GuardResponse::from(guard)))
}

/// Register a guard. Guard codes are unique.
#[utoipa::path(
    post,
    path = "/api/guards",
    request_body = CreateGuardRequest,
    responses(
        (status = 201, description = "Guard created", body = GuardEnvelope),
        (status = 400, description = "Missing or invalid fields", body = ErrorSchema),
        (status = 409, description = "Guard code already registered", body = ErrorSchema)
    ),
    tags = ["guards"],
    operation_id = "createGuard"
)]
#[post("")]
pub async fn create_guard(
    _caller: Authenticated,
    state: web::Data<HttpState>,
    payload: web::Json<CreateGuardRequest>,
) -> ApiResult<HttpResponse> {
    let new_guard = payload.into_inner().into_new_guard()?;
    let guard = state.guards.create(new_guard).await?;
    Ok(envelope::created(GuardResponse::from(guard)))
}

/// Delete a guard.
#[utoipa::path(
    delete,
    path = "/api/guards/{id}",
    params(("id" = i32, Path, description = "Guard id")),
    responses(
        (status = 200, description = "Guard deleted", body = crate::inbound::http::envelope::MessageEnvelope),
        (status = 404, description = "Guard not found", body = ErrorSchema)
    ),
    tags = ["guards"],
    operation_id = "deleteGuard"
)]
#[delete("/{id}")]
pub async fn delete_guard(
    _caller: Authenticated,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    state.guards.delete(guard_id(&path)?).await?;
    Ok(envelope::message(GUARD_DELETED))
}

/// Mount the guard routes under `/guards`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/guards")
            .service(list_guards)
            .service(create_guard)
            .service(get_guard)
            .service(delete_guard),
    );
}

#[cfg(test)]
#[path = "guards_tests.rs"]
mod tests;
