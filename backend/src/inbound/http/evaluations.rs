//! Evaluation handlers. All routes require a bearer token.
//!
//! ```text
//! GET    /api/evaluations?guard_id=G1&client_id=C1
//! POST   /api/evaluations      {"guard_id":"G1","client_id":"C1","kpi_scores":{"punctuality":4}}
//! GET    /api/evaluations/{id}
//! PUT    /api/evaluations/{id} {"remarks":"Covered an extra shift"}
//! DELETE /api/evaluations/{id}
//! ```
//!
//! Request bodies are snake_case; response bodies are camelCase with
//! `totalScore` rendered as a decimal string.

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::{
    ClientId, Evaluation, EvaluationChanges, EvaluationDraft, EvaluationFilter, EvaluationId,
    GuardCode, NewEvaluation,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Authenticated;
use crate::inbound::http::envelope;
use crate::inbound::http::schemas::{ErrorSchema, EvaluationEnvelope, EvaluationListEnvelope};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    ValidationCode, field_error, map_evaluation_validation, map_guard_validation, non_blank,
    parse_record_id,
};

pub const MISSING_EVALUATION_REFERENCES: &str = "guard_id and client_id are required";
pub const EVALUATION_DELETED: &str = "Evaluation deleted successfully";

#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CreateEvaluationRequest {
    #[serde(default)]
    pub guard_id: Option<String>,
    #[serde(default)]
    pub client_id: Option<String>,
    /// KPI name to score mapping. Defaults to `{}`.
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub kpi_scores: Option<Value>,
    /// Number or decimal string. Defaults to `0`.
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "87.50")]
    pub total_score: Option<Decimal>,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default)]
    pub evaluated_by: Option<String>,
}

impl CreateEvaluationRequest {
    fn into_new_evaluation(self) -> ApiResult<NewEvaluation> {
        let guard_id = non_blank(self.guard_id.as_deref());
        let client_id = non_blank(self.client_id.as_deref());
        let (Some(guard_id), Some(client_id)) = (guard_id, client_id) else {
            let field = if guard_id.is_none() { "guard_id" } else { "client_id" };
            return Err(field_error(
                MISSING_EVALUATION_REFERENCES,
                field,
                ValidationCode::MissingField,
            ));
        };
        NewEvaluation::try_from_draft(EvaluationDraft {
            guard_id,
            client_id,
            kpi_scores: self.kpi_scores,
            total_score: self.total_score,
            remarks: self.remarks,
            evaluated_by: self.evaluated_by.as_deref(),
        })
        .map_err(map_evaluation_validation)
    }
}

/// Partial update. Omitted or `null` fields are left unchanged.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct UpdateEvaluationRequest {
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub kpi_scores: Option<Value>,
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "91.25")]
    pub total_score: Option<Decimal>,
    #[serde(default)]
    pub remarks: Option<String>,
}

impl UpdateEvaluationRequest {
    fn into_changes(self) -> ApiResult<EvaluationChanges> {
        EvaluationChanges::try_from_parts(self.kpi_scores, self.total_score, self.remarks)
            .map_err(map_evaluation_validation)
    }
}

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EvaluationListQuery {
    /// Only evaluations of this guard code.
    pub guard_id: Option<String>,
    /// Only evaluations submitted by this client.
    pub client_id: Option<String>,
}

impl EvaluationListQuery {
    fn into_filter(self) -> ApiResult<EvaluationFilter> {
        let guard = non_blank(self.guard_id.as_deref())
            .map(GuardCode::new)
            .transpose()
            .map_err(map_guard_validation)?;
        let client = non_blank(self.client_id.as_deref())
            .map(ClientId::new)
            .transpose()
            .map_err(map_evaluation_validation)?;
        Ok(EvaluationFilter { guard, client })
    }
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResponse {
    pub id: i32,
    pub guard_id: String,
    pub client_id: String,
    #[schema(value_type = Object)]
    pub kpi_scores: Map<String, Value>,
    #[schema(value_type = String, example = "87.50")]
    pub total_score: Decimal,
    pub remarks: Option<String>,
    pub evaluated_by: Option<String>,
    #[schema(value_type = String, format = DateTime)]
    pub editable_until: DateTime<Utc>,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
}

impl From<Evaluation> for EvaluationResponse {
    fn from(evaluation: Evaluation) -> Self {
        Self {
            id: evaluation.id.get(),
            guard_id: evaluation.guard.into(),
            client_id: evaluation.client.into(),
            kpi_scores: evaluation.kpi_scores.as_map().clone(),
            total_score: evaluation.total_score.value(),
            remarks: evaluation.remarks,
            evaluated_by: evaluation.evaluated_by,
            editable_until: evaluation.editable_until,
            created_at: evaluation.created_at,
            updated_at: evaluation.updated_at,
        }
    }
}

fn evaluation_id(raw: &str) -> ApiResult<EvaluationId> {
    parse_record_id(raw).map(EvaluationId::new)
}

/// List evaluations, newest first, optionally filtered by guard and client.
#[utoipa::path(
    get,
    path = "/api/evaluations",
    params(EvaluationListQuery),
    responses(
        (status = 200, description = "Evaluations", body = EvaluationListEnvelope),
        (status = 401, description = "No token provided", body = ErrorSchema),
        (status = 403, description = "Invalid or expired token", body = ErrorSchema)
    ),
    tags = ["evaluations"],
    operation_id = "listEvaluations"
)]
#[get("")]
pub async fn list_evaluations(
    _caller: Authenticated,
    state: web::Data<HttpState>,
    query: web::Query<EvaluationListQuery>,
) -> ApiResult<HttpResponse> {
    let filter = query.into_inner().into_filter()?;
    let evaluations = state.evaluations.list(filter).await?;
    let body: Vec<EvaluationResponse> = evaluations.into_iter().map(Into::into).collect();
    Ok(envelope::ok(body))
}

#[utoipa::path(
    get,
    path = "/api/evaluations/{id}",
    params(("id" = i32, Path, description = "Evaluation id")),
    responses(
        (status = 200, description = "Evaluation", body = EvaluationEnvelope),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 404, description = "Evaluation not found", body = ErrorSchema)
    ),
    tags = ["evaluations"],
    operation_id = "getEvaluation"
)]
#[get("/{id}")]
pub async fn get_evaluation(
    _caller: Authenticated,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let evaluation = state.evaluations.get(evaluation_id(&path)?).await?;
    Ok(envelope::ok(EvaluationResponse::from(evaluation)))
}

/// Record an evaluation. It stays editable for 24 hours.
#[utoipa::path(
    post,
    path = "/api/evaluations",
    request_body = CreateEvaluationRequest,
    responses(
        (status = 201, description = "Evaluation created", body = EvaluationEnvelope),
        (status = 400, description = "Missing or invalid fields", body = ErrorSchema)
    ),
    tags = ["evaluations"],
    operation_id = "createEvaluation"
)]
#[post("")]
pub async fn create_evaluation(
    _caller: Authenticated,
    state: web::Data<HttpState>,
    payload: web::Json<CreateEvaluationRequest>,
) -> ApiResult<HttpResponse> {
    let evaluation = payload.into_inner().into_new_evaluation()?;
    let created = state.evaluations.create(evaluation).await?;
    Ok(envelope::created(EvaluationResponse::from(created)))
}

/// Amend scores or remarks while the edit window is open.
#[utoipa::path(
    put,
    path = "/api/evaluations/{id}",
    params(("id" = i32, Path, description = "Evaluation id")),
    request_body = UpdateEvaluationRequest,
    responses(
        (status = 200, description = "Evaluation updated", body = EvaluationEnvelope),
        (status = 400, description = "Invalid fields", body = ErrorSchema),
        (status = 403, description = "Edit window closed, or invalid token", body = ErrorSchema),
        (status = 404, description = "Evaluation not found", body = ErrorSchema)
    ),
    tags = ["evaluations"],
    operation_id = "updateEvaluation"
)]
#[put("/{id}")]
pub async fn update_evaluation(
    _caller: Authenticated,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateEvaluationRequest>,
) -> ApiResult<HttpResponse> {
    let id = evaluation_id(&path)?;
    let changes = payload.into_inner().into_changes()?;
    let updated = state.evaluations.update(id, changes).await?;
    Ok(envelope::ok(EvaluationResponse::from(updated)))
}

/// Delete an evaluation, whether or not it is still editable.
#[utoipa::path(
    delete,
    path = "/api/evaluations/{id}",
    params(("id" = i32, Path, description = "Evaluation id")),
    responses(
        (status = 200, description = "Evaluation deleted", body = crate::inbound::http::envelope::MessageEnvelope),
        (status = 404, description = "Evaluation not found", body = ErrorSchema)
    ),
    tags = ["evaluations"],
    operation_id = "deleteEvaluation"
)]
#[delete("/{id}")]
pub async fn delete_evaluation(
    _caller: Authenticated,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    state.evaluations.delete(evaluation_id(&path)?).await?;
    Ok(envelope::message(EVALUATION_DELETED))
}

/// Mount the evaluation routes under `/evaluations`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/evaluations")
            .service(list_evaluations)
            .service(create_evaluation)
            .service(get_evaluation)
            .service(update_evaluation)
            .service(delete_evaluation),
    );
}

#[cfg(test)]
#[path = "evaluations_tests.rs"]
mod tests;
