//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint, the envelope and error schemas,
//! and the bearer token security scheme. The document is served by Swagger
//! UI in debug builds and exported with `cargo run --bin openapi-dump`.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::envelope::MessageEnvelope;
use crate::inbound::http::evaluations::{
    CreateEvaluationRequest, EvaluationResponse, UpdateEvaluationRequest,
};
use crate::inbound::http::guards::{CreateGuardRequest, GuardResponse};
use crate::inbound::http::schemas::{
    CurrentUserEnvelope, ErrorCodeSchema, ErrorSchema, EvaluationEnvelope,
    EvaluationListEnvelope, GuardEnvelope, GuardListEnvelope, LoginEnvelope,
};
use crate::inbound::http::users::{
    CurrentUserResponse, LoginRequest, LoginResponse, UserSummaryResponse,
};

pub const BEARER_SCHEME: &str = "BearerToken";

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        let scheme = HttpBuilder::new()
            .scheme(HttpAuthScheme::Bearer)
            .bearer_format("JWT")
            .description(Some("Token issued by POST /api/login, valid for 24 hours."))
            .build();
        components.add_security_scheme(BEARER_SCHEME, SecurityScheme::Http(scheme));
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "KPI evaluation backend API",
        description = "Guard registry and KPI evaluations with a 24 hour edit window."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::current_user,
        crate::inbound::http::guards::list_guards,
        crate::inbound::http::guards::create_guard,
        crate::inbound::http::guards::get_guard,
        crate::inbound::http::guards::delete_guard,
        crate::inbound::http::evaluations::list_evaluations,
        crate::inbound::http::evaluations::create_evaluation,
        crate::inbound::http::evaluations::get_evaluation,
        crate::inbound::http::evaluations::update_evaluation,
        crate::inbound::http::evaluations::delete_evaluation,
        crate::inbound::http::health::root,
        crate::inbound::http::health::health,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        MessageEnvelope,
        LoginRequest,
        LoginResponse,
        UserSummaryResponse,
        CurrentUserResponse,
        LoginEnvelope,
        CurrentUserEnvelope,
        CreateGuardRequest,
        GuardResponse,
        GuardEnvelope,
        GuardListEnvelope,
        CreateEvaluationRequest,
        UpdateEvaluationRequest,
        EvaluationResponse,
        EvaluationEnvelope,
        EvaluationListEnvelope,
    )),
    tags(
        (name = "auth", description = "Login and token introspection"),
        (name = "guards", description = "Guard registry"),
        (name = "evaluations", description = "KPI evaluations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated OpenAPI document.

    use super::*;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn error_schema_has_envelope_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        for field in ["success", "code", "message", "traceId", "details"] {
            assert_object_schema_has_field(error_schema, field);
        }
    }

    #[test]
    fn every_route_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/login",
            "/api/me",
            "/api/guards",
            "/api/guards/{id}",
            "/api/evaluations",
            "/api/evaluations/{id}",
            "/",
            "/health",
            "/health/ready",
            "/health/live",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing path {path}");
        }
    }

    #[test]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key(BEARER_SCHEME));
    }
}
