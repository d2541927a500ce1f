//! OpenAPI schema definitions for domain types and response envelopes.
//!
//! Domain types stay framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror their wire shape for documentation only.

use utoipa::ToSchema;

use super::evaluations::EvaluationResponse;
use super::guards::GuardResponse;
use super::users::{CurrentUserResponse, LoginResponse};

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// No bearer token or invalid credentials.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// The bearer token is invalid or expired.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request collides with an existing record.
    #[schema(rename = "conflict")]
    Conflict,
    /// The evaluation is past its 24 hour edit window.
    #[schema(rename = "edit_window_expired")]
    EditWindowExpired,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// Error response envelope.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Always `false`.
    success: bool,
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "Name and guard_id are required")]
    message: String,
    /// Correlation identifier, also sent as the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary details such as the offending field.
    #[schema(value_type = Option<Object>)]
    details: Option<serde_json::Value>,
}

macro_rules! data_envelope {
    ($(#[$meta:meta])* $name:ident, $data:ty) => {
        $(#[$meta])*
        #[derive(ToSchema)]
        #[expect(
            dead_code,
            reason = "Used only for OpenAPI schema generation via utoipa"
        )]
        pub struct $name {
            /// Always `true`.
            success: bool,
            data: $data,
        }
    };
}

data_envelope!(
    /// Successful login.
    LoginEnvelope,
    LoginResponse
);
data_envelope!(
    /// Claims of the presented token.
    CurrentUserEnvelope,
    CurrentUserResponse
);
data_envelope!(GuardEnvelope, GuardResponse);
data_envelope!(GuardListEnvelope, Vec<GuardResponse>);
data_envelope!(EvaluationEnvelope, EvaluationResponse);
data_envelope!(EvaluationListEnvelope, Vec<EvaluationResponse>);

#[cfg(test)]
mod tests {
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    use super::*;

    fn object_properties<T: ToSchema>() -> Vec<String> {
        match T::schema() {
            RefOr::T(Schema::Object(object)) => object.properties.keys().cloned().collect(),
            other => panic!("expected object schema, got {other:?}"),
        }
    }

    #[test]
    fn error_schema_uses_camel_case_trace_id() {
        let properties = object_properties::<ErrorSchema>();
        assert!(properties.contains(&"traceId".to_owned()));
        assert!(properties.contains(&"success".to_owned()));
    }

    #[test]
    fn envelopes_expose_success_and_data() {
        let properties = object_properties::<EvaluationListEnvelope>();
        assert_eq!(properties.len(), 2);
        assert!(properties.contains(&"success".to_owned()));
        assert!(properties.contains(&"data".to_owned()));
    }
}
