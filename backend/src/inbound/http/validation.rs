//! Request validation helpers shared by the handlers.
//!
//! Every rejection is an `invalid_request` error whose `details` name the
//! offending field and a machine-readable code.

use actix_web::HttpRequest;
use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use serde_json::json;
use tracing::debug;

use crate::domain::{Error, EvaluationValidationError, GuardValidationError};

/// Machine-readable validation failure codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    MissingField,
    InvalidValue,
    TooLong,
    InvalidId,
    MalformedBody,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidValue => "invalid_value",
            Self::TooLong => "too_long",
            Self::InvalidId => "invalid_id",
            Self::MalformedBody => "malformed_body",
        }
    }
}

pub(crate) fn field_error(
    message: impl Into<String>,
    field: &'static str,
    code: ValidationCode,
) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code.as_str(),
    }))
}

/// Parse a storage identifier from a path segment.
pub(crate) fn parse_record_id(raw: &str) -> Result<i32, Error> {
    raw.trim().parse::<i32>().map_err(|_| {
        field_error(
            format!("id must be an integer, got `{raw}`"),
            "id",
            ValidationCode::InvalidId,
        )
    })
}

/// Treat absent and blank strings alike.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

pub(crate) fn map_guard_validation(err: GuardValidationError) -> Error {
    let code = match err {
        GuardValidationError::EmptyCode | GuardValidationError::EmptyName => {
            ValidationCode::MissingField
        }
        GuardValidationError::CodeTooLong { .. } | GuardValidationError::NameTooLong { .. } => {
            ValidationCode::TooLong
        }
        GuardValidationError::CodeContainsNul | GuardValidationError::NameContainsNul => {
            ValidationCode::InvalidValue
        }
    };
    field_error(err.to_string(), err.field(), code)
}

pub(crate) fn map_evaluation_validation(err: EvaluationValidationError) -> Error {
    let code = match &err {
        EvaluationValidationError::Guard(GuardValidationError::EmptyCode)
        | EvaluationValidationError::EmptyClient => ValidationCode::MissingField,
        EvaluationValidationError::Guard(
            GuardValidationError::CodeContainsNul | GuardValidationError::NameContainsNul,
        )
        | EvaluationValidationError::ContainsNul { .. } => ValidationCode::InvalidValue,
        EvaluationValidationError::Guard(_)
        | EvaluationValidationError::ClientTooLong { .. }
        | EvaluationValidationError::EvaluatedByTooLong { .. } => ValidationCode::TooLong,
        EvaluationValidationError::KpiScoresNotObject
        | EvaluationValidationError::TotalScoreOutOfRange => ValidationCode::InvalidValue,
    };
    field_error(err.to_string(), err.field(), code)
}

/// `JsonConfig` error handler producing the standard error envelope.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected request body");
    let message = match &err {
        JsonPayloadError::ContentType => "Content-Type must be application/json".to_owned(),
        JsonPayloadError::Deserialize(inner) => format!("Malformed JSON body: {inner}"),
        _ => "Malformed JSON body".to_owned(),
    };
    field_error(message, "body", ValidationCode::MalformedBody).into()
}

/// `QueryConfig` error handler producing the standard error envelope.
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    field_error(
        format!("Invalid query string: {err}"),
        "query",
        ValidationCode::InvalidValue,
    )
    .into()
}

/// `PathConfig` error handler producing the standard error envelope.
pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    field_error(
        format!("Invalid path: {err}"),
        "path",
        ValidationCode::InvalidValue,
    )
    .into()
}
