//! Domain primitives, ports and services.
//!
//! Purpose: define the strongly typed entities shared by the HTTP and
//! persistence adapters, the ports those adapters plug into, and the services
//! that implement the use-cases. Nothing here depends on actix, diesel,
//! bcrypt or jsonwebtoken.
//!
//! Public surface:
//! - [`Error`] / [`ErrorCode`]: transport-agnostic failure payload.
//! - [`LoginCredentials`], [`User`], [`SessionClaims`]: authentication.
//! - [`Guard`], [`NewGuard`]: guard registry.
//! - [`Evaluation`], [`NewEvaluation`], [`EvaluationChanges`]: the
//!   evaluation lifecycle and its [`EDIT_WINDOW`].

pub mod auth;
pub mod credential_service;
pub mod error;
pub mod evaluation;
pub mod evaluation_service;
pub mod guard;
pub mod guard_service;
pub mod ports;
pub mod session;
pub mod trace_id;
pub mod user;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::credential_service::{CredentialVerifierService, INVALID_CREDENTIALS, INVALID_TOKEN};
pub use self::error::{Error, ErrorCode};
pub use self::evaluation::{
    CLIENT_ID_MAX, ClientId, EDIT_WINDOW, EVALUATED_BY_MAX, Evaluation, EvaluationChanges,
    EvaluationDraft, EvaluationFilter, EvaluationId, EvaluationValidationError, KpiScores,
    NewEvaluation, NewEvaluationRecord, TOTAL_SCORE_LIMIT, TotalScore,
};
pub use self::evaluation_service::{
    EVALUATION_LOCKED, EVALUATION_NOT_FOUND, EvaluationLifecycleService,
};
pub use self::guard::{
    GUARD_CODE_MAX, GUARD_NAME_MAX, Guard, GuardCode, GuardId, GuardName, GuardValidationError,
    NewGuard,
};
pub use self::guard_service::{GUARD_CODE_TAKEN, GUARD_NOT_FOUND, GuardRegistryService};
pub use self::session::{LoginOutcome, SESSION_TTL, SessionClaims, SessionToken};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    LOGIN_ID_MAX, NewUser, USER_TEXT_MAX, UnknownRole, User, UserId, UserRole, UserSummary,
    UserValidationError,
};
