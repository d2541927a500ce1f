//! Domain ports defining the edges of the hexagon.
//!
//! Driving ports ([`LoginService`], [`SessionVerifier`], [`GuardRegistry`],
//! [`EvaluationLifecycle`]) are called by inbound adapters. Driven ports
//! (repositories, [`PasswordVerifier`], [`SessionTokenCodec`]) are
//! implemented by outbound adapters. Each driven port exposes a typed error
//! so adapters map their failures into predictable variants.

mod macros;
pub(crate) use macros::define_port_error;

mod evaluation_lifecycle;
mod evaluation_repository;
mod guard_registry;
mod guard_repository;
mod login_service;
mod password_verifier;
mod session_token_codec;
mod user_repository;

pub use evaluation_lifecycle::EvaluationLifecycle;
#[cfg(test)]
pub use evaluation_lifecycle::MockEvaluationLifecycle;
#[cfg(test)]
pub use evaluation_repository::MockEvaluationRepository;
pub use evaluation_repository::{EvaluationRepository, EvaluationRepositoryError};
pub use guard_registry::GuardRegistry;
#[cfg(test)]
pub use guard_registry::MockGuardRegistry;
#[cfg(test)]
pub use guard_repository::MockGuardRepository;
pub use guard_repository::{GuardRepository, GuardRepositoryError};
pub use login_service::{LoginService, SessionVerifier};
#[cfg(test)]
pub use login_service::{MockLoginService, MockSessionVerifier};
#[cfg(test)]
pub use password_verifier::MockPasswordVerifier;
pub use password_verifier::{PasswordVerifier, PasswordVerifierError};
#[cfg(test)]
pub use session_token_codec::MockSessionTokenCodec;
pub use session_token_codec::{SessionTokenCodec, SessionTokenError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
