//! Driving ports for login and bearer-token verification.
//!
//! Inbound adapters authenticate through these traits without importing the
//! backing infrastructure, so handler tests can substitute doubles.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, LoginOutcome, SessionClaims};

/// Verify credentials and issue a session token.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Fails with `unauthorized` for unknown accounts and wrong passwords
    /// alike.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<LoginOutcome, Error>;
}

/// Verify a presented bearer token.
#[cfg_attr(test, mockall::automock)]
pub trait SessionVerifier: Send + Sync {
    /// Fails with `forbidden` when the token is invalid or expired.
    fn verify(&self, token: &str) -> Result<SessionClaims, Error>;
}
