//! Credential verifier: checks a login identifier and password against stored
//! accounts and issues a signed session token.
//!
//! Unknown accounts and wrong passwords produce the same error so callers
//! cannot discover which identifiers exist.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{error, info};

use crate::domain::ports::{
    LoginService, PasswordVerifier, SessionTokenCodec, SessionTokenError, SessionVerifier,
    UserRepository, UserRepositoryError,
};
use crate::domain::{Error, LoginCredentials, LoginOutcome, SessionClaims};

/// Message returned for every rejected login.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";
/// Message returned for rejected bearer tokens.
pub const INVALID_TOKEN: &str = "Invalid or expired token";

fn map_repository_error(error: UserRepositoryError) -> Error {
    error!(%error, "user lookup failed");
    Error::internal(format!("user repository error: {error}"))
}

/// [`LoginService`] backed by a user repository, a password verifier and a
/// token codec.
pub struct CredentialVerifierService<R, P, T> {
    users: Arc<R>,
    passwords: Arc<P>,
    tokens: Arc<T>,
    clock: Arc<dyn Clock>,
}

impl<R, P, T> Clone for CredentialVerifierService<R, P, T> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            passwords: Arc::clone(&self.passwords),
            tokens: Arc::clone(&self.tokens),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, P, T> CredentialVerifierService<R, P, T> {
    pub fn new(users: Arc<R>, passwords: Arc<P>, tokens: Arc<T>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            passwords,
            tokens,
            clock,
        }
    }
}

impl<R, P, T> CredentialVerifierService<R, P, T>
where
    P: PasswordVerifier + 'static,
{
    /// bcrypt is deliberately slow; keep it off the async worker threads.
    async fn password_matches(&self, password: &str, hash: &str) -> Result<bool, Error> {
        let passwords = Arc::clone(&self.passwords);
        let password = zeroize::Zeroizing::new(password.to_owned());
        let hash = hash.to_owned();
        let outcome = tokio::task::spawn_blocking(move || passwords.verify(&password, &hash))
            .await
            .map_err(|err| Error::internal(format!("password check aborted: {err}")))?;
        match outcome {
            Ok(matched) => Ok(matched),
            Err(err) => {
                // A corrupt hash must not reveal that the account exists.
                error!(error = %err, "stored password hash rejected");
                Ok(false)
            }
        }
    }
}

#[async_trait]
impl<R, P, T> LoginService for CredentialVerifierService<R, P, T>
where
    R: UserRepository,
    P: PasswordVerifier + 'static,
    T: SessionTokenCodec,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<LoginOutcome, Error> {
        let Some(user) = self
            .users
            .find_by_login_or_email(credentials.identifier())
            .await
            .map_err(map_repository_error)?
        else {
            info!("login rejected: no matching account");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        if !self
            .password_matches(credentials.password(), &user.password_hash)
            .await?
        {
            info!(user_id = %user.id, "login rejected: password mismatch");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }

        let summary = user.summary();
        let claims = SessionClaims::for_user(&summary, self.clock.utc());
        let token = self.tokens.issue(&claims).map_err(|err| {
            error!(error = %err, "session token signing failed");
            Error::internal(format!("token signing failed: {err}"))
        })?;
        info!(user_id = %summary.id, "login succeeded");
        Ok(LoginOutcome {
            token,
            user: summary,
        })
    }
}

impl<R, P, T> SessionVerifier for CredentialVerifierService<R, P, T>
where
    R: Send + Sync,
    P: Send + Sync,
    T: SessionTokenCodec,
{
    fn verify(&self, token: &str) -> Result<SessionClaims, Error> {
        self.tokens.verify(token).map_err(|err| {
            match err {
                SessionTokenError::Expired => info!("bearer token expired"),
                other => info!(error = %other, "bearer token rejected"),
            }
            Error::forbidden(INVALID_TOKEN)
        })
    }
}

#[cfg(test)]
#[path = "credential_service_tests.rs"]
mod tests;
