//! Port for signing and verifying session tokens.

use crate::domain::{SessionClaims, SessionToken};

use super::define_port_error;

define_port_error! {
    /// Errors raised by session token adapters.
    pub enum SessionTokenError {
        /// The token's expiry has passed.
        Expired => "session token expired",
        /// Signature, structure or claims are invalid.
        Invalid { message: String } => "session token invalid: {message}",
        /// The token could not be signed.
        Signing { message: String } => "session token signing failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait SessionTokenCodec: Send + Sync {
    /// Sign `claims` into a bearer token.
    fn issue(&self, claims: &SessionClaims) -> Result<SessionToken, SessionTokenError>;

    /// Check signature and expiry, returning the embedded claims.
    fn verify(&self, token: &str) -> Result<SessionClaims, SessionTokenError>;
}
