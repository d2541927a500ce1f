//! Port for comparing a plaintext password with a stored hash.

use super::define_port_error;

define_port_error! {
    /// Errors raised while checking a password hash.
    pub enum PasswordVerifierError {
        /// The stored hash could not be parsed.
        MalformedHash { message: String } => "stored password hash is malformed: {message}",
        /// Hashing a new password failed.
        Hashing { message: String } => "password hashing failed: {message}",
    }
}

/// Hash comparison used by the credential verifier.
///
/// Synchronous: adapters are CPU bound and callers decide whether to move
/// the work off the async executor.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordVerifier: Send + Sync {
    /// Returns `Ok(true)` when `password` matches `hash`.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordVerifierError>;

    /// Hash a new password for storage.
    fn hash(&self, password: &str) -> Result<String, PasswordVerifierError>;
}
