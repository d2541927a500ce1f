//! bcrypt implementation of [`PasswordVerifier`].
//!
//! Stored hashes use the `$2a$`/`$2b$` formats produced by common bcrypt
//! libraries, so accounts created elsewhere keep working.

use crate::domain::ports::{PasswordVerifier, PasswordVerifierError};

/// Work factor for newly hashed passwords.
pub const BCRYPT_COST: u32 = 10;

#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordVerifier {
    cost: u32,
}

impl BcryptPasswordVerifier {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordVerifier {
    fn default() -> Self {
        Self::new(BCRYPT_COST)
    }
}

impl PasswordVerifier for BcryptPasswordVerifier {
    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordVerifierError> {
        bcrypt::verify(password, hash)
            .map_err(|err| PasswordVerifierError::malformed_hash(err.to_string()))
    }

    fn hash(&self, password: &str) -> Result<String, PasswordVerifierError> {
        bcrypt::hash(password, self.cost)
            .map_err(|err| PasswordVerifierError::hashing(err.to_string()))
    }
}
