//! Credential hashing and session token adapters.

mod bcrypt_password_verifier;
mod jwt_session_tokens;

pub use bcrypt_password_verifier::{BCRYPT_COST, BcryptPasswordVerifier};
pub use jwt_session_tokens::JwtSessionTokens;
