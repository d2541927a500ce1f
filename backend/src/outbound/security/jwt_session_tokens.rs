//! HS256 JWT implementation of [`SessionTokenCodec`].
//!
//! Expiry is checked against the injected clock rather than the system
//! time, with no leeway.

use std::sync::Arc;

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;

use crate::domain::ports::{SessionTokenCodec, SessionTokenError};
use crate::domain::{SessionClaims, SessionToken};

#[derive(Clone)]
pub struct JwtSessionTokens {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl JwtSessionTokens {
    pub fn new(secret: &[u8], clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "iat"]);
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            clock,
        }
    }
}

impl SessionTokenCodec for JwtSessionTokens {
    fn issue(&self, claims: &SessionClaims) -> Result<SessionToken, SessionTokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map(SessionToken::new)
            .map_err(|err| SessionTokenError::signing(err.to_string()))
    }

    fn verify(&self, token: &str) -> Result<SessionClaims, SessionTokenError> {
        let claims = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                ErrorKind::ExpiredSignature => SessionTokenError::expired(),
                _ => SessionTokenError::invalid(err.to_string()),
            })?;
        if self.clock.utc().timestamp() >= claims.exp {
            return Err(SessionTokenError::expired());
        }
        Ok(claims)
    }
}
