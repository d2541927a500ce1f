//! Bearer-token authentication for protected routes.
//!
//! Handlers opt in by taking an [`Authenticated`] argument. A request with no
//! bearer token is rejected with 401; a token that fails verification with
//! 403.

use std::future::{Ready, ready};

use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, web};
use tracing::error;

use crate::domain::{Error, SessionClaims};
use crate::inbound::http::state::HttpState;

pub const MISSING_TOKEN: &str = "Unauthorized (No token provided)";

/// Claims of the verified caller.
#[derive(Debug, Clone)]
pub struct Authenticated(pub SessionClaims);

impl Authenticated {
    pub fn claims(&self) -> &SessionClaims {
        &self.0
    }
}

/// Extract the token from `Authorization: Bearer <token>`.
///
/// The scheme is matched case-insensitively; anything else counts as absent.
pub(crate) fn bearer_token(req: &HttpRequest) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

fn authenticate(req: &HttpRequest) -> Result<Authenticated, Error> {
    let Some(token) = bearer_token(req) else {
        return Err(Error::unauthorized(MISSING_TOKEN));
    };
    let Some(state) = req.app_data::<web::Data<HttpState>>() else {
        error!("HttpState missing from app data");
        return Err(Error::internal("authentication is not configured"));
    };
    state.sessions.verify(token).map(Authenticated)
}

impl FromRequest for Authenticated {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}
