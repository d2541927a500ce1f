//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{App, test, web};
use serde_json::Value;

use super::configure_api;
use super::state::HttpState;
use crate::domain::ports::{
    MockEvaluationLifecycle, MockGuardRegistry, MockLoginService, MockSessionVerifier,
};
use crate::domain::{Error, SessionClaims, UserId, UserRole};

pub const VALID_TOKEN: &str = "valid.test.token";

/// Mock driving ports; tests set expectations before calling [`Self::send`].
#[derive(Default)]
pub struct MockPorts {
    pub login: MockLoginService,
    pub sessions: MockSessionVerifier,
    pub guards: MockGuardRegistry,
    pub evaluations: MockEvaluationLifecycle,
}

pub fn admin_claims() -> SessionClaims {
    SessionClaims {
        id: UserId::new(1),
        email: "admin@example.com".to_owned(),
        role: UserRole::Admin,
        iat: 1_700_000_000,
        exp: 1_700_086_400,
    }
}

impl MockPorts {
    /// Accept [`VALID_TOKEN`] and reject every other token as invalid.
    pub fn with_session(mut self) -> Self {
        self.sessions.expect_verify().returning(|token| {
            if token == VALID_TOKEN {
                Ok(admin_claims())
            } else {
                Err(Error::forbidden("Invalid or expired token"))
            }
        });
        self
    }

    pub fn into_state(self) -> HttpState {
        HttpState::new(
            Arc::new(self.login),
            Arc::new(self.sessions),
            Arc::new(self.guards),
            Arc::new(self.evaluations),
        )
    }

    /// Serve one request through the full `/api` scope.
    pub async fn send(self, request: test::TestRequest) -> (StatusCode, Value) {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(self.into_state()))
                .configure(configure_api),
        )
        .await;
        let response = test::call_service(&app, request.to_request()).await;
        let status = response.status();
        let bytes = test::read_body(response).await;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };
        (status, body)
    }
}

/// Attach `Authorization: Bearer` with [`VALID_TOKEN`].
pub fn authorised(request: test::TestRequest) -> test::TestRequest {
    request.insert_header((AUTHORIZATION, format!("Bearer {VALID_TOKEN}")))
}
