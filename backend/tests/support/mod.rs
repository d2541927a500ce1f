//! Shared harness for HTTP integration tests.
//!
//! Wires the real domain services, bcrypt and JWT adapters over the in-memory
//! Record Store and a [`MutableClock`], then serves them through the same
//! routes and middleware as the binary.

#![allow(dead_code)]

use std::sync::Arc;

use actix_http::Request;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{App, test, web};
use chrono::{DateTime, TimeZone, Utc};
use mockable::Clock;
use serde_json::{Value, json};

use kpi_backend::Trace;
use kpi_backend::domain::ports::{PasswordVerifier, UserRepository};
use kpi_backend::domain::{
    CredentialVerifierService, EvaluationLifecycleService, GuardRegistryService, NewUser,
    TRACE_ID_HEADER, UserRole,
};
use kpi_backend::inbound::http::configure_api;
use kpi_backend::inbound::http::health::{HealthState, health, live, ready, root};
use kpi_backend::inbound::http::state::HttpState;
use kpi_backend::outbound::security::{BcryptPasswordVerifier, JwtSessionTokens};
use kpi_backend::test_support::{
    InMemoryEvaluationRepository, InMemoryGuardRepository, InMemoryUserRepository, MutableClock,
};

pub const TEST_SECRET: &[u8] = b"integration-test-secret";
pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_LOGIN: &str = "ADMIN01";
pub const ADMIN_PASSWORD: &str = "correct horse battery staple";

/// A fully wired application over in-memory storage.
pub struct Harness {
    pub clock: Arc<MutableClock>,
    users: Arc<InMemoryUserRepository>,
    passwords: Arc<BcryptPasswordVerifier>,
    state: HttpState,
}

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 3, 9, 0, 0)
        .single()
        .expect("valid start time")
}

impl Harness {
    pub fn new() -> Self {
        let clock = Arc::new(MutableClock::new(start_time()));
        let shared_clock: Arc<dyn Clock> = clock.clone();
        let users = Arc::new(InMemoryUserRepository::new(shared_clock.clone()));
        let passwords = Arc::new(BcryptPasswordVerifier::new(4));

        let credentials = Arc::new(CredentialVerifierService::new(
            users.clone(),
            passwords.clone(),
            Arc::new(JwtSessionTokens::new(TEST_SECRET, shared_clock.clone())),
            shared_clock.clone(),
        ));
        let guards = Arc::new(GuardRegistryService::new(Arc::new(
            InMemoryGuardRepository::new(shared_clock.clone()),
        )));
        let evaluations = Arc::new(EvaluationLifecycleService::new(
            Arc::new(InMemoryEvaluationRepository::new()),
            shared_clock,
        ));

        Self {
            clock,
            users,
            passwords,
            state: HttpState::new(credentials.clone(), credentials, guards, evaluations),
        }
    }

    /// A harness with the default administrator already registered.
    pub async fn with_admin() -> Self {
        let harness = Self::new();
        harness
            .seed_user(Some(ADMIN_LOGIN), ADMIN_EMAIL, ADMIN_PASSWORD, UserRole::Admin)
            .await;
        harness
    }

    pub async fn seed_user(
        &self,
        login_id: Option<&str>,
        email: &str,
        password: &str,
        role: UserRole,
    ) {
        let hash = self.passwords.hash(password).expect("hash password");
        let user = NewUser::try_new(login_id, "Test User", email, hash, role).expect("valid user");
        self.users.insert(&user).await.expect("insert user");
    }

    pub async fn app(
        &self,
    ) -> impl Service<Request, Response = ServiceResponse, Error = actix_web::Error> {
        let health_state = web::Data::new(HealthState::new());
        health_state.mark_ready();
        test::init_service(
            App::new()
                .app_data(health_state)
                .app_data(web::Data::new(self.state.clone()))
                .wrap(Trace)
                .configure(configure_api)
                .service(root)
                .service(health)
                .service(ready)
                .service(live),
        )
        .await
    }
}

/// Status, JSON body and `trace-id` header of one exchange.
pub struct Reply {
    pub status: StatusCode,
    pub body: Value,
    pub trace_id: Option<String>,
}

pub async fn send<S>(app: &S, request: test::TestRequest) -> Reply
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response = test::call_service(app, request.to_request()).await;
    let status = response.status();
    let trace_id = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = test::read_body(response).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    Reply {
        status,
        body,
        trace_id,
    }
}

pub fn bearer(request: test::TestRequest, token: &str) -> test::TestRequest {
    request.insert_header((AUTHORIZATION, format!("Bearer {token}")))
}

/// Log in and return the issued token.
pub async fn login<S>(app: &S, identifier: &str, password: &str) -> String
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let reply = send(
        app,
        test::TestRequest::post()
            .uri("/api/login")
            .set_json(json!({"email": identifier, "password": password})),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK, "login failed: {}", reply.body);
    reply.body["data"]["token"]
        .as_str()
        .expect("token string")
        .to_owned()
}
