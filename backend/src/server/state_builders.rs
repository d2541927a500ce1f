//! Wiring of driven adapters into the domain services behind [`HttpState`].

use std::sync::Arc;

use mockable::{Clock, DefaultClock};

use kpi_backend::domain::{
    CredentialVerifierService, EvaluationLifecycleService, GuardRegistryService,
};
use kpi_backend::inbound::http::state::HttpState;
use kpi_backend::outbound::persistence::{
    DbPool, DieselEvaluationRepository, DieselGuardRepository, DieselUserRepository,
};
use kpi_backend::outbound::security::{BcryptPasswordVerifier, JwtSessionTokens};

/// Build the handler state over PostgreSQL, bcrypt and HS256 tokens.
///
/// One clock instance is shared so token expiry and edit windows agree.
pub(crate) fn build_http_state(pool: &DbPool, jwt_secret: &[u8]) -> HttpState {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);

    let credentials = Arc::new(CredentialVerifierService::new(
        Arc::new(DieselUserRepository::new(pool.clone())),
        Arc::new(BcryptPasswordVerifier::default()),
        Arc::new(JwtSessionTokens::new(jwt_secret, clock.clone())),
        clock.clone(),
    ));
    let guards = Arc::new(GuardRegistryService::new(Arc::new(
        DieselGuardRepository::new(pool.clone()),
    )));
    let evaluations = Arc::new(EvaluationLifecycleService::new(
        Arc::new(DieselEvaluationRepository::new(pool.clone())),
        clock,
    ));

    HttpState::new(credentials.clone(), credentials, guards, evaluations)
}
