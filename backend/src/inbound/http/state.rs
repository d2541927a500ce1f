//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and depend only on driving
//! ports, so they can be exercised without I/O.

use std::sync::Arc;

use crate::domain::ports::{EvaluationLifecycle, GuardRegistry, LoginService, SessionVerifier};

#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub sessions: Arc<dyn SessionVerifier>,
    pub guards: Arc<dyn GuardRegistry>,
    pub evaluations: Arc<dyn EvaluationLifecycle>,
}

impl HttpState {
    pub fn new(
        login: Arc<dyn LoginService>,
        sessions: Arc<dyn SessionVerifier>,
        guards: Arc<dyn GuardRegistry>,
        evaluations: Arc<dyn EvaluationLifecycle>,
    ) -> Self {
        Self {
            login,
            sessions,
            guards,
            evaluations,
        }
    }
}
