//! Port for evaluation persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{
    Evaluation, EvaluationChanges, EvaluationFilter, EvaluationId, NewEvaluationRecord,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by evaluation repository adapters.
    pub enum EvaluationRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "evaluation repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "evaluation repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EvaluationRepository: Send + Sync {
    async fn insert(
        &self,
        record: &NewEvaluationRecord,
    ) -> Result<Evaluation, EvaluationRepositoryError>;

    async fn find_by_id(
        &self,
        id: EvaluationId,
    ) -> Result<Option<Evaluation>, EvaluationRepositoryError>;

    /// Evaluations matching `filter`, newest first.
    async fn list(
        &self,
        filter: &EvaluationFilter,
    ) -> Result<Vec<Evaluation>, EvaluationRepositoryError>;

    /// Apply `changes` only if the row exists and `now < editable_until`,
    /// stamping `updated_at = now`. Check and write happen in one statement.
    ///
    /// Returns `None` when no row qualified.
    async fn update_editable(
        &self,
        id: EvaluationId,
        changes: &EvaluationChanges,
        now: DateTime<Utc>,
    ) -> Result<Option<Evaluation>, EvaluationRepositoryError>;

    /// Remove an evaluation, returning whether a row was deleted.
    async fn delete(&self, id: EvaluationId) -> Result<bool, EvaluationRepositoryError>;
}
