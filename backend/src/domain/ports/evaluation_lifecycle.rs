//! Driving port for the evaluation lifecycle.

use async_trait::async_trait;

use crate::domain::{
    Error, Evaluation, EvaluationChanges, EvaluationFilter, EvaluationId, NewEvaluation,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EvaluationLifecycle: Send + Sync {
    /// Persist a new evaluation, opening its edit window.
    async fn create(&self, evaluation: NewEvaluation) -> Result<Evaluation, Error>;

    async fn get(&self, id: EvaluationId) -> Result<Evaluation, Error>;

    /// Evaluations matching `filter`, newest first.
    async fn list(&self, filter: EvaluationFilter) -> Result<Vec<Evaluation>, Error>;

    /// Apply a partial update; `edit_window_expired` once the window closed.
    async fn update(&self, id: EvaluationId, changes: EvaluationChanges)
        -> Result<Evaluation, Error>;

    /// Delete regardless of the edit window.
    async fn delete(&self, id: EvaluationId) -> Result<(), Error>;
}
