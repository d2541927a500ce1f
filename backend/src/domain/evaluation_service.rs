//! Evaluation lifecycle service.
//!
//! Two states per evaluation: editable until `editable_until`, locked after.
//! The transition is driven by the injected clock alone. Updates are refused
//! once locked; deletes are not.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{error, info, warn};

use crate::domain::ports::{EvaluationLifecycle, EvaluationRepository, EvaluationRepositoryError};
use crate::domain::{
    Error, Evaluation, EvaluationChanges, EvaluationFilter, EvaluationId, NewEvaluation,
    NewEvaluationRecord,
};

pub const EVALUATION_NOT_FOUND: &str = "Evaluation not found";
pub const EVALUATION_LOCKED: &str = "Evaluation is no longer editable";

fn map_repository_error(error: EvaluationRepositoryError) -> Error {
    error!(%error, "evaluation repository failure");
    Error::internal(format!("evaluation repository error: {error}"))
}

fn locked(evaluation: &Evaluation) -> Error {
    Error::edit_window_expired(EVALUATION_LOCKED).with_details(serde_json::json!({
        "editableUntil": evaluation.editable_until.to_rfc3339(),
    }))
}

/// [`EvaluationLifecycle`] over an [`EvaluationRepository`] and a clock.
pub struct EvaluationLifecycleService<R> {
    evaluations: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> Clone for EvaluationLifecycleService<R> {
    fn clone(&self) -> Self {
        Self {
            evaluations: Arc::clone(&self.evaluations),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R> EvaluationLifecycleService<R> {
    pub fn new(evaluations: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { evaluations, clock }
    }
}

impl<R> EvaluationLifecycleService<R>
where
    R: EvaluationRepository,
{
    async fn find(&self, id: EvaluationId) -> Result<Evaluation, Error> {
        self.evaluations
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(EVALUATION_NOT_FOUND))
    }
}

#[async_trait]
impl<R> EvaluationLifecycle for EvaluationLifecycleService<R>
where
    R: EvaluationRepository,
{
    async fn create(&self, evaluation: NewEvaluation) -> Result<Evaluation, Error> {
        let record = NewEvaluationRecord::stamped(evaluation, self.clock.utc());
        let created = self
            .evaluations
            .insert(&record)
            .await
            .map_err(map_repository_error)?;
        info!(
            evaluation_id = %created.id,
            guard = %created.guard,
            editable_until = %created.editable_until,
            "evaluation recorded"
        );
        Ok(created)
    }

    async fn get(&self, id: EvaluationId) -> Result<Evaluation, Error> {
        self.find(id).await
    }

    async fn list(&self, filter: EvaluationFilter) -> Result<Vec<Evaluation>, Error> {
        self.evaluations
            .list(&filter)
            .await
            .map_err(map_repository_error)
    }

    async fn update(
        &self,
        id: EvaluationId,
        changes: EvaluationChanges,
    ) -> Result<Evaluation, Error> {
        // One instant for both the check and the conditional write.
        let now = self.clock.utc();
        let current = self.find(id).await?;
        if !current.is_editable_at(now) {
            warn!(evaluation_id = %id, "update refused: edit window closed");
            return Err(locked(&current));
        }

        match self
            .evaluations
            .update_editable(id, &changes, now)
            .await
            .map_err(map_repository_error)?
        {
            Some(updated) => {
                info!(evaluation_id = %id, "evaluation updated");
                Ok(updated)
            }
            // Lost a race with a delete, or the stored bound moved under us.
            None => match self
                .evaluations
                .find_by_id(id)
                .await
                .map_err(map_repository_error)?
            {
                None => Err(Error::not_found(EVALUATION_NOT_FOUND)),
                Some(current) => {
                    warn!(evaluation_id = %id, "update refused: edit window closed");
                    Err(locked(&current))
                }
            },
        }
    }

    async fn delete(&self, id: EvaluationId) -> Result<(), Error> {
        let removed = self
            .evaluations
            .delete(id)
            .await
            .map_err(map_repository_error)?;
        if !removed {
            return Err(Error::not_found(EVALUATION_NOT_FOUND));
        }
        info!(evaluation_id = %id, "evaluation deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "evaluation_service_tests.rs"]
mod tests;
