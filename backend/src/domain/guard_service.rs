//! Guard registry service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::domain::ports::{GuardRegistry, GuardRepository, GuardRepositoryError};
use crate::domain::{Error, Guard, GuardId, NewGuard};

pub const GUARD_NOT_FOUND: &str = "Guard not found";
pub const GUARD_CODE_TAKEN: &str = "A guard with this ID already exists";

fn map_repository_error(error: GuardRepositoryError) -> Error {
    match error {
        GuardRepositoryError::DuplicateCode { code } => {
            Error::conflict(GUARD_CODE_TAKEN).with_details(serde_json::json!({ "guard_id": code }))
        }
        other => {
            error!(error = %other, "guard repository failure");
            Error::internal(format!("guard repository error: {other}"))
        }
    }
}

/// [`GuardRegistry`] over a [`GuardRepository`].
pub struct GuardRegistryService<R> {
    guards: Arc<R>,
}

impl<R> Clone for GuardRegistryService<R> {
    fn clone(&self) -> Self {
        Self {
            guards: Arc::clone(&self.guards),
        }
    }
}

impl<R> GuardRegistryService<R> {
    pub fn new(guards: Arc<R>) -> Self {
        Self { guards }
    }
}

#[async_trait]
impl<R> GuardRegistry for GuardRegistryService<R>
where
    R: GuardRepository,
{
    async fn create(&self, guard: NewGuard) -> Result<Guard, Error> {
        let existing = self
            .guards
            .find_by_code(&guard.code)
            .await
            .map_err(map_repository_error)?;
        if existing.is_some() {
            return Err(map_repository_error(GuardRepositoryError::duplicate_code(
                guard.code.as_ref(),
            )));
        }
        // The storage unique constraint still catches a concurrent insert.
        let created = self
            .guards
            .insert(&guard)
            .await
            .map_err(map_repository_error)?;
        info!(guard_id = %created.id, code = %created.code, "guard registered");
        Ok(created)
    }

    async fn list(&self) -> Result<Vec<Guard>, Error> {
        self.guards.list().await.map_err(map_repository_error)
    }

    async fn get(&self, id: GuardId) -> Result<Guard, Error> {
        self.guards
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(GUARD_NOT_FOUND))
    }

    async fn delete(&self, id: GuardId) -> Result<(), Error> {
        let removed = self
            .guards
            .delete(id)
            .await
            .map_err(map_repository_error)?;
        if !removed {
            return Err(Error::not_found(GUARD_NOT_FOUND));
        }
        info!(guard_id = %id, "guard deleted");
        Ok(())
    }
}
