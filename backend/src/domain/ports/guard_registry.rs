//! Driving port for the guard registry use-cases.

use async_trait::async_trait;

use crate::domain::{Error, Guard, GuardId, NewGuard};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GuardRegistry: Send + Sync {
    /// Register a guard; `conflict` when the code is already registered.
    async fn create(&self, guard: NewGuard) -> Result<Guard, Error>;

    /// All guards, newest first.
    async fn list(&self) -> Result<Vec<Guard>, Error>;

    async fn get(&self, id: GuardId) -> Result<Guard, Error>;

    async fn delete(&self, id: GuardId) -> Result<(), Error>;
}
