//! Port for guard persistence.

use async_trait::async_trait;

use crate::domain::{Guard, GuardCode, GuardId, NewGuard};

use super::define_port_error;

define_port_error! {
    /// Errors raised by guard repository adapters.
    pub enum GuardRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "guard repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "guard repository query failed: {message}",
        /// Storage rejected the insert because the code is taken.
        DuplicateCode { code: String } => "guard code already exists: {code}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GuardRepository: Send + Sync {
    /// Insert a guard. Must report a taken code as `DuplicateCode`.
    async fn insert(&self, guard: &NewGuard) -> Result<Guard, GuardRepositoryError>;

    async fn find_by_code(&self, code: &GuardCode) -> Result<Option<Guard>, GuardRepositoryError>;

    async fn find_by_id(&self, id: GuardId) -> Result<Option<Guard>, GuardRepositoryError>;

    /// All guards, newest first.
    async fn list(&self) -> Result<Vec<Guard>, GuardRepositoryError>;

    /// Remove a guard, returning whether a row was deleted.
    async fn delete(&self, id: GuardId) -> Result<bool, GuardRepositoryError>;
}
