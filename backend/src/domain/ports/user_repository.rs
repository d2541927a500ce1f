//! Port for reading and creating user accounts.

use async_trait::async_trait;

use crate::domain::{NewUser, User};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Email or login id already belongs to another account.
        Duplicate { message: String } => "user already exists: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find the account whose email or login id equals `identifier`,
    /// ignoring case.
    async fn find_by_login_or_email(
        &self,
        identifier: &str,
    ) -> Result<Option<User>, UserRepositoryError>;

    /// Insert a new account.
    async fn insert(&self, user: &NewUser) -> Result<User, UserRepositoryError>;
}
