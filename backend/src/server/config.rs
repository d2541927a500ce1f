//! HTTP server configuration object.

use kpi_backend::config::JwtSecret;
use kpi_backend::outbound::persistence::DbPool;

/// Everything the server needs, resolved by the entry point.
pub struct ServerConfig {
    pub(crate) bind_addr: (String, u16),
    pub(crate) db_pool: DbPool,
    pub(crate) jwt_secret: JwtSecret,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: (String, u16), db_pool: DbPool, jwt_secret: JwtSecret) -> Self {
        Self {
            bind_addr,
            db_pool,
            jwt_secret,
        }
    }
}
