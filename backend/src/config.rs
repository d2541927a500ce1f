//! Process configuration loaded via OrthoConfig.
//!
//! Values come from `KPI_*` environment variables, CLI flags, or an optional
//! config file. The entry point loads them once and hands the pieces to the
//! components that need them.

use std::fmt;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use uuid::Uuid;
use zeroize::Zeroizing;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Configuration problems detected after loading.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("KPI_DATABASE_URL must be set")]
    MissingDatabaseUrl,
    #[error("KPI_JWT_SECRET must be set (or KPI_ALLOW_EPHEMERAL_SECRET=true for development)")]
    MissingJwtSecret,
}

/// Signing key for session tokens.
pub enum JwtSecret {
    Configured(Zeroizing<Vec<u8>>),
    /// Random per-process key; tokens do not survive a restart.
    Ephemeral(Zeroizing<Vec<u8>>),
}

impl JwtSecret {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Configured(bytes) | Self::Ephemeral(bytes) => bytes,
        }
    }

    pub fn is_ephemeral(&self) -> bool {
        matches!(self, Self::Ephemeral(_))
    }

    fn generate() -> Self {
        let mut bytes = Vec::with_capacity(32);
        bytes.extend_from_slice(Uuid::new_v4().as_bytes());
        bytes.extend_from_slice(Uuid::new_v4().as_bytes());
        Self::Ephemeral(Zeroizing::new(bytes))
    }
}

const REDACTED: &str = "<redacted>";

/// Server settings.
///
/// `Debug` output masks the signing key and the database URL, which may
/// carry credentials.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "KPI")]
pub struct AppSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// Port to bind.
    pub port: Option<u16>,
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// HMAC key used to sign session tokens.
    pub jwt_secret: Option<String>,
    /// Fall back to a random signing key when `jwt_secret` is unset.
    #[ortho_config(default = false)]
    pub allow_ephemeral_secret: bool,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Skip embedded migrations at startup.
    #[ortho_config(default = false)]
    pub skip_migrations: bool,
}

fn redact(value: Option<&String>) -> Option<&'static str> {
    value.map(|_| REDACTED)
}

impl fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database_url", &redact(self.database_url.as_ref()))
            .field("jwt_secret", &redact(self.jwt_secret.as_ref()))
            .field("allow_ephemeral_secret", &self.allow_ephemeral_secret)
            .field("db_max_connections", &self.db_max_connections)
            .field("skip_migrations", &self.skip_migrations)
            .finish()
    }
}

impl AppSettings {
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    pub fn database_url(&self) -> Result<&str, ConfigError> {
        self.database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::MissingDatabaseUrl)
    }

    /// Resolve the signing key.
    ///
    /// Debug builds always allow the ephemeral fallback.
    pub fn jwt_secret(&self) -> Result<JwtSecret, ConfigError> {
        match self.jwt_secret.as_deref().filter(|s| !s.is_empty()) {
            Some(secret) => Ok(JwtSecret::Configured(Zeroizing::new(
                secret.as_bytes().to_vec(),
            ))),
            None if self.allow_ephemeral_secret || cfg!(debug_assertions) => {
                Ok(JwtSecret::generate())
            }
            None => Err(ConfigError::MissingJwtSecret),
        }
    }
}
