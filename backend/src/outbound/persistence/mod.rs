//! PostgreSQL persistence adapters built on Diesel.
//!
//! Repository implementations only translate between Diesel rows and domain
//! types; no business rules live here. Row structs and the schema are
//! private to this module. Connections come from a `bb8` pool through
//! `diesel-async`.
//!
//! ```ignore
//! use kpi_backend::outbound::persistence::{DbPool, DieselGuardRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/kpi")).await?;
//! let guards = DieselGuardRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_evaluation_repository;
mod diesel_guard_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_evaluation_repository::DieselEvaluationRepository;
pub use diesel_guard_repository::DieselGuardRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
