//! KPI evaluation backend library.
//!
//! A hexagonal monolith: [`domain`] holds the entities, ports and services;
//! [`inbound`] adapts HTTP onto the driving ports; [`outbound`] implements the
//! driven ports with PostgreSQL, bcrypt and JWT.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
