//! Test utilities for the backend crate.
//!
//! In-memory Record Store adapters and a settable clock, shared by unit tests
//! and the integration tests in `tests/`. Compiled for tests and behind the
//! `test-support` feature.

pub mod clock;
pub mod memory;

pub use clock::MutableClock;
pub use memory::{InMemoryEvaluationRepository, InMemoryGuardRepository, InMemoryUserRepository};
