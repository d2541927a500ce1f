//! Outbound adapters implementing the driven ports.
//!
//! - **persistence**: PostgreSQL repositories on Diesel (the Record Store).
//! - **security**: bcrypt password verification and JWT session tokens.
//!
//! Adapters translate between domain types and infrastructure
//! representations and carry no business rules.

pub mod persistence;
pub mod security;
