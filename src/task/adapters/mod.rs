//! Adapter implementations of the task ports.
//!
//! - [`memory`]: process-local store for tests and development
//! - [`postgres`]: Diesel-backed `PostgreSQL` store

pub mod memory;
pub mod postgres;
