//! Task list management.
//!
//! Covers listing, creating, fetching, updating, deleting and toggling the
//! completion of tasks. Identifier-keyed operations check existence before
//! touching the request body, and toggling flips the flag inside the store.
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Request body rules in [`validation`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
pub mod validation;

#[cfg(test)]
mod tests;
