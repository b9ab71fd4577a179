//! Tasklist: a JSON REST API over a single table of tasks.
//!
//! The crate lists, creates, fetches, updates, deletes and toggles tasks,
//! validating identifiers and request bodies before touching the store.
//!
//! # Architecture
//!
//! Tasklist follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`)
//!
//! # Modules
//!
//! - [`task`]: Task domain, validation, storage and services
//! - [`api`]: axum routes, handlers and JSON envelopes
//! - [`config`]: Environment-driven server configuration
//! - [`telemetry`]: Tracing subscriber initialisation

pub mod api;
pub mod config;
pub mod task;
pub mod telemetry;
