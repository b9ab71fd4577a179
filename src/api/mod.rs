//! HTTP surface of the task list.
//!
//! An axum [`Router`](axum::Router) over a shared [`TaskLifecycleService`]
//! (see [`handlers::AppState`]). All responses are JSON envelopes whose
//! `status` field is `"success"` or `"error"`.
//!
//! [`TaskLifecycleService`]: crate::task::services::TaskLifecycleService

pub mod dto;
pub mod error;
pub mod handlers;
mod operation;
pub mod routes;

pub use error::{ApiError, ApiErrorResponse, status_for};
pub use handlers::AppState;
pub use operation::Operation;
pub use routes::create_router;
