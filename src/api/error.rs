//! API error handling.
//!
//! Every failure leaves a handler as an [`ApiErrorResponse`]: a status code
//! plus the `{status: "error", message, errors?}` body. Store and internal
//! failures are logged with their detail here and reach the client only as a
//! fixed message.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use super::{dto::ResponseStatus, operation::Operation};
use crate::task::{
    domain::TaskDomainError,
    services::{TaskErrorKind, TaskLifecycleError},
    validation::{FieldErrors, PayloadError},
};

const INVALID_PAYLOAD_MESSAGE: &str = "Request body must be a JSON object.";

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Always [`ResponseStatus::Error`].
    pub status: ResponseStatus,
    /// Human-readable message.
    pub message: String,
    /// Field-level messages for validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

impl ApiError {
    /// Creates an error body without field detail.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            message: message.into(),
            errors: None,
        }
    }

    /// Creates an error body carrying field-level messages.
    #[must_use]
    pub fn validation(errors: FieldErrors) -> Self {
        Self {
            status: ResponseStatus::Error,
            message: "Validation failed.".to_owned(),
            errors: Some(errors),
        }
    }
}

/// API error response containing status code and error body.
#[derive(Debug, Clone)]
pub struct ApiErrorResponse {
    status: StatusCode,
    error: ApiError,
    allow: Option<&'static str>,
}

impl ApiErrorResponse {
    /// Creates a new API error response.
    #[must_use]
    pub const fn new(status: StatusCode, error: ApiError) -> Self {
        Self {
            status,
            error,
            allow: None,
        }
    }

    /// Returns the HTTP status code.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the response body.
    #[must_use]
    pub const fn error(&self) -> &ApiError {
        &self.error
    }

    /// Creates a 400 response for an unreadable path identifier.
    #[must_use]
    pub fn invalid_id() -> Self {
        Self::new(StatusCode::BAD_REQUEST, ApiError::new("Invalid ID provided."))
    }

    /// Creates a 400 response for an unreadable request body.
    #[must_use]
    pub fn invalid_payload(operation: Operation, error: &PayloadError) -> Self {
        tracing::warn!(operation = operation.name(), %error, "rejected request body");
        Self::new(
            StatusCode::BAD_REQUEST,
            ApiError::new(INVALID_PAYLOAD_MESSAGE),
        )
    }

    /// Creates a 405 response naming the accepted verb.
    #[must_use]
    pub fn method_not_allowed(operation: Operation) -> Self {
        Self {
            status: StatusCode::METHOD_NOT_ALLOWED,
            error: ApiError::new(operation.method_hint()),
            allow: Some(operation.allowed_method()),
        }
    }

    /// Creates a 404 response for a path no route is bound to.
    #[must_use]
    pub fn route_not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, ApiError::new("Route not found."))
    }

    /// Maps a service failure to a response, logging it first.
    #[must_use]
    pub fn from_lifecycle(operation: Operation, error: TaskLifecycleError) -> Self {
        let kind = error.kind();
        let status = status_for(kind);
        match kind {
            TaskErrorKind::StoreError | TaskErrorKind::InternalError => {
                tracing::error!(operation = operation.name(), %error, "task operation failed");
            }
            TaskErrorKind::ValidationFailed | TaskErrorKind::InvalidState => {
                tracing::warn!(operation = operation.name(), %error, "task operation rejected");
            }
            TaskErrorKind::InvalidInput
            | TaskErrorKind::NotFound
            | TaskErrorKind::MethodNotAllowed => {
                tracing::info!(operation = operation.name(), %error, "task operation rejected");
            }
        }

        let body = match error {
            TaskLifecycleError::Validation(errors) => ApiError::validation(errors),
            TaskLifecycleError::Payload(_) => ApiError::new(INVALID_PAYLOAD_MESSAGE),
            TaskLifecycleError::NoTasks => ApiError::new("No tasks found."),
            TaskLifecycleError::Domain(TaskDomainError::InvalidTaskId(_)) => {
                ApiError::new("Invalid ID provided.")
            }
            TaskLifecycleError::Domain(TaskDomainError::IncompleteRecord) => {
                ApiError::new("One or more tasks have null or empty values.")
            }
            _ => match kind {
                TaskErrorKind::NotFound => ApiError::new("Task not found."),
                TaskErrorKind::StoreError => ApiError::new(operation.store_failure()),
                _ => ApiError::new("An unexpected error occurred."),
            },
        };
        Self::new(status, body)
    }
}

/// HTTP status code for an error kind.
#[must_use]
pub const fn status_for(kind: TaskErrorKind) -> StatusCode {
    match kind {
        TaskErrorKind::ValidationFailed
        | TaskErrorKind::InvalidInput
        | TaskErrorKind::InvalidState => StatusCode::BAD_REQUEST,
        TaskErrorKind::NotFound => StatusCode::NOT_FOUND,
        TaskErrorKind::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        TaskErrorKind::StoreError | TaskErrorKind::InternalError => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        let mut response = (self.status, Json(self.error)).into_response();
        if let Some(allow) = self.allow {
            response
                .headers_mut()
                .insert(header::ALLOW, HeaderValue::from_static(allow));
        }
        response
    }
}
