//! JSON envelopes returned by the task endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::task::domain::Task;

/// Outcome marker carried by every response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    /// The operation succeeded.
    Success,
    /// The operation failed.
    Error,
}

/// `{status, data}` envelope of read endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataResponse<T> {
    /// Always [`ResponseStatus::Success`].
    pub status: ResponseStatus,
    /// Payload.
    pub data: T,
}

impl<T> DataResponse<T> {
    /// Wraps a payload in a success envelope.
    #[must_use]
    pub const fn success(data: T) -> Self {
        Self {
            status: ResponseStatus::Success,
            data,
        }
    }
}

/// `{status, message, data}` envelope of create and update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDataResponse<T> {
    /// Always [`ResponseStatus::Success`].
    pub status: ResponseStatus,
    /// Confirmation message.
    pub message: String,
    /// Payload.
    pub data: T,
}

impl<T> MessageDataResponse<T> {
    /// Wraps a payload and confirmation in a success envelope.
    #[must_use]
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: message.into(),
            data,
        }
    }
}

/// `{status, message}` envelope of delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Always [`ResponseStatus::Success`].
    pub status: ResponseStatus,
    /// Confirmation message.
    pub message: String,
}

impl MessageResponse {
    /// Creates a success envelope.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: message.into(),
        }
    }
}

/// Envelope of the toggle endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleResponse {
    /// Always [`ResponseStatus::Success`].
    pub status: ResponseStatus,
    /// Confirmation message.
    pub message: String,
    /// Completion flag after the flip.
    pub new_checked_value: bool,
}

impl ToggleResponse {
    /// Creates a success envelope.
    #[must_use]
    pub fn success(message: impl Into<String>, new_checked_value: bool) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: message.into(),
            new_checked_value,
        }
    }
}

/// Stored task as returned by create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResponse {
    /// Store-assigned identifier.
    pub id: u32,
    /// Title.
    pub title: String,
    /// Description, `null` when absent.
    pub description: Option<String>,
    /// Completion flag.
    pub checked: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<&Task> for TaskResponse {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id().value(),
            title: task.title().to_owned(),
            description: task.description().map(str::to_owned),
            checked: task.checked(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        }
    }
}
