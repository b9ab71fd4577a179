//! Repository port for task persistence and lookup.

use crate::task::domain::{NewTask, Task, TaskChanges, TaskId, TaskSummary};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Inserts a new task and returns it with its store-assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the store rejects
    /// the row.
    async fn insert(&self, task: &NewTask) -> TaskRepositoryResult<Task>;

    /// Inserts a new task unless its title is already stored.
    ///
    /// The title check and the insert are one atomic step, so concurrent
    /// callers with the same title produce at most one row. Returns `None`
    /// when the title is taken.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the store rejects
    /// the row.
    async fn insert_with_unique_title(&self, task: &NewTask) -> TaskRepositoryResult<Option<Task>>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns the projected rows of every task, ordered by identifier.
    async fn list_summaries(&self) -> TaskRepositoryResult<Vec<TaskSummary>>;

    /// Returns `true` when a task with exactly this title exists.
    async fn title_exists(&self, title: &str) -> TaskRepositoryResult<bool>;

    /// Overwrites every editable field of an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn update(&self, id: TaskId, changes: &TaskChanges) -> TaskRepositoryResult<Task>;

    /// Deletes a task permanently.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;

    /// Flips the completion flag in a single atomic store operation.
    ///
    /// Returns the new value, or `None` when the task does not exist.
    /// Concurrent calls on the same task are serialised by the store, so
    /// each caller observes a distinct state.
    async fn toggle_checked(
        &self,
        id: TaskId,
        at: DateTime<Utc>,
    ) -> TaskRepositoryResult<Option<bool>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),

    /// Failure of the machinery around the store (worker threads, locks).
    #[error("runtime error: {0}")]
    Runtime(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a data-quality or deserialization error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Wraps an error raised outside the store itself.
    pub fn runtime(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Runtime(Arc::new(err))
    }
}
