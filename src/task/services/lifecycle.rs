//! Service layer for the task list operations.
//!
//! Every identifier-keyed read or mutation goes through
//! [`TaskLifecycleService::require_task`] first, so a missing task is
//! reported the same way by fetch, update and delete.

use crate::task::{
    domain::{NewTask, Task, TaskChanges, TaskDomainError, TaskId, TaskSummary, TaskView},
    ports::{TaskRepository, TaskRepositoryError},
    validation::{FieldErrors, PayloadError, RuleSet, TaskPayload, ValidationContext, fields},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Coarse classification of a failed operation, independent of transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskErrorKind {
    /// The request body broke one or more field rules.
    ValidationFailed,
    /// The identifier or body could not be read at all.
    InvalidInput,
    /// Stored data breaks the task invariants.
    InvalidState,
    /// No matching task, or no tasks at all.
    NotFound,
    /// The verb is not bound to the requested path.
    MethodNotAllowed,
    /// The store failed.
    StoreError,
    /// Anything else.
    InternalError,
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// The request body failed validation.
    #[error("validation failed: {}", .0.summary())]
    Validation(FieldErrors),
    /// The request body could not be read as a JSON object.
    #[error(transparent)]
    Payload(#[from] PayloadError),
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// The store holds no tasks.
    #[error("no tasks found")]
    NoTasks,
    /// The addressed task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

impl TaskLifecycleError {
    /// Classifies the error.
    #[must_use]
    pub const fn kind(&self) -> TaskErrorKind {
        match self {
            Self::Validation(_) => TaskErrorKind::ValidationFailed,
            Self::Payload(_) => TaskErrorKind::InvalidInput,
            Self::Domain(TaskDomainError::InvalidTaskId(_)) => TaskErrorKind::InvalidInput,
            Self::Domain(TaskDomainError::IncompleteRecord) => TaskErrorKind::InvalidState,
            Self::Domain(TaskDomainError::InvalidPersistedId(_)) => TaskErrorKind::StoreError,
            Self::NoTasks | Self::NotFound(_) | Self::Repository(TaskRepositoryError::NotFound(_)) => {
                TaskErrorKind::NotFound
            }
            Self::Repository(
                TaskRepositoryError::Persistence(_) | TaskRepositoryError::InvalidPersistedData(_),
            ) => TaskErrorKind::StoreError,
            Self::Repository(TaskRepositoryError::Runtime(_)) => TaskErrorKind::InternalError,
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task list orchestration service.
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository + ?Sized,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    create_rules: RuleSet,
    update_rules: RuleSet,
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a service with the default create and update rule sets.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self::with_rules(repository, clock, RuleSet::for_create(), RuleSet::for_update())
    }

    /// Creates a service with explicit rule sets.
    #[must_use]
    pub const fn with_rules(
        repository: Arc<R>,
        clock: Arc<C>,
        create_rules: RuleSet,
        update_rules: RuleSet,
    ) -> Self {
        Self {
            repository,
            clock,
            create_rules,
            update_rules,
        }
    }

    /// Lists every task as a read projection, ordered by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NoTasks`] for an empty store and
    /// [`TaskDomainError::IncompleteRecord`] when any stored row has a blank
    /// title or a null completion flag.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> TaskLifecycleResult<Vec<TaskView>> {
        let summaries = self.repository.list_summaries().await?;
        if summaries.is_empty() {
            return Err(TaskLifecycleError::NoTasks);
        }

        let views = summaries
            .into_iter()
            .map(TaskSummary::into_view)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(views)
    }

    /// Validates a request body and inserts a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Validation`] without touching the store
    /// when any rule fails, including a title that is already taken.
    #[tracing::instrument(skip(self, payload))]
    pub async fn create(&self, payload: &TaskPayload) -> TaskLifecycleResult<Task> {
        let context = self.store_context(&self.create_rules, payload).await?;
        let input = self
            .create_rules
            .validate(payload, &context)
            .map_err(TaskLifecycleError::Validation)?;

        let new_task = NewTask::new(input, &*self.clock);
        if !self.create_rules.requires_unique(fields::TITLE) {
            let task = self.repository.insert(&new_task).await?;
            tracing::info!(task_id = %task.id(), "task created");
            return Ok(task);
        }

        // A concurrent create may have taken the title after the lookup.
        let Some(task) = self.repository.insert_with_unique_title(&new_task).await? else {
            let taken = context.with_taken(fields::TITLE);
            return Err(TaskLifecycleError::Validation(
                self.create_rules.check(payload, &taken),
            ));
        };
        tracing::info!(task_id = %task.id(), "task created");
        Ok(task)
    }

    /// Returns the read projection of one task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_one(&self, id: TaskId) -> TaskLifecycleResult<TaskView> {
        Ok(self.require_task(id).await?.view())
    }

    /// Overwrites every editable field of an existing task.
    ///
    /// An omitted description is stored as null.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] before looking at the body
    /// when the task does not exist, then [`TaskLifecycleError::Validation`]
    /// when any rule fails.
    #[tracing::instrument(skip(self, payload))]
    pub async fn update(&self, id: TaskId, payload: &TaskPayload) -> TaskLifecycleResult<Task> {
        self.require_task(id).await?;
        self.overwrite(id, payload).await
    }

    /// Like [`Self::update`], but reads the raw request body only after the
    /// task is known to exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] for a missing task whatever
    /// the body holds, then [`TaskLifecycleError::Payload`] for an unreadable
    /// body and [`TaskLifecycleError::Validation`] when any rule fails.
    #[tracing::instrument(skip(self, body))]
    pub async fn update_from_body(&self, id: TaskId, body: &[u8]) -> TaskLifecycleResult<Task> {
        self.require_task(id).await?;
        let payload = TaskPayload::from_body(body)?;
        self.overwrite(id, &payload).await
    }

    async fn overwrite(&self, id: TaskId, payload: &TaskPayload) -> TaskLifecycleResult<Task> {
        let context = self.store_context(&self.update_rules, payload).await?;
        let input = self
            .update_rules
            .validate(payload, &context)
            .map_err(TaskLifecycleError::Validation)?;

        let task = self
            .repository
            .update(id, &TaskChanges::new(input, &*self.clock))
            .await?;
        tracing::info!(task_id = %id, "task updated");
        Ok(task)
    }

    /// Deletes a task permanently and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: TaskId) -> TaskLifecycleResult<TaskId> {
        self.require_task(id).await?;
        self.repository.delete(id).await?;
        tracing::info!(task_id = %id, "task deleted");
        Ok(id)
    }

    /// Flips the completion flag and returns the new value.
    ///
    /// The flip happens inside the store, so concurrent toggles of the same
    /// task never observe the same value twice.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist.
    #[tracing::instrument(skip(self))]
    pub async fn toggle_checked(&self, id: TaskId) -> TaskLifecycleResult<bool> {
        let checked = self
            .repository
            .toggle_checked(id, self.clock.utc())
            .await?
            .ok_or(TaskLifecycleError::NotFound(id))?;
        tracing::info!(task_id = %id, checked, "task completion toggled");
        Ok(checked)
    }

    async fn require_task(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(id))
    }

    async fn store_context(
        &self,
        rules: &RuleSet,
        payload: &TaskPayload,
    ) -> TaskLifecycleResult<ValidationContext> {
        let context = ValidationContext::new();
        let Some(title) = payload
            .text(fields::TITLE)
            .filter(|_| rules.requires_unique(fields::TITLE))
        else {
            return Ok(context);
        };

        if self.repository.title_exists(title).await? {
            return Ok(context.with_taken(fields::TITLE));
        }
        Ok(context)
    }
}
