//! Task aggregate root and the values that flow into and out of the store.

use super::{TaskDomainError, TaskId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Validated task fields submitted by a client.
///
/// Produced by a validation rule set; every field is replaced on update, so
/// an absent description is carried as `None` and written as null.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskInput {
    /// Task title.
    pub title: String,
    /// Optional task description.
    pub description: Option<String>,
    /// Completion flag.
    pub checked: bool,
}

/// A task about to be inserted; the store assigns its identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    input: TaskInput,
    created_at: DateTime<Utc>,
}

impl NewTask {
    /// Stamps validated input with the current clock time.
    #[must_use]
    pub fn new(input: TaskInput, clock: &impl Clock) -> Self {
        Self {
            input,
            created_at: clock.utc(),
        }
    }

    /// Returns the submitted fields.
    #[must_use]
    pub const fn input(&self) -> &TaskInput {
        &self.input
    }

    /// Returns the creation timestamp, also used as the first `updated_at`.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Full-field overwrite of an existing task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskChanges {
    input: TaskInput,
    updated_at: DateTime<Utc>,
}

impl TaskChanges {
    /// Stamps validated input with the current clock time.
    #[must_use]
    pub fn new(input: TaskInput, clock: &impl Clock) -> Self {
        Self {
            input,
            updated_at: clock.utc(),
        }
    }

    /// Returns the replacement fields.
    #[must_use]
    pub const fn input(&self) -> &TaskInput {
        &self.input
    }

    /// Returns the modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: Option<String>,
    checked: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted completion flag.
    pub checked: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            checked: data.checked,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Builds the stored form of a new task once the store picked its id.
    #[must_use]
    pub fn inserted(id: TaskId, new_task: &NewTask) -> Self {
        let input = new_task.input();
        Self {
            id,
            title: input.title.clone(),
            description: input.description.clone(),
            checked: input.checked,
            created_at: new_task.created_at(),
            updated_at: new_task.created_at(),
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the completion flag.
    #[must_use]
    pub const fn checked(&self) -> bool {
        self.checked
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces every client-editable field.
    pub fn apply(&mut self, changes: &TaskChanges) {
        let input = changes.input();
        self.title.clone_from(&input.title);
        self.description.clone_from(&input.description);
        self.checked = input.checked;
        self.updated_at = changes.updated_at();
    }

    /// Flips the completion flag and returns the new value.
    pub fn toggle_checked(&mut self, at: DateTime<Utc>) -> bool {
        self.checked = !self.checked;
        self.updated_at = at;
        self.checked
    }

    /// Projects the task onto the fields exposed by read endpoints.
    #[must_use]
    pub fn view(&self) -> TaskView {
        TaskView {
            title: self.title.clone(),
            description: self.description.clone(),
            checked: self.checked,
        }
    }
}

/// Read projection of a task: identifier and timestamps excluded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskView {
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Completion flag.
    pub checked: bool,
}

/// Projected row returned by a full scan of the store.
///
/// Columns are optional because the scan reports what the table holds; the
/// listing operation rejects rows that break the task invariants instead of
/// skipping them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSummary {
    /// Stored title.
    pub title: Option<String>,
    /// Stored description.
    pub description: Option<String>,
    /// Stored completion flag.
    pub checked: Option<bool>,
}

impl TaskSummary {
    /// Converts the row into a [`TaskView`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::IncompleteRecord`] when the title is null
    /// or blank, or the completion flag is null.
    pub fn into_view(self) -> Result<TaskView, TaskDomainError> {
        if is_null_or_empty(self.title.as_deref()) {
            return Err(TaskDomainError::IncompleteRecord);
        }
        match (self.title, self.checked) {
            (Some(title), Some(checked)) => Ok(TaskView {
                title,
                description: self.description,
                checked,
            }),
            _ => Err(TaskDomainError::IncompleteRecord),
        }
    }
}

impl From<&Task> for TaskSummary {
    fn from(task: &Task) -> Self {
        Self {
            title: Some(task.title.clone()),
            description: task.description.clone(),
            checked: Some(task.checked),
        }
    }
}

/// Returns `true` when the value is absent or only whitespace.
#[must_use]
pub fn is_null_or_empty(value: Option<&str>) -> bool {
    value.is_none_or(|text| text.trim().is_empty())
}
