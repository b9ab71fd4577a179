//! In-memory task repository for tests and local development.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::task::{
    domain::{NewTask, Task, TaskChanges, TaskId, TaskSummary},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Identifiers start at 1 and are never reused, mirroring an
/// auto-increment column.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: BTreeMap<TaskId, Task>,
    last_id: u32,
}

impl InMemoryTaskState {
    fn store(&mut self, task: &NewTask) -> TaskRepositoryResult<Task> {
        let next_id = self.last_id.checked_add(1).ok_or_else(|| {
            TaskRepositoryError::persistence(std::io::Error::other("task identifiers exhausted"))
        })?;
        let id = TaskId::new(next_id).map_err(TaskRepositoryError::persistence)?;

        let stored = Task::inserted(id, task);
        self.last_id = next_id;
        self.tasks.insert(id, stored.clone());
        Ok(stored)
    }

    fn has_title(&self, title: &str) -> bool {
        self.tasks.values().any(|task| task.title() == title)
    }
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> TaskRepositoryResult<RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state.read().map_err(|err| {
            TaskRepositoryError::runtime(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> TaskRepositoryResult<RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state.write().map_err(|err| {
            TaskRepositoryError::runtime(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn insert(&self, task: &NewTask) -> TaskRepositoryResult<Task> {
        self.write()?.store(task)
    }

    async fn insert_with_unique_title(&self, task: &NewTask) -> TaskRepositoryResult<Option<Task>> {
        let mut state = self.write()?;
        if state.has_title(&task.input().title) {
            return Ok(None);
        }
        state.store(task).map(Some)
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.read()?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn list_summaries(&self) -> TaskRepositoryResult<Vec<TaskSummary>> {
        let state = self.read()?;
        Ok(state.tasks.values().map(TaskSummary::from).collect())
    }

    async fn title_exists(&self, title: &str) -> TaskRepositoryResult<bool> {
        let state = self.read()?;
        Ok(state.has_title(title))
    }

    async fn update(&self, id: TaskId, changes: &TaskChanges) -> TaskRepositoryResult<Task> {
        let mut state = self.write()?;
        let task = state
            .tasks
            .get_mut(&id)
            .ok_or(TaskRepositoryError::NotFound(id))?;
        task.apply(changes);
        Ok(task.clone())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        state
            .tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(TaskRepositoryError::NotFound(id))
    }

    async fn toggle_checked(
        &self,
        id: TaskId,
        at: DateTime<Utc>,
    ) -> TaskRepositoryResult<Option<bool>> {
        let mut state = self.write()?;
        Ok(state
            .tasks
            .get_mut(&id)
            .map(|task| task.toggle_checked(at)))
    }
}
