//! Shared world state for task lifecycle BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use tasklist::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{Task, TaskId},
    services::{TaskLifecycleError, TaskLifecycleService},
    validation::{TaskPayload, fields},
};

/// Service type used by the BDD world.
pub type TestTaskService = TaskLifecycleService<InMemoryTaskRepository, DefaultClock>;

/// Scenario world for task lifecycle behaviour tests.
pub struct TaskWorld {
    /// The task service under test.
    pub service: TestTaskService,
    /// Identifier of the task the scenario is working on.
    pub current_id: Option<TaskId>,
    /// Last task returned by create.
    pub last_created: Option<Task>,
    /// Completion flag returned by the last toggle.
    pub last_toggle: Option<bool>,
    /// Failure of the last operation expected to fail.
    pub last_error: Option<TaskLifecycleError>,
}

impl TaskWorld {
    /// Creates a world over an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        let service = TaskLifecycleService::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::new(DefaultClock),
        );
        Self {
            service,
            current_id: None,
            last_created: None,
            last_toggle: None,
            last_error: None,
        }
    }

    /// Returns the identifier of the scenario's task.
    ///
    /// # Errors
    ///
    /// Returns an error when no task has been created yet.
    pub fn current_id(&self) -> Result<TaskId, eyre::Report> {
        self.current_id
            .ok_or_else(|| eyre::eyre!("no task created in scenario world"))
    }
}

impl Default for TaskWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskWorld {
    TaskWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Builds a request body from a title, optional description and flag.
pub fn build_payload(title: &str, description: Option<&str>, checked: bool) -> TaskPayload {
    let payload = TaskPayload::new()
        .with(fields::TITLE, title)
        .with(fields::CHECKED, checked);
    match description {
        Some(text) => payload.with(fields::DESCRIPTION, text),
        None => payload,
    }
}
