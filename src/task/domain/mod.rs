//! Domain model for the task list.
//!
//! Holds the task aggregate, its identifier, and the projections used by
//! read endpoints, keeping infrastructure concerns outside the domain
//! boundary.

mod error;
mod ids;
mod task;

pub use error::TaskDomainError;
pub use ids::TaskId;
pub use task::{
    NewTask, PersistedTaskData, Task, TaskChanges, TaskInput, TaskSummary, TaskView,
    is_null_or_empty,
};
