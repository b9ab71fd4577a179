//! Application services for task list orchestration.

mod lifecycle;

pub use lifecycle::{TaskErrorKind, TaskLifecycleError, TaskLifecycleResult, TaskLifecycleService};
