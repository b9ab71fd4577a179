//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The identifier is not 1 to 5 decimal digits with a positive value.
    #[error("invalid task identifier '{0}', expected a positive integer of at most 5 digits")]
    InvalidTaskId(String),

    /// A stored identifier is zero or does not fit the identifier type.
    #[error("invalid persisted task identifier {0}")]
    InvalidPersistedId(i64),

    /// A stored task is missing its title or completion flag.
    #[error("one or more tasks have null or empty values")]
    IncompleteRecord,
}
