//! Identifier type for the task domain.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Store-assigned identifier of a task row.
///
/// Identifiers received from clients are parsed through [`FromStr`], which
/// only accepts 1 to 5 ASCII digits with a strictly positive value. Values
/// read back from the store go through [`TaskId::from_persisted`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(u32);

impl TaskId {
    /// Longest identifier, in decimal digits, accepted from clients.
    pub const MAX_DIGITS: usize = 5;

    /// Creates a task identifier from a positive value.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTaskId`] when the value is zero.
    pub fn new(value: u32) -> Result<Self, TaskDomainError> {
        if value == 0 {
            return Err(TaskDomainError::InvalidTaskId(value.to_string()));
        }
        Ok(Self(value))
    }

    /// Reconstructs an identifier from a stored integer column.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidPersistedId`] when the stored value
    /// is not a positive `u32`.
    pub fn from_persisted(value: i64) -> Result<Self, TaskDomainError> {
        u32::try_from(value)
            .ok()
            .filter(|id| *id > 0)
            .map(Self)
            .ok_or(TaskDomainError::InvalidPersistedId(value))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl FromStr for TaskId {
    type Err = TaskDomainError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let well_formed = !raw.is_empty()
            && raw.len() <= Self::MAX_DIGITS
            && raw.bytes().all(|byte| byte.is_ascii_digit());
        if !well_formed {
            return Err(TaskDomainError::InvalidTaskId(raw.to_owned()));
        }

        raw.parse::<u32>()
            .ok()
            .filter(|value| *value > 0)
            .map(Self)
            .ok_or_else(|| TaskDomainError::InvalidTaskId(raw.to_owned()))
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
