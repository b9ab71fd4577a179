//! Validation of task request bodies.
//!
//! Request bodies arrive as [`TaskPayload`] field maps and are checked
//! against a data-driven [`RuleSet`], yielding either typed task input or a
//! map of field-level messages.

mod payload;
pub mod rules;

pub use payload::{PayloadError, TaskPayload};
pub use rules::{Constraint, FieldErrors, FieldRules, RuleSet, ValidationContext, fields};
