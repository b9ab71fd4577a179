//! Declarative rule sets for task request bodies.
//!
//! A [`RuleSet`] maps each field to a list of [`Constraint`] descriptors. The
//! create and update sets differ only in title uniqueness, which is enforced
//! on creation alone.

use super::TaskPayload;
use crate::task::domain::TaskInput;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Request body field names.
pub mod fields {
    /// Task title field.
    pub const TITLE: &str = "title";
    /// Task description field.
    pub const DESCRIPTION: &str = "description";
    /// Completion flag field.
    pub const CHECKED: &str = "checked";
}

/// Maximum title length in characters, matching the `VARCHAR(50)` column.
pub const MAX_TITLE_LENGTH: usize = 50;

/// Maximum description length in characters.
pub const MAX_DESCRIPTION_LENGTH: usize = 150;

/// A single constraint on a request body field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// The field must be present, non-null, and not blank.
    Required,
    /// The field must be a string.
    Text,
    /// The field must have at most this many characters.
    MaxLength(usize),
    /// The field must be boolean-coercible (`true`/`false` or `0`/`1`).
    Boolean,
    /// The field value must not already exist in the store.
    Unique,
}

impl Constraint {
    /// Renders the violation message for a field label.
    #[must_use]
    pub fn message(self, label: &str) -> String {
        match self {
            Self::Required => format!("The {label} field is required."),
            Self::Text => format!("The {label} field must be text."),
            Self::MaxLength(limit) => {
                format!("The {label} field may have at most {limit} characters.")
            }
            Self::Boolean => format!("The {label} field must be true or false (0 or 1)."),
            Self::Unique => format!("The {label} field must contain a unique value."),
        }
    }
}

/// Constraints attached to one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRules {
    field: &'static str,
    label: &'static str,
    constraints: Vec<Constraint>,
}

impl FieldRules {
    /// Creates rules for a field with a human-readable label.
    #[must_use]
    pub fn new(
        field: &'static str,
        label: &'static str,
        constraints: impl IntoIterator<Item = Constraint>,
    ) -> Self {
        Self {
            field,
            label,
            constraints: constraints.into_iter().collect(),
        }
    }

    /// Returns the body field name.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        self.field
    }

    /// Returns the constraints in evaluation order.
    #[must_use]
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    fn is_required(&self) -> bool {
        self.constraints.contains(&Constraint::Required)
    }

    fn check(&self, payload: &TaskPayload, context: &ValidationContext, errors: &mut FieldErrors) {
        let Some(value) = payload.get(self.field) else {
            if self.is_required() {
                errors.push(self.field, Constraint::Required.message(self.label));
            }
            return;
        };

        let text = value.as_str();
        if self.is_required() && text.is_some_and(|raw| raw.trim().is_empty()) {
            errors.push(self.field, Constraint::Required.message(self.label));
            return;
        }

        for constraint in &self.constraints {
            let violated = match *constraint {
                Constraint::Required => false,
                Constraint::Text => text.is_none(),
                Constraint::MaxLength(limit) => text.is_some_and(|raw| raw.chars().count() > limit),
                Constraint::Boolean => payload.flag(self.field).is_none(),
                Constraint::Unique => context.is_taken(self.field),
            };
            if !violated {
                continue;
            }
            errors.push(self.field, constraint.message(self.label));
            if matches!(constraint, Constraint::Text | Constraint::Boolean) {
                return;
            }
        }
    }
}

/// Field-level validation messages keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// Creates an empty error map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message for a field.
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_owned()).or_default().push(message.into());
    }

    /// Returns `true` when no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the messages recorded for a field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Returns the names of the fields that failed.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Flattens every message into one line, for log output.
    #[must_use]
    pub fn summary(&self) -> String {
        self.0
            .values()
            .flatten()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Store facts needed by constraints that cannot be decided from the body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationContext {
    taken: BTreeSet<&'static str>,
}

impl ValidationContext {
    /// Creates a context where no value is known to exist.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a field whose submitted value already exists in the store.
    #[must_use]
    pub fn with_taken(mut self, field: &'static str) -> Self {
        self.taken.insert(field);
        self
    }

    /// Returns `true` when the field's value already exists.
    #[must_use]
    pub fn is_taken(&self, field: &str) -> bool {
        self.taken.contains(field)
    }
}

/// Ordered collection of field rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    fields: Vec<FieldRules>,
}

impl RuleSet {
    /// Creates a rule set from field rules.
    #[must_use]
    pub fn new(fields: impl IntoIterator<Item = FieldRules>) -> Self {
        Self {
            fields: fields.into_iter().collect(),
        }
    }

    /// Rules applied when creating a task; titles must be unique.
    #[must_use]
    pub fn for_create() -> Self {
        Self::new([
            FieldRules::new(
                fields::TITLE,
                "Title",
                [
                    Constraint::Required,
                    Constraint::Text,
                    Constraint::MaxLength(MAX_TITLE_LENGTH),
                    Constraint::Unique,
                ],
            ),
            description_rules(),
            checked_rules(),
        ])
    }

    /// Rules applied when updating a task.
    #[must_use]
    pub fn for_update() -> Self {
        Self::new([
            FieldRules::new(
                fields::TITLE,
                "Title",
                [
                    Constraint::Required,
                    Constraint::Text,
                    Constraint::MaxLength(MAX_TITLE_LENGTH),
                ],
            ),
            description_rules(),
            checked_rules(),
        ])
    }

    /// Returns the field rules in evaluation order.
    #[must_use]
    pub fn fields(&self) -> &[FieldRules] {
        &self.fields
    }

    /// Returns `true` when the field carries a [`Constraint::Unique`].
    #[must_use]
    pub fn requires_unique(&self, field: &str) -> bool {
        self.fields
            .iter()
            .any(|rules| rules.field == field && rules.constraints.contains(&Constraint::Unique))
    }

    /// Evaluates every rule and collects the violations.
    #[must_use]
    pub fn check(&self, payload: &TaskPayload, context: &ValidationContext) -> FieldErrors {
        let mut errors = FieldErrors::new();
        for rules in &self.fields {
            rules.check(payload, context, &mut errors);
        }
        errors
    }

    /// Checks the payload and converts it into typed task input.
    ///
    /// # Errors
    ///
    /// Returns the collected [`FieldErrors`] when any rule is violated or a
    /// task field cannot be read from the payload.
    pub fn validate(
        &self,
        payload: &TaskPayload,
        context: &ValidationContext,
    ) -> Result<TaskInput, FieldErrors> {
        let mut errors = self.check(payload, context);
        if !errors.is_empty() {
            return Err(errors);
        }

        let title = payload.text(fields::TITLE);
        let checked = payload.flag(fields::CHECKED);
        match (title, checked) {
            (Some(title_text), Some(flag)) => Ok(TaskInput {
                title: title_text.to_owned(),
                description: payload.text(fields::DESCRIPTION).map(str::to_owned),
                checked: flag,
            }),
            _ => {
                if title.is_none() {
                    errors.push(fields::TITLE, Constraint::Required.message("Title"));
                }
                if checked.is_none() {
                    errors.push(fields::CHECKED, Constraint::Required.message("Checked"));
                }
                Err(errors)
            }
        }
    }
}

fn description_rules() -> FieldRules {
    FieldRules::new(
        fields::DESCRIPTION,
        "Description",
        [Constraint::Text, Constraint::MaxLength(MAX_DESCRIPTION_LENGTH)],
    )
}

fn checked_rules() -> FieldRules {
    FieldRules::new(
        fields::CHECKED,
        "Checked",
        [Constraint::Required, Constraint::Boolean],
    )
}
