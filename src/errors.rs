//! Typed errors for form validation and autocomplete decoration.
//!
//! Validation errors are user-facing: their `Display` output is the message
//! shown next to the offending field. Lookup failures never reach the user;
//! the autocomplete decorator logs and skips them.

use std::fmt::Display;
use thiserror::Error;

/// A single field-level validation failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Input does not match the required pattern.
    #[error("{0}")]
    Format(String),

    /// Uniqueness constraint violated.
    #[error("{0}")]
    Duplicate(String),

    #[error("{field} field is required.")]
    Required { field: String },

    #[error("{field} cannot be longer than {max} characters but is currently {len} characters long.")]
    TooLong {
        field: String,
        max: usize,
        len: usize,
    },

    #[error("{field} must be a non-negative integer.")]
    Invalid { field: String },
}

/// Errors collected from one form submission, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    errors: Vec<(String, ValidationError)>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error for `field`. Only the first error per field is kept.
    pub fn set_error(&mut self, field: &str, error: ValidationError) {
        if !self.has_error(field) {
            self.errors.push((field.to_string(), error));
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_error(&self, field: &str) -> bool {
        self.errors.iter().any(|(f, _)| f == field)
    }

    pub fn get(&self, field: &str) -> Option<&ValidationError> {
        self.errors.iter().find(|(f, _)| f == field).map(|(_, e)| e)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ValidationError)> {
        self.errors.iter().map(|(f, e)| (f.as_str(), e))
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Display for FormErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<String> = self
            .errors
            .iter()
            .map(|(field, error)| format!("{field}: {error}"))
            .collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for FormErrors {}

/// Outcome of a single element validator that failed.
#[derive(Error, Debug)]
pub enum ElementError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("Storage lookup failed: {0}")]
    Storage(#[from] anyhow::Error),
}

/// Outcome of a form submission that did not save.
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("Form has errors: {0}")]
    Invalid(FormErrors),

    #[error("Storage operation failed: {0}")]
    Storage(#[from] anyhow::Error),
}

/// A collaborator could not resolve something a decoration needed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupFailure {
    #[error("{entity_type} '{id}' could not be loaded")]
    MissingEntity { entity_type: String, id: String },

    #[error("product variation '{0}' has no price")]
    MissingPrice(String),
}
