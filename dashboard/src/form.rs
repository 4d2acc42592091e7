//! Create-form state: field values, required-field validation and the
//! submit lifecycle.
//!
//! DESIGN
//! ======
//! The form knows nothing about the network. A submit is split in two:
//! [`CreateForm::begin_submit`] validates and moves the form to `Pending`,
//! [`CreateForm::finish_submit`] returns it to `Idle` and clears the values
//! only when the backend accepted the record. Failed submits keep every
//! entered value so the user can retry.

use serde_json::{Map, Value};

#[cfg(test)]
#[path = "form_test.rs"]
mod tests;

// =============================================================================
// FIELDS
// =============================================================================

/// Declaration of one input of a create form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub required: bool,
    /// Shown next to the input when a required value is missing.
    pub required_message: &'static str,
}

impl FieldSpec {
    #[must_use]
    pub const fn required(name: &'static str, label: &'static str, message: &'static str) -> Self {
        Self { name, label, required: true, required_message: message }
    }

    #[must_use]
    pub const fn optional(name: &'static str, label: &'static str) -> Self {
        Self { name, label, required: false, required_message: "" }
    }
}

/// A required field without a usable value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingField {
    pub name: &'static str,
    pub message: &'static str,
}

/// Client-side validation failure. Never reaches the network.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("missing required fields: {}", names(.missing))]
pub struct ValidationError {
    pub missing: Vec<MissingField>,
}

fn names(missing: &[MissingField]) -> String {
    missing.iter().map(|m| m.name).collect::<Vec<_>>().join(", ")
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown form field `{0}`")]
pub struct UnknownField(pub String);

// =============================================================================
// FORM
// =============================================================================

/// Whether the submit control is showing its loading indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitState {
    #[default]
    Idle,
    Pending,
}

/// Why a submit did not start.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitBlocked {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("a submit is already in flight")]
    Pending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateForm {
    fields: Vec<FieldSpec>,
    values: Vec<String>,
    state: SubmitState,
}

impl CreateForm {
    #[must_use]
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        let values = vec![String::new(); fields.len()];
        Self { fields, values, state: SubmitState::Idle }
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    #[must_use]
    pub fn state(&self) -> SubmitState {
        self.state
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.state == SubmitState::Pending
    }

    /// Set the raw input of a field.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownField`] if the form declares no field `name`.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> Result<(), UnknownField> {
        let index = self
            .fields
            .iter()
            .position(|f| f.name == name)
            .ok_or_else(|| UnknownField(name.to_owned()))?;
        self.values[index] = value.into();
        Ok(())
    }

    /// Current raw input of a field.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .position(|f| f.name == name)
            .map(|i| self.values[i].as_str())
    }

    /// Check required fields and build the request body. Empty optional
    /// fields are left out of the body. Whitespace counts as a value, as
    /// with a plain `required` rule.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] listing every required field that is
    /// empty.
    pub fn validate(&self) -> Result<Map<String, Value>, ValidationError> {
        let mut missing = Vec::new();
        let mut body = Map::new();
        for (field, value) in self.fields.iter().zip(&self.values) {
            if value.is_empty() {
                if field.required {
                    missing.push(MissingField { name: field.name, message: field.required_message });
                }
                continue;
            }
            body.insert(field.name.to_owned(), Value::String(value.clone()));
        }
        if missing.is_empty() { Ok(body) } else { Err(ValidationError { missing }) }
    }

    /// Validate and enter `Pending`. On validation failure the form stays
    /// `Idle` with its values untouched.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitBlocked::Pending`] while another submit is in flight,
    /// or [`SubmitBlocked::Invalid`] if validation fails.
    pub fn begin_submit(&mut self) -> Result<Map<String, Value>, SubmitBlocked> {
        if self.is_pending() {
            return Err(SubmitBlocked::Pending);
        }
        let body = self.validate()?;
        self.state = SubmitState::Pending;
        Ok(body)
    }

    /// Leave `Pending`. Values are cleared only when the record was created.
    pub fn finish_submit(&mut self, created: bool) {
        self.state = SubmitState::Idle;
        if created {
            self.reset();
        }
    }

    /// Clear every value.
    pub fn reset(&mut self) {
        for value in &mut self.values {
            value.clear();
        }
    }
}
