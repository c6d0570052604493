//! Field-level validation errors.
//!
//! Handlers collect per-field messages into [`FieldErrors`] and surface them
//! as [`CoreError::InvalidFields`], which the API renders as
//! `{ "fields": { "<name>": ["<message>", ...] } }`.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::error::CoreError;

/// Ordered map of field name to the messages reported for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against `field`. Messages accumulate per field.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// `Ok(())` when nothing was recorded, otherwise [`CoreError::InvalidFields`].
    pub fn into_result(self) -> Result<(), CoreError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(CoreError::InvalidFields(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            first = false;
            write!(f, "{field}: {}", messages.join(", "))?;
        }
        Ok(())
    }
}

/// Reject non-finite score values. Anything else is accepted as submitted.
pub fn validate_score_value(value: f64) -> Result<(), CoreError> {
    if value.is_finite() {
        return Ok(());
    }
    let mut fields = FieldErrors::new();
    fields.add("score", "The score must be a finite number.");
    Err(CoreError::InvalidFields(fields))
}
