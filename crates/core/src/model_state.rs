//! Per-request accumulator for validation and record-level error messages.
//!
//! A handler creates one [`ModelState`] per request, pushes messages into it
//! as checks fail, and hands it to the error response which drains it into
//! the `errors` field of the JSON body.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Key used for messages that concern the whole record rather than a field.
pub const RECORD_KEY: &str = "";

/// Error messages grouped by the field (or record) they refer to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ModelState {
    errors: BTreeMap<String, Vec<String>>,
}

impl ModelState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message under `key`. Use [`RECORD_KEY`] for record-level messages.
    pub fn add_error(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(key.into())
            .or_default()
            .push(message.into());
    }

    /// Append a record-level message.
    pub fn add_record_error(&mut self, message: impl Into<String>) {
        self.add_error(RECORD_KEY, message);
    }

    /// Builder form of [`ModelState::add_record_error`].
    pub fn with_record_error(mut self, message: impl Into<String>) -> Self {
        self.add_record_error(message);
        self
    }

    /// `true` when no messages have been recorded.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Total number of messages across all keys.
    pub fn error_count(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }

    /// Messages recorded under `key`.
    pub fn messages(&self, key: &str) -> &[String] {
        self.errors.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Merge every message from `other` into `self`.
    pub fn merge(&mut self, other: ModelState) {
        for (key, messages) in other.errors {
            self.errors.entry(key).or_default().extend(messages);
        }
    }

    /// One-line summary: record-level messages first, then field messages.
    pub fn summary(&self) -> String {
        let mut parts: Vec<String> = self.messages(RECORD_KEY).to_vec();
        for (key, messages) in &self.errors {
            if key == RECORD_KEY {
                continue;
            }
            parts.extend(messages.iter().map(|m| format!("{key}: {m}")));
        }
        if parts.is_empty() {
            "The request could not be processed".to_string()
        } else {
            parts.join("; ")
        }
    }
}

impl fmt::Display for ModelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

impl From<&validator::ValidationErrors> for ModelState {
    fn from(errors: &validator::ValidationErrors) -> Self {
        let mut state = ModelState::new();
        for (field, field_errors) in errors.field_errors() {
            for err in field_errors.iter() {
                let message = match &err.message {
                    Some(message) => message.to_string(),
                    None => format!("{field} is invalid ({})", err.code),
                };
                state.add_error(field.to_string(), message);
            }
        }
        state
    }
}
