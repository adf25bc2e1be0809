//! Validation result types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Field path (dot-joined, e.g. `data.email`) to human-readable message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    messages: BTreeMap<String, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for `path`. The first message recorded for a path wins.
    pub fn add(&mut self, path: impl Into<String>, message: impl Into<String>) -> bool {
        let path = path.into();
        if self.messages.contains_key(&path) {
            return false;
        }
        self.messages.insert(path, message.into());
        true
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.messages.get(path).map(String::as_str)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.messages.contains_key(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.messages
            .iter()
            .map(|(path, message)| (path.as_str(), message.as_str()))
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Outcome of validating a submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<ValidationErrors>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: None,
        }
    }

    /// Build a result from collected errors; empty errors mean valid.
    pub fn from_errors(errors: ValidationErrors) -> Self {
        if errors.is_empty() {
            Self::valid()
        } else {
            Self {
                is_valid: false,
                errors: Some(errors),
            }
        }
    }

    /// Message for a path, if that path failed.
    pub fn error(&self, path: &str) -> Option<&str> {
        self.errors.as_ref().and_then(|errors| errors.get(path))
    }

    pub fn error_count(&self) -> usize {
        self.errors.as_ref().map_or(0, ValidationErrors::len)
    }
}
