use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Candidate submission of a public form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    #[serde(default)]
    pub data: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitter_email: Option<String>,
}

impl Submission {
    pub fn new(data: Map<String, Value>) -> Self {
        Self {
            data,
            submitter_email: None,
        }
    }

    #[must_use]
    pub fn with_submitter_email(mut self, email: impl Into<String>) -> Self {
        self.submitter_email = Some(email.into());
        self
    }

    /// Submitted value for a field id.
    pub fn value(&self, id: &str) -> Option<&Value> {
        self.data.get(id)
    }
}
