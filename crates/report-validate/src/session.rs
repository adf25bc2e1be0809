//! Per-form validation state.

use report_model::{Submission, ValidationResult};

use crate::schema::SubmissionSchema;
use crate::validator::validate;

/// Where a form instance is in its submit cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormState {
    #[default]
    Pristine,
    Validating,
    Valid,
    Invalid,
}

/// One rendered form: its schema plus the outcome of the last submit attempt.
///
/// `Pristine -> Validating -> {Valid, Invalid}`; any later submit goes through
/// `Validating` again. There is no terminal state.
#[derive(Debug, Clone)]
pub struct FormSession {
    schema: SubmissionSchema,
    state: FormState,
    last_result: Option<ValidationResult>,
    attempts: usize,
}

impl FormSession {
    pub fn new(schema: SubmissionSchema) -> Self {
        Self {
            schema,
            state: FormState::Pristine,
            last_result: None,
            attempts: 0,
        }
    }

    /// Validate a submit attempt and record the outcome.
    pub fn submit(&mut self, submission: &Submission) -> &ValidationResult {
        self.state = FormState::Validating;
        self.attempts += 1;
        let result = validate(&self.schema, submission);
        self.state = if result.is_valid {
            FormState::Valid
        } else {
            FormState::Invalid
        };
        tracing::debug!(attempt = self.attempts, state = ?self.state, "form submit");
        self.last_result.insert(result)
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn last_result(&self) -> Option<&ValidationResult> {
        self.last_result.as_ref()
    }

    /// Error message for a field id from the last attempt.
    pub fn field_error(&self, id: &str) -> Option<&str> {
        self.last_result
            .as_ref()
            .and_then(|r| r.error(&crate::validator::field_path(id)))
    }

    pub fn attempts(&self) -> usize {
        self.attempts
    }

    pub fn schema(&self) -> &SubmissionSchema {
        &self.schema
    }
}
