//! Schema synthesis from form field descriptors.
//!
//! Every descriptor becomes exactly one [`FieldRule`]. The rule's
//! [`FieldKind`] carries the constraints that apply to that kind of input;
//! constraint keys that do not apply are dropped.

use std::collections::BTreeSet;

use regex::Regex;
use report_model::{FieldType, FieldValidation, FormFieldDescriptor};

use crate::error::{Result, SchemaError};

/// Constraint set of a single field, selected by its declared type.
#[derive(Debug, Clone)]
pub enum FieldKind {
    /// Free text (`text`, `textarea` and unrecognised types).
    Text {
        min_length: Option<usize>,
        max_length: Option<usize>,
        pattern: Option<Regex>,
    },
    Email,
    /// Number coerced from numeric strings, inclusive bounds.
    Number { min: Option<f64>, max: Option<f64> },
    Tel,
    Url,
    Date,
    Checkbox,
    /// `select` / `radio`. `None` accepts any string.
    Choice { options: Option<Vec<String>> },
}

impl FieldKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::Email => "email",
            Self::Number { .. } => "number",
            Self::Tel => "tel",
            Self::Url => "url",
            Self::Date => "date",
            Self::Checkbox => "checkbox",
            Self::Choice { .. } => "choice",
        }
    }
}

/// Validation rule for one form field.
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub id: String,
    pub label: String,
    pub required: bool,
    pub kind: FieldKind,
}

/// Whether the submission must carry a submitter email.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmitterEmail {
    #[default]
    Optional,
    Required,
}

/// Schema-wide options.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaOptions {
    pub submitter_email: SubmitterEmail,
}

/// Rules for a whole form, one per field id, in descriptor order.
#[derive(Debug, Clone, Default)]
pub struct SubmissionSchema {
    rules: Vec<FieldRule>,
    options: SchemaOptions,
}

impl SubmissionSchema {
    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    pub fn rule(&self, id: &str) -> Option<&FieldRule> {
        self.rules.iter().find(|r| r.id == id)
    }

    /// Field ids in descriptor order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.id.as_str())
    }

    pub fn options(&self) -> SchemaOptions {
        self.options
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Build a schema with default options.
pub fn build_schema(fields: &[FormFieldDescriptor]) -> Result<SubmissionSchema> {
    build_schema_with(fields, SchemaOptions::default())
}

/// Build a schema, rejecting descriptors that would produce an inconsistent rule.
pub fn build_schema_with(
    fields: &[FormFieldDescriptor],
    options: SchemaOptions,
) -> Result<SubmissionSchema> {
    let mut seen = BTreeSet::new();
    let mut rules = Vec::with_capacity(fields.len());

    for (index, field) in fields.iter().enumerate() {
        if field.id.trim().is_empty() {
            return Err(SchemaError::EmptyFieldId { index });
        }
        if !seen.insert(field.id.as_str()) {
            return Err(SchemaError::DuplicateFieldId(field.id.clone()));
        }
        let kind = build_kind(field)?;
        tracing::debug!(field = %field.id, kind = kind.name(), required = field.required, "built rule");
        rules.push(FieldRule {
            id: field.id.clone(),
            label: field.label.clone(),
            required: field.required,
            kind,
        });
    }

    Ok(SubmissionSchema { rules, options })
}

fn build_kind(field: &FormFieldDescriptor) -> Result<FieldKind> {
    let empty = FieldValidation::default();
    let validation = field.validation.as_ref().unwrap_or(&empty);

    let kind = match &field.field_type {
        FieldType::Email => FieldKind::Email,
        FieldType::Tel => FieldKind::Tel,
        FieldType::Url => FieldKind::Url,
        FieldType::Date => FieldKind::Date,
        FieldType::Checkbox => FieldKind::Checkbox,
        FieldType::Number => {
            if let (Some(min), Some(max)) = (validation.min, validation.max)
                && min > max
            {
                return Err(SchemaError::InvalidRange {
                    field: field.id.clone(),
                    min,
                    max,
                });
            }
            FieldKind::Number {
                min: validation.min,
                max: validation.max,
            }
        }
        FieldType::Select | FieldType::Radio => {
            let options = match &field.options {
                Some(options) if options.is_empty() => {
                    return Err(SchemaError::EmptyOptions {
                        field: field.id.clone(),
                    });
                }
                Some(options) => Some(options.iter().map(|o| o.value.clone()).collect()),
                None => None,
            };
            FieldKind::Choice { options }
        }
        FieldType::Text | FieldType::Textarea | FieldType::Other(_) => {
            if let FieldType::Other(other) = &field.field_type {
                tracing::warn!(field = %field.id, field_type = %other, "unknown field type, validating as text");
            }
            text_kind(field, validation)?
        }
    };

    log_inapplicable(field, validation, &kind);
    Ok(kind)
}

fn text_kind(field: &FormFieldDescriptor, validation: &FieldValidation) -> Result<FieldKind> {
    if let (Some(min_length), Some(max_length)) = (validation.min_length, validation.max_length)
        && min_length > max_length
    {
        return Err(SchemaError::InvalidLengthRange {
            field: field.id.clone(),
            min_length,
            max_length,
        });
    }
    let pattern = validation
        .pattern
        .as_deref()
        .map(|pattern| {
            Regex::new(pattern).map_err(|source| SchemaError::InvalidPattern {
                field: field.id.clone(),
                pattern: pattern.to_string(),
                source,
            })
        })
        .transpose()?;
    Ok(FieldKind::Text {
        min_length: validation.min_length,
        max_length: validation.max_length,
        pattern,
    })
}

fn log_inapplicable(field: &FormFieldDescriptor, validation: &FieldValidation, kind: &FieldKind) {
    let length_keys = validation.min_length.is_some()
        || validation.max_length.is_some()
        || validation.pattern.is_some();
    let bound_keys = validation.min.is_some() || validation.max.is_some();
    let ignored = match kind {
        FieldKind::Text { .. } => bound_keys,
        FieldKind::Number { .. } => length_keys,
        _ => length_keys || bound_keys,
    };
    if ignored {
        tracing::debug!(field = %field.id, kind = kind.name(), "ignoring constraints that do not apply");
    }
    if field.options.is_some() && !field.field_type.is_choice() {
        tracing::debug!(field = %field.id, "ignoring options on a non-choice field");
    }
}
