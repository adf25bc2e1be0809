//! Dynamic form definitions.
//!
//! A form is an ordered list of [`FormFieldDescriptor`]s fetched from the
//! backend. The descriptors drive both rendering and validation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Declared input type of a form field.
///
/// Unrecognised type strings are kept in [`FieldType::Other`] and are
/// validated as free text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    Text,
    Textarea,
    Email,
    Number,
    Tel,
    Url,
    Date,
    Checkbox,
    Select,
    Radio,
    Other(String),
}

impl FieldType {
    /// Parse a type string (case-insensitive).
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "text" => Self::Text,
            "textarea" => Self::Textarea,
            "email" => Self::Email,
            "number" => Self::Number,
            "tel" => Self::Tel,
            "url" => Self::Url,
            "date" => Self::Date,
            "checkbox" => Self::Checkbox,
            "select" => Self::Select,
            "radio" => Self::Radio,
            _ => Self::Other(s.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Email => "email",
            Self::Number => "number",
            Self::Tel => "tel",
            Self::Url => "url",
            Self::Date => "date",
            Self::Checkbox => "checkbox",
            Self::Select => "select",
            Self::Radio => "radio",
            Self::Other(other) => other,
        }
    }

    /// True for types whose value is picked from a list of options.
    pub fn is_choice(&self) -> bool {
        matches!(self, Self::Select | Self::Radio)
    }
}

impl From<String> for FieldType {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<FieldType> for String {
    fn from(value: FieldType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One selectable option of a select or radio field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    pub value: String,
    pub label: String,
}

/// Optional constraint parameters of a field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldValidation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl FieldValidation {
    pub fn is_empty(&self) -> bool {
        self.min_length.is_none()
            && self.max_length.is_none()
            && self.min.is_none()
            && self.max.is_none()
            && self.pattern.is_none()
    }
}

/// Declaration of one input of a dynamically rendered form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormFieldDescriptor {
    pub id: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<FieldOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<FieldValidation>,
}

impl FormFieldDescriptor {
    pub fn new(id: impl Into<String>, field_type: FieldType, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            field_type,
            label: label.into(),
            required: false,
            options: None,
            validation: None,
        }
    }

    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    #[must_use]
    pub fn with_options<I, V, L>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = (V, L)>,
        V: Into<String>,
        L: Into<String>,
    {
        self.options = Some(
            options
                .into_iter()
                .map(|(value, label)| FieldOption {
                    value: value.into(),
                    label: label.into(),
                })
                .collect(),
        );
        self
    }

    #[must_use]
    pub fn with_validation(mut self, validation: FieldValidation) -> Self {
        self.validation = Some(validation);
        self
    }
}

/// Form definition as returned by the "fetch form" API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormDefinition {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub fields: Vec<FormFieldDescriptor>,
}
