//! Validation violation types.
//!
//! Each variant carries only the data its message needs. Paths are dot-joined
//! (`data.<field id>` or `submitterEmail`).

use serde::{Deserialize, Serialize};

/// A single violated rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum Violation {
    // Presence
    /// Required value is absent, empty, or an unchecked required checkbox.
    Required { path: String, label: String },

    // Shape
    InvalidEmail { path: String },
    InvalidPhone { path: String },
    InvalidUrl { path: String },
    InvalidDate { path: String },
    /// Value could not be coerced to a number.
    NotNumber { path: String, label: String },
    NotBoolean { path: String, label: String },
    NotText { path: String, label: String },
    /// Value is not one of the field's option values.
    InvalidOption {
        path: String,
        label: String,
        value: String,
    },
    PatternMismatch { path: String, label: String },

    // Bounds
    BelowMinimum {
        path: String,
        label: String,
        min: f64,
    },
    AboveMaximum {
        path: String,
        label: String,
        max: f64,
    },
    TooShort {
        path: String,
        label: String,
        min_length: usize,
    },
    TooLong {
        path: String,
        label: String,
        max_length: usize,
    },
}

impl Violation {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Required { .. } => "required",
            Self::InvalidEmail { .. } => "invalid_email",
            Self::InvalidPhone { .. } => "invalid_phone",
            Self::InvalidUrl { .. } => "invalid_url",
            Self::InvalidDate { .. } => "invalid_date",
            Self::NotNumber { .. } => "not_number",
            Self::NotBoolean { .. } => "not_boolean",
            Self::NotText { .. } => "not_text",
            Self::InvalidOption { .. } => "invalid_option",
            Self::PatternMismatch { .. } => "pattern_mismatch",
            Self::BelowMinimum { .. } => "below_minimum",
            Self::AboveMaximum { .. } => "above_maximum",
            Self::TooShort { .. } => "too_short",
            Self::TooLong { .. } => "too_long",
        }
    }

    /// Dot-joined path of the offending value.
    pub fn path(&self) -> &str {
        match self {
            Self::Required { path, .. }
            | Self::InvalidEmail { path }
            | Self::InvalidPhone { path }
            | Self::InvalidUrl { path }
            | Self::InvalidDate { path }
            | Self::NotNumber { path, .. }
            | Self::NotBoolean { path, .. }
            | Self::NotText { path, .. }
            | Self::InvalidOption { path, .. }
            | Self::PatternMismatch { path, .. }
            | Self::BelowMinimum { path, .. }
            | Self::AboveMaximum { path, .. }
            | Self::TooShort { path, .. }
            | Self::TooLong { path, .. } => path,
        }
    }

    /// Human-readable message shown next to the input.
    pub fn message(&self) -> String {
        match self {
            Self::Required { label, .. } => format!("{label} is required"),
            Self::InvalidEmail { .. } => "Please enter a valid email address".to_string(),
            Self::InvalidPhone { .. } => "Please enter a valid phone number".to_string(),
            Self::InvalidUrl { .. } => "Please enter a valid URL".to_string(),
            Self::InvalidDate { .. } => "Please enter a valid date (YYYY-MM-DD)".to_string(),
            Self::NotNumber { label, .. } => format!("{label} must be a number"),
            Self::NotBoolean { label, .. } => format!("{label} must be true or false"),
            Self::NotText { label, .. } => format!("{label} must be text"),
            Self::InvalidOption { label, .. } => format!("Please select a valid option for {label}"),
            Self::PatternMismatch { label, .. } => format!("{label} has an invalid format"),
            Self::BelowMinimum { label, min, .. } => format!("{label} must be at least {min}"),
            Self::AboveMaximum { label, max, .. } => format!("{label} must be at most {max}"),
            Self::TooShort {
                label, min_length, ..
            } => format!("{label} must be at least {min_length} characters"),
            Self::TooLong {
                label, max_length, ..
            } => format!("{label} must be at most {max_length} characters"),
        }
    }
}
