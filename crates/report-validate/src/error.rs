//! Errors raised while building a schema from field descriptors.

use thiserror::Error;

/// A field descriptor that cannot be turned into a consistent rule.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("field #{index} has an empty id")]
    EmptyFieldId { index: usize },

    #[error("duplicate field id '{0}'")]
    DuplicateFieldId(String),

    #[error("field '{field}': min {min} is greater than max {max}")]
    InvalidRange { field: String, min: f64, max: f64 },

    #[error("field '{field}': minLength {min_length} is greater than maxLength {max_length}")]
    InvalidLengthRange {
        field: String,
        min_length: usize,
        max_length: usize,
    },

    #[error("field '{field}': invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        field: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("field '{field}': option list is empty")]
    EmptyOptions { field: String },
}

pub type Result<T> = std::result::Result<T, SchemaError>;
