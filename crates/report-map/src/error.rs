//! Error types for mapping operations.

use thiserror::Error;

/// Errors from manual mapping overrides.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// Field is not one of the current template fields.
    #[error("template field not found: {0}")]
    FieldNotFound(String),
    /// Header is not present in the imported spreadsheet (strict mode only).
    #[error("column '{header}' not found in imported data (field '{field}')")]
    HeaderNotFound { field: String, header: String },
}

pub type Result<T> = std::result::Result<T, MappingError>;
