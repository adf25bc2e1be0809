use thiserror::Error;

/// Errors raised while parsing model values.
#[derive(Debug, Error)]
pub enum ModelError {
    /// An output format name that is not pdf, docx or xlsx (or an alias).
    #[error("unknown output format '{0}' (expected pdf, docx or xlsx)")]
    UnknownOutputFormat(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
