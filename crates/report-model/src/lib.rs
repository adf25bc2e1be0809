//! Shared data model for the report builder.
//!
//! Types here are plain values: template placeholders, spreadsheet parse
//! results, the field mapping, dynamic form descriptors, submissions and
//! validation results. They serialize with the camelCase keys used by the
//! remote report API.

pub mod error;
pub mod form;
pub mod mapping;
pub mod report;
pub mod spreadsheet;
pub mod submission;
pub mod template;
pub mod validation;

pub use error::{ModelError, Result};
pub use form::{FieldOption, FieldType, FieldValidation, FormDefinition, FormFieldDescriptor};
pub use mapping::{Mapping, MappingSummary};
pub use report::{OutputFormat, ReportData, ReportRecord, ReportRequest};
pub use spreadsheet::{SpreadsheetData, cell_text};
pub use submission::Submission;
pub use template::{Template, TemplateField};
pub use validation::{ValidationErrors, ValidationResult};
