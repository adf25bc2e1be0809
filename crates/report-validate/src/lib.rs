#![deny(unsafe_code)]

//! Dynamic submission validation.
//!
//! A form definition is a data-driven list of field descriptors. This crate
//! turns that list into a [`SubmissionSchema`] (one [`FieldRule`] per field id)
//! and validates submissions against it, collecting every violated field into
//! a path → message map.
//!
//! # Example
//!
//! ```ignore
//! use report_validate::{build_schema, validate};
//!
//! let schema = build_schema(&form.fields)?;
//! let result = validate(&schema, &submission);
//! if !result.is_valid {
//!     for (path, message) in result.errors.iter().flat_map(|e| e.iter()) {
//!         println!("{path}: {message}");
//!     }
//! }
//! ```

mod error;
mod issue;
mod patterns;
mod schema;
mod session;
mod validator;

pub use error::{Result, SchemaError};
pub use issue::Violation;
pub use patterns::{DATE_REGEX, EMAIL_REGEX, TEL_REGEX, URL_REGEX};
pub use schema::{
    FieldKind, FieldRule, SchemaOptions, SubmissionSchema, SubmitterEmail, build_schema,
    build_schema_with,
};
pub use session::{FormSession, FormState};
pub use validator::{SUBMITTER_EMAIL_PATH, check, field_path, validate};
