//! Input loading for the report builder.
//!
//! # Features
//!
//! - **Spreadsheets**: CSV files (first row is the header row) or a JSON
//!   `{headers, rows}` parse result
//! - **Templates**: template metadata with its placeholder fields
//! - **Forms**: form definitions with their field descriptors
//! - **Submissions**: `{data, submitterEmail?}` payloads
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use report_ingest::{load_template, read_spreadsheet};
//!
//! let template = load_template(Path::new("template.json"))?;
//! let sheet = read_spreadsheet(Path::new("sales.csv"))?;
//! ```

mod error;
mod file;
mod loader;
mod spreadsheet;

// === Error Types ===
pub use error::{IngestError, Result};

// === File Checks ===
pub use file::{MAX_FILE_SIZE, check_file_size, check_file_size_with_limit, validate_encoding};

// === Spreadsheets ===
pub use spreadsheet::{parse_csv, read_spreadsheet, read_spreadsheet_with_limit};

// === JSON Documents ===
pub use loader::{load_form, load_json, load_submission, load_template};
