#![deny(unsafe_code)]

//! Field mapping between report template placeholders and spreadsheet columns.
//!
//! - [`recompute`] derives a best-effort mapping by case-insensitive name or
//!   label match.
//! - [`FieldMapper`] owns the current mapping, applies manual overrides and
//!   pushes every change to a [`MappingListener`].
//! - [`build_report_data`] projects spreadsheet rows through a mapping.
//! - [`MappingRepository`] persists mappings per template for reuse.

pub mod data;
pub mod engine;
pub mod error;
pub mod repository;
pub mod state;

pub use data::{build_report_data, build_report_request, preview};
pub use engine::{find_header, recompute, summarize};
pub use error::{MappingError, Result};
pub use repository::{MappingMetadata, MappingRepository, StoredMapping};
pub use state::{FieldMapper, MapperConfig, MappingListener, MappingStrictness, NoopListener};
