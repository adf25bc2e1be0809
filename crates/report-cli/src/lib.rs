//! CLI library components for the report builder.

pub mod commands;
pub mod logging;
pub mod types;
