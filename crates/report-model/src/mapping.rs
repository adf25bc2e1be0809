//! Template field to spreadsheet header mapping.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Association from template field name to spreadsheet column header.
///
/// A field absent from the map is unmapped. Each mapped field points at
/// exactly one header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mapping {
    entries: BTreeMap<String, String>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Header mapped to `field`, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries.get(field).map(String::as_str)
    }

    /// Set the header for `field`, returning the previous one.
    pub fn insert(&mut self, field: impl Into<String>, header: impl Into<String>) -> Option<String> {
        self.entries.insert(field.into(), header.into())
    }

    /// Unmap `field`, returning the header it pointed at.
    pub fn remove(&mut self, field: &str) -> Option<String> {
        self.entries.remove(field)
    }

    pub fn contains_field(&self, field: &str) -> bool {
        self.entries.contains_key(field)
    }

    /// True if any field is mapped to `header`.
    pub fn uses_header(&self, header: &str) -> bool {
        self.entries.values().any(|h| h == header)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(field, header)| (field.as_str(), header.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, String)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl From<BTreeMap<String, String>> for Mapping {
    fn from(entries: BTreeMap<String, String>) -> Self {
        Self { entries }
    }
}

/// Summary of mapping counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingSummary {
    /// Number of template fields.
    pub total_fields: usize,
    /// Fields with a header assigned.
    pub mapped: usize,
    /// Template fields left without a header, in template order.
    pub unmapped_fields: Vec<String>,
    /// Headers not referenced by any mapping, in header order.
    pub unused_headers: Vec<String>,
}

impl MappingSummary {
    pub fn is_complete(&self) -> bool {
        self.unmapped_fields.is_empty()
    }
}
