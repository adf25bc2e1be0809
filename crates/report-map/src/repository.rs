//! Mapping repository for persisting and reusing field mappings.
//!
//! Mappings are stored as JSON files named `{template_id}.json`, one per
//! template, so a set of manual corrections can be reapplied the next time
//! the same template is used with similar data.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use report_model::Mapping;

/// Repository for storing and retrieving mappings.
#[derive(Debug, Clone)]
pub struct MappingRepository {
    /// Directory holding one JSON file per template.
    base_dir: PathBuf,
}

/// Metadata about a stored mapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingMetadata {
    /// Template id recorded inside the file.
    pub template_id: String,
    /// File path where the mapping is stored.
    pub file_path: PathBuf,
    /// Number of mapped fields.
    pub mapping_count: usize,
    /// RFC 3339 timestamp of the save, if recorded.
    pub saved_at: Option<String>,
}

/// A mapping with repository metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredMapping {
    /// Template the mapping belongs to.
    pub template_id: String,
    /// Field name to column header.
    pub mapping: Mapping,
    /// RFC 3339 timestamp of the save.
    pub saved_at: Option<String>,
    /// Optional notes about this mapping.
    pub description: Option<String>,
    /// Version of the stored format.
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl StoredMapping {
    pub fn new(template_id: impl Into<String>, mapping: Mapping) -> Self {
        Self {
            template_id: template_id.into(),
            mapping,
            saved_at: Some(chrono::Utc::now().to_rfc3339()),
            description: None,
            version: default_version(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl MappingRepository {
    /// Open a repository at `base_dir`, creating the directory if needed.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir).with_context(|| {
            format!(
                "Failed to create mapping repository: {}",
                base_dir.display()
            )
        })?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Save the mapping for a template, replacing any previous one.
    pub fn save(&self, template_id: &str, mapping: &Mapping) -> Result<PathBuf> {
        self.save_stored(&StoredMapping::new(template_id, mapping.clone()))
    }

    /// Save a stored mapping.
    ///
    /// Distinct ids can normalize to the same file name; a file already
    /// holding another template's mapping is never overwritten.
    pub fn save_stored(&self, stored: &StoredMapping) -> Result<PathBuf> {
        let path = self.path_for(&stored.template_id);
        if path.exists() {
            match read_stored(&path) {
                Ok(existing) if existing.template_id != stored.template_id => {
                    bail!(
                        "{} already holds the mapping for template '{}', not '{}'",
                        path.display(),
                        existing.template_id,
                        stored.template_id
                    );
                }
                Ok(_) => {}
                Err(error) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %format!("{error:#}"),
                        "replacing unreadable mapping"
                    );
                }
            }
        }
        let json = serde_json::to_string_pretty(stored)
            .with_context(|| format!("Failed to serialize mapping for {}", stored.template_id))?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write mapping to {}", path.display()))?;
        tracing::info!(template = %stored.template_id, path = %path.display(), "saved mapping");
        Ok(path)
    }

    /// Load the mapping for a template; `None` if nothing was saved.
    pub fn load(&self, template_id: &str) -> Result<Option<Mapping>> {
        Ok(self.load_stored(template_id)?.map(|s| s.mapping))
    }

    /// Load the stored mapping for a template.
    ///
    /// A file whose recorded id differs from `template_id` (a file-name
    /// collision) counts as "nothing saved".
    pub fn load_stored(&self, template_id: &str) -> Result<Option<StoredMapping>> {
        let path = self.path_for(template_id);
        if !path.exists() {
            return Ok(None);
        }
        let stored = read_stored(&path)?;
        if stored.template_id != template_id {
            tracing::warn!(
                path = %path.display(),
                requested = template_id,
                stored = %stored.template_id,
                "mapping file belongs to another template"
            );
            return Ok(None);
        }
        Ok(Some(stored))
    }

    /// List stored mappings sorted by template id. Unreadable files are skipped.
    pub fn list(&self) -> Result<Vec<MappingMetadata>> {
        let mut metadata = Vec::new();

        for entry in fs::read_dir(&self.base_dir)
            .with_context(|| format!("Failed to read repository: {}", self.base_dir.display()))?
        {
            let path = entry?.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match read_stored(&path) {
                Ok(stored) => metadata.push(MappingMetadata {
                    template_id: stored.template_id,
                    mapping_count: stored.mapping.len(),
                    saved_at: stored.saved_at,
                    file_path: path,
                }),
                Err(error) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %format!("{error:#}"),
                        "skipping unreadable mapping"
                    );
                }
            }
        }

        metadata.sort_by(|a, b| a.template_id.cmp(&b.template_id));
        Ok(metadata)
    }

    /// Delete the mapping for a template. Returns whether a file was removed.
    ///
    /// Files holding another template's mapping are left alone.
    pub fn delete(&self, template_id: &str) -> Result<bool> {
        if self.load_stored(template_id)?.is_none() {
            return Ok(false);
        }
        let path = self.path_for(template_id);
        fs::remove_file(&path)
            .with_context(|| format!("Failed to delete mapping: {}", path.display()))?;
        Ok(true)
    }

    /// True if a mapping saved under exactly `template_id` exists.
    pub fn exists(&self, template_id: &str) -> bool {
        matches!(self.load_stored(template_id), Ok(Some(_)))
    }

    fn path_for(&self, template_id: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", normalize_id(template_id)))
    }
}

fn read_stored(path: &Path) -> Result<StoredMapping> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read mapping from {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse mapping from {}", path.display()))
}

/// Normalize an ID for use in filenames.
fn normalize_id(id: &str) -> String {
    id.trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
