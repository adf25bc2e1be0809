//! Mapping state for the interactive import-map-preview workflow.
//!
//! [`FieldMapper`] owns the template fields, the imported headers and the
//! current [`Mapping`]. It recomputes the mapping whenever its inputs change
//! by content and applies per-field overrides on top. Every change is pushed
//! to the configured [`MappingListener`].

use report_model::{Mapping, MappingSummary, TemplateField};

use crate::engine::{recompute, summarize};
use crate::error::{MappingError, Result};

/// How manual overrides treat headers that are not in the imported data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MappingStrictness {
    /// Accept any header text.
    #[default]
    Permissive,
    /// Reject headers missing from the current header set.
    Strict,
}

/// Mapper configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct MapperConfig {
    pub strictness: MappingStrictness,
}

impl MapperConfig {
    #[must_use]
    pub fn strict() -> Self {
        Self {
            strictness: MappingStrictness::Strict,
        }
    }
}

/// Receives the full mapping after every change.
pub trait MappingListener {
    fn mapping_changed(&mut self, mapping: &Mapping);
}

impl<F> MappingListener for F
where
    F: FnMut(&Mapping),
{
    fn mapping_changed(&mut self, mapping: &Mapping) {
        self(mapping);
    }
}

/// Listener that ignores notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopListener;

impl MappingListener for NoopListener {
    fn mapping_changed(&mut self, _mapping: &Mapping) {}
}

/// Owner of the current mapping between template fields and data headers.
pub struct FieldMapper<L = NoopListener> {
    config: MapperConfig,
    fields: Vec<TemplateField>,
    headers: Vec<String>,
    mapping: Mapping,
    listener: L,
}

impl FieldMapper<NoopListener> {
    pub fn new(config: MapperConfig) -> Self {
        Self::with_listener(config, NoopListener)
    }
}

impl<L: MappingListener> FieldMapper<L> {
    /// Create an empty mapper that notifies `listener` on every change.
    pub fn with_listener(config: MapperConfig, listener: L) -> Self {
        Self {
            config,
            fields: Vec::new(),
            headers: Vec::new(),
            mapping: Mapping::new(),
            listener,
        }
    }

    /// Replace the template fields and data headers.
    ///
    /// When either differs by content from the current inputs the mapping is
    /// recomputed from scratch, discarding manual overrides. Returns whether
    /// a recompute happened.
    pub fn set_inputs(&mut self, fields: &[TemplateField], headers: &[String]) -> bool {
        if self.fields.as_slice() == fields && self.headers.as_slice() == headers {
            return false;
        }
        self.fields = fields.to_vec();
        self.headers = headers.to_vec();
        self.mapping = recompute(&self.fields, &self.headers);
        self.listener.mapping_changed(&self.mapping);
        true
    }

    /// Override the header for a single field.
    ///
    /// An empty `header` unmaps the field. Other fields are untouched.
    pub fn set_mapping(&mut self, field: &str, header: &str) -> Result<()> {
        if !self.fields.iter().any(|f| f.name == field) {
            return Err(MappingError::FieldNotFound(field.to_string()));
        }

        if header.is_empty() {
            self.mapping.remove(field);
            tracing::debug!(field, "cleared mapping");
        } else {
            if !self.headers.iter().any(|h| h == header) {
                if self.config.strictness == MappingStrictness::Strict {
                    return Err(MappingError::HeaderNotFound {
                        field: field.to_string(),
                        header: header.to_string(),
                    });
                }
                tracing::warn!(field, header, "mapping to a header missing from imported data");
            }
            self.mapping.insert(field, header);
            tracing::debug!(field, header, "manual mapping");
        }

        self.listener.mapping_changed(&self.mapping);
        Ok(())
    }

    pub fn mapping(&self) -> &Mapping {
        &self.mapping
    }

    pub fn fields(&self) -> &[TemplateField] {
        &self.fields
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn config(&self) -> MapperConfig {
        self.config
    }

    /// Mapped/unmapped counts for the current state.
    pub fn summary(&self) -> MappingSummary {
        summarize(&self.fields, &self.headers, &self.mapping)
    }

    /// Give up the mapper, keeping the final mapping.
    pub fn into_mapping(self) -> Mapping {
        self.mapping
    }
}
