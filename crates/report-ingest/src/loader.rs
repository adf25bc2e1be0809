//! JSON document loaders for templates, forms and submissions.

use std::fs;
use std::path::Path;

use report_model::{FormDefinition, Submission, Template};
use serde::de::DeserializeOwned;

use crate::error::{IngestError, Result};
use crate::file::{check_file_size, io_error};

/// Read and deserialize a JSON document.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    check_file_size(path)?;
    parse_json(path)
}

/// Deserialize a JSON file whose size was already checked. A leading BOM is skipped.
pub(crate) fn parse_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    let contents = contents.strip_prefix('\u{feff}').unwrap_or(&contents);
    serde_json::from_str(contents).map_err(|source| IngestError::JsonParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load template metadata (`{id, name?, fields: [{name, label}]}`).
pub fn load_template(path: &Path) -> Result<Template> {
    let template: Template = load_json(path)?;
    tracing::debug!(template = %template.id, fields = template.fields.len(), "loaded template");
    Ok(template)
}

/// Load a form definition (`{id, title?, fields: [...]}`).
pub fn load_form(path: &Path) -> Result<FormDefinition> {
    let form: FormDefinition = load_json(path)?;
    tracing::debug!(form = %form.id, fields = form.fields.len(), "loaded form");
    Ok(form)
}

/// Load a submission payload (`{data, submitterEmail?}`).
pub fn load_submission(path: &Path) -> Result<Submission> {
    let submission: Submission = load_json(path)?;
    tracing::debug!(values = submission.data.len(), "loaded submission");
    Ok(submission)
}
