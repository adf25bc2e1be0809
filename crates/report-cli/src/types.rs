use std::path::PathBuf;

use report_map::MappingStrictness;
use report_model::{
    Mapping, MappingSummary, OutputFormat, ReportData, ReportRequest, TemplateField,
    ValidationResult,
};
use report_validate::{FormState, SubmitterEmail, Violation};

/// A manual `field=header` correction from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldOverride {
    /// Template field name.
    pub field: String,
    /// Empty means "unmapped".
    pub header: String,
}

/// Inputs for the `map` command.
#[derive(Debug, Clone)]
pub struct MapOptions {
    /// Template metadata file.
    pub template: PathBuf,
    /// Spreadsheet to map (CSV or JSON parse result).
    pub data: PathBuf,
    /// Corrections applied after auto-mapping, in order.
    pub overrides: Vec<FieldOverride>,
    /// How an override naming an unknown header is handled.
    pub strictness: MappingStrictness,
    /// Mapping directory to save the result into, if any.
    pub save_dir: Option<PathBuf>,
}

/// Outcome of the `map` command.
#[derive(Debug)]
pub struct MapResult {
    pub template_id: String,
    /// Template fields in declaration order.
    pub fields: Vec<TemplateField>,
    /// Final field to header mapping.
    pub mapping: Mapping,
    pub summary: MappingSummary,
    /// Number of listener notifications seen while mapping.
    pub updates: usize,
    /// File the mapping was written to when saving was requested.
    pub saved_to: Option<PathBuf>,
}

/// Inputs for the `generate` command.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Template metadata file.
    pub template: PathBuf,
    /// Spreadsheet providing the report rows.
    pub data: PathBuf,
    /// Mapping directory searched for a saved mapping. Missing means auto-map.
    pub mappings_dir: Option<PathBuf>,
    /// Corrections applied on top of the saved or automatic mapping.
    pub overrides: Vec<FieldOverride>,
    pub format: OutputFormat,
    /// Where to write the report request JSON. `None` prints it instead.
    pub output: Option<PathBuf>,
    /// Number of mapped rows to preview.
    pub preview: Option<usize>,
}

/// Where the mapping used for a report came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingSource {
    /// Loaded from the mapping directory.
    Saved,
    /// Built by the auto-mapper.
    Auto,
}

/// Outcome of the `generate` command.
#[derive(Debug)]
pub struct GenerateResult {
    /// Request payload for the report service.
    pub request: ReportRequest,
    pub source: MappingSource,
    /// File the request was written to.
    pub output: Option<PathBuf>,
    /// First rows as the report would see them, when a preview was asked for.
    pub preview: Option<ReportData>,
}

/// Inputs for the `validate` command.
#[derive(Debug, Clone)]
pub struct ValidateOptions {
    /// Form definition file.
    pub form: PathBuf,
    /// Submission payload to check.
    pub submission: PathBuf,
    /// Whether the submission must carry a submitter email.
    pub submitter_email: SubmitterEmail,
}

/// Outcome of the `validate` command.
#[derive(Debug)]
pub struct ValidateResult {
    pub form_id: String,
    /// Form state after the submission was loaded and validated.
    pub state: FormState,
    /// Per-path messages as the form service would return them.
    pub result: ValidationResult,
    /// Every violation found. A text field may appear twice (length, then pattern);
    /// `result` keeps only the first message per path.
    pub violations: Vec<Violation>,
}
