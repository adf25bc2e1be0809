use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use tracing::{debug, info, info_span, trace};

use report_ingest::{load_form, load_submission, load_template, read_spreadsheet};
use report_map::{
    FieldMapper, MapperConfig, MappingListener, MappingMetadata, MappingRepository, StoredMapping,
    build_report_request, preview,
};
use report_model::{Mapping, Template};
use report_validate::{FormSession, SchemaOptions, build_schema_with, check};

use crate::logging::redact_value;
use crate::types::{
    FieldOverride, GenerateOptions, GenerateResult, MapOptions, MapResult, MappingSource,
    ValidateOptions, ValidateResult,
};

/// Parse a `field=header` override. `field=` unmaps the field.
pub fn parse_override(raw: &str) -> std::result::Result<FieldOverride, String> {
    let (field, header) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=HEADER, got `{raw}`"))?;
    let field = field.trim();
    if field.is_empty() {
        return Err(format!("missing field name in `{raw}`"));
    }
    Ok(FieldOverride {
        field: field.to_string(),
        header: header.trim().to_string(),
    })
}

pub fn run_map(options: &MapOptions) -> Result<MapResult> {
    let template = load_template(&options.template).context("load template")?;
    let map_span = info_span!("map", template = %template.id);
    let _map_guard = map_span.enter();
    let sheet = read_spreadsheet(&options.data).context("load spreadsheet")?;

    let config = MapperConfig {
        strictness: options.strictness,
    };
    let mut updates = 0usize;
    let mut mapper = FieldMapper::with_listener(config, |mapping: &Mapping| {
        updates += 1;
        debug!(mapped = mapping.len(), "mapping updated");
    });
    mapper.set_inputs(&template.fields, &sheet.headers);
    apply_overrides(&mut mapper, &options.overrides)?;

    let summary = mapper.summary();
    let mapping = mapper.into_mapping();
    info!(
        mapped = summary.mapped,
        total = summary.total_fields,
        "mapping complete"
    );

    let saved_to = match &options.save_dir {
        Some(dir) => {
            let repository = MappingRepository::new(dir)?;
            Some(repository.save(&template.id, &mapping)?)
        }
        None => None,
    };

    Ok(MapResult {
        template_id: template.id,
        fields: template.fields,
        mapping,
        summary,
        updates,
        saved_to,
    })
}

pub fn run_generate(options: &GenerateOptions) -> Result<GenerateResult> {
    let template = load_template(&options.template).context("load template")?;
    let generate_span = info_span!("generate", template = %template.id);
    let _generate_guard = generate_span.enter();
    let sheet = read_spreadsheet(&options.data).context("load spreadsheet")?;

    let mut mapper = FieldMapper::new(MapperConfig::default());
    mapper.set_inputs(&template.fields, &sheet.headers);

    let saved = match &options.mappings_dir {
        Some(dir) if dir.is_dir() => MappingRepository::new(dir)?.load(&template.id)?,
        _ => None,
    };
    let source = match saved {
        Some(saved) => {
            apply_saved(&mut mapper, &template, &saved)?;
            MappingSource::Saved
        }
        None => MappingSource::Auto,
    };
    apply_overrides(&mut mapper, &options.overrides)?;

    if let Some(first) = sheet.rows.first() {
        for (header, cell) in sheet.headers.iter().zip(first) {
            trace!(header = %header, value = redact_value(cell), "first row");
        }
    }

    let request = build_report_request(&template, mapper.mapping(), &sheet, options.format);
    let preview = options
        .preview
        .map(|limit| preview(&template.fields, mapper.mapping(), &sheet, limit));

    if let Some(path) = &options.output {
        let json = serde_json::to_string_pretty(&request).context("serialize report request")?;
        fs::write(path, json)
            .with_context(|| format!("write report request to {}", path.display()))?;
        info!(path = %path.display(), "wrote report request");
    }

    Ok(GenerateResult {
        request,
        source,
        output: options.output.clone(),
        preview,
    })
}

pub fn run_validate(options: &ValidateOptions) -> Result<ValidateResult> {
    let form = load_form(&options.form).context("load form")?;
    let validate_span = info_span!("validate", form = %form.id);
    let _validate_guard = validate_span.enter();
    let submission = load_submission(&options.submission).context("load submission")?;
    for (id, value) in &submission.data {
        trace!(field = %id, value = redact_value(&value.to_string()), "submission value");
    }

    let schema_options = SchemaOptions {
        submitter_email: options.submitter_email,
    };
    let schema = build_schema_with(&form.fields, schema_options)
        .with_context(|| format!("invalid form definition {}", form.id))?;

    let violations = check(&schema, &submission);
    let mut session = FormSession::new(schema);
    let result = session.submit(&submission).clone();
    info!(
        valid = result.is_valid,
        errors = result.error_count(),
        "validation complete"
    );

    Ok(ValidateResult {
        form_id: form.id,
        state: session.state(),
        result,
        violations,
    })
}

pub fn list_mappings(dir: &Path) -> Result<Vec<MappingMetadata>> {
    MappingRepository::new(dir)?.list()
}

pub fn show_mapping(dir: &Path, template_id: &str) -> Result<StoredMapping> {
    MappingRepository::new(dir)?
        .load_stored(template_id)?
        .ok_or_else(|| anyhow!("no saved mapping for template {template_id}"))
}

pub fn delete_mapping(dir: &Path, template_id: &str) -> Result<bool> {
    let removed = MappingRepository::new(dir)?.delete(template_id)?;
    info!(template = template_id, removed, "delete mapping");
    Ok(removed)
}

fn apply_overrides<L: MappingListener>(
    mapper: &mut FieldMapper<L>,
    overrides: &[FieldOverride],
) -> Result<()> {
    for item in overrides {
        mapper
            .set_mapping(&item.field, &item.header)
            .with_context(|| format!("apply override {}={}", item.field, item.header))?;
    }
    Ok(())
}

/// Replay a saved mapping over the auto-mapped state, field by field.
fn apply_saved<L: MappingListener>(
    mapper: &mut FieldMapper<L>,
    template: &Template,
    saved: &Mapping,
) -> Result<()> {
    for (field, _) in saved.iter() {
        if template.field(field).is_none() {
            debug!(field, "saved mapping names a field the template no longer has");
        }
    }
    for field in &template.fields {
        let header = saved.get(&field.name).unwrap_or("");
        mapper
            .set_mapping(&field.name, header)
            .with_context(|| format!("apply saved mapping for {}", field.name))?;
    }
    Ok(())
}
