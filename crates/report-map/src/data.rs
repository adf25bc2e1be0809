//! Projection of spreadsheet rows through a mapping.

use report_model::{
    Mapping, OutputFormat, ReportData, ReportRecord, ReportRequest, SpreadsheetData, Template,
    TemplateField,
};

/// Build one record per spreadsheet row holding each mapped field's cell.
///
/// A mapped header resolves to the first column with exactly that header.
/// Headers missing from the sheet produce empty text; unmapped fields are
/// left out of every record.
pub fn build_report_data(
    fields: &[TemplateField],
    mapping: &Mapping,
    sheet: &SpreadsheetData,
) -> ReportData {
    let columns: Vec<(&str, Option<usize>)> = fields
        .iter()
        .filter_map(|field| {
            let header = mapping.get(&field.name)?;
            let column = sheet.column_index(header);
            if column.is_none() {
                tracing::warn!(field = %field.name, header, "mapped header not found in data");
            }
            Some((field.name.as_str(), column))
        })
        .collect();

    let records = (0..sheet.row_count())
        .map(|row| {
            columns
                .iter()
                .map(|(name, column)| {
                    let value = column.map_or("", |idx| sheet.cell(row, idx));
                    ((*name).to_string(), value.to_string())
                })
                .collect::<ReportRecord>()
        })
        .collect();

    ReportData { records }
}

/// The first `limit` records, as shown on the preview step.
pub fn preview(
    fields: &[TemplateField],
    mapping: &Mapping,
    sheet: &SpreadsheetData,
    limit: usize,
) -> ReportData {
    let mut data = build_report_data(fields, mapping, sheet);
    data.records.truncate(limit);
    data
}

/// Assemble the body of a report-generation request for `template`.
pub fn build_report_request(
    template: &Template,
    mapping: &Mapping,
    sheet: &SpreadsheetData,
    format: OutputFormat,
) -> ReportRequest {
    let data = build_report_data(&template.fields, mapping, sheet);
    tracing::info!(
        template = %template.id,
        format = %format,
        records = data.len(),
        "built report request"
    );
    let request = ReportRequest::new(template.id.clone(), format, mapping.clone(), data);
    match &template.name {
        Some(name) => request.with_name(name.clone()),
        None => request,
    }
}
