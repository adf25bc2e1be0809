use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use report_map::MappingMetadata;
use report_model::{ReportData, ValidationResult};
use report_validate::Violation;

use report_cli::types::{GenerateResult, MapResult, MappingSource, ValidateResult};

pub fn print_mapping(result: &MapResult) {
    println!("Template: {}", result.template_id);
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Label"),
        header_cell("Column"),
    ]);
    apply_summary_table_style(&mut table);
    for field in &result.fields {
        let column = match result.mapping.get(&field.name) {
            Some(header) => Cell::new(header).fg(Color::Green),
            None => Cell::new("unmapped")
                .fg(Color::Yellow)
                .add_attribute(Attribute::Italic),
        };
        table.add_row(vec![Cell::new(&field.name), Cell::new(&field.label), column]);
    }
    println!("{table}");

    let summary = &result.summary;
    println!("Mapped {}/{} fields", summary.mapped, summary.total_fields);
    if !summary.unused_headers.is_empty() {
        println!("Unused columns: {}", summary.unused_headers.join(", "));
    }
    if let Some(path) = &result.saved_to {
        println!("Saved mapping: {}", path.display());
    }
}

pub fn print_generate(result: &GenerateResult) {
    let source = match result.source {
        MappingSource::Saved => "saved",
        MappingSource::Auto => "auto",
    };
    eprintln!(
        "Template {} ({} mapping, {} records, format {})",
        result.request.template_id,
        source,
        result.request.data.len(),
        result.request.format
    );
    if let Some(preview) = &result.preview {
        print_preview(preview);
    }
    if let Some(path) = &result.output {
        eprintln!("Request written to {}", path.display());
    }
}

fn print_preview(preview: &ReportData) {
    let Some(first) = preview.records.first() else {
        eprintln!("Preview: no records");
        return;
    };
    let columns: Vec<&String> = first.keys().collect();
    let mut table = Table::new();
    table.set_header(columns.iter().map(|c| header_cell(c)).collect::<Vec<_>>());
    apply_table_style(&mut table);
    for record in &preview.records {
        table.add_row(
            columns
                .iter()
                .map(|c| Cell::new(record.get(*c).map_or("", String::as_str)))
                .collect::<Vec<_>>(),
        );
    }
    eprintln!("Preview:");
    eprintln!("{table}");
}

pub fn print_validation(result: &ValidateResult) {
    println!("Form: {}", result.form_id);
    if result.result.is_valid {
        println!("Submission is valid");
        return;
    }
    print_error_table(&result.result, &result.violations);
}

fn print_error_table(result: &ValidationResult, violations: &[Violation]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Code"),
        header_cell("Message"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    for (path, message) in result.errors.iter().flat_map(|errors| errors.iter()) {
        // The first violation on a path is the one whose message was kept.
        let code = violations
            .iter()
            .find(|v| v.path() == path)
            .map_or("-", Violation::code);
        table.add_row(vec![
            Cell::new(path),
            Cell::new(code).fg(Color::Red),
            Cell::new(message),
        ]);
    }
    println!("{table}");
    println!("{} error(s)", result.error_count());
}

pub fn print_mapping_list(entries: &[MappingMetadata]) {
    if entries.is_empty() {
        println!("No saved mappings");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Template"),
        header_cell("Fields"),
        header_cell("Saved"),
        header_cell("File"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for entry in entries {
        table.add_row(vec![
            Cell::new(&entry.template_id),
            Cell::new(entry.mapping_count),
            entry
                .saved_at
                .as_deref()
                .map_or_else(|| dim_cell("-"), Cell::new),
            Cell::new(entry.file_path.display()),
        ]);
    }
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).add_attribute(Attribute::Dim)
}
