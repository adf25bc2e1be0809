//! Automatic mapping of template fields to spreadsheet headers.

use report_model::{Mapping, MappingSummary, TemplateField};

/// Derive a mapping from template fields to data headers.
///
/// A field maps to the first header (in header order) that equals either the
/// field's name or its label, ignoring case. Fields without a match are left
/// out of the result.
pub fn recompute(fields: &[TemplateField], headers: &[String]) -> Mapping {
    let lowered: Vec<String> = headers.iter().map(|h| h.to_lowercase()).collect();
    let mut mapping = Mapping::new();

    for field in fields {
        match find_in_lowered(field, headers, &lowered) {
            Some(header) => {
                tracing::debug!(field = %field.name, header = %header, "auto-mapped field");
                mapping.insert(field.name.clone(), header.to_string());
            }
            None => {
                tracing::debug!(field = %field.name, "no matching header");
            }
        }
    }

    tracing::info!(
        fields = fields.len(),
        headers = headers.len(),
        mapped = mapping.len(),
        "recomputed field mapping"
    );
    mapping
}

/// First header matching `field` by name or label, ignoring case.
pub fn find_header<'a>(field: &TemplateField, headers: &'a [String]) -> Option<&'a str> {
    let lowered: Vec<String> = headers.iter().map(|h| h.to_lowercase()).collect();
    find_in_lowered(field, headers, &lowered)
}

fn find_in_lowered<'a>(
    field: &TemplateField,
    headers: &'a [String],
    lowered: &[String],
) -> Option<&'a str> {
    let name = field.name.to_lowercase();
    let label = field.label.to_lowercase();
    lowered
        .iter()
        .position(|h| *h == name || *h == label)
        .map(|idx| headers[idx].as_str())
}

/// Count mapped and unmapped fields and list headers nothing points at.
pub fn summarize(fields: &[TemplateField], headers: &[String], mapping: &Mapping) -> MappingSummary {
    let unmapped_fields: Vec<String> = fields
        .iter()
        .filter(|f| !mapping.contains_field(&f.name))
        .map(|f| f.name.clone())
        .collect();
    let unused_headers: Vec<String> = headers
        .iter()
        .filter(|h| !mapping.uses_header(h))
        .cloned()
        .collect();

    MappingSummary {
        total_fields: fields.len(),
        mapped: fields.len() - unmapped_fields.len(),
        unmapped_fields,
        unused_headers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn maps_by_label_ignoring_case() {
        let fields = vec![TemplateField::new("revenue", "Revenue")];
        let mapping = recompute(&fields, &headers(&["Revenue", "Expenses"]));
        assert_eq!(mapping.get("revenue"), Some("Revenue"));
        assert_eq!(mapping.len(), 1);
    }

    #[test]
    fn unmatched_field_is_omitted() {
        let fields = vec![TemplateField::new("notes", "Notes")];
        let mapping = recompute(&fields, &headers(&["Comments"]));
        assert!(mapping.is_empty());
    }

    #[test]
    fn first_matching_header_wins() {
        let fields = vec![TemplateField::new("region", "Sales Region")];
        let mapping = recompute(&fields, &headers(&["SALES REGION", "region", "Region"]));
        assert_eq!(mapping.get("region"), Some("SALES REGION"));
    }

    #[test]
    fn duplicate_headers_map_to_first_position() {
        let fields = vec![
            TemplateField::new("total", "Total"),
            TemplateField::new("sum", "Total"),
        ];
        let mapping = recompute(&fields, &headers(&["total", "Total"]));
        assert_eq!(mapping.get("total"), Some("total"));
        assert_eq!(mapping.get("sum"), Some("total"));
    }

    #[test]
    fn no_partial_or_fuzzy_matches() {
        let fields = vec![TemplateField::new("date", "Date")];
        let mapping = recompute(&fields, &headers(&["Invoice Date", "date "]));
        assert!(mapping.is_empty());
    }

    #[test]
    fn summary_lists_unmapped_fields_and_unused_headers() {
        let fields = vec![
            TemplateField::new("revenue", "Revenue"),
            TemplateField::new("notes", "Notes"),
        ];
        let hdrs = headers(&["Revenue", "Expenses"]);
        let mapping = recompute(&fields, &hdrs);
        let summary = summarize(&fields, &hdrs, &mapping);
        assert_eq!(summary.total_fields, 2);
        assert_eq!(summary.mapped, 1);
        assert_eq!(summary.unmapped_fields, vec!["notes".to_string()]);
        assert_eq!(summary.unused_headers, vec!["Expenses".to_string()]);
        assert!(!summary.is_complete());
    }
}
