//! File-based loading tests.

use std::io::Write;
use std::path::PathBuf;

use report_ingest::{
    IngestError, load_form, load_submission, load_template, read_spreadsheet,
    read_spreadsheet_with_limit,
};
use report_model::FieldType;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents).unwrap();
    path
}

#[test]
fn reads_csv_spreadsheet() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "sales.CSV", b"Region,Revenue\nNorth,100\n");
    let sheet = read_spreadsheet(&path).unwrap();
    assert_eq!(sheet.headers, vec!["Region", "Revenue"]);
    assert_eq!(sheet.rows, vec![vec!["North".to_string(), "100".to_string()]]);
}

#[test]
fn reads_json_spreadsheet() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "sheet.json",
        br#"{"headers": [" Region ", "Revenue"], "rows": [["North", "100"]]}"#,
    );
    let sheet = read_spreadsheet(&path).unwrap();
    assert_eq!(sheet.headers, vec!["Region", "Revenue"]);
    assert_eq!(sheet.row_count(), 1);
}

#[test]
fn json_spreadsheet_cells_may_be_numbers_or_null() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "typed.json",
        br#"{"headers": ["Revenue", "Region", "Active"], "rows": [[100, "North", true], [250.5, null, false]]}"#,
    );
    let sheet = read_spreadsheet(&path).unwrap();
    assert_eq!(sheet.rows[0], vec!["100", "North", "true"]);
    assert_eq!(sheet.rows[1], vec!["250.5", "", "false"]);
}

#[test]
fn json_spreadsheet_with_bom_is_read() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "bom.json",
        "\u{feff}{\"headers\": [\"Region\"], \"rows\": [[\"North\"]]}".as_bytes(),
    );
    let sheet = read_spreadsheet(&path).unwrap();
    assert_eq!(sheet.headers, vec!["Region"]);
    assert_eq!(sheet.cell(0, 0), "North");
}

#[test]
fn rejects_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "sheet.xlsx", b"PK");
    assert!(matches!(
        read_spreadsheet(&path),
        Err(IngestError::UnsupportedFormat { .. })
    ));
}

#[test]
fn rejects_utf16_csv() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "sheet.csv", &[0xFE, 0xFF, 0x00, b'A']);
    assert!(matches!(
        read_spreadsheet(&path),
        Err(IngestError::UnsupportedEncoding { .. })
    ));
}

#[test]
fn enforces_size_limit() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "sheet.csv", b"A,B\n1,2\n");
    assert!(matches!(
        read_spreadsheet_with_limit(&path, 4),
        Err(IngestError::FileTooLarge { .. })
    ));
}

#[test]
fn loads_template_form_and_submission() {
    let dir = TempDir::new().unwrap();
    let template = write(
        &dir,
        "template.json",
        br#"{"id": "tpl-1", "name": "Quarterly", "fields": [{"name": "revenue", "label": "Revenue"}]}"#,
    );
    let form = write(
        &dir,
        "form.json",
        br#"{"id": "f-1", "fields": [{"id": "email", "type": "email", "label": "Email", "required": true}]}"#,
    );
    let submission = write(
        &dir,
        "submission.json",
        br#"{"data": {"email": "a@b.com"}, "submitterEmail": "a@b.com"}"#,
    );

    let template = load_template(&template).unwrap();
    assert_eq!(template.id, "tpl-1");
    assert_eq!(template.fields[0].label, "Revenue");

    let form = load_form(&form).unwrap();
    assert_eq!(form.fields[0].field_type, FieldType::Email);

    let submission = load_submission(&submission).unwrap();
    assert_eq!(submission.submitter_email.as_deref(), Some("a@b.com"));
}

#[test]
fn reports_json_errors_with_path() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "form.json", b"{\"id\": ");
    let err = load_form(&path).unwrap_err();
    assert!(matches!(err, IngestError::JsonParse { .. }));
    assert!(err.to_string().contains("form.json"));
}

#[test]
fn missing_file_is_reported() {
    let err = load_template(std::path::Path::new("/no/such/template.json")).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}
