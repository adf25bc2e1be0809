//! Spreadsheet loading: CSV files or a JSON parse result.

use std::collections::BTreeSet;
use std::fs;
use std::io::Read;
use std::path::Path;

use report_model::SpreadsheetData;

use crate::error::{IngestError, Result};
use crate::file::{MAX_FILE_SIZE, check_file_size_with_limit, io_error, validate_encoding};
use crate::loader::parse_json;

/// Columns above which a warning is logged.
const WIDE_SHEET_COLUMNS: usize = 500;

/// Read a spreadsheet, choosing the parser by file extension.
pub fn read_spreadsheet(path: &Path) -> Result<SpreadsheetData> {
    read_spreadsheet_with_limit(path, MAX_FILE_SIZE)
}

/// Read a spreadsheet with a custom size limit.
pub fn read_spreadsheet_with_limit(path: &Path, max_size: u64) -> Result<SpreadsheetData> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);

    check_file_size_with_limit(path, max_size)?;
    validate_encoding(path)?;

    let sheet = match extension.as_deref() {
        Some("csv") => {
            let file = fs::File::open(path).map_err(|e| io_error(path, e))?;
            parse_csv(file, path)?
        }
        Some("json") => read_json_sheet(path)?,
        _ => {
            return Err(IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
            });
        }
    };

    tracing::info!(
        path = %path.display(),
        columns = sheet.headers.len(),
        rows = sheet.rows.len(),
        "loaded spreadsheet"
    );
    Ok(sheet)
}

/// Parse CSV content; the first record is the header row.
///
/// Headers are trimmed and a leading UTF-8 BOM is dropped. Rows may be
/// shorter or longer than the header row. Rows with only empty cells are
/// skipped.
pub fn parse_csv<R: Read>(reader: R, path: &Path) -> Result<SpreadsheetData> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut records = csv_reader.records();
    let header_record = match records.next() {
        Some(record) => record.map_err(|e| csv_error(path, &e))?,
        None => {
            return Err(IngestError::EmptySpreadsheet {
                path: path.to_path_buf(),
            });
        }
    };

    let headers: Vec<String> = header_record
        .iter()
        .enumerate()
        .map(|(idx, value)| {
            let value = if idx == 0 {
                value.trim_start_matches('\u{feff}')
            } else {
                value
            };
            normalize_header(value)
        })
        .collect();
    check_headers(&headers, path)?;

    let mut rows = Vec::new();
    for record in records {
        let record = record.map_err(|e| csv_error(path, &e))?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(SpreadsheetData::new(headers, rows))
}

fn read_json_sheet(path: &Path) -> Result<SpreadsheetData> {
    let mut sheet: SpreadsheetData = parse_json(path)?;
    sheet.headers = sheet.headers.iter().map(|h| normalize_header(h)).collect();
    check_headers(&sheet.headers, path)?;
    Ok(sheet)
}

/// Normalizes a header value by trimming whitespace.
pub(crate) fn normalize_header(value: &str) -> String {
    value.trim().to_string()
}

fn check_headers(headers: &[String], path: &Path) -> Result<()> {
    if headers.is_empty() || headers.iter().all(String::is_empty) {
        return Err(IngestError::NoHeaderDetected {
            path: path.to_path_buf(),
        });
    }

    if headers.len() > WIDE_SHEET_COLUMNS {
        tracing::warn!(
            path = %path.display(),
            columns = headers.len(),
            "Spreadsheet has more than 500 columns"
        );
    }

    let mut seen = BTreeSet::new();
    for header in headers {
        if !header.is_empty() && !seen.insert(header.as_str()) {
            tracing::warn!(path = %path.display(), header = %header, "duplicate column header");
        }
    }

    Ok(())
}

fn csv_error(path: &Path, error: &csv::Error) -> IngestError {
    IngestError::CsvParse {
        path: path.to_path_buf(),
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<SpreadsheetData> {
        parse_csv(content.as_bytes(), Path::new("test.csv"))
    }

    #[test]
    fn test_parse_csv_simple() {
        let sheet = parse("Revenue,Expenses\n100,50\n200,75\n").unwrap();
        assert_eq!(sheet.headers, vec!["Revenue", "Expenses"]);
        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(sheet.rows[1], vec!["200", "75"]);
    }

    #[test]
    fn test_parse_csv_quoted_and_trimmed_headers() {
        let sheet = parse("\"Client, Name\",  Total  \n\"Acme, Inc\",10\n").unwrap();
        assert_eq!(sheet.headers, vec!["Client, Name", "Total"]);
        assert_eq!(sheet.rows[0][0], "Acme, Inc");
    }

    #[test]
    fn test_parse_csv_with_bom() {
        let sheet = parse("\u{feff}A,B\n1,2\n").unwrap();
        assert_eq!(sheet.headers, vec!["A", "B"]);
    }

    #[test]
    fn test_parse_csv_ragged_rows_and_blank_lines() {
        let sheet = parse("A,B,C\n1\n,,\n4,5,6,7\n").unwrap();
        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(sheet.rows[0], vec!["1"]);
        assert_eq!(sheet.rows[1].len(), 4);
    }

    #[test]
    fn test_parse_csv_keeps_duplicate_headers() {
        let sheet = parse("Total,Total\n1,2\n").unwrap();
        assert_eq!(sheet.headers, vec!["Total", "Total"]);
    }

    #[test]
    fn test_parse_csv_empty() {
        assert!(matches!(parse(""), Err(IngestError::EmptySpreadsheet { .. })));
    }

    #[test]
    fn test_parse_csv_blank_header_row() {
        assert!(matches!(
            parse(" , \n1,2\n"),
            Err(IngestError::NoHeaderDetected { .. })
        ));
    }
}
