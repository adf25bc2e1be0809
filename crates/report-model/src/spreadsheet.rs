use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Result of parsing an imported spreadsheet: the header row plus data rows.
///
/// Headers keep their position; duplicates are not collapsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpreadsheetData {
    /// Column names from the first row.
    pub headers: Vec<String>,
    /// Data rows as cell text. Typed JSON cells are converted with [`cell_text`].
    #[serde(default, deserialize_with = "deserialize_rows")]
    pub rows: Vec<Vec<String>>,
}

/// Text of a parsed cell: `null` is empty, strings are kept as-is, anything
/// else uses its JSON text (`100`, `250.5`, `true`).
pub fn cell_text(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text,
        other => other.to_string(),
    }
}

fn deserialize_rows<'de, D>(deserializer: D) -> Result<Vec<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let rows = Vec::<Vec<Value>>::deserialize(deserializer)?;
    Ok(rows
        .into_iter()
        .map(|row| row.into_iter().map(cell_text).collect())
        .collect())
}

impl SpreadsheetData {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Position of the first column whose header equals `header` exactly.
    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    /// Cell text at `(row, column)`; short rows read as empty.
    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn has_header(&self, header: &str) -> bool {
        self.headers.iter().any(|h| h == header)
    }
}
