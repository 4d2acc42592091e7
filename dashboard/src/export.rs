//! CSV export of a loaded collection.
//!
//! The export covers every field of every record, independent of which
//! columns are visible. The header is the union of field names in the
//! order they are first seen, so sparse records still line up.

use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::record::{Record, display_value};

#[cfg(test)]
#[path = "export_test.rs"]
mod tests;

/// Why an export could not be produced or written.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The collection has not been fetched yet.
    #[error("nothing to export: the collection is not loaded")]
    NotLoaded,
    #[error("csv encoding failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("csv output is not UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
    #[error("i/o: {0}")]
    Io(#[from] io::Error),
}

/// A rendered export, ready to be written or downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub filename: String,
    pub content: String,
}

impl CsvExport {
    /// Render `records` under `filename`. A `.csv` extension is appended
    /// when the caller did not supply one.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError`] if the CSV writer fails.
    pub fn new(filename: &str, records: &[Record]) -> Result<Self, ExportError> {
        let filename = if filename.to_ascii_lowercase().ends_with(".csv") {
            filename.to_owned()
        } else {
            format!("{filename}.csv")
        };
        Ok(Self { filename, content: to_csv(records)? })
    }

    /// Write the export into `dir`, returning the full path.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from creating or writing the file.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        let path = dir.join(&self.filename);
        std::fs::write(&path, &self.content)?;
        tracing::info!(path = %path.display(), bytes = self.content.len(), "csv export written");
        Ok(path)
    }
}

/// Render records as CSV text with a header row. An empty slice renders as
/// an empty string. Quoting is left to the `csv` writer.
///
/// # Errors
///
/// Returns [`ExportError`] if the CSV writer fails.
pub fn to_csv(records: &[Record]) -> Result<String, ExportError> {
    let headers = header_union(records);
    if headers.is_empty() {
        return Ok(String::new());
    }

    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(&headers)?;
    for record in records {
        writer.write_record(headers.iter().map(|h| cell(record.get(h))))?;
    }
    let bytes = writer.into_inner().map_err(csv::IntoInnerError::into_error)?;
    Ok(String::from_utf8(bytes)?)
}

fn header_union(records: &[Record]) -> Vec<&str> {
    let mut headers: Vec<&str> = Vec::new();
    for record in records {
        for name in record.field_names() {
            if !headers.contains(&name) {
                headers.push(name);
            }
        }
    }
    headers
}

fn cell(value: Option<&Value>) -> String {
    match value {
        Some(v @ (Value::Array(_) | Value::Object(_))) => v.to_string(),
        other => display_value(other),
    }
}
