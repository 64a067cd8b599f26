//! CSV reading for seller report exports.
//!
//! First row is the header; header text is matched case-sensitively against
//! schema column keys after whitespace/BOM normalization. Blank rows are
//! skipped. Progress reporting is a best-effort byte-cursor signal
//! (0.0–0.99 while reading, 1.0 on completion), not a precise guarantee.

use std::path::Path;

use csv::ReaderBuilder;

use sellerkit_model::{RowRecord, Value};

use crate::error::IngestError;

/// A parsed CSV file: normalized headers plus raw string cells.
#[derive(Debug, Clone)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Convert rows into records keyed by header text.
    ///
    /// Non-empty cells become `Value::Str`; empty cells become `Value::Null`
    /// so required-column checks treat them as absent.
    pub fn to_records(&self) -> Vec<RowRecord> {
        self.rows
            .iter()
            .map(|row| {
                let mut record = RowRecord::new();
                for (idx, header) in self.headers.iter().enumerate() {
                    let cell = row.get(idx).map(String::as_str).unwrap_or("");
                    let value = if cell.trim().is_empty() {
                        Value::Null
                    } else {
                        Value::Str(cell.to_string())
                    };
                    record.insert(header.clone(), value);
                }
                record
            })
            .collect()
    }
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Read a CSV file into a table.
pub fn read_csv_table(path: &Path) -> Result<CsvTable, IngestError> {
    read_csv_table_with_progress(path, &mut |_| {})
}

/// Read a CSV file, reporting approximate progress as a 0.0–1.0 fraction.
///
/// The fraction is estimated from bytes consumed over file size and is
/// capped below 1.0 until the final record has been read.
pub fn read_csv_table_with_progress(
    path: &Path,
    progress: &mut dyn FnMut(f32),
) -> Result<CsvTable, IngestError> {
    let file_size = std::fs::metadata(path)
        .map_err(|e| IngestError::Io {
            path: path.to_path_buf(),
            source: e,
        })?
        .len();

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| csv_error(path, &e))?;

    let mut headers: Option<Vec<String>> = None;
    let mut rows: Vec<Vec<String>> = Vec::new();

    for record in reader.records() {
        let record = record.map_err(|e| csv_error(path, &e))?;
        let cells: Vec<String> = record.iter().map(normalize_cell).collect();
        if cells.iter().all(|cell| cell.is_empty()) {
            continue;
        }
        match &headers {
            None => {
                headers = Some(record.iter().map(normalize_header).collect());
            }
            Some(header_row) => {
                let mut row = Vec::with_capacity(header_row.len());
                for idx in 0..header_row.len() {
                    row.push(cells.get(idx).cloned().unwrap_or_default());
                }
                rows.push(row);
            }
        }
        if file_size > 0 {
            let consumed = record.position().map_or(0, csv::Position::byte);
            let fraction = (consumed as f32 / file_size as f32).min(0.99);
            progress(fraction);
        }
    }
    progress(1.0);

    tracing::debug!(path = %path.display(), rows = rows.len(), "read csv table");
    Ok(CsvTable {
        headers: headers.unwrap_or_default(),
        rows,
    })
}

fn csv_error(path: &Path, error: &csv::Error) -> IngestError {
    IngestError::Csv {
        path: path.to_path_buf(),
        message: error.to_string(),
    }
}
