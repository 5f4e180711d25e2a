// file: src/dataset/loader.rs
// description: json and csv dataset loading with header normalization
// reference: sheets arrive with free-form headers; cells are rendered to strings

use crate::dataset::column::{Column, Record};
use crate::dataset::table::Dataset;
use crate::error::{Result, SearchError};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// One sheet row as `(header, rendered cell)` pairs in sheet column order.
type SheetRow = Vec<(String, String)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    Json,
    Csv,
}

impl SheetFormat {
    /// Chosen by file extension; anything other than `.csv` is read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => SheetFormat::Csv,
            _ => SheetFormat::Json,
        }
    }
}

pub fn load_dataset<R: Record>(path: &Path) -> Result<Dataset<R>> {
    let content = fs::read_to_string(path).map_err(|source| SearchError::FileOperation {
        path: path.to_path_buf(),
        source,
    })?;

    let dataset = match SheetFormat::from_path(path) {
        SheetFormat::Json => parse_dataset::<R>(&content, path)?,
        SheetFormat::Csv => parse_csv_dataset::<R>(&content, path)?,
    };

    info!(
        "Loaded {} {} rows from {}",
        dataset.len(),
        R::KIND.as_str(),
        path.display()
    );

    Ok(dataset)
}

/// Parses a JSON array of row objects. `origin` is only used in errors.
pub fn parse_dataset<R: Record>(content: &str, origin: &Path) -> Result<Dataset<R>> {
    let dataset_error = |message: String| SearchError::Dataset {
        path: origin.to_path_buf(),
        message,
    };

    let value: Value = serde_json::from_str(content)?;
    let rows = value
        .as_array()
        .ok_or_else(|| dataset_error("expected a JSON array of rows".to_string()))?;

    let sheet = rows
        .iter()
        .enumerate()
        .map(|(position, row)| -> Result<SheetRow> {
            let object = row
                .as_object()
                .ok_or_else(|| dataset_error(format!("row {} is not an object", position)))?;
            Ok(object
                .iter()
                .map(|(header, cell)| (header.clone(), render_cell(cell)))
                .collect())
        })
        .collect::<Result<Vec<SheetRow>>>()?;

    Ok(build_dataset(sheet, origin))
}

/// Parses a CSV sheet whose first record is the header row.
pub fn parse_csv_dataset<R: Record>(content: &str, origin: &Path) -> Result<Dataset<R>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();

    let mut sheet = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: SheetRow = headers
            .iter()
            .zip(record.iter())
            .map(|(header, field)| (header.clone(), field.to_string()))
            .collect();
        sheet.push(row);
    }

    debug!("Read {} CSV rows from {}", sheet.len(), origin.display());
    Ok(build_dataset(sheet, origin))
}

/// Maps headers onto columns, first matching header per column in sheet
/// order, then fills one record per row.
fn build_dataset<R: Record>(sheet: Vec<SheetRow>, origin: &Path) -> Dataset<R> {
    let mut header_map: BTreeMap<String, Column> = BTreeMap::new();
    let mut claimed: Vec<Column> = Vec::new();
    let mut seen: Vec<&str> = Vec::new();

    for (header, _) in sheet.iter().flatten() {
        if seen.contains(&header.as_str()) {
            continue;
        }
        seen.push(header);
        match R::classify_header(header) {
            Some(column) if !claimed.contains(&column) => {
                debug!("Header '{}' -> {}", header, column.as_str());
                claimed.push(column);
                header_map.insert(header.clone(), column);
            }
            Some(column) => {
                debug!(
                    "Header '{}' ignored, {} already mapped",
                    header,
                    column.as_str()
                );
            }
            None => debug!("Header '{}' not recognized", header),
        }
    }

    if !claimed.contains(&Column::Name) {
        warn!(
            "No name column found in {}; name matching will see empty names",
            origin.display()
        );
    }

    let records = sheet
        .into_iter()
        .map(|row| {
            let mut record = R::default();
            for (header, cell) in row {
                if let Some(column) = header_map.get(&header) {
                    record.set_field(*column, cell);
                }
            }
            record
        })
        .collect();

    Dataset::with_columns(records, claimed)
}

fn render_cell(cell: &Value) -> String {
    match cell {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}
