//! Conversion of one worksheet into header-keyed records.

use anyhow::{Context, Result};
use calamine::{open_workbook_auto, Data, Reader};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{debug, error};

/// One worksheet row, keyed by the header-row cell values in column order.
pub type Record = Map<String, Value>;

/// Read `sheet_name` from the workbook at `path` and return one record per
/// data row, in row order. The first row supplies the keys; every later row
/// is aligned positionally against it. A missing sheet or an unreadable file
/// is logged and yields an empty set, never an error.
pub fn extract_sheet(path: &Path, sheet_name: &str) -> Vec<Record> {
    match read_sheet(path, sheet_name) {
        Ok(records) => {
            debug!("extracted {} records from sheet {sheet_name:?}", records.len());
            records
        }
        Err(err) => {
            error!("error occurred during extracting data: {err:#}");
            Vec::new()
        }
    }
}

fn read_sheet(path: &Path, sheet_name: &str) -> Result<Vec<Record>> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("failed to open workbook {}", path.display()))?;
    let range = workbook
        .worksheet_range(sheet_name)
        .with_context(|| format!("failed to read sheet {sheet_name:?}"))?;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row.iter().map(|cell| cell.to_string()).collect(),
        None => return Ok(Vec::new()),
    };

    let mut records = Vec::new();
    for row in rows {
        let mut record = Record::new();
        for (idx, header) in headers.iter().enumerate() {
            let value = row.get(idx).map(cell_to_json).unwrap_or(Value::Null);
            record.insert(header.clone(), value);
        }
        records.push(record);
    }
    Ok(records)
}

/// Carry the cell over as the type the workbook stored, no coercion.
fn cell_to_json(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Null,
        Data::String(s) => Value::String(s.clone()),
        Data::Bool(b) => Value::Bool(*b),
        Data::Int(i) => Value::Number((*i).into()),
        Data::Float(f) => serde_json::Number::from_f64(*f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        Data::DateTime(dt) => serde_json::Number::from_f64(dt.as_f64())
            .map(Value::Number)
            .unwrap_or(Value::Null),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Value::String(s.clone()),
        Data::Error(e) => Value::String(e.to_string()),
    }
}
