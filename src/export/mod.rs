//! # CSV Export
//!
//! Runs the same compiler pipeline as the data endpoint with the window
//! forced open to every matching row, then flattens the projected records to
//! a delimited table. The header row is the key set of the first projected
//! record; structured cell values are written as their canonical JSON text.

use chrono::Utc;
use serde_json::{Map, Value};

use crate::query::GridRequest;

/// A grid request widened to the full result set.
pub fn full_window(request: &GridRequest) -> GridRequest {
    let mut request = request.clone();
    request.start_row = Some(0);
    request.end_row = Some(i64::MAX);
    request
}

/// Flatten projected rows into CSV bytes.
///
/// Zero rows produce zero bytes (no header without data to describe).
pub fn write_csv(rows: &[Map<String, Value>]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    if let Some(first) = rows.first() {
        writer.write_record(first.keys())?;
        for row in rows {
            writer.write_record(row.values().map(cell_text))?;
        }
    }

    writer
        .into_inner()
        .map_err(|e| csv::Error::from(std::io::Error::other(e.to_string())))
}

/// Export filename stamped with the current UTC time.
pub fn export_filename(grid: &str) -> String {
    format!("{}_export_{}.csv", grid, Utc::now().format("%Y-%m-%d_%H%M%S"))
}

/// Canonical text rendering of one cell.
fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        // Structured values keep their JSON serialization
        structured => structured.to_string(),
    }
}
