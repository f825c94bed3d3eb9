//! The wire-level grid request.
//!
//! Field names are the wire contract and are preserved exactly
//! (`startRow`, `endRow`, `sortModel`, `filterModel`, `searchValue`).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A server-side row model request.
///
/// `startRow`/`endRow` are required on the wire; they are modeled as options
/// so their absence can be reported as a malformed request instead of a
/// deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridRequest {
    pub start_row: Option<i64>,
    pub end_row: Option<i64>,
    pub sort_model: Vec<SortEntry>,
    pub filter_model: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_value: Option<String>,
}

/// One entry of the client's sort model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SortEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub col_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
}

impl GridRequest {
    /// The requested window as `(offset, limit)`.
    ///
    /// Returns `None` when either bound is missing (a malformed request).
    /// A present but inverted or negative window is valid and empty.
    pub fn window(&self) -> Option<(u64, u64)> {
        let (start, end) = (self.start_row?, self.end_row?);
        if start < 0 || end < start {
            return Some((0, 0));
        }
        Some((start as u64, (end - start) as u64))
    }
}
