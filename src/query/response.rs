//! Wire-level response shapes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::project::Column;

/// A server-side row model response: exactly the windowed rows, plus the
/// total count of rows matching filter+search.
///
/// `lastRow` is the grid's authoritative "total rows available" signal; it is
/// independent of the window and never equals `rows.len()` by construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridResponse {
    pub rows: Vec<Map<String, Value>>,
    #[serde(rename = "lastRow")]
    pub last_row: u64,
}

/// Column metadata response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnsResponse {
    pub columns: Vec<Column>,
}
