//! Sort-model compilation.

use serde::{Deserialize, Serialize};

use super::request::SortEntry;

/// Sort direction. Anything the client sends other than `desc` (including
/// nothing at all) means ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// One key of a (possibly multi-key) ordering. The first key is primary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub field: String,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// Compile the client's sort model into an ordered key list.
///
/// The first populated of `colId`/`field` names the target; entries with
/// neither are dropped silently. An empty result means the caller should
/// fall back to the grid's default sort.
pub fn compile_sort_model(model: &[SortEntry]) -> Vec<SortKey> {
    model
        .iter()
        .filter_map(|entry| {
            let field = entry
                .col_id
                .as_deref()
                .or(entry.field.as_deref())
                .filter(|f| !f.is_empty())?;
            let direction = match entry.sort.as_deref() {
                Some("desc") => SortDirection::Desc,
                _ => SortDirection::Asc,
            };
            Some(SortKey {
                field: field.to_string(),
                direction,
            })
        })
        .collect()
}
