//! Row projection.

use serde_json::{Map, Value};

use crate::grid::{ExtraFields, GridConfig};
use crate::source::Row;

/// Project one source row into the output record shape.
///
/// Declared attributes come first: a dictionary transform when one is
/// registered, the raw attribute value otherwise (null when the row lacks the
/// attribute). Extra fields merge second and may overwrite attribute-derived
/// keys. Projection is side-effect-free.
pub fn project_row(config: &GridConfig, row: &Row) -> Map<String, Value> {
    let mut record = Map::new();

    for attr in &config.fields {
        let value = match config.dictionary.get(attr) {
            Some(transform) => transform(row),
            None => row.get(attr).cloned().unwrap_or(Value::Null),
        };
        record.insert(attr.clone(), value);
    }

    match &config.extra_fields {
        ExtraFields::None => {}
        ExtraFields::Wholesale(compute) => {
            for (key, value) in compute(row) {
                record.insert(key, value);
            }
        }
        ExtraFields::PerField(extras) => {
            for (field, compute) in extras {
                record.insert(field.clone(), compute(row));
            }
        }
    }

    record
}
