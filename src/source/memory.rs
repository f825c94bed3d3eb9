//! In-memory data source.
//!
//! Backs the unit tests and the demo server. Tables are plain row vectors,
//! built at startup and immutable afterwards, so the source is freely
//! shareable across concurrent requests.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde_json::Value;

use crate::filter::Predicate;
use crate::query::{SortDirection, SortKey};

use super::row::Row;
use super::{DataSource, QueryHandle, SourceError, SourceResult};

/// A data source over in-memory tables.
#[derive(Default)]
pub struct MemorySource {
    tables: HashMap<String, Vec<Row>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a table, replacing any previous rows for the entity.
    pub fn insert_table(&mut self, entity: impl Into<String>, rows: Vec<Row>) {
        self.tables.insert(entity.into(), rows);
    }
}

impl DataSource for MemorySource {
    type Handle = MemoryHandle;

    fn query(&self, entity: &str, _relations: &[String]) -> SourceResult<MemoryHandle> {
        // Relations are an eager-loading hint; in memory everything is
        // already loaded, so they carry no effect here.
        let rows = self
            .tables
            .get(entity)
            .cloned()
            .ok_or_else(|| SourceError::UnknownEntity(entity.to_string()))?;

        Ok(MemoryHandle {
            rows,
            predicates: Vec::new(),
            order: Vec::new(),
            window: None,
        })
    }
}

/// A staged in-memory query.
#[derive(Debug)]
pub struct MemoryHandle {
    rows: Vec<Row>,
    predicates: Vec<Predicate>,
    order: Vec<SortKey>,
    window: Option<(u64, u64)>,
}

impl MemoryHandle {
    fn filtered(&self) -> impl Iterator<Item = &Row> {
        self.rows
            .iter()
            .filter(|row| self.predicates.iter().all(|p| p.matches(row)))
    }
}

impl QueryHandle for MemoryHandle {
    fn filter(&mut self, predicate: Predicate) {
        self.predicates.push(predicate);
    }

    fn order_by(&mut self, keys: &[SortKey]) {
        self.order = keys.to_vec();
    }

    fn window(&mut self, offset: u64, limit: u64) {
        self.window = Some((offset, limit));
    }

    fn count(&self) -> SourceResult<u64> {
        // Counts the filtered set; staged ordering and windowing are
        // structurally unable to affect this.
        Ok(self.filtered().count() as u64)
    }

    fn fetch(self) -> SourceResult<Vec<Row>> {
        let MemoryHandle {
            rows,
            predicates,
            order,
            window,
        } = self;

        let mut rows: Vec<Row> = rows
            .into_iter()
            .filter(|row| predicates.iter().all(|p| p.matches(row)))
            .collect();

        if !order.is_empty() {
            // Stable, so equal keys keep their source order.
            rows.sort_by(|a, b| {
                for key in &order {
                    let ordering = compare_values(a.get(&key.field), b.get(&key.field));
                    let ordering = match key.direction {
                        SortDirection::Asc => ordering,
                        SortDirection::Desc => ordering.reverse(),
                    };
                    if ordering != Ordering::Equal {
                        return ordering;
                    }
                }
                Ordering::Equal
            });
        }

        if let Some((offset, limit)) = window {
            rows = rows
                .into_iter()
                .skip(offset as usize)
                .take(limit as usize)
                .collect();
        }

        Ok(rows)
    }
}

/// Total order over optional JSON values for sorting.
///
/// Missing < null < bool < number < string < array < object; within a type,
/// natural ordering (arrays and objects are not compared further).
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let (a, b) = match (a, b) {
        (None, None) => return Ordering::Equal,
        (None, Some(_)) => return Ordering::Less,
        (Some(_), None) => return Ordering::Greater,
        (Some(a), Some(b)) => (a, b),
    };

    fn type_order(v: &Value) -> u8 {
        match v {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            Value::Array(_) => 4,
            Value::Object(_) => 5,
        }
    }

    let by_type = type_order(a).cmp(&type_order(b));
    if by_type != Ordering::Equal {
        return by_type;
    }

    match (a, b) {
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => {
            let a = a.as_f64().unwrap_or(0.0);
            let b = b.as_f64().unwrap_or(0.0);
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        }
        (Value::String(a), Value::String(b)) => a.cmp(b),
        _ => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FieldOp;
    use serde_json::json;

    fn source() -> MemorySource {
        let rows = [
            json!({"id": 3, "name": "carol", "age": 30}),
            json!({"id": 1, "name": "alice", "age": 25}),
            json!({"id": 2, "name": "bob", "age": 25}),
            json!({"id": 4, "name": null, "age": null}),
        ];
        let mut source = MemorySource::new();
        source.insert_table(
            "users",
            rows.into_iter().map(|r| Row::from_value(r).unwrap()).collect(),
        );
        source
    }

    #[test]
    fn test_unknown_entity() {
        let err = source().query("ghosts", &[]).unwrap_err();
        assert!(matches!(err, SourceError::UnknownEntity(e) if e == "ghosts"));
    }

    #[test]
    fn test_count_ignores_order_and_window() {
        let mut handle = source().query("users", &[]).unwrap();
        handle.filter(Predicate::field("age", FieldOp::Gte(json!(25))));
        handle.order_by(&[SortKey::desc("id")]);
        handle.window(0, 1);
        assert_eq!(handle.count().unwrap(), 3);
    }

    #[test]
    fn test_fetch_applies_filter_sort_window_in_order() {
        let mut handle = source().query("users", &[]).unwrap();
        handle.filter(Predicate::field("age", FieldOp::NotNull));
        handle.order_by(&[SortKey::asc("id")]);
        handle.window(1, 2);

        let rows = handle.fetch().unwrap();
        let ids: Vec<i64> = rows
            .iter()
            .map(|r| r.get("id").and_then(Value::as_i64).unwrap())
            .collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_multi_key_sort_is_stable_on_ties() {
        let mut handle = source().query("users", &[]).unwrap();
        handle.order_by(&[SortKey::asc("age"), SortKey::asc("name")]);

        let rows = handle.fetch().unwrap();
        let names: Vec<Value> = rows.iter().map(|r| r.get("name").cloned().unwrap()).collect();
        // null age sorts first, then the two 25s ordered by name
        assert_eq!(names, vec![json!(null), json!("alice"), json!("bob"), json!("carol")]);
    }

    #[test]
    fn test_nulls_sort_before_values() {
        let mut handle = source().query("users", &[]).unwrap();
        handle.order_by(&[SortKey::desc("age")]);
        let rows = handle.fetch().unwrap();
        assert_eq!(rows.last().unwrap().get("age"), Some(&json!(null)));
    }

    #[test]
    fn test_window_past_the_end_is_empty() {
        let mut handle = source().query("users", &[]).unwrap();
        handle.window(10, 5);
        assert!(handle.fetch().unwrap().is_empty());
    }
}
