//! Materialized source rows.

use serde_json::{Map, Value};

/// A single row: an ordered attribute → value map.
///
/// Attribute order is insertion order, which for rows built from entity
/// metadata means declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    attrs: Map<String, Value>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a row from a JSON object. Returns `None` for non-objects.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(attrs) => Some(Self { attrs }),
            _ => None,
        }
    }

    /// Set an attribute, replacing any existing value.
    pub fn set(&mut self, attr: impl Into<String>, value: Value) {
        self.attrs.insert(attr.into(), value);
    }

    /// Attribute names in declaration order.
    pub fn attributes(&self) -> impl Iterator<Item = &str> {
        self.attrs.keys().map(String::as_str)
    }

    /// Look up one attribute. `None` means the attribute is absent,
    /// which filter evaluation treats like a SQL NULL.
    pub fn get(&self, attr: &str) -> Option<&Value> {
        self.attrs.get(attr)
    }

    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }
}

impl From<Map<String, Value>> for Row {
    fn from(attrs: Map<String, Value>) -> Self {
        Self { attrs }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_requires_object() {
        assert!(Row::from_value(json!({"id": 1})).is_some());
        assert!(Row::from_value(json!([1, 2])).is_none());
        assert!(Row::from_value(json!("scalar")).is_none());
    }

    #[test]
    fn test_attribute_order_is_insertion_order() {
        let row = Row::from_value(json!({"id": 1, "name": "a", "amount": 2})).unwrap();
        let attrs: Vec<&str> = row.attributes().collect();
        assert_eq!(attrs, vec!["id", "name", "amount"]);
    }

    #[test]
    fn test_get_missing_attribute() {
        let row = Row::from_value(json!({"id": 1})).unwrap();
        assert_eq!(row.get("id"), Some(&json!(1)));
        assert_eq!(row.get("missing"), None);
    }
}
