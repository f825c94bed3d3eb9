//! Column introspection.
//!
//! Describes the raw schema of a bound grid: one column per declared
//! attribute, with a humanized header. Deliberately ignores the dictionary
//! and extra fields, which shape projected output, not schema.

use serde::{Deserialize, Serialize};

use crate::grid::GridConfig;

/// Displayable column metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub field: String,
    #[serde(rename = "headerName")]
    pub header_name: String,
}

/// Columns for a bound grid, in field declaration order.
pub fn columns_for(config: &GridConfig) -> Vec<Column> {
    config
        .fields
        .iter()
        .map(|field| Column {
            field: field.clone(),
            header_name: humanize(field),
        })
        .collect()
}

/// Humanize a field name: underscores become spaces, each word gets its
/// first letter uppercased (the rest of the word is left as-is).
pub fn humanize(field: &str) -> String {
    field
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("created_at"), "Created At");
        assert_eq!(humanize("id"), "Id");
        assert_eq!(humanize("orderTotal"), "OrderTotal");
    }

    #[test]
    fn test_columns_follow_declaration_order() {
        let config = GridConfig::builder("orders")
            .fields(["id", "customer_name", "created_at"])
            .field_transform("id", |_| serde_json::json!("ignored by columns"))
            .extra_field("computed", |_| serde_json::json!(0))
            .build();

        let columns = columns_for(&config);
        assert_eq!(
            columns,
            vec![
                Column {
                    field: "id".into(),
                    header_name: "Id".into()
                },
                Column {
                    field: "customer_name".into(),
                    header_name: "Customer Name".into()
                },
                Column {
                    field: "created_at".into(),
                    header_name: "Created At".into()
                },
            ]
        );
    }

    #[test]
    fn test_wire_serialization_uses_header_name() {
        let column = Column {
            field: "created_at".into(),
            header_name: "Created At".into(),
        };
        let value = serde_json::to_value(&column).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"field": "created_at", "headerName": "Created At"})
        );
    }
}
