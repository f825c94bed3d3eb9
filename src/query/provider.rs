//! # Query Orchestrator
//!
//! Sequences one grid request against the data source. The step order is a
//! correctness contract, not style:
//!
//! 1. Open the base query (entity + eager-loaded relations)
//! 2. Conjoin compiled filter predicates
//! 3. Conjoin the search disjunction
//! 4. Take the total count, before sort and window, always
//! 5. Apply sort (client model, else the configured default)
//! 6. Apply the row window
//! 7. Fetch and project

use std::sync::Arc;

use crate::filter::compile_filter_model;
use crate::grid::GridConfig;
use crate::project::{columns_for, project_row, Column};
use crate::source::{DataSource, QueryHandle};

use super::errors::{GridError, GridResult};
use super::request::GridRequest;
use super::response::GridResponse;
use super::search::compile_search;
use super::sort::compile_sort_model;

/// Serves grid requests for one bound configuration.
///
/// Stateless between calls; cheap to construct per request.
pub struct GridDataProvider<S: DataSource> {
    config: Arc<GridConfig>,
    source: Arc<S>,
}

impl<S: DataSource> GridDataProvider<S> {
    pub fn new(config: Arc<GridConfig>, source: Arc<S>) -> Self {
        Self { config, source }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Run one request: windowed, projected rows plus the total match count.
    pub fn get_data(&self, request: &GridRequest) -> GridResult<GridResponse> {
        let (offset, limit) = request.window().ok_or(GridError::MalformedRequest)?;

        let mut handle = self
            .source
            .query(&self.config.entity, &self.config.relations)?;

        for predicate in compile_filter_model(&request.filter_model) {
            handle.filter(predicate);
        }

        if let Some(term) = request.search_value.as_deref() {
            if let Some(predicate) = compile_search(term, &self.config.searchable_fields) {
                handle.filter(predicate);
            }
        }

        // The one count that defines lastRow: filter+search applied,
        // sort and window not.
        let last_row = handle.count()?;

        let mut keys = compile_sort_model(&request.sort_model);
        if keys.is_empty() {
            keys = self.config.default_sort.clone();
        }
        if !keys.is_empty() {
            handle.order_by(&keys);
        }

        if limit == 0 {
            // Empty window: no fetch, but the count is still authoritative.
            return Ok(GridResponse {
                rows: Vec::new(),
                last_row,
            });
        }
        handle.window(offset, limit);

        let rows = handle.fetch()?;
        let rows = rows
            .iter()
            .map(|row| project_row(&self.config, row))
            .collect();

        Ok(GridResponse { rows, last_row })
    }

    /// Column metadata for the bound grid.
    pub fn get_columns(&self) -> Vec<Column> {
        columns_for(&self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::SortKey;
    use crate::source::{MemorySource, Row};
    use serde_json::{json, Value};

    fn orders_source() -> Arc<MemorySource> {
        let rows = [
            json!({"id": 1, "name": "alpha", "amount": 250, "created_at": "2024-01-03"}),
            json!({"id": 2, "name": "beta", "amount": 50, "created_at": "2024-01-01"}),
            json!({"id": 3, "name": "gamma", "amount": 120, "created_at": "2024-01-05"}),
            json!({"id": 4, "name": "delta", "amount": 800, "created_at": "2024-01-02"}),
            json!({"id": 5, "name": "epsilon", "amount": 90, "created_at": "2024-01-04"}),
        ];
        let mut source = MemorySource::new();
        source.insert_table(
            "orders",
            rows.into_iter().map(|r| Row::from_value(r).unwrap()).collect(),
        );
        Arc::new(source)
    }

    fn provider(config: GridConfig) -> GridDataProvider<MemorySource> {
        GridDataProvider::new(Arc::new(config), orders_source())
    }

    fn orders_config() -> GridConfig {
        GridConfig::builder("orders")
            .fields(["id", "name", "amount", "created_at"])
            .searchable_fields(["name"])
            .build()
    }

    fn request(raw: Value) -> GridRequest {
        serde_json::from_value(raw).unwrap()
    }

    #[test]
    fn test_end_to_end_filter_sort_window() {
        let response = provider(orders_config())
            .get_data(&request(json!({
                "startRow": 0,
                "endRow": 2,
                "filterModel": {
                    "amount": {"filterType": "number", "type": "greaterThan", "filter": 100}
                },
                "sortModel": [{"field": "amount", "sort": "desc"}]
            })))
            .unwrap();

        assert_eq!(response.last_row, 3);
        assert_eq!(response.rows.len(), 2);
        assert_eq!(response.rows[0]["amount"], json!(800));
        assert_eq!(response.rows[1]["amount"], json!(250));
    }

    #[test]
    fn test_missing_range_is_malformed() {
        let err = provider(orders_config())
            .get_data(&request(json!({"endRow": 10})))
            .unwrap_err();
        assert!(matches!(err, GridError::MalformedRequest));
    }

    #[test]
    fn test_empty_window_still_counts() {
        let response = provider(orders_config())
            .get_data(&request(json!({"startRow": 10, "endRow": 10})))
            .unwrap();
        assert_eq!(response.rows.len(), 0);
        assert_eq!(response.last_row, 5);

        let inverted = provider(orders_config())
            .get_data(&request(json!({"startRow": 10, "endRow": 2})))
            .unwrap();
        assert_eq!(inverted.rows.len(), 0);
        assert_eq!(inverted.last_row, 5);
    }

    #[test]
    fn test_last_row_is_independent_of_sort_and_window() {
        let variants = [
            json!({"startRow": 0, "endRow": 2}),
            json!({"startRow": 3, "endRow": 5}),
            json!({"startRow": 0, "endRow": 100, "sortModel": [{"field": "name"}]}),
            json!({"startRow": 1, "endRow": 2,
                   "sortModel": [{"field": "amount", "sort": "desc"}, {"field": "id"}]}),
            json!({"startRow": 1, "endRow": 2,
                   "sortModel": [{"field": "id"}, {"field": "amount", "sort": "desc"}]}),
        ];
        for mut variant in variants {
            variant["filterModel"] = json!({
                "amount": {"filterType": "number", "type": "greaterThanOrEqual", "filter": 90}
            });
            let response = provider(orders_config()).get_data(&request(variant)).unwrap();
            assert_eq!(response.last_row, 4);
        }
    }

    #[test]
    fn test_search_is_or_across_fields_and_and_with_filters() {
        let config = GridConfig::builder("orders")
            .fields(["id", "name", "amount", "created_at"])
            .searchable_fields(["name", "created_at"])
            .build();

        let response = GridDataProvider::new(Arc::new(config), orders_source())
            .get_data(&request(json!({
                "startRow": 0,
                "endRow": 100,
                "searchValue": "a",
                "filterModel": {
                    "amount": {"filterType": "number", "type": "lessThan", "filter": 200}
                }
            })))
            .unwrap();

        // Search keeps alpha/beta/gamma/delta (epsilon has no "a" in either
        // searchable field); the filter then keeps beta and gamma.
        assert_eq!(response.last_row, 2);
        for row in &response.rows {
            assert!(row["amount"].as_i64().unwrap() < 200);
            assert!(row["name"].as_str().unwrap().contains('a'));
        }
    }

    #[test]
    fn test_search_without_searchable_fields_is_a_noop() {
        let config = GridConfig::builder("orders")
            .fields(["id", "name", "amount", "created_at"])
            .build();
        let response = GridDataProvider::new(Arc::new(config), orders_source())
            .get_data(&request(json!({
                "startRow": 0, "endRow": 100, "searchValue": "zzz"
            })))
            .unwrap();
        assert_eq!(response.last_row, 5);
    }

    #[test]
    fn test_default_sort_applies_when_client_sends_none() {
        let config = GridConfig::builder("orders")
            .fields(["id", "name", "amount", "created_at"])
            .default_sort(vec![SortKey::desc("amount")])
            .build();

        let response = GridDataProvider::new(Arc::new(config), orders_source())
            .get_data(&request(json!({"startRow": 0, "endRow": 100})))
            .unwrap();

        let amounts: Vec<i64> = response
            .rows
            .iter()
            .map(|r| r["amount"].as_i64().unwrap())
            .collect();
        assert_eq!(amounts, vec![800, 250, 120, 90, 50]);
    }

    #[test]
    fn test_client_sort_overrides_default_sort() {
        let config = GridConfig::builder("orders")
            .fields(["id", "name", "amount", "created_at"])
            .default_sort(vec![SortKey::desc("amount")])
            .build();

        let response = GridDataProvider::new(Arc::new(config), orders_source())
            .get_data(&request(json!({
                "startRow": 0, "endRow": 100, "sortModel": [{"field": "id", "sort": "asc"}]
            })))
            .unwrap();

        let ids: Vec<i64> = response.rows.iter().map(|r| r["id"].as_i64().unwrap()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_unknown_entity_fails_query_execution() {
        let config = GridConfig::builder("missing_table").fields(["id"]).build();
        let err = GridDataProvider::new(Arc::new(config), orders_source())
            .get_data(&request(json!({"startRow": 0, "endRow": 10})))
            .unwrap_err();
        assert!(matches!(err, GridError::QueryExecutionFailed(_)));
    }

    #[test]
    fn test_projection_applies_to_fetched_rows() {
        let config = GridConfig::builder("orders")
            .fields(["id", "name", "amount", "created_at"])
            .field_transform("name", |row| {
                json!(row
                    .get("name")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_uppercase())
            })
            .extra_field("amount_eur", |row| {
                json!(row.get("amount").and_then(Value::as_f64).unwrap_or(0.0) / 100.0)
            })
            .build();

        let response = GridDataProvider::new(Arc::new(config), orders_source())
            .get_data(&request(json!({
                "startRow": 0, "endRow": 1, "sortModel": [{"field": "id"}]
            })))
            .unwrap();

        assert_eq!(response.rows[0]["name"], json!("ALPHA"));
        assert_eq!(response.rows[0]["amount_eur"], json!(2.5));
    }

    #[test]
    fn test_get_columns() {
        let columns = provider(orders_config()).get_columns();
        let headers: Vec<&str> = columns.iter().map(|c| c.header_name.as_str()).collect();
        assert_eq!(headers, vec!["Id", "Name", "Amount", "Created At"]);
    }
}
