//! CLI command implementations.

use std::net::SocketAddr;
use std::sync::Arc;

use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

use crate::grid::{GridConfig, GridRegistry};
use crate::query::SortKey;
use crate::server::{GridServer, ServerOptions};
use crate::source::{MemorySource, Row};

use super::errors::CliResult;

/// Boot the demo registry over the in-memory source and serve it.
pub fn serve(bind: SocketAddr, debug: bool, no_cors: bool) -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let options = ServerOptions {
        enable_cors: !no_cors,
        debug,
    };
    let server = GridServer::with_options(demo_registry(), Arc::new(demo_source()), options);
    let router = server.router();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async move {
        let listener = tokio::net::TcpListener::bind(bind).await?;
        tracing::info!(address = %bind, "rowserve listening");
        axum::serve(listener, router).await
    })?;

    Ok(())
}

/// The demo grid: an orders table with a projected amount and a computed
/// label, searchable by customer and status.
pub fn demo_registry() -> GridRegistry {
    let mut registry = GridRegistry::new();
    registry.register(
        "orders",
        GridConfig::builder("orders")
            .fields(["id", "customer_name", "status", "amount_cents", "created_at"])
            .field_transform("amount_cents", |row| {
                json!(row.get("amount_cents").and_then(Value::as_f64).unwrap_or(0.0) / 100.0)
            })
            .extra_field("label", |row| {
                json!(format!(
                    "#{} {}",
                    row.get("id").and_then(Value::as_i64).unwrap_or(0),
                    row.get("customer_name").and_then(Value::as_str).unwrap_or("")
                ))
            })
            .searchable_fields(["customer_name", "status"])
            .default_sort(vec![SortKey::desc("created_at")])
            .build(),
    );
    registry
}

/// Sample rows backing the demo grid.
pub fn demo_source() -> MemorySource {
    let rows = [
        json!({"id": 1, "customer_name": "Acme Corp", "status": "shipped",
               "amount_cents": 125_000, "created_at": "2024-03-01 09:12:00"}),
        json!({"id": 2, "customer_name": "Globex", "status": "pending",
               "amount_cents": 48_000, "created_at": "2024-03-02 14:30:00"}),
        json!({"id": 3, "customer_name": "Initech", "status": "shipped",
               "amount_cents": 9_900, "created_at": "2024-03-02 16:45:00"}),
        json!({"id": 4, "customer_name": "Umbrella", "status": "cancelled",
               "amount_cents": 310_000, "created_at": "2024-03-03 08:05:00"}),
        json!({"id": 5, "customer_name": "Stark Industries", "status": "pending",
               "amount_cents": 77_500, "created_at": "2024-03-04 11:20:00"}),
    ];

    let mut source = MemorySource::new();
    source.insert_table(
        "orders",
        rows.into_iter().filter_map(Row::from_value).collect(),
    );
    source
}
