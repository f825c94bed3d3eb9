//! # Grid HTTP Server
//!
//! Axum router over a grid registry and a data source. The hosting concerns
//! live here and nowhere deeper: routing, CORS, request tracing, and the
//! debug gate on error detail. Handlers hand the core a parsed request and a
//! resolved configuration, nothing more.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::export;
use crate::grid::GridRegistry;
use crate::query::{ColumnsResponse, GridDataProvider, GridError, GridRequest, GridResponse};
use crate::source::DataSource;

use super::errors::ApiError;

/// Hosting options.
#[derive(Debug, Clone)]
pub struct ServerOptions {
    /// Attach a permissive CORS layer
    pub enable_cors: bool,
    /// Surface internal error detail to callers
    pub debug: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            enable_cors: true,
            debug: false,
        }
    }
}

/// The grid HTTP server: registry + data source + options.
pub struct GridServer<S: DataSource> {
    registry: GridRegistry,
    source: Arc<S>,
    options: ServerOptions,
}

impl<S: DataSource + 'static> GridServer<S> {
    pub fn new(registry: GridRegistry, source: Arc<S>) -> Self {
        Self::with_options(registry, source, ServerOptions::default())
    }

    pub fn with_options(registry: GridRegistry, source: Arc<S>, options: ServerOptions) -> Self {
        Self {
            registry,
            source,
            options,
        }
    }

    /// Build the Axum router.
    pub fn router(self) -> Router {
        let enable_cors = self.options.enable_cors;
        let state = Arc::new(self);

        let mut router = Router::new()
            .route("/grids/:grid", post(data_handler))
            .route("/grids/:grid/columns", get(columns_handler))
            .route("/grids/:grid/export", post(export_handler))
            .with_state(state);

        if enable_cors {
            router = router.layer(CorsLayer::permissive());
        }
        router.layer(TraceLayer::new_for_http())
    }

    fn provider(&self, grid: &str) -> Result<GridDataProvider<S>, ApiError> {
        let config = self
            .registry
            .get(grid)
            .map_err(|e| ApiError::from_grid(e, self.options.debug))?;
        Ok(GridDataProvider::new(config, self.source.clone()))
    }
}

type ServerState<S> = Arc<GridServer<S>>;

/// Serve one page of grid data.
async fn data_handler<S: DataSource + 'static>(
    State(server): State<ServerState<S>>,
    Path(grid): Path<String>,
    Json(request): Json<GridRequest>,
) -> Result<Json<GridResponse>, ApiError> {
    let provider = server.provider(&grid)?;
    let response = provider
        .get_data(&request)
        .map_err(|e| ApiError::from_grid(e, server.options.debug))?;

    tracing::debug!(
        grid = %grid,
        rows = response.rows.len(),
        last_row = response.last_row,
        "grid data served"
    );
    Ok(Json(response))
}

/// Serve column metadata.
async fn columns_handler<S: DataSource + 'static>(
    State(server): State<ServerState<S>>,
    Path(grid): Path<String>,
) -> Result<Json<ColumnsResponse>, ApiError> {
    let provider = server.provider(&grid)?;
    Ok(Json(ColumnsResponse {
        columns: provider.get_columns(),
    }))
}

/// Serve the full filtered result set as a CSV download.
///
/// The body is optional; filters, sort, and search are honored, the window
/// is forced open to every matching row.
async fn export_handler<S: DataSource + 'static>(
    State(server): State<ServerState<S>>,
    Path(grid): Path<String>,
    request: Option<Json<GridRequest>>,
) -> Result<Response, ApiError> {
    let debug = server.options.debug;
    let request = export::full_window(&request.map(|Json(r)| r).unwrap_or_default());

    let provider = server.provider(&grid)?;
    let data = provider
        .get_data(&request)
        .map_err(|e| ApiError::from_grid(e, debug))?;

    let bytes = export::write_csv(&data.rows)
        .map_err(|e| ApiError::from_grid(GridError::QueryExecutionFailed(e.to_string()), debug))?;

    tracing::info!(grid = %grid, rows = data.rows.len(), "grid exported");

    let disposition = format!(
        "attachment; filename=\"{}\"",
        export::export_filename(&grid)
    );
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}
