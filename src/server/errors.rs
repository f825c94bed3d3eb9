//! # HTTP Error Mapping
//!
//! Maps the grid error taxonomy onto status codes and JSON error bodies.
//! Internal diagnostic detail is only surfaced when the server runs in debug
//! mode; otherwise callers get a generic message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::query::GridError;

/// Generic message shown for server-side failures outside debug mode
const GENERIC_FAILURE: &str = "an error occurred while fetching data";

/// An error ready to leave the process.
#[derive(Debug, Clone)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn from_grid(err: GridError, debug: bool) -> Self {
        let status = match &err {
            GridError::ConfigurationNotFound(_) => StatusCode::NOT_FOUND,
            GridError::MalformedRequest => StatusCode::BAD_REQUEST,
            GridError::QueryExecutionFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let message = match &err {
            GridError::QueryExecutionFailed(_) if !debug => GENERIC_FAILURE.to_string(),
            other => other.to_string(),
        };
        Self { status, message }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.message,
            code: self.status.as_u16(),
        });
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::from_grid(GridError::ConfigurationNotFound("g".into()), false).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from_grid(GridError::MalformedRequest, false).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from_grid(GridError::QueryExecutionFailed("boom".into()), false).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_detail_is_gated_by_debug_mode() {
        let err = GridError::QueryExecutionFailed("connection refused".into());

        let hidden = ApiError::from_grid(err.clone(), false);
        assert_eq!(hidden.message, GENERIC_FAILURE);

        let shown = ApiError::from_grid(err, true);
        assert!(shown.message.contains("connection refused"));
    }

    #[test]
    fn test_client_errors_keep_their_message() {
        let err = ApiError::from_grid(GridError::ConfigurationNotFound("orders".into()), false);
        assert!(err.message.contains("orders"));
    }
}
