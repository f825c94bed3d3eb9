//! # Grid Error Taxonomy
//!
//! Every failure a grid request can surface. The hosting layer maps these to
//! status codes; `QueryExecutionFailed` detail is only shown in debug mode.

use thiserror::Error;

use crate::source::SourceError;

/// Result type for grid operations
pub type GridResult<T> = Result<T, GridError>;

/// Grid request failures
#[derive(Debug, Clone, Error)]
pub enum GridError {
    /// The requested grid name has no bound configuration
    #[error("grid '{0}' is not configured")]
    ConfigurationNotFound(String),

    /// Required range fields are absent from the request
    #[error("missing required parameters: startRow, endRow")]
    MalformedRequest,

    /// The data source failed; the message is internal diagnostic detail
    #[error("query execution failed: {0}")]
    QueryExecutionFailed(String),
}

impl From<SourceError> for GridError {
    fn from(err: SourceError) -> Self {
        GridError::QueryExecutionFailed(err.to_string())
    }
}
