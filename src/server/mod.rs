//! # HTTP Hosting Layer
//!
//! Thin axum wrapper around the core: routes, CORS, tracing, and error
//! mapping. Everything request-semantic lives in `query` and below.

mod errors;
mod server;

pub use errors::{ApiError, ErrorResponse};
pub use server::{GridServer, ServerOptions};
