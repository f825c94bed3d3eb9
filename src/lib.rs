//! rowserve - server-side row model backend for grid clients
//!
//! Compiles untyped grid requests (row window + filter model + sort model +
//! free-text search) into predicates, orderings, and a bounded window against
//! an abstract data source, then projects the fetched rows into the response
//! shape. Ships an in-memory source, a CSV export path, and a thin axum
//! hosting layer.

pub mod cli;
pub mod export;
pub mod filter;
pub mod grid;
pub mod project;
pub mod query;
pub mod server;
pub mod source;
