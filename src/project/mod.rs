//! # Row Projector & Column Introspector
//!
//! The read-side shaping of results: projecting fetched rows into output
//! records, and describing a grid's columns.

mod columns;
mod projector;

pub use columns::{columns_for, humanize, Column};
pub use projector::project_row;
