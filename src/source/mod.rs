//! # Abstract Data Source
//!
//! Capability seam between the request compiler and whatever actually stores
//! the rows. The provider only needs five operations: filter, order, window,
//! count, fetch. Anything that can run those can back a grid.
//!
//! `MemorySource` is the in-process implementation used by the unit tests and
//! the demo server.

mod memory;
mod row;

pub use memory::{MemoryHandle, MemorySource};
pub use row::Row;

use thiserror::Error;

use crate::filter::Predicate;
use crate::query::SortKey;

/// Result type for data-source operations
pub type SourceResult<T> = Result<T, SourceError>;

/// Errors raised by a data source
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    /// The requested entity is not known to this source
    #[error("unknown entity: {0}")]
    UnknownEntity(String),

    /// Any backend failure (connection, execution, corruption)
    #[error("{0}")]
    Backend(String),
}

/// A queryable store of tabular entities.
pub trait DataSource: Send + Sync {
    type Handle: QueryHandle;

    /// Open a query over one entity, eager-loading the given relations.
    ///
    /// Relations affect fetch efficiency only, never result semantics.
    fn query(&self, entity: &str, relations: &[String]) -> SourceResult<Self::Handle>;
}

/// A staged query against one entity.
///
/// `count` must reflect the filters staged so far and nothing else: ordering
/// and windowing staged on the handle never change the count.
pub trait QueryHandle {
    /// Conjoin a predicate with the query (AND semantics).
    fn filter(&mut self, predicate: Predicate);

    /// Replace the ordering with the given multi-key sort.
    fn order_by(&mut self, keys: &[SortKey]);

    /// Restrict the result to `limit` rows starting at `offset`.
    fn window(&mut self, offset: u64, limit: u64);

    /// Count rows matching the staged filters.
    fn count(&self) -> SourceResult<u64>;

    /// Execute and materialize the result rows.
    fn fetch(self) -> SourceResult<Vec<Row>>;
}
