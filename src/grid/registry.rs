//! The grid registry.
//!
//! Name → configuration map, populated at process start and never mutated
//! during request handling. Safe for unbounded concurrent readers.

use std::collections::HashMap;
use std::sync::Arc;

use crate::query::{GridError, GridResult};

use super::config::GridConfig;

/// Read-only registry of bound grid configurations.
#[derive(Default)]
pub struct GridRegistry {
    grids: HashMap<String, Arc<GridConfig>>,
}

impl GridRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a configuration under a grid name, replacing any previous one.
    pub fn register(&mut self, name: impl Into<String>, config: GridConfig) {
        self.grids.insert(name.into(), Arc::new(config));
    }

    /// Resolve a grid name.
    pub fn get(&self, name: &str) -> GridResult<Arc<GridConfig>> {
        self.grids
            .get(name)
            .cloned()
            .ok_or_else(|| GridError::ConfigurationNotFound(name.to_string()))
    }

    /// Registered grid names, unordered.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.grids.keys().map(String::as_str)
    }
}
