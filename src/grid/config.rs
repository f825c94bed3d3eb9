//! Grid configuration.
//!
//! A `GridConfig` is the static binding for one named grid: which entity it
//! queries, the declared field list (static metadata, enumerated in
//! declaration order), per-field projection overrides, computed extra
//! fields, searchable fields, default sort, and eager-load relations.
//!
//! Built once at startup, immutable afterwards, shared as `Arc<GridConfig>`
//! across unbounded concurrent requests.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::query::SortKey;
use crate::source::Row;

/// A per-field projection override: row in, output value out.
pub type ProjectionFn = Arc<dyn Fn(&Row) -> Value + Send + Sync>;

/// A wholesale extra-field producer: row in, mapping of extra values out.
pub type ExtraMapFn = Arc<dyn Fn(&Row) -> Map<String, Value> + Send + Sync>;

/// Computed fields merged into every projected row, after the attribute
/// pass, so extras may override attribute-derived values.
#[derive(Default)]
pub enum ExtraFields {
    #[default]
    None,
    /// One function returning a whole mapping, merged wholesale
    Wholesale(ExtraMapFn),
    /// Independent per-field functions, applied in list order
    PerField(Vec<(String, ProjectionFn)>),
}

/// Static configuration for one grid.
pub struct GridConfig {
    /// Entity/table identity in the data source
    pub entity: String,
    /// Declared attribute list, in declaration order
    pub fields: Vec<String>,
    /// Field → projection override
    pub dictionary: HashMap<String, ProjectionFn>,
    pub extra_fields: ExtraFields,
    /// Fields eligible for free-text search, in disjunction order
    pub searchable_fields: Vec<String>,
    /// Ordering used only when the client supplies no sort
    pub default_sort: Vec<SortKey>,
    /// Related entities to eager-load; affects fetch efficiency only
    pub relations: Vec<String>,
}

impl std::fmt::Debug for GridConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridConfig")
            .field("entity", &self.entity)
            .field("fields", &self.fields)
            .field("dictionary", &self.dictionary.keys().collect::<Vec<_>>())
            .field("searchable_fields", &self.searchable_fields)
            .field("default_sort", &self.default_sort)
            .field("relations", &self.relations)
            .finish()
    }
}

impl GridConfig {
    pub fn builder(entity: impl Into<String>) -> GridConfigBuilder {
        GridConfigBuilder {
            config: GridConfig {
                entity: entity.into(),
                fields: Vec::new(),
                dictionary: HashMap::new(),
                extra_fields: ExtraFields::None,
                searchable_fields: Vec::new(),
                default_sort: Vec::new(),
                relations: Vec::new(),
            },
        }
    }
}

/// Builder for `GridConfig`.
pub struct GridConfigBuilder {
    config: GridConfig,
}

impl GridConfigBuilder {
    /// Declare the entity's attribute list.
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Register a projection override for one declared field.
    pub fn field_transform<F>(mut self, field: impl Into<String>, transform: F) -> Self
    where
        F: Fn(&Row) -> Value + Send + Sync + 'static,
    {
        self.config
            .dictionary
            .insert(field.into(), Arc::new(transform));
        self
    }

    /// Register one computed extra field.
    ///
    /// Replaces a previously set wholesale producer.
    pub fn extra_field<F>(mut self, field: impl Into<String>, compute: F) -> Self
    where
        F: Fn(&Row) -> Value + Send + Sync + 'static,
    {
        let entry = (field.into(), Arc::new(compute) as ProjectionFn);
        match &mut self.config.extra_fields {
            ExtraFields::PerField(list) => list.push(entry),
            other => *other = ExtraFields::PerField(vec![entry]),
        }
        self
    }

    /// Register a wholesale extra-fields producer.
    ///
    /// Replaces any per-field extras registered so far.
    pub fn extra_fields_with<F>(mut self, compute: F) -> Self
    where
        F: Fn(&Row) -> Map<String, Value> + Send + Sync + 'static,
    {
        self.config.extra_fields = ExtraFields::Wholesale(Arc::new(compute));
        self
    }

    pub fn searchable_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.searchable_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn default_sort(mut self, sort: Vec<SortKey>) -> Self {
        self.config.default_sort = sort;
        self
    }

    pub fn relations<I, S>(mut self, relations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.relations = relations.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(self) -> GridConfig {
        self.config
    }
}
