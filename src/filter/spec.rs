//! The client-facing filter specification.
//!
//! One `FilterSpec` per filtered field, tagged by the `filterType` key (the
//! `type` key is accepted as a fallback tag, since some grid configurations
//! send only that). Payloads that fit none of the typed kinds land in the
//! `Simple` kind instead of failing: filter parsing is deliberately lenient,
//! a malformed spec is a no-op, never a request error.

use serde::Deserialize;
use serde_json::Value;

/// A typed per-field filter.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterSpec {
    Text(TextFilter),
    Number(NumberFilter),
    Date(DateFilter),
    Set(SetFilter),
    /// Untyped fallback: a mapping with a `filter` key means substring match,
    /// a bare scalar means equality.
    Simple(Value),
}

impl FilterSpec {
    /// Parse a raw filter-model entry.
    ///
    /// Never fails: anything that does not parse as one of the typed kinds is
    /// carried as `Simple`.
    pub fn from_value(raw: &Value) -> Self {
        let Value::Object(map) = raw else {
            return FilterSpec::Simple(raw.clone());
        };

        let kind = map
            .get("filterType")
            .or_else(|| map.get("type"))
            .and_then(Value::as_str);

        let parsed = match kind {
            Some("text") => serde_json::from_value(raw.clone()).map(FilterSpec::Text).ok(),
            Some("number") => serde_json::from_value(raw.clone()).map(FilterSpec::Number).ok(),
            Some("date") => serde_json::from_value(raw.clone()).map(FilterSpec::Date).ok(),
            Some("set") => serde_json::from_value(raw.clone()).map(FilterSpec::Set).ok(),
            _ => None,
        };

        parsed.unwrap_or_else(|| FilterSpec::Simple(raw.clone()))
    }
}

/// Text filter payload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TextFilter {
    #[serde(rename = "type", default)]
    pub op: TextOp,
    #[serde(default)]
    pub filter: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextOp {
    Equals,
    NotEqual,
    #[default]
    Contains,
    NotContains,
    StartsWith,
    EndsWith,
    Blank,
    NotBlank,
    /// Operators this compiler does not know compile to no constraint
    #[serde(other)]
    Unknown,
}

/// Number filter payload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NumberFilter {
    #[serde(rename = "type", default)]
    pub op: NumberOp,
    #[serde(default)]
    pub filter: Option<f64>,
    #[serde(rename = "filterTo", default)]
    pub filter_to: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NumberOp {
    #[default]
    Equals,
    NotEqual,
    LessThan,
    GreaterThan,
    // There is deliberately no lessThanOrEqual counterpart; the wire
    // contract only carries this one inclusive bound.
    GreaterThanOrEqual,
    InRange,
    Blank,
    NotBlank,
    #[serde(other)]
    Unknown,
}

/// Date filter payload. Bounds arrive as ISO text (`YYYY-MM-DD`, optionally
/// with a time part).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DateFilter {
    #[serde(rename = "type", default)]
    pub op: DateOp,
    #[serde(rename = "dateFrom", default)]
    pub date_from: Option<String>,
    #[serde(rename = "dateTo", default)]
    pub date_to: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DateOp {
    #[default]
    Equals,
    LessThan,
    InRange,
    Blank,
    NotBlank,
    #[serde(other)]
    Unknown,
}

/// Set filter payload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SetFilter {
    #[serde(default)]
    pub values: Vec<Value>,
}
