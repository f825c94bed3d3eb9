//! Compiled predicates and their evaluation against rows.
//!
//! A `Predicate` is what the compiler hands to a data source. The in-memory
//! source evaluates them with `matches`; a real storage backend would instead
//! translate them to its native query form.

use std::cmp::Ordering;

use serde_json::Value;

use crate::source::Row;

/// A compiled filter predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// A condition on a single field
    Field(FieldPredicate),

    /// Disjunction: at least one alternative must match
    AnyOf(Vec<Predicate>),
}

/// A single-field condition.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldPredicate {
    pub field: String,
    pub op: FieldOp,
}

/// The closed set of field operations the compiler can emit.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldOp {
    Eq(Value),
    Ne(Value),
    /// Case-insensitive substring match
    Contains(String),
    NotContains(String),
    /// Prefix match; `%`/`_` in the value keep their wildcard meaning
    StartsWith(String),
    /// Suffix match; `%`/`_` in the value keep their wildcard meaning
    EndsWith(String),
    /// Null or empty string
    TextBlank,
    /// Neither null nor empty string
    TextNotBlank,
    Lt(Value),
    Gt(Value),
    Gte(Value),
    /// Inclusive on both bounds
    Between(Value, Value),
    Null,
    NotNull,
    In(Vec<Value>),
}

impl Predicate {
    /// A condition on one field.
    pub fn field(field: impl Into<String>, op: FieldOp) -> Self {
        Predicate::Field(FieldPredicate {
            field: field.into(),
            op,
        })
    }

    /// A disjunction of alternatives. An empty disjunction matches nothing.
    pub fn any_of(alternatives: Vec<Predicate>) -> Self {
        Predicate::AnyOf(alternatives)
    }

    /// Evaluate this predicate against a row.
    pub fn matches(&self, row: &Row) -> bool {
        match self {
            Predicate::Field(p) => p.matches(row),
            Predicate::AnyOf(alternatives) => alternatives.iter().any(|p| p.matches(row)),
        }
    }
}

impl FieldPredicate {
    pub fn matches(&self, row: &Row) -> bool {
        // Null and missing attributes are treated alike, as SQL NULL.
        let value = row.get(&self.field).filter(|v| !v.is_null());

        match &self.op {
            FieldOp::TextBlank => match value {
                None => true,
                Some(Value::String(s)) => s.is_empty(),
                Some(_) => false,
            },
            FieldOp::TextNotBlank => match value {
                None => false,
                Some(Value::String(s)) => !s.is_empty(),
                Some(_) => true,
            },
            FieldOp::Null => value.is_none(),
            FieldOp::NotNull => value.is_some(),
            FieldOp::Eq(expected) => value.is_some_and(|v| eq_value(v, expected)),
            FieldOp::Ne(expected) => value.is_some_and(|v| !eq_value(v, expected)),
            FieldOp::Contains(needle) => value.and_then(value_text).is_some_and(|t| {
                t.to_lowercase().contains(&needle.to_lowercase())
            }),
            FieldOp::NotContains(needle) => value.and_then(value_text).is_some_and(|t| {
                !t.to_lowercase().contains(&needle.to_lowercase())
            }),
            FieldOp::StartsWith(prefix) => value.and_then(value_text).is_some_and(|t| {
                like_match(&t.to_lowercase(), &format!("{}%", prefix.to_lowercase()))
            }),
            FieldOp::EndsWith(suffix) => value.and_then(value_text).is_some_and(|t| {
                like_match(&t.to_lowercase(), &format!("%{}", suffix.to_lowercase()))
            }),
            FieldOp::Lt(bound) => compare(value, bound) == Some(Ordering::Less),
            FieldOp::Gt(bound) => compare(value, bound) == Some(Ordering::Greater),
            FieldOp::Gte(bound) => {
                matches!(compare(value, bound), Some(Ordering::Greater | Ordering::Equal))
            }
            FieldOp::Between(lo, hi) => {
                matches!(compare(value, lo), Some(Ordering::Greater | Ordering::Equal))
                    && matches!(compare(value, hi), Some(Ordering::Less | Ordering::Equal))
            }
            FieldOp::In(values) => {
                value.is_some_and(|v| values.iter().any(|candidate| eq_value(v, candidate)))
            }
        }
    }
}

/// Equality with numeric values compared numerically (so an integer row value
/// equals the float the wire carried), everything else compared exactly.
fn eq_value(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => {
            a.as_f64().zip(b.as_f64()).is_some_and(|(a, b)| a == b)
        }
        _ => a == b,
    }
}

/// Ordering for comparison operators: numbers numerically, strings
/// lexicographically, anything else (including cross-type) incomparable.
fn compare(value: Option<&Value>, bound: &Value) -> Option<Ordering> {
    match (value?, bound) {
        (Value::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (Value::String(a), Value::String(b)) => Some(a.as_str().cmp(b.as_str())),
        _ => None,
    }
}

/// Text rendering of a scalar for substring/pattern matching.
/// Nulls, arrays, and objects have no text form and never match.
fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// LIKE-style pattern match: `%` matches any sequence, `_` a single char.
fn like_match(value: &str, pattern: &str) -> bool {
    fn step(value: &[char], pattern: &[char]) -> bool {
        match pattern.split_first() {
            None => value.is_empty(),
            Some((&'%', rest)) => {
                if rest.is_empty() {
                    return true;
                }
                (0..=value.len()).any(|skip| step(&value[skip..], rest))
            }
            Some((&'_', rest)) => !value.is_empty() && step(&value[1..], rest),
            Some((&expected, rest)) => {
                value.first() == Some(&expected) && step(&value[1..], rest)
            }
        }
    }

    let value: Vec<char> = value.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();
    step(&value, &pattern)
}
