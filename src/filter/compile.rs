//! Filter-model compilation.
//!
//! Turns the per-field filter model into a conjunction of predicates. The
//! compiler only ever *adds* constraints: a filter with an empty primary
//! value (blank/notBlank excepted), an unknown operator, an open-ended range
//! missing its bound, or an empty set compiles to nothing at all.

use chrono::{Days, NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};

use super::predicate::{FieldOp, Predicate};
use super::spec::{
    DateFilter, DateOp, FilterSpec, NumberFilter, NumberOp, SetFilter, TextFilter, TextOp,
};

/// Compile a whole filter model. Fields are AND-combined; there is no
/// cross-field OR in the filter model.
pub fn compile_filter_model(model: &Map<String, Value>) -> Vec<Predicate> {
    let mut predicates = Vec::new();
    for (field, raw) in model {
        compile_field(field, &FilterSpec::from_value(raw), &mut predicates);
    }
    predicates
}

/// Compile one field's filter spec, appending zero or more predicates.
pub fn compile_field(field: &str, spec: &FilterSpec, out: &mut Vec<Predicate>) {
    match spec {
        FilterSpec::Text(text) => compile_text(field, text, out),
        FilterSpec::Number(number) => compile_number(field, number, out),
        FilterSpec::Date(date) => compile_date(field, date, out),
        FilterSpec::Set(set) => compile_set(field, set, out),
        FilterSpec::Simple(raw) => compile_simple(field, raw, out),
    }
}

fn compile_text(field: &str, spec: &TextFilter, out: &mut Vec<Predicate>) {
    match spec.op {
        TextOp::Blank => return out.push(Predicate::field(field, FieldOp::TextBlank)),
        TextOp::NotBlank => return out.push(Predicate::field(field, FieldOp::TextNotBlank)),
        _ => {}
    }

    let Some(value) = spec.filter.as_deref().filter(|v| !v.is_empty()) else {
        return;
    };
    let value = value.to_string();

    let op = match spec.op {
        TextOp::Equals => FieldOp::Eq(Value::String(value)),
        TextOp::NotEqual => FieldOp::Ne(Value::String(value)),
        TextOp::Contains => FieldOp::Contains(value),
        TextOp::NotContains => FieldOp::NotContains(value),
        TextOp::StartsWith => FieldOp::StartsWith(value),
        TextOp::EndsWith => FieldOp::EndsWith(value),
        TextOp::Blank | TextOp::NotBlank | TextOp::Unknown => return,
    };
    out.push(Predicate::field(field, op));
}

fn compile_number(field: &str, spec: &NumberFilter, out: &mut Vec<Predicate>) {
    match spec.op {
        NumberOp::Blank => return out.push(Predicate::field(field, FieldOp::Null)),
        NumberOp::NotBlank => return out.push(Predicate::field(field, FieldOp::NotNull)),
        _ => {}
    }

    let Some(value) = spec.filter else {
        return;
    };
    let value = Value::from(value);

    let op = match spec.op {
        NumberOp::Equals => FieldOp::Eq(value),
        NumberOp::NotEqual => FieldOp::Ne(value),
        NumberOp::LessThan => FieldOp::Lt(value),
        NumberOp::GreaterThan => FieldOp::Gt(value),
        NumberOp::GreaterThanOrEqual => FieldOp::Gte(value),
        NumberOp::InRange => match spec.filter_to {
            Some(upper) => FieldOp::Between(value, Value::from(upper)),
            // Open-ended range: no constraint at all
            None => return,
        },
        NumberOp::Blank | NumberOp::NotBlank | NumberOp::Unknown => return,
    };
    out.push(Predicate::field(field, op));
}

fn compile_date(field: &str, spec: &DateFilter, out: &mut Vec<Predicate>) {
    match spec.op {
        DateOp::Blank => return out.push(Predicate::field(field, FieldOp::Null)),
        DateOp::NotBlank => return out.push(Predicate::field(field, FieldOp::NotNull)),
        _ => {}
    }

    let Some(from) = spec.date_from.as_deref().filter(|v| !v.is_empty()) else {
        return;
    };

    match spec.op {
        DateOp::Equals => {
            // Date-only equality: the half-open day range [from, from+1day).
            // An unparseable bound compiles to nothing, like an empty one.
            let Some(next_day) = day_after(from) else {
                return;
            };
            out.push(Predicate::field(field, FieldOp::Gte(Value::from(from))));
            out.push(Predicate::field(field, FieldOp::Lt(Value::from(next_day))));
        }
        DateOp::LessThan => out.push(Predicate::field(field, FieldOp::Lt(Value::from(from)))),
        DateOp::InRange => {
            if let Some(to) = spec.date_to.as_deref().filter(|v| !v.is_empty()) {
                out.push(Predicate::field(
                    field,
                    FieldOp::Between(Value::from(from), Value::from(to)),
                ));
            }
        }
        DateOp::Blank | DateOp::NotBlank | DateOp::Unknown => {}
    }
}

fn compile_set(field: &str, spec: &SetFilter, out: &mut Vec<Predicate>) {
    if !spec.values.is_empty() {
        out.push(Predicate::field(field, FieldOp::In(spec.values.clone())));
    }
}

fn compile_simple(field: &str, raw: &Value, out: &mut Vec<Predicate>) {
    match raw {
        Value::Object(map) => {
            let needle = map.get("filter").and_then(scalar_text);
            if let Some(needle) = needle.filter(|n| !n.is_empty()) {
                out.push(Predicate::field(field, FieldOp::Contains(needle)));
            }
        }
        Value::String(s) if s.is_empty() => {}
        Value::String(_) | Value::Number(_) | Value::Bool(_) => {
            out.push(Predicate::field(field, FieldOp::Eq(raw.clone())));
        }
        Value::Null | Value::Array(_) => {}
    }
}

/// Midnight after the day `date_from` falls on, as `YYYY-MM-DD` text.
fn day_after(date_from: &str) -> Option<String> {
    let date = NaiveDateTime::parse_from_str(date_from, "%Y-%m-%d %H:%M:%S")
        .map(|dt| dt.date())
        .or_else(|_| NaiveDate::parse_from_str(date_from, "%Y-%m-%d"))
        .ok()?;
    let next = date.checked_add_days(Days::new(1))?;
    Some(next.format("%Y-%m-%d").to_string())
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
