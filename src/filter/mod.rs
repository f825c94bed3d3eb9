//! # Predicate Compiler
//!
//! Parses the client's per-field filter model into a closed `FilterSpec` sum
//! type and compiles it into a conjunction of `Predicate` values a data
//! source can run.

mod compile;
mod predicate;
mod spec;

pub use compile::{compile_field, compile_filter_model};
pub use predicate::{FieldOp, FieldPredicate, Predicate};
pub use spec::{
    DateFilter, DateOp, FilterSpec, NumberFilter, NumberOp, SetFilter, TextFilter, TextOp,
};
