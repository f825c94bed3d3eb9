//! Free-text search compilation.

use crate::filter::{FieldOp, Predicate};

/// Compile a search term into one disjunctive predicate: a case-insensitive
/// substring match per searchable field, OR-combined. The caller conjoins the
/// result with the filter chain, so search ANDs with filters while ORing
/// across fields.
///
/// Returns `None` when the term is empty or no fields are searchable.
pub fn compile_search(term: &str, searchable_fields: &[String]) -> Option<Predicate> {
    if term.is_empty() || searchable_fields.is_empty() {
        return None;
    }

    Some(Predicate::any_of(
        searchable_fields
            .iter()
            .map(|field| Predicate::field(field, FieldOp::Contains(term.to_string())))
            .collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Row;
    use serde_json::json;

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_empty_term_or_fields_means_no_predicate() {
        assert!(compile_search("", &fields(&["name"])).is_none());
        assert!(compile_search("term", &[]).is_none());
    }

    #[test]
    fn test_matches_when_any_field_contains_the_term() {
        let predicate = compile_search("ali", &fields(&["name", "email"])).unwrap();

        let by_name = Row::from_value(json!({"name": "Alice", "email": "a@x.io"})).unwrap();
        let by_email = Row::from_value(json!({"name": "Bob", "email": "ali@x.io"})).unwrap();
        let neither = Row::from_value(json!({"name": "Bob", "email": "bob@x.io"})).unwrap();

        assert!(predicate.matches(&by_name));
        assert!(predicate.matches(&by_email));
        assert!(!predicate.matches(&neither));
    }

    #[test]
    fn test_whole_string_match_no_tokenization() {
        let predicate = compile_search("alice b", &fields(&["name"])).unwrap();

        let joined = Row::from_value(json!({"name": "alice brown"})).unwrap();
        let split = Row::from_value(json!({"name": "brown, alice"})).unwrap();

        assert!(predicate.matches(&joined));
        assert!(!predicate.matches(&split));
    }
}
