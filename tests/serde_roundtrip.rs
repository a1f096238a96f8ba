//! JSON serialization of parsed documents (`serde` feature).

#![cfg(feature = "serde")]

use similar_asserts::assert_eq;
use vellum::{Document, parse_with_defaults};

#[test]
fn document_round_trips_through_json() {
    let source = "\
# Title

A paragraph with *strong* text and a [red]colored run[/].

- item one
- item two";
    let result = parse_with_defaults(source);
    assert!(result.errors.is_empty(), "{:?}", result.errors);

    let json = serde_json::to_string(&result.document).expect("serialize");
    let decoded: Document = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(decoded, result.document);
}

#[test]
fn block_kinds_are_tagged_by_type() {
    let result = parse_with_defaults("# Title");
    let json = serde_json::to_value(&result.document.children[0]).expect("serialize");
    assert_eq!(json["kind"]["type"], "heading");
    assert_eq!(json["kind"]["level"], 1);
}

#[test]
fn errors_serialize_with_severity() {
    let result = parse_with_defaults("`unterminated");
    let json = serde_json::to_value(&result.errors[0]).expect("serialize");
    assert_eq!(json["severity"], "warning");
    assert_eq!(json["line"], 1);
}
