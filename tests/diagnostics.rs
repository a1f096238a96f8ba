//! Diagnostic reporting across the parse stages.

use similar_asserts::assert_eq;
use vellum::{
    MULTI_ARROW_WARNING_CODE, ParseOptions, Severity, parse, parse_with_defaults,
};

#[test]
fn block_errors_come_before_inline_warnings() {
    let result = parse_with_defaults("*oops\n\n```\ndangling");
    assert_eq!(result.errors.len(), 2);

    assert_eq!(result.errors[0].severity, Severity::Error);
    assert_eq!(result.errors[0].line, 3);
    assert!(result.errors[0].message.contains("not closed"));

    assert_eq!(result.errors[1].severity, Severity::Warning);
    assert_eq!(result.errors[1].line, 1);
    assert!(
        result.errors[1]
            .message
            .contains("Missing closing style delimiter")
    );
}

#[test]
fn inline_warnings_carry_the_owning_block_line() {
    let result = parse_with_defaults("fine\n\nalso fine\n\nbroken `span");
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].line, 5);
    assert!(result.errors[0].message.contains("backtick"));
}

#[test]
fn missing_footnote_definition_points_at_first_reference() {
    let result = parse_with_defaults("see [fn:ghost] and again [fn:ghost]");
    assert_eq!(result.errors.len(), 1);
    let error = &result.errors[0];
    assert_eq!(error.severity, Severity::Warning);
    assert_eq!(error.line, 1);
    assert_eq!(error.column, Some(5));
    assert!(
        error
            .message
            .contains("Footnote reference \"ghost\" has no corresponding definition")
    );
}

#[test]
fn missing_definition_from_include_names_the_origin() {
    let options = ParseOptions::new()
        .with_load_file(|target, _| (target == "notes.vel").then(|| "see [fn:lost]".to_string()));
    let result = parse("[@](notes.vel)", &options);
    assert_eq!(result.errors.len(), 1);
    assert!(
        result.errors[0]
            .message
            .contains("(from include \"notes.vel\")")
    );
}

#[test]
fn multi_arrow_warning_is_machine_readable() {
    let result = parse_with_defaults("[->][->][->]\ntext");
    assert_eq!(result.errors.len(), 1);
    assert_eq!(
        result.errors[0].code.as_deref(),
        Some(MULTI_ARROW_WARNING_CODE)
    );
}

#[test]
fn degraded_constructs_still_produce_output() {
    let result = parse_with_defaults("a *b and\n\nbad `c");
    assert_eq!(result.errors.len(), 2);
    assert_eq!(result.document.children.len(), 2);
}
