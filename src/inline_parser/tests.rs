use similar_asserts::assert_eq;

use super::parse_inlines;
use crate::ast::{ColorKind, FontStyle, HighlightMode, Inline, InlineKind};
use crate::diagnostics::{ParseError, Severity};

fn parse(text: &str) -> (Vec<Inline>, Vec<ParseError>) {
    let mut errors = Vec::new();
    let nodes = parse_inlines(text, &mut errors, 1);
    (nodes, errors)
}

fn text_value(node: &Inline) -> &str {
    match &node.kind {
        InlineKind::Text { value } => value,
        other => panic!("expected text, got {other:?}"),
    }
}

#[test]
fn plain_text_is_one_node() {
    let (nodes, errors) = parse("just words");
    assert_eq!(errors.len(), 0);
    assert_eq!(nodes.len(), 1);
    assert_eq!(text_value(&nodes[0]), "just words");
}

#[test]
fn style_markers_nest() {
    let (nodes, errors) = parse("a *bold /lean/* z");
    assert_eq!(errors.len(), 0);
    assert_eq!(nodes.len(), 3);
    assert_eq!(text_value(&nodes[0]), "a ");
    let InlineKind::Strong { children } = &nodes[1].kind else {
        panic!("expected strong");
    };
    assert_eq!(text_value(&children[0]), "bold ");
    assert!(matches!(children[1].kind, InlineKind::Em { .. }));
    assert_eq!(text_value(&nodes[2]), " z");
}

#[test]
fn caret_markers_pick_sup_and_sub() {
    let (nodes, _) = parse("x^2^ and y^^i^^");
    assert!(matches!(nodes[1].kind, InlineKind::Sup { .. }));
    assert!(matches!(nodes[3].kind, InlineKind::Sub { .. }));
}

#[test]
fn unterminated_style_degrades_with_warning() {
    let (nodes, errors) = parse("*never closed");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].severity, Severity::Warning);
    assert!(errors[0].message.contains("style delimiter"));
    assert_eq!(text_value(&nodes[0]), "*never closed");
}

#[test]
fn code_span_keeps_markers_verbatim() {
    let (nodes, errors) = parse("run `a *b* c` now");
    assert_eq!(errors.len(), 0);
    let InlineKind::CodeSpan { value } = &nodes[1].kind else {
        panic!("expected code span");
    };
    assert_eq!(value, "a *b* c");
}

#[test]
fn double_backticks_open_a_frame_highlight() {
    let (nodes, errors) = parse("``boxed *strong*``");
    assert_eq!(errors.len(), 0);
    let InlineKind::Highlight { mode, children, .. } = &nodes[0].kind else {
        panic!("expected highlight");
    };
    assert_eq!(*mode, HighlightMode::Frame);
    assert!(matches!(children[1].kind, InlineKind::Strong { .. }));
}

#[test]
fn frame_highlight_requires_matching_tick_count() {
    // Three ticks close only on three ticks; the inner double tick is
    // content, and its own re-parse degrades with a warning.
    let (nodes, errors) = parse("```a``b```");
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("frame highlight"));
    let InlineKind::Highlight { children, .. } = &nodes[0].kind else {
        panic!("expected highlight");
    };
    assert_eq!(text_value(&children[0]), "a");
    assert_eq!(text_value(&children[1]), "``b");
}

#[test]
fn marker_highlight_and_literal_fallbacks() {
    let (nodes, errors) = parse("=note=");
    assert_eq!(errors.len(), 0);
    assert!(matches!(
        nodes[0].kind,
        InlineKind::Highlight {
            mode: HighlightMode::Marker,
            ..
        }
    ));

    let (nodes, errors) = parse("1 = 1");
    assert_eq!(errors.len(), 0);
    assert_eq!(nodes.len(), 3);
    assert_eq!(text_value(&nodes[0]), "1 ");
    assert_eq!(text_value(&nodes[1]), "=");
    assert_eq!(text_value(&nodes[2]), " 1");

    let (nodes, _) = parse("a == b");
    assert_eq!(text_value(&nodes[1]), "==");

    let (nodes, _) = parse("tail =");
    assert_eq!(text_value(&nodes[1]), "=");
}

#[test]
fn escape_makes_marker_literal() {
    let (nodes, errors) = parse(r"\*not bold\*");
    assert_eq!(errors.len(), 0);
    assert_eq!(nodes.len(), 1);
    assert_eq!(text_value(&nodes[0]), "*not bold*");
}

#[test]
fn disabled_span_is_literal_interior() {
    let (nodes, errors) = parse("{*raw* [red]}");
    assert_eq!(errors.len(), 0);
    assert_eq!(nodes.len(), 1);
    assert_eq!(text_value(&nodes[0]), "*raw* [red]");
}

#[test]
fn unterminated_disabled_span_warns_and_keeps_brace() {
    let (nodes, errors) = parse("{open");
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("disabled inline segment"));
    assert_eq!(text_value(&nodes[0]), "{open");
}

#[test]
fn footnote_ref_records_location() {
    let mut errors = Vec::new();
    let nodes = parse_inlines("see [fn:alpha].", &mut errors, 7);
    let InlineKind::FootnoteRef { id } = &nodes[1].kind else {
        panic!("expected footnote ref");
    };
    assert_eq!(id, "alpha");
    let location = nodes[1].location.expect("location");
    assert_eq!(location.line, 7);
    assert_eq!(location.column, 5);
}

#[test]
fn empty_footnote_id_is_literal() {
    let (nodes, errors) = parse("[fn: ]");
    assert_eq!(errors.len(), 0);
    assert_eq!(text_value(&nodes[0]), "[fn: ]");
}

#[test]
fn inline_comment_scans_to_close_marker() {
    let (nodes, errors) = parse("a[comment]hidden *x*[/]b");
    assert_eq!(errors.len(), 0);
    let InlineKind::Comment { children } = &nodes[1].kind else {
        panic!("expected inline comment");
    };
    assert!(matches!(children[1].kind, InlineKind::Strong { .. }));
    assert_eq!(text_value(&nodes[2]), "b");
}

#[test]
fn link_keyword_with_color_groups() {
    let (nodes, errors) = parse("[link][blue][!#888]home page(https://example.com)");
    assert_eq!(errors.len(), 0);
    let InlineKind::Link {
        href,
        children,
        color,
        underline_color,
    } = &nodes[0].kind
    else {
        panic!("expected link");
    };
    assert_eq!(href, "https://example.com");
    assert_eq!(text_value(&children[0]), "home page");
    assert_eq!(color.as_ref().map(|c| c.value.as_str()), Some("blue"));
    let underline = underline_color.as_ref().expect("underline color");
    assert_eq!(underline.kind, ColorKind::Hex);
    assert_eq!(underline.value, "#888");
}

#[test]
fn link_without_url_warns() {
    let (nodes, errors) = parse("[link]text only");
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("Missing (url)"));
    assert_eq!(text_value(&nodes[0]), "[link]text only");
}

#[test]
fn link_with_empty_url_warns() {
    let (nodes, errors) = parse("[link]text()");
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("Empty url"));
    assert_eq!(text_value(&nodes[0]), "[link]text()");
}

#[test]
fn attribute_scope_runs_to_explicit_close() {
    let (nodes, errors) = parse("[red]warm[/] cool");
    assert_eq!(errors.len(), 0);
    let InlineKind::Attrs { attrs, children } = &nodes[0].kind else {
        panic!("expected attrs");
    };
    assert_eq!(attrs.color.as_ref().map(|c| c.value.as_str()), Some("red"));
    assert_eq!(text_value(&children[0]), "warm");
    assert_eq!(text_value(&nodes[1]), " cool");
}

#[test]
fn consecutive_attribute_brackets_merge() {
    let (nodes, errors) = parse("[red][bold]text");
    assert_eq!(errors.len(), 0);
    assert_eq!(nodes.len(), 1);
    let InlineKind::Attrs { attrs, children } = &nodes[0].kind else {
        panic!("expected attrs");
    };
    assert_eq!(attrs.color.as_ref().map(|c| c.value.as_str()), Some("red"));
    assert_eq!(attrs.font_style, vec![FontStyle::Bold]);
    assert_eq!(text_value(&children[0]), "text");
}

#[test]
fn short_style_aliases_apply() {
    let (nodes, _) = parse("[i,bb,2.5]styled[/]");
    let InlineKind::Attrs { attrs, .. } = &nodes[0].kind else {
        panic!("expected attrs");
    };
    assert_eq!(attrs.font_style, vec![FontStyle::Italic, FontStyle::Heavy]);
    assert_eq!(attrs.font_size, Some(2.5));
}

#[test]
fn attribute_scope_stops_at_next_attribute_bracket() {
    let (nodes, errors) = parse("[red]one[blue]two");
    assert_eq!(errors.len(), 0);
    assert_eq!(nodes.len(), 2);
    let InlineKind::Attrs { attrs, children } = &nodes[0].kind else {
        panic!("expected attrs");
    };
    assert_eq!(attrs.color.as_ref().map(|c| c.value.as_str()), Some("red"));
    assert_eq!(text_value(&children[0]), "one");
    let InlineKind::Attrs { attrs, .. } = &nodes[1].kind else {
        panic!("expected attrs");
    };
    assert_eq!(attrs.color.as_ref().map(|c| c.value.as_str()), Some("blue"));
}

#[test]
fn attribute_scope_binds_tightly_to_next_construct() {
    let (nodes, errors) = parse("[green]*loud* rest");
    assert_eq!(errors.len(), 0);
    let InlineKind::Attrs { children, .. } = &nodes[0].kind else {
        panic!("expected attrs");
    };
    assert_eq!(children.len(), 1);
    assert!(matches!(children[0].kind, InlineKind::Strong { .. }));
    assert_eq!(text_value(&nodes[1]), " rest");
}

#[test]
fn highlight_absorbs_attribute_colors() {
    let (nodes, errors) = parse("[red,!yellow]=marked=");
    assert_eq!(errors.len(), 0);
    let InlineKind::Attrs { attrs, children } = &nodes[0].kind else {
        panic!("expected attrs");
    };
    assert!(attrs.color.is_none());
    assert!(attrs.secondary_color.is_none());
    let InlineKind::Highlight {
        color, fill_color, ..
    } = &children[0].kind
    else {
        panic!("expected highlight");
    };
    assert_eq!(color.as_ref().map(|c| c.value.as_str()), Some("red"));
    assert_eq!(fill_color.as_ref().map(|c| c.value.as_str()), Some("yellow"));
}

#[test]
fn bare_text_url_after_attrs_is_a_colored_link() {
    let (nodes, errors) = parse("[blue]docs(https://example.com/docs)");
    assert_eq!(errors.len(), 0);
    let InlineKind::Link {
        href,
        children,
        color,
        ..
    } = &nodes[0].kind
    else {
        panic!("expected link");
    };
    assert_eq!(href, "https://example.com/docs");
    assert_eq!(text_value(&children[0]), "docs");
    assert_eq!(color.as_ref().map(|c| c.value.as_str()), Some("blue"));
}

#[test]
fn invalid_font_size_in_attrs_warns() {
    let (_, errors) = parse("[12]big[/]");
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("Invalid font size 12"));
}

#[test]
fn unterminated_bracket_is_literal_with_warning() {
    let (nodes, errors) = parse("[red");
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("bracket expression"));
    assert_eq!(text_value(&nodes[0]), "[red");
}

#[test]
fn empty_brackets_are_literal() {
    let (nodes, errors) = parse("a[]b");
    assert_eq!(errors.len(), 0);
    assert_eq!(text_value(&nodes[1]), "[]");
}

#[test]
fn attribute_scope_covers_cjk_text() {
    let (nodes, errors) = parse("[red]这是中文[/]后续");
    assert_eq!(errors.len(), 0);
    let InlineKind::Attrs { children, .. } = &nodes[0].kind else {
        panic!("expected attrs");
    };
    assert_eq!(text_value(&children[0]), "这是中文");
    assert_eq!(text_value(&nodes[1]), "后续");
}
