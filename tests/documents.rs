//! End-to-end parses of whole documents through the public API.

use similar_asserts::assert_eq;
use vellum::ast::{Alignment, Position};
use vellum::{Block, BlockKind, InlineKind, parse_with_defaults};

fn children_of(source: &str) -> Vec<Block> {
    let result = parse_with_defaults(source);
    assert!(result.errors.is_empty(), "{:?}", result.errors);
    result.document.children
}

fn text_of(inlines: &[vellum::Inline]) -> String {
    let mut out = String::new();
    for inline in inlines {
        if let InlineKind::Text { value } = &inline.kind {
            out.push_str(value);
        }
    }
    out
}

#[test]
fn article_with_mixed_blocks() {
    let source = "\
# Travel notes

First day: we landed /late/ and took the *night train*.

- pack lighter
- book earlier

@ The mountains are calling.

---

```sh
vellum render notes.vel
```";
    let children = children_of(source);
    assert_eq!(children.len(), 6);
    assert!(matches!(children[0].kind, BlockKind::Heading { level: 1, .. }));
    assert!(matches!(children[1].kind, BlockKind::Paragraph { .. }));
    assert!(matches!(children[2].kind, BlockKind::List { .. }));
    assert!(matches!(children[3].kind, BlockKind::Quote { .. }));
    assert!(matches!(children[4].kind, BlockKind::HorizontalRule { .. }));
    assert!(matches!(children[5].kind, BlockKind::Code { .. }));
}

#[test]
fn inline_enrichment_reaches_every_container() {
    let source = "\
# A /styled/ heading

[sheet]
| *bold cell* | plain |

- a list with `code`";
    let children = children_of(source);

    match &children[0].kind {
        BlockKind::Heading { children, .. } => {
            assert!(children.iter().any(|i| matches!(i.kind, InlineKind::Em { .. })));
        }
        other => panic!("expected heading, got {other:?}"),
    }
    match &children[1].kind {
        BlockKind::Table { rows, .. } => {
            assert!(matches!(
                rows[0].cells[0].children[0].kind,
                InlineKind::Strong { .. }
            ));
        }
        other => panic!("expected table, got {other:?}"),
    }
    match &children[2].kind {
        BlockKind::List { items, .. } => match &items[0].kind {
            BlockKind::ListItem { children, .. } => match &children[0].kind {
                BlockKind::Paragraph { children } => {
                    assert!(
                        children
                            .iter()
                            .any(|i| matches!(i.kind, InlineKind::CodeSpan { .. }))
                    );
                }
                other => panic!("expected paragraph, got {other:?}"),
            },
            other => panic!("expected list item, got {other:?}"),
        },
        other => panic!("expected list, got {other:?}"),
    }
}

#[test]
fn layout_attributes_survive_the_pipeline() {
    let source = "\tcentered line\n\n[r]\nright aligned text";
    let children = children_of(source);
    assert_eq!(children.len(), 2);
    assert_eq!(
        children[0].attrs.as_ref().and_then(|a| a.position),
        Some(Position::Center)
    );
    assert_eq!(
        children[1].attrs.as_ref().and_then(|a| a.align),
        Some(Alignment::Right)
    );
}

#[test]
fn footnote_reference_resolves_to_region_definition() {
    let source = "\
The claim[fn:src] needs backing.

[footnotes]
[fn=src]
See the appendix.";
    let result = parse_with_defaults(source);
    assert!(result.errors.is_empty(), "{:?}", result.errors);

    let children = result.document.children;
    match &children[0].kind {
        BlockKind::Paragraph { children } => {
            assert!(
                children
                    .iter()
                    .any(|i| matches!(&i.kind, InlineKind::FootnoteRef { id } if id == "src"))
            );
        }
        other => panic!("expected paragraph, got {other:?}"),
    }
    assert!(matches!(children[1].kind, BlockKind::Footnotes { .. }));
}

#[test]
fn tagged_and_comment_wrappers() {
    let source = "[t=pull-quote]\nQuotable line\n\n[comment]\neditor note";
    let children = children_of(source);
    match &children[0].kind {
        BlockKind::Tagged { name, child } => {
            assert_eq!(name, "pull-quote");
            match &child.kind {
                BlockKind::Paragraph { children } => {
                    assert_eq!(text_of(children), "Quotable line");
                }
                other => panic!("expected paragraph, got {other:?}"),
            }
        }
        other => panic!("expected tagged block, got {other:?}"),
    }
    assert!(matches!(children[1].kind, BlockKind::Comment { .. }));
}

#[test]
fn disabled_block_is_opaque_to_inline_parsing() {
    let children = children_of("[d]\n*not parsed* [fn:nope]");
    match &children[0].kind {
        BlockKind::Disabled { raw } => assert_eq!(raw, "*not parsed* [fn:nope]"),
        other => panic!("expected disabled block, got {other:?}"),
    }
}

#[test]
fn source_text_is_kept_on_the_document() {
    let result = parse_with_defaults("hello");
    assert_eq!(result.document.source.as_deref(), Some("hello"));
}
