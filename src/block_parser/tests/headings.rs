use similar_asserts::assert_eq;

use super::{only, parse};
use crate::ast::{BlockKind, InlineKind};

fn heading_parts(block: &crate::ast::Block) -> (u8, bool, String) {
    match &block.kind {
        BlockKind::Heading {
            level,
            foldable,
            children,
        } => {
            let text = match &children[0].kind {
                InlineKind::Text { value } => value.clone(),
                other => panic!("expected text, got {other:?}"),
            };
            (*level, *foldable, text)
        }
        other => panic!("expected heading, got {other:?}"),
    }
}

#[test]
fn heading_levels() {
    let (level, foldable, text) = heading_parts(&only("# Title"));
    assert_eq!((level, foldable, text.as_str()), (1, false, "Title"));

    let (level, _, _) = heading_parts(&only("##### Deep"));
    assert_eq!(level, 5);
}

#[test]
fn six_hashes_is_not_a_heading() {
    let block = only("###### nope");
    assert!(matches!(block.kind, BlockKind::Paragraph { .. }));
}

#[test]
fn hash_without_space_is_a_paragraph() {
    let block = only("#nope");
    assert!(matches!(block.kind, BlockKind::Paragraph { .. }));
}

#[test]
fn foldable_heading_folds_following_block() {
    let (blocks, errors) = parse("##+ Section\ncontent");
    assert_eq!(errors.len(), 0);
    assert_eq!(blocks.len(), 2);

    let (level, foldable, text) = heading_parts(&blocks[0]);
    assert_eq!((level, foldable, text.as_str()), (2, true, "Section"));
    assert!(blocks[1].attrs.as_ref().expect("attrs").fold);
}

#[test]
fn heading_interrupts_a_paragraph_run() {
    let (blocks, errors) = parse("text\n# Head");
    assert_eq!(errors.len(), 0);
    assert_eq!(blocks.len(), 2);
    assert!(matches!(blocks[0].kind, BlockKind::Paragraph { .. }));
    assert!(matches!(blocks[1].kind, BlockKind::Heading { .. }));
}
