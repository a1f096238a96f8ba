use crate::ast::{Block, BlockKind};
use crate::diagnostics::ParseError;

mod attribute_state;
mod headings;

fn parse(source: &str) -> (Vec<Block>, Vec<ParseError>) {
    crate::init_logger();
    let mut errors = Vec::new();
    let blocks = super::parse_blocks(source, &mut errors);
    (blocks, errors)
}

fn only(source: &str) -> Block {
    let (mut blocks, errors) = parse(source);
    assert_eq!(errors.len(), 0, "unexpected diagnostics: {errors:?}");
    assert_eq!(blocks.len(), 1, "expected one block: {blocks:?}");
    blocks.remove(0)
}

fn paragraph_text(block: &Block) -> &str {
    match &block.kind {
        BlockKind::Paragraph { children } => match &children[0].kind {
            crate::ast::InlineKind::Text { value } => value,
            other => panic!("expected text inline, got {other:?}"),
        },
        other => panic!("expected paragraph, got {other:?}"),
    }
}
