use similar_asserts::assert_eq;

use super::{only, paragraph_text, parse};
use crate::ast::{Alignment, BlockKind, ColorKind, FontStyle, Position};
use crate::diagnostics::MULTI_ARROW_WARNING_CODE;

#[test]
fn paragraph_gets_tab_position() {
    let block = only("hello");
    assert_eq!(paragraph_text(&block), "hello");
    let attrs = block.attrs.expect("attrs");
    assert_eq!(attrs.position, Some(Position::Left));
    assert_eq!(block.location.map(|l| (l.line, l.column)), Some((1, 1)));

    let centered = only("\thello");
    assert_eq!(
        centered.attrs.expect("attrs").position,
        Some(Position::Center)
    );
    assert_eq!(centered.location.map(|l| l.column), Some(2));

    let right = only("\t\thello");
    assert_eq!(right.attrs.expect("attrs").position, Some(Position::Right));
}

#[test]
fn attribute_line_styles_next_block() {
    let block = only("[red,!#00FF00,bold,2]\ntext");
    let attrs = block.attrs.expect("attrs");
    let color = attrs.color.expect("color");
    assert_eq!(color.value, "red");
    assert_eq!(color.kind, ColorKind::Preset);
    let secondary = attrs.secondary_color.expect("secondary");
    assert_eq!(secondary.value, "#00FF00");
    assert_eq!(secondary.kind, ColorKind::Hex);
    assert_eq!(attrs.font_style, vec![FontStyle::Bold]);
    assert_eq!(attrs.font_size, Some(2.0));
}

#[test]
fn alignment_tokens() {
    assert_eq!(
        only("[c]\ntext").attrs.expect("attrs").align,
        Some(Alignment::Center)
    );
    assert_eq!(
        only("[r]\ntext").attrs.expect("attrs").align,
        Some(Alignment::Right)
    );
}

#[test]
fn attribute_lines_accumulate_until_consumed() {
    let block = only("[red]\n[c]\ntext");
    let attrs = block.attrs.expect("attrs");
    assert_eq!(attrs.color.map(|c| c.value), Some("red".to_string()));
    assert_eq!(attrs.align, Some(Alignment::Center));
}

#[test]
fn arrow_shifts_from_previous_block() {
    let (blocks, errors) = parse("first\n\n[->]\nsecond");
    assert_eq!(errors.len(), 0);
    assert_eq!(blocks.len(), 2);
    let attrs = blocks[1].attrs.as_ref().expect("attrs");
    assert_eq!(attrs.position, Some(Position::Center));
    assert!(attrs.same_line);
}

#[test]
fn double_arrow_shifts_twice_and_third_warns() {
    let (blocks, errors) = parse("[->][->][->]\ntext");
    assert_eq!(blocks.len(), 1);
    let attrs = blocks[0].attrs.as_ref().expect("attrs");
    assert_eq!(attrs.position, Some(Position::Right));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code.as_deref(), Some(MULTI_ARROW_WARNING_CODE));
    assert!(errors[0].message.contains("More than two"));
}

#[test]
fn reverse_arrow_truncates() {
    let attrs = only("[<-]\ntext").attrs.expect("attrs");
    assert!(attrs.truncate_right);
    assert_eq!(attrs.position, Some(Position::Left));

    let both = only("[<->]\ntext").attrs.expect("attrs");
    assert!(both.truncate_right);
    assert!(both.same_line);
    assert_eq!(both.position, Some(Position::Center));
}

#[test]
fn fold_token_folds_next_block() {
    let attrs = only("[fold]\ntext").attrs.expect("attrs");
    assert!(attrs.fold);
}

#[test]
fn invalid_font_size_in_attribute_line_warns() {
    let (blocks, errors) = parse("[12]\ntext");
    assert_eq!(blocks.len(), 1);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("Invalid font size 12"));
}

#[test]
fn pending_state_resets_after_commit() {
    let (blocks, errors) = parse("[red]\nfirst\n\nsecond");
    assert_eq!(errors.len(), 0);
    assert_eq!(blocks.len(), 2);
    assert!(
        blocks[0]
            .attrs
            .as_ref()
            .expect("attrs")
            .color
            .is_some()
    );
    assert!(
        blocks[1]
            .attrs
            .as_ref()
            .expect("attrs")
            .color
            .is_none()
    );
}

#[test]
fn raw_block_for_unrecognized_bracket_line() {
    let block = only("[fn=note] trailing text");
    match &block.kind {
        BlockKind::Raw { value } => assert_eq!(value, "[fn=note] trailing text"),
        other => panic!("expected raw block, got {other:?}"),
    }
}
