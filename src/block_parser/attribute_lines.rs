//! Attribute-only lines: `[...]` groups (and whitespace) with no content.
//!
//! They never become blocks themselves; each token mutates the pending
//! context the next committed block consumes.

use crate::ast::{Alignment, ColorAttribute};
use crate::attributes::{
    font_style_from_token, is_shift_token, parse_numeric_token, split_attr_parts, valid_font_size,
};
use crate::diagnostics::{MULTI_ARROW_WARNING_CODE, ParseError};

use super::{BlockParser, includes, shift_position_right};

/// A line is attribute-only when, after trimming, it consists of bracket
/// groups separated by nothing but spaces and tabs. Include directives look
/// the same and are excluded up front.
pub(super) fn is_attribute_only_line(trimmed: &str) -> bool {
    if trimmed.is_empty() || includes::match_include(trimmed).is_some() {
        return false;
    }
    let chars: Vec<char> = trimmed.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '[' => {
                let Some(close) = chars[i + 1..].iter().position(|&c| c == ']') else {
                    return false;
                };
                i += close + 2;
            }
            ' ' | '\t' => i += 1,
            _ => return false,
        }
    }
    true
}

pub(super) fn apply_attribute_line(parser: &mut BlockParser<'_, '_>, trimmed: &str) {
    let line = parser.pos + 1;
    let mut attrs = parser.pending.attrs.take();
    let mut arrow_count = 0usize;

    let chars: Vec<char> = trimmed.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        if chars[i] != '[' {
            i += 1;
            continue;
        }
        let Some(close) = chars[i + 1..].iter().position(|&c| c == ']') else {
            break;
        };
        let inside: String = chars[i + 1..i + 1 + close].iter().collect();
        i += close + 2;

        for part in split_attr_parts(&inside) {
            apply_token(parser, &mut attrs, part, &mut arrow_count, line);
        }
    }

    parser.pending.attrs = attrs;
}

fn apply_token(
    parser: &mut BlockParser<'_, '_>,
    attrs: &mut Option<crate::ast::BlockAttributes>,
    part: &str,
    arrow_count: &mut usize,
    line: usize,
) {
    if is_shift_token(part) {
        *arrow_count += 1;
        if part == "->" && *arrow_count > 2 {
            parser.errors.push(
                ParseError::warning(
                    "More than two [->] attributes in a row; extra [->] will be treated as plain text.",
                    line,
                )
                .with_code(MULTI_ARROW_WARNING_CODE),
            );
            return;
        }
        let target = attrs.get_or_insert_default();
        if part == "->" || part == "<->" {
            let base = target.position.unwrap_or(parser.last_position);
            target.position = Some(shift_position_right(base));
            target.same_line = true;
        }
        if part == "<-" || part == "<->" {
            target.truncate_right = true;
        }
        return;
    }

    match part {
        "c" => {
            attrs.get_or_insert_default().align = Some(Alignment::Center);
            return;
        }
        "r" => {
            attrs.get_or_insert_default().align = Some(Alignment::Right);
            return;
        }
        "fold" => {
            parser.pending.fold_next = true;
            return;
        }
        "sheet" => {
            parser.pending.is_sheet = true;
            return;
        }
        "html" => {
            parser.pending.is_html = true;
            return;
        }
        "comment" => {
            parser.pending.is_comment = true;
            return;
        }
        "disable" | "d" => {
            parser.pending.is_disabled = true;
            return;
        }
        _ => {}
    }

    for prefix in ["tag=", "t=", "f="] {
        if let Some(rest) = part.strip_prefix(prefix) {
            if !rest.is_empty() {
                parser.pending.tag_name = Some(rest.to_string());
            }
            return;
        }
    }

    // Remaining tokens share the inline attribute vocabulary: font sizes,
    // style keywords, `!`-prefixed secondary colors, plain colors.
    if let Some(size) = parse_numeric_token(part) {
        if valid_font_size(size) {
            attrs.get_or_insert_default().font_size = Some(size as f32);
        } else {
            parser.errors.push(ParseError::warning(
                format!("Invalid font size {part} in attribute line"),
                line,
            ));
        }
        return;
    }
    if let Some(style) = font_style_from_token(part) {
        let target = attrs.get_or_insert_default();
        if !target.font_style.contains(&style) {
            target.font_style.push(style);
        }
        return;
    }
    if let Some(rest) = part.strip_prefix('!') {
        if let Some(color) = ColorAttribute::parse(rest) {
            attrs.get_or_insert_default().secondary_color = Some(color);
        }
        return;
    }
    if let Some(color) = ColorAttribute::parse(part) {
        attrs.get_or_insert_default().color = Some(color);
    }
}
