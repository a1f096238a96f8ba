//! Shared attribute-token algebra.
//!
//! One tokenizer serves every `[...]` attribute surface: inline attribute
//! expressions, block attribute lines, and link color prefixes. The validity
//! predicate below is the single authority for "is this bracket an attribute
//! expression", used both when opening a scope and when deciding whether a
//! later bracket closes it.

use crate::ast::{ColorAttribute, FontStyle, InlineAttributes};
use crate::diagnostics::ParseError;

pub(crate) fn split_attr_parts(inside: &str) -> Vec<&str> {
    inside
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

/// Style keyword or one of the short aliases `i`/`b`/`bb`.
pub(crate) fn font_style_from_token(part: &str) -> Option<FontStyle> {
    match part {
        "i" => Some(FontStyle::Italic),
        "b" => Some(FontStyle::Bold),
        "bb" => Some(FontStyle::Heavy),
        _ => FontStyle::from_name(part),
    }
}

pub(crate) fn is_shift_token(part: &str) -> bool {
    matches!(part, "->" | "<-" | "<->")
}

/// Parse a token that is plausibly a font size number. Tokens with any
/// non-numeric character fall through to the color fallback instead.
pub(crate) fn parse_numeric_token(part: &str) -> Option<f64> {
    if !part.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    if !part.chars().all(|c| c.is_ascii_digit() || c == '.' || c == '-') {
        return None;
    }
    part.parse::<f64>().ok()
}

/// Font sizes run 0.5 to 5 in half steps.
pub(crate) fn valid_font_size(size: f64) -> bool {
    (0.5..=5.0).contains(&size) && (size * 2.0 - (size * 2.0).round()).abs() < 1e-6
}

/// Whether `inside` reads as a pure attribute expression: at least one
/// token, no layout shift tokens, and every token a valid size, style
/// keyword, or color.
pub(crate) fn is_attribute_expression(inside: &str) -> bool {
    let parts = split_attr_parts(inside);
    if parts.is_empty() {
        return false;
    }
    if parts.iter().any(|p| is_shift_token(p)) {
        return false;
    }
    for part in parts {
        if let Some(size) = parse_numeric_token(part) {
            if !valid_font_size(size) {
                return false;
            }
            continue;
        }
        if font_style_from_token(part).is_some() {
            continue;
        }
        let color_token = part.strip_prefix('!').unwrap_or(part);
        if ColorAttribute::parse(color_token).is_none() {
            return false;
        }
    }
    true
}

/// Tokenize one attribute expression. Returns `None` when nothing was
/// recognized. Out-of-range sizes warn and are dropped; the rest of the
/// expression still applies.
pub(crate) fn parse_inline_attributes(
    inside: &str,
    errors: &mut Vec<ParseError>,
    line: usize,
    column: usize,
) -> Option<InlineAttributes> {
    let parts = split_attr_parts(inside);
    if parts.is_empty() {
        return None;
    }

    let mut attrs = InlineAttributes::default();
    for part in parts {
        if is_shift_token(part) {
            continue;
        }
        if let Some(size) = parse_numeric_token(part) {
            if valid_font_size(size) {
                attrs.font_size = Some(size as f32);
            } else {
                errors.push(
                    ParseError::warning(
                        format!("Invalid font size {part} in inline attributes"),
                        line,
                    )
                    .with_column(column),
                );
            }
            continue;
        }
        if let Some(style) = font_style_from_token(part) {
            if !attrs.font_style.contains(&style) {
                attrs.font_style.push(style);
            }
            continue;
        }
        if let Some(rest) = part.strip_prefix('!') {
            if let Some(color) = ColorAttribute::parse(rest) {
                attrs.secondary_color = Some(color);
            }
            continue;
        }
        if let Some(color) = ColorAttribute::parse(part) {
            attrs.color = Some(color);
        }
    }

    if attrs.is_empty() { None } else { Some(attrs) }
}

/// Merge a later expression over an earlier one: scalar fields from `next`
/// win, style lists union in encounter order.
pub(crate) fn merge_inline_attributes(
    base: InlineAttributes,
    next: InlineAttributes,
) -> InlineAttributes {
    let mut merged = base;
    if next.color.is_some() {
        merged.color = next.color;
    }
    if next.secondary_color.is_some() {
        merged.secondary_color = next.secondary_color;
    }
    if next.font_size.is_some() {
        merged.font_size = next.font_size;
    }
    for style in next.font_style {
        if !merged.font_style.contains(&style) {
            merged.font_style.push(style);
        }
    }
    merged
}
