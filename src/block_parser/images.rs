//! `[img](url)` image blocks and `[html](file)` HTML references.
//!
//! An image takes comma-separated options before the url: `rounded`,
//! `square`, or `rounded=N` for an explicit corner radius. A `> title` line
//! directly after an image becomes its caption.

use std::sync::LazyLock;

use regex::Regex;

use crate::ast::{Block, BlockKind, ImageShape};
use crate::scanner::LineInfo;

use super::BlockParser;

static BRACKET_TARGET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[([^\]]+)\]\(([^)]+)\)\s*$").expect("image block pattern"));
static HTML_TARGET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[html\]\(([^)]+)\)\s*$").expect("html reference pattern"));
static ROUNDED_RADIUS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^rounded=([0-9.]+)$").expect("rounded radius pattern"));

pub(super) struct ImageMatch {
    pub url: String,
    pub shape: ImageShape,
    pub rounded_radius: Option<f32>,
}

pub(super) fn match_image_block(trimmed: &str) -> Option<ImageMatch> {
    let captures = BRACKET_TARGET.captures(trimmed)?;
    let parts: Vec<&str> = captures[1].split(',').map(str::trim).collect();
    if !parts.contains(&"img") {
        return None;
    }

    let mut shape = ImageShape::Square;
    let mut rounded_radius = None;
    for part in &parts {
        match *part {
            "rounded" => shape = ImageShape::Rounded,
            "square" => shape = ImageShape::Square,
            _ => {
                if let Some(radius_match) = ROUNDED_RADIUS.captures(part)
                    && let Ok(radius) = radius_match[1].parse::<f32>()
                    && radius > 0.0
                {
                    shape = ImageShape::Rounded;
                    rounded_radius = Some(radius);
                }
            }
        }
    }

    Some(ImageMatch {
        url: captures[2].to_string(),
        shape,
        rounded_radius,
    })
}

pub(super) fn match_html_ref(trimmed: &str) -> Option<String> {
    HTML_TARGET
        .captures(trimmed)
        .map(|captures| captures[1].to_string())
}

pub(super) fn try_parse_image(
    parser: &mut BlockParser<'_, '_>,
    info: LineInfo<'_>,
    trimmed: &str,
) -> bool {
    let Some(matched) = match_image_block(trimmed) else {
        return false;
    };

    let location = parser.line_location(info);
    let attrs = parser.build_attrs(info.tab_count);

    if parser.pending.is_disabled {
        let block = Block::new(BlockKind::Disabled {
            raw: info.raw.to_string(),
        })
        .with_attrs(Some(attrs))
        .at(location.line, location.column);
        parser.commit(block, None, location, info.tab_count, false);
    } else {
        let attrs_clone = attrs.clone();
        let block = Block::new(BlockKind::Image {
            url: matched.url,
            title: None,
            shape: Some(matched.shape),
            rounded_radius: matched.rounded_radius,
        })
        .with_attrs(Some(attrs))
        .at(location.line, location.column);
        parser.commit(block, Some(attrs_clone), location, info.tab_count, true);
    }
    parser.pos += 1;
    true
}

pub(super) fn try_parse_html_ref(
    parser: &mut BlockParser<'_, '_>,
    info: LineInfo<'_>,
    trimmed: &str,
) -> bool {
    let Some(source) = match_html_ref(trimmed) else {
        return false;
    };

    let location = parser.line_location(info);
    let attrs = parser.build_attrs(info.tab_count);

    if parser.pending.is_disabled {
        let block = Block::new(BlockKind::Disabled {
            raw: info.raw.to_string(),
        })
        .with_attrs(Some(attrs))
        .at(location.line, location.column);
        parser.commit(block, None, location, info.tab_count, false);
    } else {
        let attrs_clone = attrs.clone();
        let block = Block::new(BlockKind::Html {
            source: Some(source),
            value: None,
        })
        .with_attrs(Some(attrs))
        .at(location.line, location.column);
        parser.commit(block, Some(attrs_clone), location, info.tab_count, true);
    }
    parser.pos += 1;
    true
}
