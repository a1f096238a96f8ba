//! Horizontal rules: three or more identical marker characters, with an
//! optional leading `[color]` group.

use crate::ast::{Block, BlockKind, ColorAttribute, RuleStyle};
use crate::scanner::LineInfo;

use super::BlockParser;

pub(super) struct RuleMatch {
    pub style: RuleStyle,
    pub color: Option<ColorAttribute>,
}

pub(super) fn match_horizontal_rule(trimmed: &str) -> Option<RuleMatch> {
    let mut rest = trimmed;
    let mut color = None;

    if let Some(after_open) = rest.strip_prefix('[') {
        let close = after_open.find(']')?;
        let inside = after_open[..close].trim();
        if inside.is_empty() {
            return None;
        }
        color = ColorAttribute::parse(inside);
        rest = after_open[close + 1..].trim_start();
    }

    let mut chars = rest.chars();
    let marker = chars.next()?;
    let style = match marker {
        '-' => RuleStyle::Solid,
        '*' => RuleStyle::Dashed,
        '=' => RuleStyle::Bold,
        '~' => RuleStyle::Wavy,
        _ => return None,
    };
    if rest.chars().count() < 3 || chars.any(|c| c != marker) {
        return None;
    }

    Some(RuleMatch { style, color })
}

pub(super) fn try_parse_horizontal_rule(
    parser: &mut BlockParser<'_, '_>,
    info: LineInfo<'_>,
    trimmed: &str,
) -> bool {
    let Some(matched) = match_horizontal_rule(trimmed) else {
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
        let block = Block::new(BlockKind::HorizontalRule {
            style: matched.style,
            color: matched.color,
        })
        .with_attrs(Some(attrs))
        .at(location.line, location.column);
        parser.commit(block, Some(attrs_clone), location, info.tab_count, true);
    }
    parser.pos += 1;
    true
}
