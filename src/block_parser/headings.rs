//! `#`–`#####` headings; a `+` suffix on the marker makes the heading
//! foldable and arms the fold flag for the block that follows it.

use std::sync::LazyLock;

use regex::Regex;

use crate::ast::{Block, BlockKind, Inline};
use crate::scanner::LineInfo;

use super::BlockParser;

static FOLDABLE_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,5})\+\s+(.+)$").expect("foldable heading pattern"));
static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,5})\s+(.+)$").expect("heading pattern"));

pub(super) struct HeadingMatch<'a> {
    pub level: u8,
    pub foldable: bool,
    pub text: &'a str,
}

pub(super) fn match_heading(content: &str) -> Option<HeadingMatch<'_>> {
    if let Some(captures) = FOLDABLE_HEADING.captures(content) {
        return Some(HeadingMatch {
            level: captures.get(1).map_or(0, |m| m.len()) as u8,
            foldable: true,
            text: captures.get(2).map_or("", |m| m.as_str()),
        });
    }
    let captures = HEADING.captures(content)?;
    Some(HeadingMatch {
        level: captures.get(1).map_or(0, |m| m.len()) as u8,
        foldable: false,
        text: captures.get(2).map_or("", |m| m.as_str()),
    })
}

pub(super) fn try_parse_heading(parser: &mut BlockParser<'_, '_>, info: LineInfo<'_>) -> bool {
    let Some(matched) = match_heading(info.content) else {
        return false;
    };

    let location = parser.line_location(info);
    let attrs = parser.build_attrs(info.tab_count);
    let foldable = matched.foldable;

    if parser.pending.is_disabled {
        let block = Block::new(BlockKind::Disabled {
            raw: info.raw.to_string(),
        })
        .with_attrs(Some(attrs))
        .at(location.line, location.column);
        parser.commit(block, None, location, info.tab_count, false);
    } else {
        let attrs_clone = attrs.clone();
        let block = Block::new(BlockKind::Heading {
            level: matched.level,
            foldable,
            children: vec![Inline::text(matched.text.trim())],
        })
        .with_attrs(Some(attrs))
        .at(location.line, location.column);
        parser.commit(block, Some(attrs_clone), location, info.tab_count, true);
    }

    // A foldable heading folds the content that follows it.
    if foldable {
        parser.pending.fold_next = true;
    }
    parser.pos += 1;
    true
}
