//! `@` quotes. A run of same-or-deeper quote lines is dedented by the base
//! level and re-parsed as a document, so quotes nest arbitrary blocks.

use std::sync::LazyLock;

use regex::Regex;

use crate::ast::{Block, BlockKind};
use crate::scanner::{LineInfo, classify_line};

use super::{BlockParser, parse_blocks};

static QUOTE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(@+)\s+(.+)$").expect("quote line pattern"));

pub(super) struct QuoteMatch<'a> {
    pub level: usize,
    pub text: &'a str,
}

pub(super) fn match_quote(content: &str) -> Option<QuoteMatch<'_>> {
    let captures = QUOTE_LINE.captures(content)?;
    Some(QuoteMatch {
        level: captures.get(1).map_or(0, |m| m.len()),
        text: captures.get(2).map_or("", |m| m.as_str()),
    })
}

pub(super) fn try_parse_quote(parser: &mut BlockParser<'_, '_>, info: LineInfo<'_>) -> bool {
    let Some(first) = match_quote(info.content) else {
        return false;
    };
    let base = first.level;

    let mut raw_lines = Vec::new();
    let mut inner_lines = Vec::new();
    let mut next = parser.pos;
    while next < parser.lines.len() {
        let line_info = classify_line(parser.lines[next]);
        let Some(matched) = match_quote(line_info.content) else {
            break;
        };
        if matched.level < base {
            break;
        }
        raw_lines.push(line_info.raw);
        let depth = matched.level - base;
        if depth == 0 {
            inner_lines.push(matched.text.to_string());
        } else {
            inner_lines.push(format!("{} {}", "@".repeat(depth), matched.text));
        }
        next += 1;
    }

    let location = parser.line_location(info);
    let attrs = parser.build_attrs(info.tab_count);

    if parser.pending.is_disabled {
        let block = Block::new(BlockKind::Disabled {
            raw: raw_lines.join("\n"),
        })
        .with_attrs(Some(attrs))
        .at(location.line, location.column);
        parser.commit(block, None, location, info.tab_count, false);
    } else {
        let inner = inner_lines.join("\n");
        let mut children = parse_blocks(&inner, parser.errors);
        lift_nested_quote_levels(&mut children, base);
        let attrs_clone = attrs.clone();
        let block = Block::new(BlockKind::Quote {
            level: base,
            children,
        })
        .with_attrs(Some(attrs))
        .at(location.line, location.column);
        parser.commit(block, Some(attrs_clone), location, info.tab_count, true);
    }

    parser.pos = next;
    true
}

/// Inner parses see levels relative to the enclosing quote; add the parent
/// level back so every quote carries its absolute depth.
fn lift_nested_quote_levels(blocks: &mut [Block], parent: usize) {
    for block in blocks {
        if let BlockKind::Quote { level, children } = &mut block.kind {
            *level += parent;
            lift_nested_quote_levels(children, parent);
        }
    }
}
