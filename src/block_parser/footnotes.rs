//! The `[footnotes]` region: a contiguous run of lines holding
//! `[fn=id]` definitions, each followed by its body lines.

use std::sync::LazyLock;

use regex::Regex;

use crate::ast::{Block, BlockKind};
use crate::diagnostics::ParseError;
use crate::scanner::{LineInfo, classify_line};

use super::{BlockParser, parse_blocks};

static DEF_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[fn=([^\]]+)\]\s*$").expect("footnote def pattern"));

pub(super) fn is_footnotes_line(trimmed: &str) -> bool {
    trimmed == "[footnotes]"
}

pub(super) fn try_parse_footnotes_region(
    parser: &mut BlockParser<'_, '_>,
    info: LineInfo<'_>,
    trimmed: &str,
) -> bool {
    if !is_footnotes_line(trimmed) {
        return false;
    }

    // The region runs to the first blank line.
    let mut raw_lines = vec![info.raw];
    let mut content_lines = Vec::new();
    let mut next = parser.pos + 1;
    while next < parser.lines.len() {
        let line_info = classify_line(parser.lines[next]);
        if line_info.content.trim().is_empty() {
            break;
        }
        raw_lines.push(line_info.raw);
        content_lines.push(line_info.content);
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
        let children = parse_footnote_defs(&content_lines, parser.errors);
        let attrs_clone = attrs.clone();
        let block = Block::new(BlockKind::Footnotes { children })
            .with_attrs(Some(attrs))
            .at(location.line, location.column);
        parser.commit(block, Some(attrs_clone), location, info.tab_count, true);
    }

    parser.pos = next;
    true
}

fn parse_footnote_defs(lines: &[&str], errors: &mut Vec<ParseError>) -> Vec<Block> {
    let mut defs = Vec::new();
    let mut current: Option<(String, Vec<&str>)> = None;

    for line in lines {
        if let Some(captures) = DEF_HEADER.captures(line.trim()) {
            if let Some((id, body)) = current.take() {
                defs.push(build_def(id, &body, errors));
            }
            current = Some((captures[1].trim().to_string(), Vec::new()));
        } else if let Some((_, body)) = &mut current {
            body.push(line);
        }
        // Lines before the first header are dropped.
    }
    if let Some((id, body)) = current.take() {
        defs.push(build_def(id, &body, errors));
    }
    defs
}

fn build_def(id: String, body: &[&str], errors: &mut Vec<ParseError>) -> Block {
    let children = if body.is_empty() {
        Vec::new()
    } else {
        parse_blocks(&body.join("\n"), errors)
    };
    Block::new(BlockKind::FootnoteDef { id, children })
}
