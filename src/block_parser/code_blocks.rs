//! Fenced code blocks.
//!
//! A fence opens with ```` ``` ```` plus an optional language word, or with
//! leading `[...]` groups before the ticks (`[html]` marks the body as
//! HTML-like). Body lines keep their text verbatim except that up to the
//! fence's own indent of leading tabs is stripped.

use std::sync::LazyLock;

use regex::Regex;

use crate::ast::{Block, BlockKind};
use crate::diagnostics::ParseError;
use crate::scanner::{LineInfo, classify_line};

use super::BlockParser;

static FENCE_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^```([^\s`]*)\s*$").expect("code fence pattern"));
static ATTRIBUTED_FENCE_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^((?:\[.+?\])+)\s*```([^\s`]*)\s*$").expect("attributed code fence pattern")
});

pub(super) fn match_code_fence_start(trimmed: &str) -> Option<Option<String>> {
    let captures = FENCE_START.captures(trimmed)?;
    let language = captures.get(1).map_or("", |m| m.as_str());
    Some((!language.is_empty()).then(|| language.to_string()))
}

pub(super) struct AttributedFence {
    pub language: Option<String>,
    pub is_html: bool,
}

pub(super) fn match_attributed_fence(trimmed: &str) -> Option<AttributedFence> {
    let captures = ATTRIBUTED_FENCE_START.captures(trimmed)?;
    let groups = captures.get(1).map_or("", |m| m.as_str());
    let language = captures.get(2).map_or("", |m| m.as_str());
    Some(AttributedFence {
        language: (!language.is_empty()).then(|| language.to_string()),
        is_html: groups.to_ascii_lowercase().contains("[html]"),
    })
}

pub(super) fn is_code_fence_end(trimmed: &str) -> bool {
    trimmed == "```"
}

pub(super) struct FenceBody {
    pub raw_lines: Vec<String>,
    pub value: String,
    pub closed: bool,
    pub next_pos: usize,
}

/// Collect body lines from `start` (the line after the fence) to the closing
/// fence, stripping up to `fence_indent` leading tabs from each raw line.
pub(super) fn collect_fence_body(lines: &[&str], start: usize, fence_indent: usize) -> FenceBody {
    let mut raw_lines = Vec::new();
    let mut code_lines = Vec::new();
    let mut pos = start;
    let mut closed = false;

    while pos < lines.len() {
        let info = classify_line(lines[pos]);
        raw_lines.push(lines[pos].to_string());
        if is_code_fence_end(info.content.trim()) {
            closed = true;
            pos += 1;
            break;
        }
        let mut code_line = lines[pos];
        let mut stripped = 0;
        while stripped < fence_indent && let Some(rest) = code_line.strip_prefix('\t') {
            code_line = rest;
            stripped += 1;
        }
        code_lines.push(code_line);
        pos += 1;
    }

    FenceBody {
        raw_lines,
        value: code_lines.join("\n"),
        closed,
        next_pos: pos,
    }
}

pub(super) fn try_parse_code_fence(
    parser: &mut BlockParser<'_, '_>,
    info: LineInfo<'_>,
    trimmed: &str,
) -> bool {
    let plain = match_code_fence_start(trimmed);
    let attributed = if plain.is_none() {
        match_attributed_fence(trimmed)
    } else {
        None
    };
    let (language, fence_html) = match (plain, attributed) {
        (Some(language), _) => (language, false),
        (None, Some(fence)) => (fence.language, fence.is_html),
        (None, None) => return false,
    };

    let location = parser.line_location(info);
    let body = collect_fence_body(&parser.lines, parser.pos + 1, info.tab_count);
    if !body.closed {
        parser
            .errors
            .push(ParseError::error("Code block is not closed with ```", location.line));
    }

    let attrs = parser.build_attrs(info.tab_count);
    if parser.pending.is_disabled {
        let mut raw = vec![info.raw.to_string()];
        raw.extend(body.raw_lines);
        let block = Block::new(BlockKind::Disabled {
            raw: raw.join("\n"),
        })
        .with_attrs(Some(attrs))
        .at(location.line, location.column);
        parser.commit(block, None, location, info.tab_count, false);
    } else {
        let html_like = parser.pending.is_html || fence_html;
        let attrs_clone = attrs.clone();
        let block = Block::new(BlockKind::Code {
            language,
            value: body.value,
            html_like,
        })
        .with_attrs(Some(attrs))
        .at(location.line, location.column);
        parser.commit(block, Some(attrs_clone), location, info.tab_count, true);
    }

    parser.pos = body.next_pos;
    true
}
