//! `[@](target)` file includes and `[@=name]` tag includes.
//!
//! Parsing only records the directive; expansion happens in the
//! post-processing pass.

use std::sync::LazyLock;

use regex::Regex;

use crate::ast::{Block, BlockKind, IncludeMode};
use crate::scanner::LineInfo;

use super::BlockParser;

static FILE_INCLUDE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[@\]\(([^)]+)\)\s*$").expect("file include pattern")
});
static TAG_INCLUDE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[@=([^\]]+)\]\s*$").expect("tag include pattern"));

pub(super) struct IncludeMatch {
    pub mode: IncludeMode,
    pub target: String,
}

pub(super) fn match_include(content: &str) -> Option<IncludeMatch> {
    if let Some(captures) = FILE_INCLUDE.captures(content) {
        let target = captures[1].trim();
        if !target.is_empty() {
            return Some(IncludeMatch {
                mode: IncludeMode::File,
                target: target.to_string(),
            });
        }
    }
    if let Some(captures) = TAG_INCLUDE.captures(content) {
        let target = captures[1].trim();
        if !target.is_empty() {
            return Some(IncludeMatch {
                mode: IncludeMode::Tag,
                target: target.to_string(),
            });
        }
    }
    None
}

pub(super) fn try_parse_include(parser: &mut BlockParser<'_, '_>, info: LineInfo<'_>) -> bool {
    let Some(matched) = match_include(info.content) else {
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
        let block = Block::new(BlockKind::Include {
            mode: matched.mode,
            target: matched.target,
        })
        .with_attrs(Some(attrs))
        .at(location.line, location.column);
        parser.commit(block, Some(attrs_clone), location, info.tab_count, true);
    }
    parser.pos += 1;
    true
}
