//! Lists: `-` bullets, `-[ ]` tasks, `1.`/`1.1.` ordered items, and `+`
//! foldable items. Marker length (or ordinal depth) is the item's indent;
//! deeper runs become nested lists. A fenced code block between items
//! attaches to the item above it.

use std::sync::LazyLock;

use regex::Regex;

use crate::ast::{Block, BlockKind, Inline, ListKind, OrderedStyle, TaskStatus};
use crate::scanner::{LineInfo, classify_line};

use super::{BlockParser, attribute_lines, code_blocks};

static TASK_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(-+)(\[(.|..)?\])(?:\s+(.*))?$").expect("task item pattern"));
static ORDERED_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+(?:\.\d+)*)\.?\s*(\[(.|..)?\])?(?:\s+(.*))?$").expect("ordered item pattern")
});
static FOLDABLE_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\++)(\[(.|..)?\])?(?:\s+(.*))?$").expect("foldable item pattern")
});
static BULLET_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(-+)(?:\s+(.*))?$").expect("bullet item pattern"));

pub(super) struct ListItemMatch {
    pub kind: ListKind,
    pub indent: usize,
    pub ordinal: Option<String>,
    pub task_status: Option<TaskStatus>,
    pub text: String,
}

pub(super) fn match_list_item(content: &str) -> Option<ListItemMatch> {
    if let Some(captures) = TASK_ITEM.captures(content) {
        return Some(ListItemMatch {
            kind: ListKind::Task,
            indent: captures[1].len(),
            ordinal: None,
            task_status: Some(map_task_status(captures.get(3).map(|m| m.as_str()))),
            text: captures.get(4).map_or("", |m| m.as_str()).to_string(),
        });
    }
    if let Some(captures) = ORDERED_ITEM.captures(content) {
        let ordinal = captures[1].to_string();
        let indent = ordinal.split('.').count();
        let task_status = captures
            .get(2)
            .map(|_| map_task_status(captures.get(3).map(|m| m.as_str())));
        return Some(ListItemMatch {
            kind: ListKind::Ordered,
            indent,
            ordinal: Some(ordinal),
            task_status,
            text: captures.get(4).map_or("", |m| m.as_str()).to_string(),
        });
    }
    if let Some(captures) = FOLDABLE_ITEM.captures(content) {
        let indent = captures[1].len();
        let task_status = captures
            .get(2)
            .map(|_| map_task_status(captures.get(3).map(|m| m.as_str())));
        return Some(ListItemMatch {
            kind: ListKind::Foldable,
            indent,
            ordinal: Some(ordinal_from_indent(indent)),
            task_status,
            text: captures.get(4).map_or("", |m| m.as_str()).to_string(),
        });
    }
    if let Some(captures) = BULLET_ITEM.captures(content) {
        return Some(ListItemMatch {
            kind: ListKind::Bullet,
            indent: captures[1].len(),
            ordinal: None,
            task_status: None,
            text: captures.get(2).map_or("", |m| m.as_str()).to_string(),
        });
    }
    None
}

fn map_task_status(marker: Option<&str>) -> TaskStatus {
    match marker {
        Some("o") => TaskStatus::InProgress,
        Some("x") => TaskStatus::NotDone,
        Some("v") => TaskStatus::Done,
        _ => TaskStatus::Unknown,
    }
}

/// Foldable items have no written ordinal; synthesize `1`, `1.1`, ... from
/// the marker depth.
fn ordinal_from_indent(indent: usize) -> String {
    vec!["1"; indent.max(1)].join(".")
}

struct Entry {
    line: usize,
    tab_count: usize,
    kind: ListKind,
    indent: usize,
    ordinal: Option<String>,
    task_status: Option<TaskStatus>,
    text: String,
    child_blocks: Vec<Block>,
}

pub(super) fn try_parse_list(parser: &mut BlockParser<'_, '_>, info: LineInfo<'_>) -> bool {
    let Some(first) = match_list_item(info.content) else {
        return false;
    };
    let list_kind = first.kind;
    let base_indent = first.indent;

    let mut raw_lines = Vec::new();
    let mut entries: Vec<Entry> = Vec::new();
    let mut next = parser.pos;
    while next < parser.lines.len() {
        let line_info = classify_line(parser.lines[next]);
        let trimmed = line_info.content.trim();
        if trimmed.is_empty() || attribute_lines::is_attribute_only_line(trimmed) {
            break;
        }

        let Some(matched) = match_list_item(line_info.content) else {
            // A closed code fence between items attaches to the item above.
            if entries.is_empty() {
                break;
            }
            let fence = code_blocks::match_code_fence_start(trimmed)
                .map(|language| (language, false))
                .or_else(|| {
                    code_blocks::match_attributed_fence(trimmed)
                        .map(|fence| (fence.language, fence.is_html))
                });
            let Some((language, html_like)) = fence else {
                break;
            };
            let body =
                code_blocks::collect_fence_body(&parser.lines, next + 1, line_info.tab_count);
            if !body.closed {
                break;
            }
            let code = Block::new(BlockKind::Code {
                language,
                value: body.value,
                html_like,
            })
            .at(next + 1, line_info.tab_count + 1);
            raw_lines.push(line_info.raw.to_string());
            raw_lines.extend(body.raw_lines);
            if let Some(last) = entries.last_mut() {
                last.child_blocks.push(code);
            }
            next = body.next_pos;
            continue;
        };

        if matched.kind != list_kind || matched.indent < base_indent {
            break;
        }
        raw_lines.push(line_info.raw.to_string());
        entries.push(Entry {
            line: next + 1,
            tab_count: line_info.tab_count,
            kind: matched.kind,
            indent: matched.indent,
            ordinal: matched.ordinal,
            task_status: matched.task_status,
            text: matched.text,
            child_blocks: Vec::new(),
        });
        next += 1;
    }

    if entries.is_empty() {
        return false;
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
        let items = build_items(&mut entries, base_indent);
        let attrs_clone = attrs.clone();
        let block = Block::new(BlockKind::List {
            kind: list_kind,
            ordered_style: ordered_style_for(list_kind),
            items,
        })
        .with_attrs(Some(attrs))
        .at(location.line, location.column);
        parser.commit(block, Some(attrs_clone), location, info.tab_count, true);
    }

    parser.pos = next;
    true
}

fn ordered_style_for(kind: ListKind) -> Option<OrderedStyle> {
    (kind == ListKind::Ordered).then_some(OrderedStyle::Decimal)
}

fn build_items(entries: &mut [Entry], indent: usize) -> Vec<Block> {
    let mut items: Vec<Block> = Vec::new();
    let mut i = 0;
    while i < entries.len() {
        if entries[i].indent > indent {
            let start = i;
            while i < entries.len() && entries[i].indent > indent {
                i += 1;
            }
            let nested_kind = entries[start].kind;
            let nested_indent = entries[start].indent;
            let nested = Block::new(BlockKind::List {
                kind: nested_kind,
                ordered_style: ordered_style_for(nested_kind),
                items: build_items(&mut entries[start..i], nested_indent),
            });
            if let Some(Block {
                kind: BlockKind::ListItem { children, .. },
                ..
            }) = items.last_mut()
            {
                children.push(nested);
            } else {
                items.push(nested);
            }
            continue;
        }

        let entry = &mut entries[i];
        // Every item carries a paragraph, even when the marker has no text.
        let mut children = vec![
            Block::new(BlockKind::Paragraph {
                children: vec![Inline::text(entry.text.as_str())],
            })
            .at(entry.line, entry.tab_count + 1),
        ];
        children.append(&mut entry.child_blocks);

        items.push(
            Block::new(BlockKind::ListItem {
                kind: entry.kind,
                ordinal: entry.ordinal.take(),
                task_status: entry.task_status,
                indent: entry.indent,
                children,
            })
            .at(entry.line, entry.tab_count + 1),
        );
        i += 1;
    }
    items
}
