//! `|`-delimited tables, active only under a pending `[sheet]` attribute.

use std::sync::LazyLock;

use regex::Regex;

use crate::ast::{Alignment, Block, BlockKind, Inline, SourceLocation, TableCell, TableRow};
use crate::diagnostics::ParseError;
use crate::scanner::{LineInfo, classify_line};

use super::{BlockParser, attribute_lines};

static ALIGNMENT_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^:?-+:?$").expect("table alignment segment pattern"));

pub(super) fn is_table_row(trimmed: &str) -> bool {
    trimmed.starts_with('|') && trimmed[1..].contains('|')
}

pub(super) fn try_parse_table(parser: &mut BlockParser<'_, '_>, info: LineInfo<'_>) -> bool {
    if !parser.pending.is_sheet || !is_table_row(info.content.trim()) {
        return false;
    }

    let mut raw_lines = Vec::new();
    // (1-based line, trimmed row text)
    let mut row_lines: Vec<(usize, String)> = Vec::new();
    let mut next = parser.pos;
    while next < parser.lines.len() {
        let line_info = classify_line(parser.lines[next]);
        let trimmed = line_info.content.trim();
        if trimmed.is_empty()
            || attribute_lines::is_attribute_only_line(trimmed)
            || !is_table_row(trimmed)
        {
            break;
        }
        raw_lines.push(line_info.raw);
        row_lines.push((next + 1, trimmed.to_string()));
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
        parser.pos = next;
        return true;
    }

    let mut align = None;
    if let Some(parsed) = row_lines.first().and_then(|(_, row)| parse_alignment_row(row)) {
        align = Some(parsed);
        row_lines.remove(0);
    } else if row_lines.len() > 1
        && let Some(parsed) = parse_alignment_row(&row_lines[1].1)
    {
        align = Some(parsed);
        row_lines.remove(1);
    }

    let rows = row_lines
        .iter()
        .map(|(line, row)| parse_row(row, *line, align.as_deref(), parser.errors))
        .collect();

    let attrs_clone = attrs.clone();
    let block = Block::new(BlockKind::Table { rows, align })
        .with_attrs(Some(attrs))
        .at(location.line, location.column);
    parser.commit(block, Some(attrs_clone), location, info.tab_count, true);
    parser.pos = next;
    true
}

/// `|:---|:--:|---:|` — every segment a dash run with optional colons.
fn parse_alignment_row(row: &str) -> Option<Vec<Alignment>> {
    let segments = inner_segments(row)?;
    let mut align = Vec::with_capacity(segments.len());
    for segment in segments {
        let segment = segment.trim();
        if !ALIGNMENT_SEGMENT.is_match(segment) {
            return None;
        }
        let leading = segment.starts_with(':');
        let trailing = segment.ends_with(':');
        align.push(match (leading, trailing) {
            (true, true) => Alignment::Center,
            (false, true) => Alignment::Right,
            _ => Alignment::Left,
        });
    }
    Some(align)
}

/// The segments strictly between the first and last `|`, or `None` when the
/// row has no closing border.
fn inner_segments(row: &str) -> Option<Vec<&str>> {
    if !row.ends_with('|') {
        return None;
    }
    let parts: Vec<&str> = row.split('|').collect();
    if parts.len() < 3 {
        return None;
    }
    Some(parts[1..parts.len() - 1].to_vec())
}

fn parse_row(
    row: &str,
    line: usize,
    align: Option<&[Alignment]>,
    errors: &mut Vec<ParseError>,
) -> TableRow {
    let cell_texts: Vec<&str> = if let Some(segments) = inner_segments(row) {
        segments
    } else {
        // No closing border: keep the trailing partial cell and flag the row.
        errors.push(ParseError::error(
            "Table row is missing closing \"|\" border",
            line,
        ));
        row.split('|').skip(1).collect()
    };

    let cells = cell_texts
        .into_iter()
        .enumerate()
        .map(|(index, text)| {
            let column_align = align.and_then(|columns| columns.get(index).copied());
            parse_cell(text, line, column_align)
        })
        .collect();
    TableRow { cells }
}

fn parse_cell(text: &str, line: usize, column_align: Option<Alignment>) -> TableCell {
    let mut content = text.trim();
    // A [l]/[c]/[r] prefix beats the column default from the alignment row.
    let mut align = column_align;
    for (prefix, cell_align) in [
        ("[l]", Alignment::Left),
        ("[c]", Alignment::Center),
        ("[r]", Alignment::Right),
    ] {
        if let Some(rest) = content.strip_prefix(prefix) {
            align = Some(cell_align);
            content = rest.trim();
            break;
        }
    }

    let children = if content.is_empty() {
        Vec::new()
    } else {
        vec![Inline::text(content)]
    };
    TableCell {
        children,
        align,
        location: Some(SourceLocation { line, column: 1 }),
    }
}
