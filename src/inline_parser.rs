//! Inline enrichment pass.
//!
//! Block parsing stores each container's text verbatim in a single text
//! node; this pass re-scans that text with a character-dispatch recursive
//! descent and replaces the children in place. Positions inside a container
//! are reported relative to the owning block's line.

use crate::ast::{Block, Inline, InlineKind, for_each_inline_container_mut};
use crate::diagnostics::ParseError;
use crate::scanner::CharScanner;

mod backticks;
mod brackets;
mod disabled_spans;
mod escapes;
mod marker_highlights;
mod styles;
#[cfg(test)]
mod tests;

use brackets::BracketOutcome;

/// Re-parse the text of every inline container in `blocks`.
pub(crate) fn enrich_blocks(blocks: &mut [Block], errors: &mut Vec<ParseError>) {
    for_each_inline_container_mut(blocks, &mut |children, location| {
        let text = collect_text(children);
        if text.is_empty() {
            return;
        }
        let base_line = location.map_or(1, |loc| loc.line);
        log::debug!("inline pass at line {base_line}: {text:?}");
        *children = parse_inlines(&text, errors, base_line);
    });
}

fn collect_text(children: &[Inline]) -> String {
    let mut text = String::new();
    for child in children {
        if let InlineKind::Text { value } = &child.kind {
            text.push_str(value);
        }
    }
    text
}

pub(crate) fn parse_inlines(text: &str, errors: &mut Vec<ParseError>, base_line: usize) -> Vec<Inline> {
    parse_inlines_at(text, errors, base_line, 1)
}

fn parse_inlines_at(
    text: &str,
    errors: &mut Vec<ParseError>,
    base_line: usize,
    base_column: usize,
) -> Vec<Inline> {
    let mut scanner = CharScanner::with_base(text, base_line, base_column);
    let mut nodes = Vec::new();
    let mut buffer = String::new();

    while let Some(ch) = scanner.peek() {
        match ch {
            // Escapes and disabled spans feed the text buffer directly.
            '\\' => buffer.push_str(&escapes::read_escape(&mut scanner)),
            '{' => buffer.push_str(&disabled_spans::read_disabled_span(&mut scanner, errors)),
            '`' => {
                flush_text(&mut nodes, &mut buffer);
                nodes.push(backticks::read_backtick_segment(&mut scanner, errors));
            }
            '=' => {
                flush_text(&mut nodes, &mut buffer);
                nodes.push(marker_highlights::read_marker_highlight(
                    &mut scanner,
                    errors,
                ));
            }
            '*' | '/' | '_' | '-' | '~' | '^' => {
                flush_text(&mut nodes, &mut buffer);
                nodes.push(styles::read_styled_segment(&mut scanner, errors));
            }
            '[' => {
                flush_text(&mut nodes, &mut buffer);
                match brackets::parse_bracket_expression(&mut scanner, errors) {
                    BracketOutcome::Node(node) => nodes.push(node),
                    BracketOutcome::Literal(text) => nodes.push(Inline::text(text)),
                }
            }
            _ => {
                scanner.bump();
                buffer.push(ch);
            }
        }
    }

    flush_text(&mut nodes, &mut buffer);
    nodes
}

fn flush_text(nodes: &mut Vec<Inline>, buffer: &mut String) {
    if buffer.is_empty() {
        return;
    }
    nodes.push(Inline::text(std::mem::take(buffer)));
}
