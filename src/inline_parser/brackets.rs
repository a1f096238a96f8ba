//! `[...]` bracket expressions: footnote references, inline comments, links,
//! and attribute expressions with their scoped content.

use crate::ast::{ColorAttribute, Inline, InlineAttributes, InlineKind};
use crate::attributes::{is_attribute_expression, merge_inline_attributes, parse_inline_attributes};
use crate::diagnostics::ParseError;
use crate::scanner::CharScanner;

use super::{backticks, marker_highlights, parse_inlines, styles};

/// What a bracket expression resolved to: a node, or literal text that the
/// caller emits as-is.
pub(super) enum BracketOutcome {
    Node(Inline),
    Literal(String),
}

fn is_inline_symbol(ch: char) -> bool {
    matches!(ch, '`' | '=' | '*' | '/' | '_' | '-' | '~' | '^' | '[')
}

pub(super) fn parse_bracket_expression(
    scanner: &mut CharScanner,
    errors: &mut Vec<ParseError>,
) -> BracketOutcome {
    let start_line = scanner.line;
    let start_column = scanner.column;
    scanner.bump();

    let mut inside = String::new();
    let mut closed = false;
    while let Some(ch) = scanner.peek() {
        if ch == ']' {
            scanner.bump();
            closed = true;
            break;
        }
        scanner.bump();
        inside.push(ch);
    }

    if !closed {
        errors.push(
            ParseError::warning("Missing closing ] for bracket expression", start_line)
                .with_column(start_column),
        );
        return BracketOutcome::Literal(format!("[{inside}"));
    }

    if inside.is_empty() {
        return BracketOutcome::Literal("[]".to_string());
    }

    if let Some(raw_id) = inside.strip_prefix("fn:") {
        let id = raw_id.trim();
        if id.is_empty() {
            return BracketOutcome::Literal(format!("[{inside}]"));
        }
        let node = Inline::new(InlineKind::FootnoteRef { id: id.to_string() })
            .at(start_line, start_column);
        return BracketOutcome::Node(node);
    }

    if inside == "comment" {
        return read_inline_comment(scanner, errors, start_line, start_column);
    }

    if inside == "link" {
        return parse_link_after_keyword(scanner, errors, start_line);
    }

    if let Some(attrs) = parse_inline_attributes(&inside, errors, start_line, start_column) {
        return parse_attribute_scope(scanner, errors, attrs, inside, start_line, start_column);
    }

    BracketOutcome::Literal(format!("[{inside}]"))
}

fn read_inline_comment(
    scanner: &mut CharScanner,
    errors: &mut Vec<ParseError>,
    start_line: usize,
    start_column: usize,
) -> BracketOutcome {
    let mut content = String::new();
    while let Some(ch) = scanner.peek() {
        if ch == '[' {
            let state = scanner.save();
            scanner.bump();
            if scanner.peek() == Some('/') {
                scanner.bump();
                if scanner.peek() == Some(']') {
                    scanner.bump();
                    let children = parse_inlines(&content, errors, start_line);
                    return BracketOutcome::Node(Inline::new(InlineKind::Comment { children }));
                }
            }
            scanner.restore(state);
        }
        scanner.bump();
        content.push(ch);
    }

    errors.push(
        ParseError::warning("Missing closing [/] for inline comment", start_line)
            .with_column(start_column),
    );
    BracketOutcome::Literal(format!("[comment]{content}"))
}

/// After `[attrs]`: merge consecutive attribute brackets, then bind the
/// scope — a single following inline construct, a bare `text(url)` link, or
/// a run of text up to `[/]`, line end, the next attribute bracket, or end
/// of input.
fn parse_attribute_scope(
    scanner: &mut CharScanner,
    errors: &mut Vec<ParseError>,
    attrs: InlineAttributes,
    inside: String,
    start_line: usize,
    start_column: usize,
) -> BracketOutcome {
    let mut merged = attrs;
    let mut merged_raw = inside.clone();

    while scanner.peek() == Some('[') {
        let state = scanner.save();
        let (save_line, save_column) = (scanner.line, scanner.column);
        scanner.bump();

        let mut attr_inside = String::new();
        let mut attr_closed = false;
        while let Some(ch) = scanner.peek() {
            if ch == ']' {
                scanner.bump();
                attr_closed = true;
                break;
            }
            scanner.bump();
            attr_inside.push(ch);
        }

        if !attr_closed {
            errors.push(
                ParseError::warning("Missing closing ] for inline attributes", save_line)
                    .with_column(save_column),
            );
            return BracketOutcome::Literal(format!("[{merged_raw}][{attr_inside}"));
        }

        if !is_attribute_expression(&attr_inside) {
            scanner.restore(state);
            break;
        }
        let Some(next_attrs) = parse_inline_attributes(&attr_inside, errors, save_line, save_column)
        else {
            scanner.restore(state);
            break;
        };

        merged = merge_inline_attributes(merged, next_attrs);
        merged_raw.push_str("][");
        merged_raw.push_str(&attr_inside);
    }

    // Tight binding: a construct starting right after the brackets becomes
    // the whole scope.
    if let Some(symbol) = scanner.peek()
        && is_inline_symbol(symbol)
    {
        let inner = match symbol {
            '`' => BracketOutcome::Node(backticks::read_backtick_segment(scanner, errors)),
            '=' => BracketOutcome::Node(marker_highlights::read_marker_highlight(scanner, errors)),
            '[' => parse_bracket_expression(scanner, errors),
            _ => BracketOutcome::Node(styles::read_styled_segment(scanner, errors)),
        };
        return match inner {
            BracketOutcome::Literal(text) => BracketOutcome::Literal(format!("[{inside}]{text}")),
            BracketOutcome::Node(mut node) => {
                if let InlineKind::Highlight {
                    color, fill_color, ..
                } = &mut node.kind
                {
                    // Highlights absorb the colors themselves.
                    *color = merged.color.take();
                    *fill_color = merged.secondary_color.take();
                }
                BracketOutcome::Node(Inline::new(InlineKind::Attrs {
                    attrs: merged,
                    children: vec![node],
                }))
            }
        };
    }

    // Bare `text(url)` right after the brackets is a colored link.
    let state = scanner.save();
    let mut link_text = String::new();
    let mut found_paren = false;
    while let Some(ch) = scanner.peek() {
        if ch == '(' {
            found_paren = true;
            break;
        }
        if ch == '\n' {
            break;
        }
        scanner.bump();
        link_text.push(ch);
    }

    if found_paren && !link_text.is_empty() {
        scanner.bump();
        let mut url = String::new();
        let mut found_close = false;
        while let Some(ch) = scanner.peek() {
            if ch == ')' {
                scanner.bump();
                found_close = true;
                break;
            }
            scanner.bump();
            url.push(ch);
        }

        if found_close && !url.is_empty() {
            let children = parse_inlines(link_text.trim(), errors, start_line);
            return BracketOutcome::Node(Inline::new(InlineKind::Link {
                href: url,
                children,
                color: merged.color,
                underline_color: merged.secondary_color,
            }));
        }
    }
    scanner.restore(state);

    read_attrs_scope_run(scanner, errors, merged, start_line, start_column)
}

/// Scope run: text up to `[/]` (consumed), a line break, the next valid
/// attribute bracket, or end of input.
fn read_attrs_scope_run(
    scanner: &mut CharScanner,
    errors: &mut Vec<ParseError>,
    attrs: InlineAttributes,
    base_line: usize,
    _start_column: usize,
) -> BracketOutcome {
    let mut segment = String::new();

    while let Some(ch) = scanner.peek() {
        if ch == '\n' {
            break;
        }
        if ch == '[' {
            let state = scanner.save();
            scanner.bump();
            if scanner.peek() == Some('/') {
                scanner.bump();
                if scanner.peek() == Some(']') {
                    scanner.bump();
                    let children = parse_inlines(&segment, errors, base_line);
                    return BracketOutcome::Node(Inline::new(InlineKind::Attrs {
                        attrs,
                        children,
                    }));
                }
            } else if let Some(candidate) = scanner.lookahead_until(']')
                && is_attribute_expression(&candidate)
            {
                scanner.restore(state);
                break;
            }
            scanner.restore(state);
        }
        scanner.bump();
        segment.push(ch);
    }

    let children = parse_inlines(&segment, errors, base_line);
    BracketOutcome::Node(Inline::new(InlineKind::Attrs { attrs, children }))
}

fn parse_link_after_keyword(
    scanner: &mut CharScanner,
    errors: &mut Vec<ParseError>,
    start_line: usize,
) -> BracketOutcome {
    let mut raw = String::from("[link]");
    let mut link_color: Option<ColorAttribute> = None;
    let mut underline_color: Option<ColorAttribute> = None;

    // Optional leading `[color]` / `[!color]` groups.
    while scanner.peek() == Some('[') {
        let state = scanner.save();
        let (save_line, save_column) = (scanner.line, scanner.column);
        scanner.bump();

        let mut attr_inside = String::new();
        let mut attr_closed = false;
        while let Some(ch) = scanner.peek() {
            if ch == ']' {
                scanner.bump();
                attr_closed = true;
                break;
            }
            scanner.bump();
            attr_inside.push(ch);
        }

        if !attr_closed {
            errors.push(
                ParseError::warning("Missing closing ] for link attribute", save_line)
                    .with_column(save_column),
            );
            return BracketOutcome::Literal(format!("[link][{attr_inside}"));
        }

        if attr_inside.is_empty() {
            scanner.restore(state);
            break;
        }

        let mut recognized = false;
        for part in attr_inside.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            if let Some(rest) = part.strip_prefix('!') {
                if let Some(color) = ColorAttribute::parse(rest) {
                    underline_color = Some(color);
                    recognized = true;
                }
            } else if let Some(color) = ColorAttribute::parse(part) {
                link_color = Some(color);
                recognized = true;
            }
        }

        if !recognized {
            scanner.restore(state);
            break;
        }

        raw.push('[');
        raw.push_str(&attr_inside);
        raw.push(']');
    }

    let mut text = String::new();
    while let Some(ch) = scanner.peek() {
        if ch == '(' {
            break;
        }
        scanner.bump();
        text.push(ch);
    }

    let trimmed_text = text.trim().to_string();
    if trimmed_text.is_empty() {
        return BracketOutcome::Literal(format!("{raw}{text}"));
    }
    raw.push_str(&text);

    if scanner.peek() != Some('(') {
        errors.push(
            ParseError::warning("Missing (url) after [link]text for inline link", scanner.line)
                .with_column(scanner.column),
        );
        return BracketOutcome::Literal(raw);
    }

    scanner.bump();
    let mut url = String::new();
    while let Some(ch) = scanner.peek() {
        if ch == ')' {
            scanner.bump();
            break;
        }
        scanner.bump();
        url.push(ch);
    }

    let href = url.trim().to_string();
    if href.is_empty() {
        errors.push(
            ParseError::warning("Empty url in inline link", scanner.line)
                .with_column(scanner.column),
        );
        return BracketOutcome::Literal(format!("{raw}()"));
    }

    let children = parse_inlines(&trimmed_text, errors, start_line);
    BracketOutcome::Node(Inline::new(InlineKind::Link {
        href,
        children,
        color: link_color,
        underline_color,
    }))
}
