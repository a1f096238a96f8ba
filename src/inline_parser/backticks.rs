//! Backtick constructs: single-tick code spans and N-tick frame highlights.

use crate::ast::{HighlightMode, Inline, InlineKind};
use crate::diagnostics::ParseError;
use crate::scanner::CharScanner;

use super::parse_inlines;

pub(super) fn read_backtick_segment(
    scanner: &mut CharScanner,
    errors: &mut Vec<ParseError>,
) -> Inline {
    let start_line = scanner.line;
    let start_column = scanner.column;

    let mut tick_count = 0;
    while scanner.peek() == Some('`') {
        scanner.bump();
        tick_count += 1;
    }

    if tick_count == 1 {
        let mut value = String::new();
        while let Some(ch) = scanner.peek() {
            if ch == '`' {
                scanner.bump();
                return Inline::new(InlineKind::CodeSpan { value });
            }
            scanner.bump();
            value.push(ch);
        }

        errors.push(
            ParseError::warning("Missing closing backtick for inline code span", start_line)
                .with_column(start_column),
        );
        return Inline::text(format!("`{value}"));
    }

    // N ticks open a frame highlight closed only by exactly N ticks; the
    // interior is re-parsed.
    let mut content = String::new();
    while let Some(ch) = scanner.peek() {
        if ch == '`' {
            let state = scanner.save();
            let mut matched = true;
            for _ in 0..tick_count {
                if scanner.peek() != Some('`') {
                    matched = false;
                    break;
                }
                scanner.bump();
            }
            if matched {
                let children = parse_inlines(&content, errors, start_line);
                return Inline::new(InlineKind::Highlight {
                    mode: HighlightMode::Frame,
                    children,
                    color: None,
                    fill_color: None,
                });
            }
            scanner.restore(state);
        }
        scanner.bump();
        content.push(ch);
    }

    errors.push(
        ParseError::warning(
            "Missing closing double backticks for frame highlight",
            start_line,
        )
        .with_column(start_column),
    );
    Inline::text(format!("{}{content}", "`".repeat(tick_count)))
}
