//! `=text=` marker-pen highlights.

use crate::ast::{HighlightMode, Inline, InlineKind};
use crate::diagnostics::ParseError;
use crate::scanner::CharScanner;

use super::parse_inlines;

pub(super) fn read_marker_highlight(
    scanner: &mut CharScanner,
    errors: &mut Vec<ParseError>,
) -> Inline {
    let start_line = scanner.line;
    let start_column = scanner.column;
    scanner.bump();

    // A lone `=` with no closing marker anywhere ahead is plain text.
    if !scanner.lookahead_contains('=') {
        return Inline::text("=");
    }

    let mut content = String::new();
    while let Some(ch) = scanner.peek() {
        if ch == '=' {
            scanner.bump();
            if content.is_empty() {
                return Inline::text("==");
            }
            let children = parse_inlines(&content, errors, start_line);
            return Inline::new(InlineKind::Highlight {
                mode: HighlightMode::Marker,
                children,
                color: None,
                fill_color: None,
            });
        }
        scanner.bump();
        content.push(ch);
    }

    errors.push(
        ParseError::warning("Missing closing = for marker highlight", start_line)
            .with_column(start_column),
    );
    Inline::text(format!("={content}"))
}
