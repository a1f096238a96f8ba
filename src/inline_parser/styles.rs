//! Paired style markers: `*` strong, `/` em, `_` underline, `-` strike,
//! `~` wave, `^` superscript and `^^` subscript.

use crate::ast::{Inline, InlineKind};
use crate::diagnostics::ParseError;
use crate::scanner::CharScanner;

use super::parse_inlines;

pub(super) fn read_styled_segment(
    scanner: &mut CharScanner,
    errors: &mut Vec<ParseError>,
) -> Inline {
    let start_line = scanner.line;
    let start_column = scanner.column;
    let marker = match scanner.bump() {
        Some(ch) => ch,
        None => return Inline::text(""),
    };

    let mut expect_double_caret = false;
    if marker == '^' && scanner.peek() == Some('^') {
        scanner.bump();
        expect_double_caret = true;
    }

    let mut content = String::new();
    while let Some(ch) = scanner.peek() {
        if ch == marker {
            if expect_double_caret {
                // Subscript closes only on a caret pair; a single caret is
                // content.
                let state = scanner.save();
                scanner.bump();
                if scanner.peek() == Some('^') {
                    scanner.bump();
                    let children = parse_inlines(&content, errors, start_line);
                    return Inline::new(styled_kind(marker, true, children));
                }
                scanner.restore(state);
            } else {
                scanner.bump();
                let children = parse_inlines(&content, errors, start_line);
                return Inline::new(styled_kind(marker, false, children));
            }
        }
        scanner.bump();
        content.push(ch);
    }

    errors.push(
        ParseError::warning("Missing closing style delimiter", start_line)
            .with_column(start_column),
    );
    Inline::text(format!("{marker}{content}"))
}

fn styled_kind(marker: char, double_caret: bool, children: Vec<Inline>) -> InlineKind {
    match marker {
        '*' => InlineKind::Strong { children },
        '/' => InlineKind::Em { children },
        '_' => InlineKind::Underline { children },
        '-' => InlineKind::Strike { children },
        '~' => InlineKind::Wave { children },
        _ if double_caret => InlineKind::Sub { children },
        _ => InlineKind::Sup { children },
    }
}
