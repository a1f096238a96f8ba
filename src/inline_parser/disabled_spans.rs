//! `{...}` disabled spans: the interior is literal text, never re-parsed.

use crate::diagnostics::ParseError;
use crate::scanner::CharScanner;

pub(super) fn read_disabled_span(scanner: &mut CharScanner, errors: &mut Vec<ParseError>) -> String {
    let start_line = scanner.line;
    let start_column = scanner.column;
    scanner.bump();

    let mut content = String::new();
    while let Some(ch) = scanner.peek() {
        if ch == '}' {
            scanner.bump();
            return content;
        }
        scanner.bump();
        content.push(ch);
    }

    errors.push(
        ParseError::warning("Missing closing } for disabled inline segment", start_line)
            .with_column(start_column),
    );
    format!("{{{content}")
}
