//! Backslash escapes: the following character is literal.

use crate::scanner::CharScanner;

pub(super) fn read_escape(scanner: &mut CharScanner) -> String {
    scanner.bump();
    match scanner.bump() {
        Some(escaped) => escaped.to_string(),
        // A trailing backslash escapes nothing and disappears.
        None => String::new(),
    }
}
