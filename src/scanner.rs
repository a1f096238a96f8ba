//! Character and line primitives shared by the block and inline parsers.

/// Leading tabs beyond this count belong to the line content.
pub(crate) const MAX_TABS_FOR_POSITION: usize = 2;

/// A classified source line: the raw text, the content after the positional
/// tab prefix, and how many tabs were stripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LineInfo<'a> {
    pub raw: &'a str,
    pub content: &'a str,
    pub tab_count: usize,
}

pub(crate) fn classify_line(raw: &str) -> LineInfo<'_> {
    classify_line_with_limit(raw, MAX_TABS_FOR_POSITION)
}

pub(crate) fn classify_line_with_limit(raw: &str, max_tabs: usize) -> LineInfo<'_> {
    let mut tab_count = 0;
    for ch in raw.chars() {
        if ch != '\t' || tab_count >= max_tabs {
            break;
        }
        tab_count += 1;
    }
    LineInfo {
        raw,
        content: &raw[tab_count..],
        tab_count,
    }
}

/// Saved scanner position for backtracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ScannerState {
    index: usize,
    line: usize,
    column: usize,
}

/// Character cursor with 1-based line/column tracking.
///
/// The inline grammar backtracks freely (style close markers, attribute
/// bracket lookahead), so positions can be saved and restored wholesale.
#[derive(Debug)]
pub(crate) struct CharScanner {
    chars: Vec<char>,
    index: usize,
    pub line: usize,
    pub column: usize,
}

impl CharScanner {
    pub fn new(text: &str) -> Self {
        Self::with_base(text, 1, 1)
    }

    pub fn with_base(text: &str, base_line: usize, base_column: usize) -> Self {
        Self {
            chars: text.chars().collect(),
            index: 0,
            line: base_line,
            column: base_column,
        }
    }

    pub fn eof(&self) -> bool {
        self.index >= self.chars.len()
    }

    pub fn peek(&self) -> Option<char> {
        self.chars.get(self.index).copied()
    }

    /// Consume the current character, updating line/column.
    pub fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.index += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    pub fn save(&self) -> ScannerState {
        ScannerState {
            index: self.index,
            line: self.line,
            column: self.column,
        }
    }

    pub fn restore(&mut self, state: ScannerState) {
        self.index = state.index;
        self.line = state.line;
        self.column = state.column;
    }

    /// Whether `needle` occurs anywhere at or after the current position.
    pub fn lookahead_contains(&self, needle: char) -> bool {
        self.chars[self.index..].contains(&needle)
    }

    /// Text strictly between the current position and the next occurrence of
    /// `stop`, without consuming anything. `None` when `stop` is absent.
    pub fn lookahead_until(&self, stop: char) -> Option<String> {
        let rest = &self.chars[self.index..];
        let offset = rest.iter().position(|&c| c == stop)?;
        Some(rest[..offset].iter().collect())
    }
}
