//! Parse diagnostics.
//!
//! Every stage appends to one ordered list. Malformed input never aborts the
//! parse; it degrades per construct and leaves a record here.

/// Stable code attached to the "more than two `[->]` shifts" warning.
pub const MULTI_ARROW_WARNING_CODE: &str = "layout-multi-arrow";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Severity {
    /// Fatal to a region (for example an unterminated code fence); parsing
    /// continues after the region.
    Error,
    /// Recoverable; the construct degrades to literal text or stays
    /// unexpanded.
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParseError {
    pub message: String,
    /// 1-based source line.
    pub line: usize,
    /// 1-based column; block-level records approximate the first non-tab
    /// character.
    pub column: Option<usize>,
    pub severity: Severity,
    /// Stable machine-readable code, set only where callers match on it.
    pub code: Option<String>,
}

impl ParseError {
    pub fn error(message: impl Into<String>, line: usize) -> Self {
        Self {
            message: message.into(),
            line,
            column: None,
            severity: Severity::Error,
            code: None,
        }
    }

    pub fn warning(message: impl Into<String>, line: usize) -> Self {
        Self {
            message: message.into(),
            line,
            column: None,
            severity: Severity::Warning,
            code: None,
        }
    }

    pub fn with_column(mut self, column: usize) -> Self {
        self.column = Some(column);
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Copy of this record with the `[include:target]` marker prepended,
    /// used when diagnostics from an included file surface in the including
    /// document.
    pub fn prefixed_for_include(&self, target: &str) -> Self {
        let mut prefixed = self.clone();
        prefixed.message = format!("[include:{}] {}", target, self.message);
        prefixed
    }
}
