//! Vellum is a parser for a layout-aware lightweight markup language.
//!
//! A document is parsed in stages: a metadata template is split off the top,
//! a line-oriented pass builds the block tree, an inline pass enriches each
//! container's text, and post-processing expands includes and reconciles
//! footnotes. Malformed input never fails the parse; problems degrade
//! locally and are reported in [`ParseResult::errors`].
//!
//! ```
//! let result = vellum::parse_with_defaults("# Title\n\nBody text.");
//! assert!(result.errors.is_empty());
//! assert_eq!(result.document.children.len(), 2);
//! ```

pub mod ast;
mod attributes;
mod block_parser;
pub mod config;
pub mod diagnostics;
mod inline_parser;
mod metadata;
mod postprocess;
mod scanner;

pub use ast::{Block, BlockKind, Document, Inline, InlineKind, Meta, SourceLocation};
pub use config::{DEFAULT_INCLUDE_MAX_DEPTH, ParseOptions};
pub use diagnostics::{MULTI_ARROW_WARNING_CODE, ParseError, Severity};

#[derive(Debug)]
pub struct ParseResult {
    pub document: Document,
    /// Diagnostics from every stage, in the order they were recorded.
    pub errors: Vec<ParseError>,
}

pub fn parse(source: &str, options: &ParseOptions) -> ParseResult {
    init_logger();
    let normalized = normalize_line_endings(source);

    let mut errors = Vec::new();
    let (meta, body) = metadata::extract(&normalized);
    let mut children = block_parser::parse_blocks(&body, &mut errors);
    inline_parser::enrich_blocks(&mut children, &mut errors);

    if options.expand_include {
        let mut ctx = postprocess::ExpandContext::new(
            options.include_max_depth,
            options.load_file.as_deref(),
        );
        postprocess::expand_includes(&mut children, &mut errors, &mut ctx);
    }
    postprocess::check_footnotes(&children, &mut errors);

    ParseResult {
        document: Document {
            meta,
            children,
            source: Some(normalized),
        },
        errors,
    }
}

pub fn parse_with_defaults(source: &str) -> ParseResult {
    parse(source, &ParseOptions::default())
}

pub(crate) fn normalize_line_endings(source: &str) -> String {
    if source.contains('\r') {
        source.replace("\r\n", "\n").replace('\r', "\n")
    } else {
        source.to_string()
    }
}

#[cfg(debug_assertions)]
pub(crate) fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[cfg(not(debug_assertions))]
pub(crate) fn init_logger() {}
