//! Include expansion.
//!
//! One [`ExpandContext`] is threaded through the whole expansion, nested
//! files included, so the target stack sees the full chain: cycles and the
//! depth limit hold across files, and each file is loaded and parsed once.
//! Tag includes resolve against the top-level tagged blocks of the document
//! being expanded.
//!
//! Every failure leaves the include node in place and records a warning at
//! its line.

use std::collections::HashMap;

use crate::ast::{Block, BlockKind, IncludeMode, for_each_block};
use crate::config::LoadFile;
use crate::diagnostics::ParseError;

pub(crate) struct ExpandContext<'a> {
    /// Targets currently being expanded, outermost first.
    stack: Vec<String>,
    max_depth: usize,
    load_file: Option<&'a LoadFile>,
    cache: HashMap<String, CachedTarget>,
}

struct CachedTarget {
    children: Vec<Block>,
    errors: Vec<ParseError>,
}

impl<'a> ExpandContext<'a> {
    pub(crate) fn new(max_depth: usize, load_file: Option<&'a LoadFile>) -> Self {
        Self {
            stack: Vec::new(),
            max_depth,
            load_file,
            cache: HashMap::new(),
        }
    }
}

pub(crate) fn expand_includes(
    blocks: &mut Vec<Block>,
    errors: &mut Vec<ParseError>,
    ctx: &mut ExpandContext<'_>,
) {
    let tag_index = TagIndex::build(blocks);
    expand_in_blocks(blocks, &tag_index, errors, ctx);
}

/// Tagged blocks by name, first occurrence wins at each level.
struct TagIndex {
    top_level: HashMap<String, Block>,
    nested: HashMap<String, Block>,
}

impl TagIndex {
    fn build(blocks: &[Block]) -> Self {
        let mut top_level = HashMap::new();
        for block in blocks {
            if let BlockKind::Tagged { name, child } = &block.kind
                && !top_level.contains_key(name)
            {
                top_level.insert(name.clone(), (**child).clone());
            }
        }
        let mut nested = HashMap::new();
        for_each_block(blocks, &mut |block| {
            if let BlockKind::Tagged { name, child } = &block.kind
                && !nested.contains_key(name)
            {
                nested.insert(name.clone(), (**child).clone());
            }
        });
        Self { top_level, nested }
    }

    /// Top-level definitions win; a tag defined inside a quote, list, or
    /// footnote region is still reachable as a fallback.
    fn lookup(&self, target: &str) -> Option<&Block> {
        self.top_level
            .get(target)
            .or_else(|| self.nested.get(target))
    }
}

fn expand_in_blocks(
    blocks: &mut Vec<Block>,
    tag_index: &TagIndex,
    errors: &mut Vec<ParseError>,
    ctx: &mut ExpandContext<'_>,
) {
    let mut i = 0;
    while i < blocks.len() {
        if let BlockKind::Include { mode, target } = &blocks[i].kind {
            let mode = *mode;
            let target = target.clone();
            let line = blocks[i].location.map_or(1, |l| l.line);
            match expand_single(mode, &target, line, tag_index, errors, ctx) {
                Some(replacement) => {
                    // Spliced content is already fully expanded; skip it.
                    let len = replacement.len();
                    blocks.splice(i..=i, replacement);
                    i += len;
                }
                None => i += 1,
            }
        } else {
            expand_in_children(&mut blocks[i], tag_index, errors, ctx);
            i += 1;
        }
    }
}

fn expand_in_children(
    block: &mut Block,
    tag_index: &TagIndex,
    errors: &mut Vec<ParseError>,
    ctx: &mut ExpandContext<'_>,
) {
    match &mut block.kind {
        BlockKind::Quote { children, .. }
        | BlockKind::ListItem { children, .. }
        | BlockKind::Footnotes { children }
        | BlockKind::FootnoteDef { children, .. }
        | BlockKind::Comment { children } => {
            expand_in_blocks(children, tag_index, errors, ctx);
        }
        BlockKind::List { items, .. } => {
            expand_in_blocks(items, tag_index, errors, ctx);
        }
        _ => {}
    }
}

fn expand_single(
    mode: IncludeMode,
    target: &str,
    line: usize,
    tag_index: &TagIndex,
    errors: &mut Vec<ParseError>,
    ctx: &mut ExpandContext<'_>,
) -> Option<Vec<Block>> {
    match mode {
        IncludeMode::Tag => {
            if let Some(child) = tag_index.lookup(target) {
                Some(vec![child.clone()])
            } else {
                errors.push(ParseError::warning(
                    format!("Include tag target \"{target}\" not found"),
                    line,
                ));
                None
            }
        }
        IncludeMode::File => expand_file(target, line, errors, ctx),
    }
}

fn expand_file(
    target: &str,
    line: usize,
    errors: &mut Vec<ParseError>,
    ctx: &mut ExpandContext<'_>,
) -> Option<Vec<Block>> {
    if ctx.stack.len() >= ctx.max_depth {
        errors.push(ParseError::warning(
            format!(
                "Include max depth {} exceeded for target \"{target}\"",
                ctx.max_depth
            ),
            line,
        ));
        return None;
    }
    if ctx.stack.iter().any(|entry| entry == target) {
        errors.push(ParseError::warning(
            format!("Include cycle detected for target \"{target}\""),
            line,
        ));
        return None;
    }
    let Some(load_file) = ctx.load_file else {
        errors.push(ParseError::warning(
            format!("Include with mode \"file\" requires a load_file option to expand target \"{target}\""),
            line,
        ));
        return None;
    };

    if let Some(cached) = ctx.cache.get(target) {
        errors.extend(cached.errors.iter().map(|e| e.prefixed_for_include(target)));
        return Some(
            cached
                .children
                .iter()
                .map(|block| block.clone_with_origin(target))
                .collect(),
        );
    }

    // The loader sees the stack with the requested target already on it.
    ctx.stack.push(target.to_string());
    let Some(source) = load_file(target, &ctx.stack) else {
        ctx.stack.pop();
        errors.push(ParseError::warning(
            format!("Include target \"{target}\" could not be loaded"),
            line,
        ));
        return None;
    };

    log::debug!("expanding include {target:?} at depth {}", ctx.stack.len());

    let mut child_errors = Vec::new();
    let normalized = crate::normalize_line_endings(&source);
    let (_meta, body) = crate::metadata::extract(&normalized);
    let mut children = crate::block_parser::parse_blocks(&body, &mut child_errors);
    crate::inline_parser::enrich_blocks(&mut children, &mut child_errors);
    expand_includes(&mut children, &mut child_errors, ctx);
    ctx.stack.pop();

    errors.extend(child_errors.iter().map(|e| e.prefixed_for_include(target)));
    let replacement = children
        .iter()
        .map(|block| block.clone_with_origin(target))
        .collect();
    ctx.cache.insert(
        target.to_string(),
        CachedTarget {
            children,
            errors: child_errors,
        },
    );
    Some(replacement)
}
