//! Footnote reconciliation: every `[fn:id]` reference should have a
//! matching `[fn=id]` definition somewhere in the document.

use std::collections::HashSet;

use crate::ast::{self, Block, BlockKind, InlineKind};
use crate::diagnostics::ParseError;

struct RefSite {
    id: String,
    line: usize,
    column: Option<usize>,
    origin: Option<String>,
}

pub(crate) fn check_footnotes(blocks: &[Block], errors: &mut Vec<ParseError>) {
    let mut defined = HashSet::new();
    ast::for_each_block(blocks, &mut |block| {
        if let BlockKind::FootnoteDef { id, .. } = &block.kind {
            defined.insert(id.clone());
        }
    });

    // First reference per id, in document order.
    let mut sites: Vec<RefSite> = Vec::new();
    let mut seen = HashSet::new();
    ast::for_each_inline_container(blocks, &mut |children, container_location| {
        ast::walk_inlines(children, &mut |node| {
            if let InlineKind::FootnoteRef { id } = &node.kind
                && !seen.contains(id)
            {
                seen.insert(id.clone());
                let location = node.location.or(container_location);
                sites.push(RefSite {
                    id: id.clone(),
                    line: location.map_or(1, |l| l.line),
                    column: node.location.map(|l| l.column),
                    origin: node.origin.clone(),
                });
            }
        });
    });

    for site in sites {
        if defined.contains(&site.id) {
            continue;
        }
        let origin_suffix = site
            .origin
            .as_deref()
            .map_or_else(String::new, |origin| format!(" (from include \"{origin}\")"));
        let mut record = ParseError::warning(
            format!(
                "Footnote reference \"{}\" has no corresponding definition{origin_suffix}",
                site.id
            ),
            site.line,
        );
        if let Some(column) = site.column {
            record = record.with_column(column);
        }
        errors.push(record);
    }
}
