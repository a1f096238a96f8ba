//! Line-oriented block parsing.
//!
//! One forward scan over the classified lines. Attribute-only lines fold
//! into a pending context that the next committed block consumes; every
//! other rule is tried in a fixed order and the first match wins. Multi-line
//! constructs (fences, quote runs, tables, lists, footnote regions) consume
//! their whole extent before the loop resumes.

use crate::ast::{Block, BlockAttributes, BlockKind, Inline, Position, SourceLocation};
use crate::diagnostics::ParseError;
use crate::scanner::{LineInfo, classify_line};

mod attribute_lines;
mod code_blocks;
mod footnotes;
mod headings;
mod horizontal_rules;
mod images;
mod includes;
mod lists;
mod quotes;
mod tables;
#[cfg(test)]
mod tests;

/// Parse `source` into a block list, appending diagnostics to `errors`.
///
/// Re-entrant: quote interiors and footnote definitions call back into this
/// with their dedented text.
pub(crate) fn parse_blocks(source: &str, errors: &mut Vec<ParseError>) -> Vec<Block> {
    BlockParser::new(source, errors).parse()
}

/// Layout state accumulated from attribute-only lines, consumed by the next
/// block commit.
#[derive(Debug, Default)]
struct PendingBlock {
    attrs: Option<BlockAttributes>,
    fold_next: bool,
    tag_name: Option<String>,
    is_comment: bool,
    is_disabled: bool,
    is_sheet: bool,
    is_html: bool,
}

struct BlockParser<'a, 'e> {
    lines: Vec<&'a str>,
    pos: usize,
    blocks: Vec<Block>,
    pending: PendingBlock,
    /// Position of the previous committed block, the base for `[->]` shifts.
    last_position: Position,
    errors: &'e mut Vec<ParseError>,
}

impl<'a, 'e> BlockParser<'a, 'e> {
    fn new(source: &'a str, errors: &'e mut Vec<ParseError>) -> Self {
        Self {
            lines: source.split('\n').collect(),
            pos: 0,
            blocks: Vec::new(),
            pending: PendingBlock::default(),
            last_position: Position::Left,
            errors,
        }
    }

    fn parse(mut self) -> Vec<Block> {
        while self.pos < self.lines.len() {
            let info = classify_line(self.lines[self.pos]);
            let trimmed = info.content.trim();

            if trimmed.is_empty() {
                self.pos += 1;
                continue;
            }

            log::debug!("block line {}: {:?}", self.pos + 1, info.content);

            if footnotes::try_parse_footnotes_region(&mut self, info, trimmed) {
                continue;
            }
            if code_blocks::try_parse_code_fence(&mut self, info, trimmed) {
                continue;
            }
            if attribute_lines::is_attribute_only_line(trimmed) {
                attribute_lines::apply_attribute_line(&mut self, trimmed);
                self.pos += 1;
                continue;
            }
            if includes::try_parse_include(&mut self, info) {
                continue;
            }
            if headings::try_parse_heading(&mut self, info) {
                continue;
            }
            if horizontal_rules::try_parse_horizontal_rule(&mut self, info, trimmed) {
                continue;
            }
            if self.try_parse_content_title(info) {
                continue;
            }
            if quotes::try_parse_quote(&mut self, info) {
                continue;
            }
            if tables::try_parse_table(&mut self, info) {
                continue;
            }
            if images::try_parse_image(&mut self, info, trimmed) {
                continue;
            }
            if images::try_parse_html_ref(&mut self, info, trimmed) {
                continue;
            }
            if lists::try_parse_list(&mut self, info) {
                continue;
            }
            self.parse_fallback_run(info);
        }
        self.blocks
    }

    fn line_location(&self, info: LineInfo<'_>) -> SourceLocation {
        SourceLocation {
            line: self.pos + 1,
            column: info.tab_count + 1,
        }
    }

    /// Attributes for the block being committed: pending attrs, a tab-derived
    /// position unless one was set explicitly, and the armed fold flag.
    fn build_attrs(&self, tab_count: usize) -> BlockAttributes {
        let mut attrs = self.pending.attrs.clone().unwrap_or_default();
        if attrs.position.is_none() {
            attrs.position = Some(position_for_tabs(tab_count));
        }
        if self.pending.fold_next {
            attrs.fold = true;
        }
        attrs
    }

    /// Push a finished block: wrap it for a pending tag (unless disabled)
    /// and a pending comment, record the next shift base, reset the pending
    /// context.
    fn commit(
        &mut self,
        block: Block,
        wrapper_attrs: Option<BlockAttributes>,
        location: SourceLocation,
        tab_count: usize,
        allow_tag: bool,
    ) {
        let mut block = block;
        if allow_tag && let Some(name) = self.pending.tag_name.take() {
            block = Block {
                kind: BlockKind::Tagged {
                    name,
                    child: Box::new(block),
                },
                attrs: wrapper_attrs,
                location: Some(location),
                origin: None,
            };
        }
        if self.pending.is_comment {
            block = Block {
                kind: BlockKind::Comment {
                    children: vec![block],
                },
                attrs: None,
                location: Some(location),
                origin: None,
            };
        }

        self.last_position = block
            .attrs
            .as_ref()
            .and_then(|attrs| attrs.position)
            .unwrap_or_else(|| position_for_tabs(tab_count));
        self.blocks.push(block);
        self.pending = PendingBlock::default();
    }

    /// `> text` amends the title of a directly preceding image when nothing
    /// is pending; otherwise it is a standalone content-title block.
    fn try_parse_content_title(&mut self, info: LineInfo<'_>) -> bool {
        let Some(text) = match_content_title(info.content) else {
            return false;
        };

        if self.pending_is_empty()
            && let Some(last) = self.blocks.last_mut()
        {
            let image_title = match &mut last.kind {
                BlockKind::Image { title, .. } => Some(title),
                BlockKind::Tagged { child, .. } => match &mut child.kind {
                    BlockKind::Image { title, .. } => Some(title),
                    _ => None,
                },
                _ => None,
            };
            if let Some(title) = image_title {
                *title = Some(text.to_string());
                self.pending = PendingBlock::default();
                self.pos += 1;
                return true;
            }
        }

        let location = self.line_location(info);
        let attrs = self.build_attrs(info.tab_count);
        if self.pending.is_disabled {
            let block = Block::new(BlockKind::Disabled {
                raw: info.raw.to_string(),
            })
            .with_attrs(Some(attrs));
            self.commit(
                block.at(location.line, location.column),
                None,
                location,
                info.tab_count,
                false,
            );
        } else {
            // A content title carries no attrs of its own; a pending tag
            // wrapper still gets them.
            let block = Block::new(BlockKind::ContentTitle {
                children: vec![Inline::text(text)],
            })
            .at(location.line, location.column);
            self.commit(block, Some(attrs), location, info.tab_count, true);
        }
        self.pos += 1;
        true
    }

    fn pending_is_empty(&self) -> bool {
        self.pending.attrs.is_none()
            && !self.pending.fold_next
            && self.pending.tag_name.is_none()
            && !self.pending.is_comment
            && !self.pending.is_disabled
            && !self.pending.is_sheet
            && !self.pending.is_html
    }

    /// Fallback: a run of lines no other rule claims becomes one paragraph,
    /// except a lone `[`-led line which passes through as raw syntax.
    fn parse_fallback_run(&mut self, info: LineInfo<'a>) {
        let mut raw_lines = vec![info.raw];
        let mut text_lines = vec![info.content];

        let mut next = self.pos + 1;
        while next < self.lines.len() {
            let next_info = classify_line(self.lines[next]);
            let next_trimmed = next_info.content.trim();
            if next_trimmed.is_empty()
                || attribute_lines::is_attribute_only_line(next_trimmed)
                || footnotes::is_footnotes_line(next_trimmed)
                || includes::match_include(next_info.content).is_some()
                || headings::match_heading(next_info.content).is_some()
                || match_content_title(next_info.content).is_some()
                || quotes::match_quote(next_info.content).is_some()
                || code_blocks::match_code_fence_start(next_trimmed).is_some()
                || horizontal_rules::match_horizontal_rule(next_trimmed).is_some()
                || images::match_image_block(next_trimmed).is_some()
                || images::match_html_ref(next_trimmed).is_some()
                || lists::match_list_item(next_info.content).is_some()
            {
                break;
            }
            raw_lines.push(next_info.raw);
            text_lines.push(next_info.content);
            next += 1;
        }

        let location = self.line_location(info);
        let attrs = self.build_attrs(info.tab_count);
        let block_text = text_lines.join("\n");

        if self.pending.is_disabled {
            let block = Block::new(BlockKind::Disabled {
                raw: raw_lines.join("\n"),
            })
            .with_attrs(Some(attrs))
            .at(location.line, location.column);
            self.commit(block, None, location, info.tab_count, false);
        } else {
            let raw_pass_through = text_lines.len() == 1 && block_text.trim_start().starts_with('[');
            let kind = if raw_pass_through {
                BlockKind::Raw { value: block_text }
            } else {
                BlockKind::Paragraph {
                    children: vec![Inline::text(block_text)],
                }
            };
            let attrs_clone = attrs.clone();
            let block = Block::new(kind)
                .with_attrs(Some(attrs))
                .at(location.line, location.column);
            self.commit(block, Some(attrs_clone), location, info.tab_count, true);
        }

        self.pos = next;
    }
}

fn match_content_title(content: &str) -> Option<&str> {
    let rest = content.strip_prefix('>')?;
    let text = rest.strip_prefix([' ', '\t'])?.trim();
    if text.is_empty() { None } else { Some(text) }
}

/// 0 tabs left, 1 tab center, 2 tabs right.
fn position_for_tabs(tab_count: usize) -> Position {
    match tab_count {
        0 => Position::Left,
        1 => Position::Center,
        _ => Position::Right,
    }
}

/// `[->]` pushes the base one column right, saturating.
fn shift_position_right(position: Position) -> Position {
    match position {
        Position::Left => Position::Center,
        Position::Center | Position::Right => Position::Right,
    }
}
