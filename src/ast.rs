//! The Vellum document tree.
//!
//! Blocks and inlines are plain owned data. Location and include origin are
//! explicit optional fields on every node rather than side tables, so cloned
//! subtrees carry their provenance with them.

/// 1-based source position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Document {
    pub meta: Option<Meta>,
    pub children: Vec<Block>,
    /// Original input text, kept for debugging.
    pub source: Option<String>,
}

/// Metadata from the initialization template between underscore boundary
/// lines.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Meta {
    pub title: Option<String>,
    pub author: Option<String>,
    pub author_url: Option<String>,
    pub time: Option<String>,
    pub add_info: Option<String>,
    pub tags: Vec<String>,
    /// Font styles applied to the whole document.
    pub global_font: Vec<FontStyle>,
}

impl Meta {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.author_url.is_none()
            && self.time.is_none()
            && self.add_info.is_none()
            && self.tags.is_empty()
            && self.global_font.is_empty()
    }
}

/// Column a block starts in, derived from leading tabs or `[->]` shifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Position {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Alignment {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ColorKind {
    /// A named color such as `red`.
    Preset,
    /// A `#`-prefixed hex value, passed through verbatim.
    Hex,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColorAttribute {
    pub kind: ColorKind,
    pub value: String,
}

impl ColorAttribute {
    /// Classify a raw token as a color. Any non-empty token qualifies; a
    /// leading `#` selects the hex kind.
    pub fn parse(token: &str) -> Option<Self> {
        let value = token.trim();
        if value.is_empty() {
            return None;
        }
        let kind = if value.starts_with('#') {
            ColorKind::Hex
        } else {
            ColorKind::Preset
        };
        Some(Self {
            kind,
            value: value.to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FontStyle {
    Italic,
    Bold,
    Heavy,
    Slim,
    Serif,
    Mono,
}

impl FontStyle {
    /// Match a full style keyword. Short aliases are an inline-attribute
    /// concern and live with the attribute tokenizer.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "italic" => Some(Self::Italic),
            "bold" => Some(Self::Bold),
            "heavy" => Some(Self::Heavy),
            "slim" => Some(Self::Slim),
            "serif" => Some(Self::Serif),
            "mono" => Some(Self::Mono),
            _ => None,
        }
    }
}

/// Attributes an inline `[...]` expression can carry.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InlineAttributes {
    pub color: Option<ColorAttribute>,
    /// `[!color]`: highlight fill or link underline color.
    pub secondary_color: Option<ColorAttribute>,
    /// 0.5 to 5 in half steps.
    pub font_size: Option<f32>,
    pub font_style: Vec<FontStyle>,
}

impl InlineAttributes {
    pub fn is_empty(&self) -> bool {
        self.color.is_none()
            && self.secondary_color.is_none()
            && self.font_size.is_none()
            && self.font_style.is_empty()
    }
}

/// Layout and style state accumulated from attribute-only lines and leading
/// tabs, attached to the next committed block.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockAttributes {
    pub color: Option<ColorAttribute>,
    pub secondary_color: Option<ColorAttribute>,
    pub font_size: Option<f32>,
    pub font_style: Vec<FontStyle>,
    /// Content alignment inside the block's own boundary.
    pub align: Option<Alignment>,
    pub position: Option<Position>,
    pub truncate_left: bool,
    pub truncate_right: bool,
    /// Collapsed by `[fold]` or a foldable heading.
    pub fold: bool,
    /// Rendered on the same line as the previous block (`[->]`).
    pub same_line: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ListKind {
    Bullet,
    Ordered,
    Task,
    Foldable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TaskStatus {
    /// `-[]`
    Unknown,
    /// `-[o]`
    InProgress,
    /// `-[x]`
    NotDone,
    /// `-[v]`
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OrderedStyle {
    Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RuleStyle {
    /// `---`
    Solid,
    /// `***`
    Dashed,
    /// `===`
    Bold,
    /// `~~~`
    Wavy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ImageShape {
    Square,
    Rounded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum IncludeMode {
    /// `[@](path)`
    File,
    /// `[@=name]`
    Tag,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableCell {
    pub children: Vec<Inline>,
    pub align: Option<Alignment>,
    pub location: Option<SourceLocation>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Block {
    pub kind: BlockKind,
    pub attrs: Option<BlockAttributes>,
    pub location: Option<SourceLocation>,
    /// Include target this block was spliced from, when expanded.
    pub origin: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum BlockKind {
    Paragraph {
        children: Vec<Inline>,
    },
    Heading {
        /// 1 to 5.
        level: u8,
        /// `#+` form.
        foldable: bool,
        children: Vec<Inline>,
    },
    /// `> text`, a caption line that did not attach to an image.
    ContentTitle {
        children: Vec<Inline>,
    },
    Quote {
        /// `@` nesting depth, absolute.
        level: usize,
        children: Vec<Block>,
    },
    List {
        kind: ListKind,
        ordered_style: Option<OrderedStyle>,
        items: Vec<Block>,
    },
    ListItem {
        kind: ListKind,
        /// `"1"`, `"1.1"`, ... for ordered and foldable items.
        ordinal: Option<String>,
        task_status: Option<TaskStatus>,
        indent: usize,
        children: Vec<Block>,
    },
    Code {
        language: Option<String>,
        value: String,
        /// Fence carried `[html]`; the value is inline HTML.
        html_like: bool,
    },
    Table {
        rows: Vec<TableRow>,
        align: Option<Vec<Alignment>>,
    },
    HorizontalRule {
        style: RuleStyle,
        color: Option<ColorAttribute>,
    },
    Image {
        url: String,
        /// Filled in by a following `> title` line.
        title: Option<String>,
        shape: Option<ImageShape>,
        rounded_radius: Option<f32>,
    },
    Html {
        /// Reference path from `[html](url)`.
        source: Option<String>,
        /// Inline HTML text from an `[html]` code fence.
        value: Option<String>,
    },
    Footnotes {
        children: Vec<Block>,
    },
    FootnoteDef {
        id: String,
        children: Vec<Block>,
    },
    /// `[comment]` wrapper; children are parsed but marked non-content.
    Comment {
        children: Vec<Block>,
    },
    /// `[disable]` region kept as raw text, no further parsing.
    Disabled {
        raw: String,
    },
    Include {
        mode: IncludeMode,
        target: String,
    },
    /// `[tag=name]` wrapper making the child addressable by `[@=name]`.
    Tagged {
        name: String,
        child: Box<Block>,
    },
    /// Single-line fallback for reserved `[...]` syntax.
    Raw {
        value: String,
    },
}

impl Block {
    pub fn new(kind: BlockKind) -> Self {
        Self {
            kind,
            attrs: None,
            location: None,
            origin: None,
        }
    }

    pub fn with_attrs(mut self, attrs: Option<BlockAttributes>) -> Self {
        self.attrs = attrs;
        self
    }

    pub fn at(mut self, line: usize, column: usize) -> Self {
        self.location = Some(SourceLocation { line, column });
        self
    }

    /// Deep clone with every node's origin overwritten, used when splicing
    /// the blocks of an included file into the including document.
    pub fn clone_with_origin(&self, origin: &str) -> Self {
        let mut cloned = self.clone();
        stamp_block_origin(&mut cloned, origin);
        cloned
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inline {
    pub kind: InlineKind,
    pub location: Option<SourceLocation>,
    pub origin: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum InlineKind {
    Text {
        value: String,
    },
    /// Single-backtick span, content kept verbatim.
    CodeSpan {
        value: String,
    },
    /// `/text/`
    Em {
        children: Vec<Inline>,
    },
    /// `*text*`
    Strong {
        children: Vec<Inline>,
    },
    /// `_text_`
    Underline {
        children: Vec<Inline>,
    },
    /// `-text-`
    Strike {
        children: Vec<Inline>,
    },
    /// `~text~`
    Wave {
        children: Vec<Inline>,
    },
    /// `^text^`
    Sup {
        children: Vec<Inline>,
    },
    /// `^^text^^`
    Sub {
        children: Vec<Inline>,
    },
    Highlight {
        mode: HighlightMode,
        children: Vec<Inline>,
        color: Option<ColorAttribute>,
        fill_color: Option<ColorAttribute>,
    },
    Link {
        href: String,
        children: Vec<Inline>,
        color: Option<ColorAttribute>,
        underline_color: Option<ColorAttribute>,
    },
    /// `[fn:id]`
    FootnoteRef {
        id: String,
    },
    /// `[comment]...[/]`
    Comment {
        children: Vec<Inline>,
    },
    /// `[attrs]scope[/]`
    Attrs {
        attrs: InlineAttributes,
        children: Vec<Inline>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum HighlightMode {
    /// `` `` text `` ``: framed box.
    Frame,
    /// `=text=`: marker-pen highlight.
    Marker,
}

impl Inline {
    pub fn new(kind: InlineKind) -> Self {
        Self {
            kind,
            location: None,
            origin: None,
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::new(InlineKind::Text {
            value: value.into(),
        })
    }

    pub fn at(mut self, line: usize, column: usize) -> Self {
        self.location = Some(SourceLocation { line, column });
        self
    }

    /// Child nodes for container kinds, `None` for leaves.
    pub fn children(&self) -> Option<&[Inline]> {
        match &self.kind {
            InlineKind::Em { children }
            | InlineKind::Strong { children }
            | InlineKind::Underline { children }
            | InlineKind::Strike { children }
            | InlineKind::Wave { children }
            | InlineKind::Sup { children }
            | InlineKind::Sub { children }
            | InlineKind::Highlight { children, .. }
            | InlineKind::Link { children, .. }
            | InlineKind::Comment { children }
            | InlineKind::Attrs { children, .. } => Some(children),
            InlineKind::Text { .. }
            | InlineKind::CodeSpan { .. }
            | InlineKind::FootnoteRef { .. } => None,
        }
    }

    fn children_mut(&mut self) -> Option<&mut Vec<Inline>> {
        match &mut self.kind {
            InlineKind::Em { children }
            | InlineKind::Strong { children }
            | InlineKind::Underline { children }
            | InlineKind::Strike { children }
            | InlineKind::Wave { children }
            | InlineKind::Sup { children }
            | InlineKind::Sub { children }
            | InlineKind::Highlight { children, .. }
            | InlineKind::Link { children, .. }
            | InlineKind::Comment { children }
            | InlineKind::Attrs { children, .. } => Some(children),
            InlineKind::Text { .. }
            | InlineKind::CodeSpan { .. }
            | InlineKind::FootnoteRef { .. } => None,
        }
    }
}

/// Visit every block in pre-order, descending through all block containers.
pub fn for_each_block<F: FnMut(&Block)>(blocks: &[Block], visit: &mut F) {
    for block in blocks {
        visit(block);
        match &block.kind {
            BlockKind::Tagged { child, .. } => {
                visit_one(child, visit);
            }
            BlockKind::Quote { children, .. }
            | BlockKind::ListItem { children, .. }
            | BlockKind::Footnotes { children }
            | BlockKind::FootnoteDef { children, .. }
            | BlockKind::Comment { children } => {
                for_each_block(children, visit);
            }
            BlockKind::List { items, .. } => {
                for_each_block(items, visit);
            }
            _ => {}
        }
    }
}

fn visit_one<F: FnMut(&Block)>(block: &Block, visit: &mut F) {
    for_each_block(std::slice::from_ref(block), visit);
}

/// Visit every inline container (paragraphs, headings, content titles, table
/// cells) in the tree. The second argument is the owner's location.
pub fn for_each_inline_container<F>(blocks: &[Block], visit: &mut F)
where
    F: FnMut(&[Inline], Option<SourceLocation>),
{
    for_each_block(blocks, &mut |block| match &block.kind {
        BlockKind::Paragraph { children }
        | BlockKind::Heading { children, .. }
        | BlockKind::ContentTitle { children } => {
            visit(children, block.location);
        }
        BlockKind::Table { rows, .. } => {
            for row in rows {
                for cell in &row.cells {
                    visit(&cell.children, cell.location);
                }
            }
        }
        _ => {}
    });
}

/// Mutable variant of [`for_each_inline_container`], used by the inline
/// enrichment pass to replace each container's children in place.
pub(crate) fn for_each_inline_container_mut<F>(blocks: &mut [Block], visit: &mut F)
where
    F: FnMut(&mut Vec<Inline>, Option<SourceLocation>),
{
    for block in blocks {
        let location = block.location;
        match &mut block.kind {
            BlockKind::Paragraph { children }
            | BlockKind::Heading { children, .. }
            | BlockKind::ContentTitle { children } => {
                visit(children, location);
            }
            BlockKind::Table { rows, .. } => {
                for row in rows {
                    for cell in &mut *row.cells {
                        visit(&mut cell.children, cell.location);
                    }
                }
            }
            BlockKind::Tagged { child, .. } => {
                for_each_inline_container_mut(std::slice::from_mut(child.as_mut()), visit);
            }
            BlockKind::Quote { children, .. }
            | BlockKind::ListItem { children, .. }
            | BlockKind::Footnotes { children }
            | BlockKind::FootnoteDef { children, .. }
            | BlockKind::Comment { children } => {
                for_each_inline_container_mut(children, visit);
            }
            BlockKind::List { items, .. } => {
                for_each_inline_container_mut(items, visit);
            }
            _ => {}
        }
    }
}

/// Visit every inline node in pre-order, descending through nested spans.
pub fn walk_inlines<F: FnMut(&Inline)>(nodes: &[Inline], visit: &mut F) {
    for node in nodes {
        visit(node);
        if let Some(children) = node.children() {
            walk_inlines(children, visit);
        }
    }
}

fn stamp_block_origin(block: &mut Block, origin: &str) {
    block.origin = Some(origin.to_string());
    match &mut block.kind {
        BlockKind::Paragraph { children }
        | BlockKind::Heading { children, .. }
        | BlockKind::ContentTitle { children } => {
            for child in children {
                stamp_inline_origin(child, origin);
            }
        }
        BlockKind::Table { rows, .. } => {
            for row in rows {
                for cell in &mut row.cells {
                    for child in &mut cell.children {
                        stamp_inline_origin(child, origin);
                    }
                }
            }
        }
        BlockKind::Tagged { child, .. } => {
            stamp_block_origin(child, origin);
        }
        BlockKind::Quote { children, .. }
        | BlockKind::ListItem { children, .. }
        | BlockKind::Footnotes { children }
        | BlockKind::FootnoteDef { children, .. }
        | BlockKind::Comment { children } => {
            for child in children {
                stamp_block_origin(child, origin);
            }
        }
        BlockKind::List { items, .. } => {
            for item in items {
                stamp_block_origin(item, origin);
            }
        }
        _ => {}
    }
}

fn stamp_inline_origin(inline: &mut Inline, origin: &str) {
    inline.origin = Some(origin.to_string());
    if let Some(children) = inline.children_mut() {
        for child in children {
            stamp_inline_origin(child, origin);
        }
    }
}
