/// Abstract syntax tree for the conversion pipeline.
///
/// The tree is purely hierarchical: every node exclusively owns its children
/// and there are no back references, so cycles are impossible by construction.
/// A tree is built once per conversion call and discarded after rendering.

/// Root node owning the ordered sequence of top-level blocks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Document { blocks }
    }
}

/// Block-level elements: structural Markdown constructs occupying whole lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// ATX heading with level 1-6 and inline content.
    Heading { level: u8, content: Vec<Inline> },
    /// Paragraph of inline content.
    Paragraph { content: Vec<Inline> },
    /// Ordered or unordered list. `start` is the first ordinal of an
    /// ordered list and ignored for unordered ones.
    List {
        ordered: bool,
        start: u64,
        items: Vec<ListItem>,
    },
    /// Blockquote containing nested blocks.
    Blockquote { blocks: Vec<Block> },
    /// Fenced code block. Lines are verbatim and never inline-parsed.
    CodeFence {
        language: Option<String>,
        lines: Vec<String>,
    },
    /// Pipe table with a header row, per-column alignments and body rows.
    Table {
        header: Vec<Cell>,
        alignments: Vec<Alignment>,
        rows: Vec<Vec<Cell>>,
    },
    /// Horizontal rule.
    ThematicBreak,
    /// Display math fenced by `$$` lines. Content is verbatim TeX.
    BlockMath { raw: String },
}

/// A single list item. `checked` is `None` for non-task items,
/// `Some(true)`/`Some(false)` for `[x]`/`[ ]` task items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub checked: Option<bool>,
    pub blocks: Vec<Block>,
}

/// Inline elements embedded within a block's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Emphasis(Vec<Inline>),
    Strong(Vec<Inline>),
    Strikethrough(Vec<Inline>),
    /// Code span content, verbatim.
    InlineCode(String),
    /// Inline math content, verbatim TeX without the `$` delimiters.
    InlineMath(String),
    Link {
        href: String,
        content: Vec<Inline>,
    },
    Image {
        alt: String,
        src: String,
    },
}

/// A table cell. The alignment is inherited from the delimiter-row column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub content: Vec<Inline>,
    pub alignment: Alignment,
}

/// Column alignment as declared by a table delimiter row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    None,
    Left,
    Center,
    Right,
}

/// Clamps a raw heading level into the valid 1..=6 range.
pub fn clamp_heading_level(level: u8) -> u8 {
    level.clamp(1, 6)
}
