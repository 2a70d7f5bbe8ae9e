/// Block parser: consumes classified lines and builds the block tree.
///
/// Containers (blockquotes, list items) are handled by collecting their
/// stripped interior lines and reparsing them recursively, which keeps the
/// open-container bookkeeping out of the main loop while still supporting
/// arbitrary nesting and lazy continuation.
use crate::ast::{clamp_heading_level, Alignment, Block, Cell, Document, ListItem};
use crate::lexer::{classify_lines, split_table_cells, Line, LineKind};
use crate::parser::inline::parse_inlines;

/// Parses a full Markdown document.
pub fn parse_document(input: &str) -> Document {
    Document::new(parse_blocks(input))
}

/// Containers nest by recursion, one frame per level, so the depth must be
/// bounded. Markers beyond this level degrade to literal text.
const MAX_CONTAINER_DEPTH: usize = 64;

/// Parses a span of Markdown into blocks. Used both for the top level and
/// for reparsing container interiors.
pub(crate) fn parse_blocks(input: &str) -> Vec<Block> {
    parse_blocks_at(input, 0)
}

fn parse_blocks_at(input: &str, depth: usize) -> Vec<Block> {
    let lines = classify_lines(input);
    BlockParser::new(&lines, depth).run()
}

struct BlockParser<'a, 'l> {
    lines: &'l [Line<'a>],
    index: usize,
    blocks: Vec<Block>,
    /// Accumulated paragraph lines awaiting a flush.
    paragraph: Vec<&'a str>,
    /// Container nesting level of the span being parsed.
    depth: usize,
}

impl<'a, 'l> BlockParser<'a, 'l> {
    fn new(lines: &'l [Line<'a>], depth: usize) -> Self {
        BlockParser {
            lines,
            index: 0,
            blocks: Vec::new(),
            paragraph: Vec::new(),
            depth,
        }
    }

    fn run(mut self) -> Vec<Block> {
        while self.index < self.lines.len() {
            let line = &self.lines[self.index];
            match &line.kind {
                LineKind::Blank => {
                    self.flush_paragraph();
                    self.index += 1;
                }
                LineKind::AtxHeading { level, text } => {
                    self.flush_paragraph();
                    let block = Block::Heading {
                        level: clamp_heading_level(*level),
                        content: parse_inlines(text),
                    };
                    self.blocks.push(block);
                    self.index += 1;
                }
                LineKind::ThematicBreak => {
                    self.flush_paragraph();
                    self.blocks.push(Block::ThematicBreak);
                    self.index += 1;
                }
                LineKind::FenceDelimiter { marker, length, info } => {
                    self.flush_paragraph();
                    let (marker, length, info) = (*marker, *length, *info);
                    self.parse_code_fence(marker, length, info);
                }
                LineKind::MathFence { content } => {
                    self.flush_paragraph();
                    match content {
                        Some(raw) => {
                            self.blocks.push(Block::BlockMath {
                                raw: (*raw).to_string(),
                            });
                            self.index += 1;
                        }
                        None => self.parse_block_math(),
                    }
                }
                LineKind::Quote { .. } if self.depth >= MAX_CONTAINER_DEPTH => {
                    self.paragraph.push(line.raw.trim());
                    self.index += 1;
                }
                LineKind::Quote { .. } => {
                    self.flush_paragraph();
                    self.parse_blockquote();
                }
                LineKind::BulletItem { .. } | LineKind::OrderedItem { .. }
                    if self.depth >= MAX_CONTAINER_DEPTH =>
                {
                    self.paragraph.push(line.raw.trim());
                    self.index += 1;
                }
                LineKind::BulletItem { .. } | LineKind::OrderedItem { .. } => {
                    self.flush_paragraph();
                    self.parse_list();
                }
                LineKind::TableRow { row } => {
                    if matches!(
                        self.peek_kind(1),
                        Some(LineKind::TableDelimiter { .. })
                    ) {
                        self.flush_paragraph();
                        let row = *row;
                        self.parse_table(row);
                    } else {
                        // No delimiter row follows: reinterpret as paragraph.
                        self.paragraph.push(line.raw.trim());
                        self.index += 1;
                    }
                }
                LineKind::TableDelimiter { .. } => {
                    // A delimiter with no header above it is plain text.
                    self.paragraph.push(line.raw.trim());
                    self.index += 1;
                }
                LineKind::Text { text } => {
                    self.paragraph.push(text.trim_end());
                    self.index += 1;
                }
            }
        }
        self.flush_paragraph();
        self.blocks
    }

    fn peek_kind(&self, ahead: usize) -> Option<&'l LineKind<'a>> {
        self.lines.get(self.index + ahead).map(|line| &line.kind)
    }

    fn flush_paragraph(&mut self) {
        if self.paragraph.is_empty() {
            return;
        }
        let joined = self.paragraph.join(" ");
        self.paragraph.clear();
        self.blocks.push(Block::Paragraph {
            content: parse_inlines(&joined),
        });
    }

    /// Captures fence content verbatim until a matching closing fence of the
    /// same character and at least the opening length, or end of input.
    fn parse_code_fence(&mut self, open_marker: char, open_length: usize, info: &str) {
        let language = info.split_whitespace().next().map(str::to_string);
        self.index += 1;

        let mut lines = Vec::new();
        while self.index < self.lines.len() {
            let line = &self.lines[self.index];
            if let LineKind::FenceDelimiter { marker, length, info } = &line.kind {
                if *marker == open_marker && *length >= open_length && info.is_empty() {
                    self.index += 1;
                    break;
                }
            }
            lines.push(line.raw.to_string());
            self.index += 1;
        }
        // An unterminated fence closes at document end; not an error.
        self.blocks.push(Block::CodeFence { language, lines });
    }

    /// Collects `$$`-fenced display math until the closing fence or EOF.
    fn parse_block_math(&mut self) {
        self.index += 1;
        let mut lines = Vec::new();
        while self.index < self.lines.len() {
            let line = &self.lines[self.index];
            if matches!(line.kind, LineKind::MathFence { content: None }) {
                self.index += 1;
                break;
            }
            lines.push(line.raw);
            self.index += 1;
        }
        self.blocks.push(Block::BlockMath {
            raw: lines.join("\n"),
        });
    }

    /// Collects a run of quote lines (plus lazy continuation text) and
    /// reparses the stripped interior, which handles `> >` nesting.
    fn parse_blockquote(&mut self) {
        let mut interior: Vec<&str> = Vec::new();
        while self.index < self.lines.len() {
            match &self.lines[self.index].kind {
                LineKind::Quote { rest } => {
                    interior.push(*rest);
                    self.index += 1;
                }
                // A paragraph line directly after quote content continues it.
                LineKind::Text { text } => {
                    interior.push(*text);
                    self.index += 1;
                }
                _ => break,
            }
        }
        let blocks = parse_blocks_at(&interior.join("\n"), self.depth + 1);
        self.blocks.push(Block::Blockquote { blocks });
    }

    fn parse_list(&mut self) {
        let (ordered, start, list_indent) = match &self.lines[self.index] {
            Line {
                kind: LineKind::OrderedItem { start, .. },
                indent,
                ..
            } => (true, *start, *indent),
            line => (false, 1, line.indent),
        };

        let mut items = Vec::new();
        while self.index < self.lines.len() {
            let line = &self.lines[self.index];
            let (checked, text, content_column) = match &line.kind {
                LineKind::BulletItem {
                    checked,
                    text,
                    content_column,
                } if !ordered && line.indent <= list_indent => {
                    (*checked, *text, *content_column)
                }
                LineKind::OrderedItem {
                    checked,
                    text,
                    content_column,
                    ..
                } if ordered && line.indent <= list_indent => (*checked, *text, *content_column),
                _ => break,
            };
            self.index += 1;
            items.push(self.parse_list_item(checked, text, list_indent, content_column));
        }

        self.blocks.push(Block::List {
            ordered,
            start,
            items,
        });
    }

    /// Collects one item's interior: the marker line's text plus every
    /// following line indented to the item's content column (dedented), with
    /// blank lines kept only between continued content.
    fn parse_list_item(
        &mut self,
        checked: Option<bool>,
        first: &str,
        list_indent: usize,
        content_column: usize,
    ) -> ListItem {
        let mut interior: Vec<String> = vec![first.to_string()];
        let mut pending_blanks = 0usize;

        while self.index < self.lines.len() {
            let line = &self.lines[self.index];
            if line.is_blank() {
                pending_blanks += 1;
                self.index += 1;
                continue;
            }

            let is_marker = matches!(
                line.kind,
                LineKind::BulletItem { .. } | LineKind::OrderedItem { .. }
            );
            let continues = line.indent >= content_column
                || (is_marker && line.indent > list_indent);
            if !continues {
                break;
            }

            for _ in 0..pending_blanks {
                interior.push(String::new());
            }
            pending_blanks = 0;
            interior.push(strip_columns(line.raw, content_column).to_string());
            self.index += 1;
        }

        ListItem {
            checked,
            blocks: parse_blocks_at(&interior.join("\n"), self.depth + 1),
        }
    }

    /// Builds a table from a header row, its delimiter row, and any
    /// directly following body rows. Ragged rows are padded or truncated to
    /// the header width.
    fn parse_table(&mut self, header_row: &str) {
        let alignments = match self.peek_kind(1) {
            Some(LineKind::TableDelimiter { alignments }) => alignments.clone(),
            _ => Vec::new(),
        };
        self.index += 2;

        let header_cells = split_table_cells(header_row);
        let width = header_cells.len();
        let mut column_alignments = alignments;
        column_alignments.resize(width, Alignment::None);

        let header = header_cells
            .iter()
            .zip(&column_alignments)
            .map(|(text, alignment)| Cell {
                content: parse_inlines(text),
                alignment: *alignment,
            })
            .collect();

        let mut rows = Vec::new();
        while let Some(LineKind::TableRow { row }) = self.peek_kind(0) {
            let mut cells = split_table_cells(row);
            cells.resize(width, "");
            rows.push(
                cells
                    .iter()
                    .zip(&column_alignments)
                    .map(|(text, alignment)| Cell {
                        content: parse_inlines(text),
                        alignment: *alignment,
                    })
                    .collect(),
            );
            self.index += 1;
        }

        self.blocks.push(Block::Table {
            header,
            alignments: column_alignments,
            rows,
        });
    }
}

/// Removes up to `columns` of leading whitespace width. A tab that straddles
/// the boundary is removed whole.
fn strip_columns(line: &str, columns: usize) -> &str {
    let mut width = 0;
    for (offset, ch) in line.char_indices() {
        if width >= columns {
            return &line[offset..];
        }
        match ch {
            ' ' => width += 1,
            '\t' => width += 4 - width % 4,
            _ => return &line[offset..],
        }
    }
    ""
}
