/// HTML generation: walks the composed tree and emits elements with inline
/// style attributes from the style table.
///
/// Every piece of raw text is escaped before emission; code and math content
/// is escaped but never inline-parsed. Link and image URLs with
/// script-executing or otherwise unsafe schemes degrade to plain text.
use crate::ast::{Block, Cell, Document, Inline, ListItem};
use crate::error::Result;
use crate::style::{StyleSheet, DEFAULT_STYLES};

/// URL schemes that must never reach an `href`/`src` attribute.
const UNSAFE_SCHEMES: [&str; 4] = ["javascript:", "vbscript:", "data:", "file:"];

/// Rendering options beyond the style table.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Collect link targets into a numbered references section at the end
    /// of the fragment, for editors that strip anchor targets.
    pub link_footnotes: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            link_footnotes: true,
        }
    }
}

/// Low-level HTML writer with escaping helpers.
#[derive(Debug, Default)]
pub struct HtmlWriter {
    buffer: String,
}

impl HtmlWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes an opening tag with an inline style attribute.
    pub fn open(&mut self, tag: &str, style: &str) {
        self.open_with(tag, style, &[]);
    }

    /// Writes an opening tag with extra attributes ahead of the style.
    pub fn open_with(&mut self, tag: &str, style: &str, attributes: &[(&str, &str)]) {
        self.buffer.push('<');
        self.buffer.push_str(tag);
        self.push_attributes(style, attributes);
        self.buffer.push('>');
    }

    /// Writes a self-closing element.
    pub fn void(&mut self, tag: &str, style: &str, attributes: &[(&str, &str)]) {
        self.buffer.push('<');
        self.buffer.push_str(tag);
        self.push_attributes(style, attributes);
        self.buffer.push_str(" />");
    }

    fn push_attributes(&mut self, style: &str, attributes: &[(&str, &str)]) {
        for (name, value) in attributes {
            self.buffer.push(' ');
            self.buffer.push_str(name);
            self.buffer.push_str("=\"");
            self.buffer.push_str(&Self::escape_attribute(value));
            self.buffer.push('"');
        }
        if !style.is_empty() {
            self.buffer.push_str(" style=\"");
            self.buffer.push_str(&Self::escape_attribute(style));
            self.buffer.push('"');
        }
    }

    pub fn close(&mut self, tag: &str) {
        self.buffer.push_str("</");
        self.buffer.push_str(tag);
        self.buffer.push('>');
    }

    /// Writes text content, escaped.
    pub fn text(&mut self, content: &str) {
        self.buffer.push_str(&Self::escape_html(content));
    }

    /// Writes pre-built markup without escaping.
    pub fn raw(&mut self, markup: &str) {
        self.buffer.push_str(markup);
    }

    pub fn newline(&mut self) {
        self.buffer.push('\n');
    }

    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.buffer)
    }

    /// Escapes text content for element context.
    pub fn escape_html(text: &str) -> String {
        let mut escaped = String::with_capacity(text.len());
        for ch in text.chars() {
            match ch {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                '"' => escaped.push_str("&quot;"),
                _ => escaped.push(ch),
            }
        }
        escaped
    }

    /// Escapes a value for double-quoted attribute context.
    pub fn escape_attribute(text: &str) -> String {
        let mut escaped = String::with_capacity(text.len());
        for ch in text.chars() {
            match ch {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                '"' => escaped.push_str("&quot;"),
                '\n' => escaped.push_str("&#10;"),
                '\r' => escaped.push_str("&#13;"),
                '\t' => escaped.push_str("&#9;"),
                _ => escaped.push(ch),
            }
        }
        escaped
    }
}

/// Renderer for a parsed [`Document`].
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    styles: StyleSheet,
    options: RenderOptions,
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlRenderer {
    /// Renderer with the default style table and options.
    pub fn new() -> Self {
        HtmlRenderer {
            styles: DEFAULT_STYLES.clone(),
            options: RenderOptions::default(),
        }
    }

    /// Renderer with a custom style table.
    pub fn with_styles(styles: StyleSheet) -> Self {
        HtmlRenderer {
            styles,
            options: RenderOptions::default(),
        }
    }

    /// Enables or disables the trailing link-references section.
    pub fn link_footnotes(mut self, enabled: bool) -> Self {
        self.options.link_footnotes = enabled;
        self
    }

    /// Renders a document to an HTML fragment. The fragment carries no
    /// `<html>`/`<body>` wrapper; that belongs to the presentation layer.
    pub fn render(&self, document: &Document) -> Result<String> {
        let mut writer = HtmlWriter::new();
        let mut footnotes: Vec<String> = Vec::new();
        for block in &document.blocks {
            self.render_block(block, &mut writer, &mut footnotes, 0, 0);
        }
        if self.options.link_footnotes && !footnotes.is_empty() {
            self.render_footnotes(&footnotes, &mut writer);
        }
        Ok(writer.take_output())
    }

    fn render_block(
        &self,
        block: &Block,
        writer: &mut HtmlWriter,
        footnotes: &mut Vec<String>,
        quote_depth: usize,
        list_depth: usize,
    ) {
        match block {
            Block::Heading { level, content } => {
                let tag = heading_tag(*level);
                writer.open(tag, self.styles.heading(*level));
                self.render_inlines(content, writer, footnotes);
                writer.close(tag);
                writer.newline();
            }
            Block::Paragraph { content } => {
                writer.open("p", &self.styles.paragraph);
                self.render_inlines(content, writer, footnotes);
                writer.close("p");
                writer.newline();
            }
            Block::Blockquote { blocks } => {
                writer.open("blockquote", &self.styles.blockquote(quote_depth));
                writer.newline();
                for inner in blocks {
                    self.render_block(inner, writer, footnotes, quote_depth + 1, list_depth);
                }
                writer.close("blockquote");
                writer.newline();
            }
            Block::List {
                ordered,
                start,
                items,
            } => {
                let tag = if *ordered { "ol" } else { "ul" };
                let style = self.styles.list(*ordered, list_depth);
                if *ordered && *start != 1 {
                    let start_value = start.to_string();
                    writer.open_with(tag, &style, &[("start", &start_value)]);
                } else {
                    writer.open(tag, &style);
                }
                writer.newline();
                for item in items {
                    self.render_list_item(item, writer, footnotes, quote_depth, list_depth);
                }
                writer.close(tag);
                writer.newline();
            }
            Block::CodeFence { language, lines } => {
                match language {
                    Some(lang) => {
                        writer.open_with("section", &self.styles.code_block, &[("data-lang", lang)])
                    }
                    None => writer.open("section", &self.styles.code_block),
                }
                writer.text(&lines.join("\n"));
                writer.close("section");
                writer.newline();
            }
            Block::Table {
                header,
                alignments: _,
                rows,
            } => {
                writer.open("table", &self.styles.table);
                writer.newline();
                writer.open("tr", "");
                for cell in header {
                    self.render_cell(cell, true, writer, footnotes);
                }
                writer.close("tr");
                writer.newline();
                for row in rows {
                    writer.open("tr", "");
                    for cell in row {
                        self.render_cell(cell, false, writer, footnotes);
                    }
                    writer.close("tr");
                    writer.newline();
                }
                writer.close("table");
                writer.newline();
            }
            Block::ThematicBreak => {
                writer.void("hr", &self.styles.thematic_break, &[]);
                writer.newline();
            }
            Block::BlockMath { raw } => {
                writer.open("section", &self.styles.math_block);
                writer.text(raw);
                writer.close("section");
                writer.newline();
            }
        }
    }

    fn render_list_item(
        &self,
        item: &ListItem,
        writer: &mut HtmlWriter,
        footnotes: &mut Vec<String>,
        quote_depth: usize,
        list_depth: usize,
    ) {
        writer.open("li", &self.styles.list_item);
        match item.checked {
            Some(true) => {
                writer.open("span", &self.styles.task_checked);
                writer.raw("☑");
                writer.close("span");
            }
            Some(false) => {
                writer.open("span", &self.styles.task_unchecked);
                writer.raw("☐");
                writer.close("span");
            }
            None => {}
        }
        // A lone paragraph renders inline inside the item; anything richer
        // keeps its block structure.
        match item.blocks.as_slice() {
            [Block::Paragraph { content }] => {
                self.render_inlines(content, writer, footnotes);
            }
            blocks => {
                for block in blocks {
                    self.render_block(block, writer, footnotes, quote_depth, list_depth + 1);
                }
            }
        }
        writer.close("li");
        writer.newline();
    }

    fn render_cell(
        &self,
        cell: &Cell,
        header: bool,
        writer: &mut HtmlWriter,
        footnotes: &mut Vec<String>,
    ) {
        let tag = if header { "th" } else { "td" };
        writer.open(tag, &self.styles.cell(header, cell.alignment));
        self.render_inlines(&cell.content, writer, footnotes);
        writer.close(tag);
    }

    fn render_inlines(
        &self,
        inlines: &[Inline],
        writer: &mut HtmlWriter,
        footnotes: &mut Vec<String>,
    ) {
        for inline in inlines {
            match inline {
                Inline::Text(content) => writer.text(content),
                Inline::Emphasis(children) => {
                    writer.open("em", &self.styles.emphasis);
                    self.render_inlines(children, writer, footnotes);
                    writer.close("em");
                }
                Inline::Strong(children) => {
                    writer.open("strong", &self.styles.strong);
                    self.render_inlines(children, writer, footnotes);
                    writer.close("strong");
                }
                Inline::Strikethrough(children) => {
                    writer.open("del", &self.styles.strikethrough);
                    self.render_inlines(children, writer, footnotes);
                    writer.close("del");
                }
                Inline::InlineCode(content) => {
                    writer.open("code", &self.styles.inline_code);
                    writer.text(content);
                    writer.close("code");
                }
                Inline::InlineMath(content) => {
                    writer.open("span", &self.styles.math_inline);
                    writer.text(content);
                    writer.close("span");
                }
                Inline::Link { href, content } => {
                    if is_safe_url(href) {
                        writer.open_with("a", &self.styles.link, &[("href", href)]);
                        self.render_inlines(content, writer, footnotes);
                        writer.close("a");
                        if self.options.link_footnotes {
                            footnotes.push(href.clone());
                            writer.raw(&format!("<sup>[{}]</sup>", footnotes.len()));
                        }
                    } else {
                        // Unsafe scheme: the link degrades to its text.
                        self.render_inlines(content, writer, footnotes);
                    }
                }
                Inline::Image { alt, src } => {
                    if is_safe_url(src) {
                        writer.void("img", &self.styles.image, &[("src", src), ("alt", alt)]);
                    } else {
                        writer.text(alt);
                    }
                }
            }
        }
    }

    /// Emits the trailing references section listing every link target in
    /// order of appearance.
    fn render_footnotes(&self, footnotes: &[String], writer: &mut HtmlWriter) {
        writer.void("hr", &self.styles.thematic_break, &[]);
        writer.newline();
        writer.open("h2", &self.styles.footnote_heading);
        writer.text("References");
        writer.close("h2");
        writer.newline();
        for (index, href) in footnotes.iter().enumerate() {
            writer.open("p", &self.styles.footnote_item);
            writer.text(&format!("[{}] {}", index + 1, href));
            writer.close("p");
            writer.newline();
        }
    }
}

fn heading_tag(level: u8) -> &'static str {
    match level.clamp(1, 6) {
        1 => "h1",
        2 => "h2",
        3 => "h3",
        4 => "h4",
        5 => "h5",
        _ => "h6",
    }
}

/// Rejects URLs whose scheme could execute script or smuggle content.
/// Whitespace and control characters are removed before the check so
/// `java\tscript:` cannot slip through.
fn is_safe_url(url: &str) -> bool {
    let normalized: String = url
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();
    !UNSAFE_SCHEMES
        .iter()
        .any(|scheme| normalized.starts_with(scheme))
}
