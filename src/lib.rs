//! stylemark converts Markdown into HTML fragments whose presentation is
//! carried entirely by inline `style` attributes, for publishing editors
//! that strip `<style>` blocks and external stylesheets on paste.
//!
//! The pipeline has three stages: a line classifier ([`lexer`]), a block
//! and inline parser producing a typed tree ([`parser`], [`ast`]), and an
//! HTML renderer driven by a style table ([`codegen`], [`style`]).
//!
//! Malformed Markdown never fails; the parser degrades to best-effort
//! structure. The only fatal input condition is non-UTF-8 bytes.
//!
//! ```
//! let html = stylemark::convert("# Title").unwrap();
//! assert!(html.starts_with("<h1 style=\""));
//! ```
//!
//! Custom styling and options go through [`HtmlRenderer`]:
//!
//! ```
//! use stylemark::{parse, HtmlRenderer};
//!
//! let document = parse("[a](https://example.com)");
//! let html = HtmlRenderer::new()
//!     .link_footnotes(false)
//!     .render(&document)
//!     .unwrap();
//! assert!(!html.contains("References"));
//! ```

pub mod api;
pub mod ast;
pub mod codegen;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod style;

pub use api::{ConvertRequest, ConvertResponse};
pub use ast::{Alignment, Block, Cell, Document, Inline, ListItem};
pub use codegen::{HtmlRenderer, HtmlWriter, RenderOptions};
pub use error::{ConvertError, Result};
pub use parser::{parse, parse_document, parse_inlines};
pub use style::{StyleSheet, DEFAULT_STYLES};

/// Converts Markdown text to a styled HTML fragment with default options.
pub fn convert(markdown: &str) -> Result<String> {
    HtmlRenderer::new().render(&parse_document(markdown))
}

/// Converts raw bytes to a styled HTML fragment. Fails with
/// [`ConvertError::InputEncoding`] if the bytes are not valid UTF-8.
pub fn convert_bytes(bytes: &[u8]) -> Result<String> {
    let markdown = std::str::from_utf8(bytes)?;
    convert(markdown)
}
