// Parser module: block-tree construction over classified lines, then
// inline delimiter resolution within each leaf.
mod block;
mod inline;

#[cfg(test)]
mod tests;

pub use block::parse_document;
pub use inline::parse_inlines;

use crate::ast::Document;

/// Parses Markdown into a [`Document`]. Malformed input never fails; the
/// parser degrades to best-effort structure.
pub fn parse(markdown: &str) -> Document {
    parse_document(markdown)
}
