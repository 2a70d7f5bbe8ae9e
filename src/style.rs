/// Style table: maps node kinds (and nesting depth for quotes and lists) to
/// inline CSS declaration strings.
///
/// The target consumers of the generated HTML are rich-text publishing
/// editors that strip external and embedded stylesheets, so every element
/// carries its presentation inline. The default sheet reproduces the look of
/// the WeChat publishing theme (system font stack, `#009874` accent).
use once_cell::sync::Lazy;

use crate::ast::Alignment;

const FONT_STACK: &str = "-apple-system-font, BlinkMacSystemFont, 'Helvetica Neue', \
     'PingFang SC', 'Hiragino Sans GB', 'Microsoft YaHei UI', 'Microsoft YaHei', Arial, sans-serif";

/// Accent colors rotated by blockquote nesting depth so nested quote levels
/// stay visually distinguishable.
const QUOTE_ACCENTS: [&str; 3] = ["#009874", "#b76e00", "#5a67d8"];

/// Bullet glyph per unordered-list nesting depth.
const BULLET_TYPES: [&str; 3] = ["disc", "circle", "square"];

/// Numbering scheme per ordered-list nesting depth.
const ORDERED_TYPES: [&str; 3] = ["decimal", "lower-alpha", "lower-roman"];

/// Immutable set of CSS declaration strings, one per rendered node kind.
///
/// Depth-sensitive kinds (blockquotes, lists) are exposed through accessor
/// methods instead of plain fields.
#[derive(Debug, Clone)]
pub struct StyleSheet {
    pub headings: [String; 6],
    pub paragraph: String,
    pub quote: String,
    pub code_block: String,
    pub inline_code: String,
    pub list: String,
    pub list_item: String,
    pub emphasis: String,
    pub strong: String,
    pub strikethrough: String,
    pub link: String,
    pub image: String,
    pub table: String,
    pub table_header: String,
    pub table_cell: String,
    pub thematic_break: String,
    pub math_block: String,
    pub math_inline: String,
    pub task_checked: String,
    pub task_unchecked: String,
    pub footnote_heading: String,
    pub footnote_item: String,
}

impl StyleSheet {
    /// The WeChat publishing theme.
    pub fn wechat() -> Self {
        StyleSheet {
            headings: [
                format!(
                    "display: table; text-align: center; color: #3f3f3f; line-height: 1.75; \
                     font-family: {FONT_STACK}; font-size: 18px; font-weight: bold; \
                     margin: 2em auto 1em; padding: 0 1em; border-bottom: 3px solid #009874;"
                ),
                format!(
                    "display: table; text-align: center; color: #fff; line-height: 1.75; \
                     font-family: {FONT_STACK}; font-size: 16px; font-weight: bold; \
                     margin: 4em auto 2em; padding: 0 0.3em; background: #009874;"
                ),
                format!(
                    "text-align: left; color: #3f3f3f; line-height: 1.2; \
                     font-family: {FONT_STACK}; font-size: 14px; font-weight: bold; \
                     margin: 2em 8px 0.75em 0; padding-left: 8px; border-left: 5px solid #009874;"
                ),
                format!(
                    "text-align: left; color: #3f3f3f; line-height: 1.2; \
                     font-family: {FONT_STACK}; font-size: 14px; font-weight: bold; \
                     margin: 1.5em 8px 0.5em 0;"
                ),
                format!(
                    "text-align: left; color: #3f3f3f; line-height: 1.2; \
                     font-family: {FONT_STACK}; font-size: 13px; font-weight: bold; \
                     margin: 1.2em 8px 0.5em 0;"
                ),
                format!(
                    "text-align: left; color: #777; line-height: 1.2; \
                     font-family: {FONT_STACK}; font-size: 13px; font-weight: bold; \
                     margin: 1.2em 8px 0.5em 0;"
                ),
            ],
            paragraph: "font-size: 16px; line-height: 1.5em; padding: 0.5em 0; margin: 0; \
                        color: initial;"
                .to_string(),
            quote: format!(
                "text-align: left; font-family: {FONT_STACK}; font-size: 14px; \
                 font-style: normal; padding: 0.5em 1em; \
                 background: rgba(27, 31, 35, 0.05); margin: 1em 0;"
            ),
            code_block: format!(
                "display: block; padding: 1em; color: rgb(51, 51, 51); \
                 background: rgb(248, 248, 248); font-size: 14px; text-align: left; \
                 line-height: 1.5; font-family: {FONT_STACK}; margin: 0.9rem 0; \
                 white-space: pre; overflow-x: auto;"
            ),
            inline_code: "text-align: left; line-height: 1; white-space: initial; color: #333; \
                          background: rgba(27, 31, 35, 0.05); padding: 0.1em 0.3em; \
                          font-weight: bold; font-size: 1em; top: -0.1em; position: relative;"
                .to_string(),
            list: "padding-left: 1.2em; margin: 0.5em 0;".to_string(),
            list_item: "margin: 0; line-height: 1.5em; font-size: 14px;".to_string(),
            emphasis: "font-style: italic; color: inherit;".to_string(),
            strong: "font-weight: bold; color: #009874;".to_string(),
            strikethrough: "text-decoration: line-through; color: #777;".to_string(),
            link: "color: #009874; text-decoration: none; font-size: 14px;".to_string(),
            image: "display: initial; max-width: 100%;".to_string(),
            table: "width: 100%; border-collapse: collapse; line-height: 1.35; font-size: 14px;"
                .to_string(),
            table_header: "background: rgb(0 0 0 / 5%); border: 1px solid #ddd; \
                           padding: 0.25em 0.5em; font-weight: bold;"
                .to_string(),
            table_cell: "border: 1px solid #ddd; padding: 0.25em 0.5em; color: #333;".to_string(),
            thematic_break: "margin: 30px 0; border: none; border-top: 1px solid #eee;"
                .to_string(),
            math_block: "display: block; text-align: center; font-family: 'SFMono-Regular', \
                         Consolas, monospace; font-size: 14px; padding: 0.8em 0; margin: 0.9rem 0; \
                         background: rgb(248, 248, 248); white-space: pre;"
                .to_string(),
            math_inline: "font-family: 'SFMono-Regular', Consolas, monospace; font-size: 0.95em; \
                          padding: 0 0.15em;"
                .to_string(),
            task_checked: "color: #009874; font-weight: bold; margin-right: 0.3em;".to_string(),
            task_unchecked: "color: #999; margin-right: 0.3em;".to_string(),
            footnote_heading: format!(
                "display: table; font-family: {FONT_STACK}; font-size: 14px; font-weight: bold; \
                 margin: 3em 0 0.6em 0; padding-left: 0.2em;"
            ),
            footnote_item: "font-size: 10px; font-style: italic; line-height: 1.2; \
                            margin: 0.4rem 0;"
                .to_string(),
        }
    }

    /// Declarations for a blockquote at the given nesting depth (0-based).
    /// Each level gets its own left-border accent color.
    pub fn blockquote(&self, depth: usize) -> String {
        let accent = QUOTE_ACCENTS[depth % QUOTE_ACCENTS.len()];
        format!("{} border-left: 3px solid {};", self.quote, accent)
    }

    /// Declarations for a list container at the given nesting depth
    /// (0-based). The marker style changes per level.
    pub fn list(&self, ordered: bool, depth: usize) -> String {
        let marker = if ordered {
            ORDERED_TYPES[depth % ORDERED_TYPES.len()]
        } else {
            BULLET_TYPES[depth % BULLET_TYPES.len()]
        };
        format!("{} list-style-type: {};", self.list, marker)
    }

    /// Declarations for a table cell with the column's alignment applied.
    pub fn cell(&self, header: bool, alignment: Alignment) -> String {
        let base = if header {
            &self.table_header
        } else {
            &self.table_cell
        };
        match alignment {
            Alignment::None => base.clone(),
            Alignment::Left => format!("{base} text-align: left;"),
            Alignment::Center => format!("{base} text-align: center;"),
            Alignment::Right => format!("{base} text-align: right;"),
        }
    }

    /// Heading declarations for a clamped level in 1..=6.
    pub fn heading(&self, level: u8) -> &str {
        let index = usize::from(level.clamp(1, 6)) - 1;
        &self.headings[index]
    }
}

impl Default for StyleSheet {
    fn default() -> Self {
        StyleSheet::wechat()
    }
}

/// Process-wide default sheet. Read-only after initialization; conversions
/// running in parallel share it without coordination.
pub static DEFAULT_STYLES: Lazy<StyleSheet> = Lazy::new(StyleSheet::wechat);
