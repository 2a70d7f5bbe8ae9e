//! Output hygiene: whatever the input, the generated fragment must contain
//! only well-formed markup, with every user-supplied character escaped in
//! both text and attribute positions.

use lazy_static::lazy_static;
use regex::Regex;

use stylemark::convert;

lazy_static! {
    /// Matches any tag the renderer is allowed to emit, with its attributes.
    static ref ALLOWED_TAG_RE: Regex = Regex::new(
        r#"(?x)
        </?
        (h[1-6]|p|blockquote|ul|ol|li|section|table|tr|th|td|em|strong|del|
         code|span|a|img|hr|sup)
        (\s+(start|href|src|alt|data-lang|style)="[^"<>]*")*
        \s*/?>
        "#
    )
    .expect("tag regex");
}

/// Strips every allowed tag; what remains must be escaped text.
fn strip_tags(html: &str) -> String {
    ALLOWED_TAG_RE.replace_all(html, "").into_owned()
}

fn assert_hygienic(input: &str) {
    let html = convert(input).expect("conversion succeeds");
    let remainder = strip_tags(&html);
    assert!(
        !remainder.contains('<') && !remainder.contains('>'),
        "unescaped or unexpected markup for input {input:?}:\n{remainder}"
    );
    for (index, _) in remainder.match_indices('&') {
        let suffix = &remainder[index..];
        assert!(
            ["&amp;", "&lt;", "&gt;", "&quot;", "&#10;", "&#13;", "&#9;"]
                .iter()
                .any(|known| suffix.starts_with(known)),
            "bare ampersand for input {input:?}"
        );
    }
}

#[test]
fn markup_in_text_is_escaped() {
    assert_hygienic("a <b>bold</b> move & more");
    assert_hygienic("# Heading with <script>alert(1)</script>");
    assert_hygienic("> quoted <tags> & ampersands");
}

#[test]
fn markup_in_code_is_escaped() {
    assert_hygienic("`<em>` spans");
    assert_hygienic("```html\n<div class=\"x\">&nbsp;</div>\n```");
}

#[test]
fn markup_in_table_cells_is_escaped() {
    assert_hygienic("| a<b | c&d |\n|---|---|\n| <i> | > |");
}

#[test]
fn markup_in_link_parts_is_escaped() {
    assert_hygienic("[<label>](https://example.com/?a=1&b=2)");
    assert_hygienic("![alt with \"quotes\"](https://example.com/x.png)");
}

#[test]
fn markup_in_math_is_escaped() {
    assert_hygienic("$a < b$ and $$\nx > y & z\n$$");
}

#[test]
fn corpus_of_hostile_documents_stays_hygienic() {
    let corpus = [
        "<html><body>raw</body></html>",
        "**<b>** *<i>* ~~<u>~~",
        "- <li>item\n- \"quoted\"",
        "1. a & b\n2. c < d",
        "####### <h7>",
        "| < | > |\n|---|---|\n| & | \" |",
        "[a](https://x.test/?q=<s>&r=\"t\")",
        "text with \u{0} control and <angle",
    ];
    for input in corpus {
        assert_hygienic(input);
    }
}
