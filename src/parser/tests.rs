use crate::ast::{Alignment, Block, Inline};
use crate::parser::{parse_document, parse_inlines};

fn parse_blocks(input: &str) -> Vec<Block> {
    parse_document(input).blocks
}

fn text(content: &str) -> Inline {
    Inline::Text(content.to_string())
}

#[test]
fn heading_levels_parse_and_clamp() {
    let blocks = parse_blocks("# One\n\n###### Six\n\n####### Seven");
    assert_eq!(blocks.len(), 3);
    assert!(matches!(blocks[0], Block::Heading { level: 1, .. }));
    assert!(matches!(blocks[1], Block::Heading { level: 6, .. }));
    assert!(matches!(blocks[2], Block::Heading { level: 6, .. }));
}

#[test]
fn blank_line_closes_paragraph() {
    let blocks = parse_blocks("first\nstill first\n\nsecond");
    assert_eq!(blocks.len(), 2);
    match &blocks[0] {
        Block::Paragraph { content } => {
            assert_eq!(content, &[text("first still first")]);
        }
        other => panic!("expected paragraph, got {other:?}"),
    }
}

#[test]
fn unterminated_fence_runs_to_document_end() {
    let blocks = parse_blocks("```rust\nfn main() {}\n\n# not a heading");
    assert_eq!(blocks.len(), 1);
    match &blocks[0] {
        Block::CodeFence { language, lines } => {
            assert_eq!(language.as_deref(), Some("rust"));
            assert_eq!(lines, &["fn main() {}", "", "# not a heading"]);
        }
        other => panic!("expected code fence, got {other:?}"),
    }
}

#[test]
fn closing_fence_must_match_char_and_length() {
    let blocks = parse_blocks("````\ncode\n```\n````\nafter");
    match &blocks[0] {
        Block::CodeFence { lines, .. } => {
            // The shorter fence stays inside the block.
            assert_eq!(lines, &["code", "```"]);
        }
        other => panic!("expected code fence, got {other:?}"),
    }
    assert!(matches!(blocks[1], Block::Paragraph { .. }));
}

#[test]
fn fence_content_is_never_inline_parsed() {
    let blocks = parse_blocks("```\n**not bold** [not](a-link)\n```");
    match &blocks[0] {
        Block::CodeFence { lines, .. } => {
            assert_eq!(lines, &["**not bold** [not](a-link)"]);
        }
        other => panic!("expected code fence, got {other:?}"),
    }
}

#[test]
fn nested_blockquotes() {
    let blocks = parse_blocks("> outer\n> > inner");
    match &blocks[0] {
        Block::Blockquote { blocks } => {
            assert!(matches!(blocks[0], Block::Paragraph { .. }));
            assert!(matches!(blocks[1], Block::Blockquote { .. }));
        }
        other => panic!("expected blockquote, got {other:?}"),
    }
}

#[test]
fn lazy_continuation_extends_blockquote() {
    let blocks = parse_blocks("> quoted\ncontinues here\n\nnew paragraph");
    assert_eq!(blocks.len(), 2);
    match &blocks[0] {
        Block::Blockquote { blocks } => match &blocks[0] {
            Block::Paragraph { content } => {
                assert_eq!(content, &[text("quoted continues here")]);
            }
            other => panic!("expected paragraph, got {other:?}"),
        },
        other => panic!("expected blockquote, got {other:?}"),
    }
}

#[test]
fn unordered_list_with_task_items() {
    let blocks = parse_blocks("- [x] done\n- [ ] todo\n- plain");
    match &blocks[0] {
        Block::List {
            ordered: false,
            items,
            ..
        } => {
            assert_eq!(items.len(), 3);
            assert_eq!(items[0].checked, Some(true));
            assert_eq!(items[1].checked, Some(false));
            assert_eq!(items[2].checked, None);
        }
        other => panic!("expected list, got {other:?}"),
    }
}

#[test]
fn ordered_list_keeps_start_ordinal() {
    let blocks = parse_blocks("3. three\n4. four");
    match &blocks[0] {
        Block::List {
            ordered: true,
            start,
            items,
        } => {
            assert_eq!(*start, 3);
            assert_eq!(items.len(), 2);
        }
        other => panic!("expected list, got {other:?}"),
    }
}

#[test]
fn nested_list_by_content_column() {
    let blocks = parse_blocks("- a\n  - b\n  - c\n- d");
    match &blocks[0] {
        Block::List { items, .. } => {
            assert_eq!(items.len(), 2);
            // First item holds its own text plus the nested list.
            assert!(matches!(items[0].blocks[0], Block::Paragraph { .. }));
            match &items[0].blocks[1] {
                Block::List { items, .. } => assert_eq!(items.len(), 2),
                other => panic!("expected nested list, got {other:?}"),
            }
        }
        other => panic!("expected list, got {other:?}"),
    }
}

#[test]
fn blank_line_does_not_close_list() {
    let blocks = parse_blocks("- a\n\n  continued\n- b");
    match &blocks[0] {
        Block::List { items, .. } => {
            assert_eq!(items.len(), 2);
            // The indented line after the blank stays inside the first item.
            assert_eq!(items[0].blocks.len(), 2);
        }
        other => panic!("expected list, got {other:?}"),
    }
}

#[test]
fn unindented_line_ends_list() {
    let blocks = parse_blocks("- a\nnot in list");
    assert_eq!(blocks.len(), 2);
    assert!(matches!(blocks[0], Block::List { .. }));
    assert!(matches!(blocks[1], Block::Paragraph { .. }));
}

#[test]
fn container_nesting_depth_is_capped() {
    // One recursion frame per container level, so the depth is bounded and
    // deeper markers degrade to literal text instead of exhausting the stack.
    let input = format!("{}deep", "> ".repeat(10_000));
    let mut current = &parse_blocks(&input);
    let mut depth = 0;
    while let Some(Block::Blockquote { blocks }) = current.first() {
        depth += 1;
        current = blocks;
    }
    assert_eq!(depth, 64);
    match current.first() {
        Some(Block::Paragraph { content }) => match &content[0] {
            Inline::Text(text) => {
                assert!(text.starts_with('>'));
                assert!(text.ends_with("deep"));
            }
            other => panic!("expected literal text, got {other:?}"),
        },
        other => panic!("expected paragraph, got {other:?}"),
    }

    // Same bound for pathological list-marker chains.
    let input = format!("{}item", "- ".repeat(10_000));
    let blocks = parse_blocks(&input);
    assert!(matches!(blocks[0], Block::List { .. }));
}

#[test]
fn table_requires_delimiter_row() {
    let blocks = parse_blocks("| A | B |\n|---|---|\n| 1 | 2 |");
    match &blocks[0] {
        Block::Table { header, rows, .. } => {
            assert_eq!(header.len(), 2);
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0].len(), 2);
        }
        other => panic!("expected table, got {other:?}"),
    }

    // Without a delimiter row the pipes are just text.
    let blocks = parse_blocks("| A | B |\n| 1 | 2 |");
    assert!(matches!(blocks[0], Block::Paragraph { .. }));
}

#[test]
fn ragged_table_rows_pad_and_truncate() {
    let blocks = parse_blocks("| A | B |\n|--:|---|\n| 1 |\n| 1 | 2 | 3 |");
    match &blocks[0] {
        Block::Table {
            alignments, rows, ..
        } => {
            assert_eq!(alignments, &[Alignment::Right, Alignment::None]);
            assert_eq!(rows[0].len(), 2);
            assert_eq!(rows[1].len(), 2);
        }
        other => panic!("expected table, got {other:?}"),
    }
}

#[test]
fn block_math_fences() {
    let blocks = parse_blocks("$$\ne = mc^2\n$$");
    match &blocks[0] {
        Block::BlockMath { raw } => assert_eq!(raw, "e = mc^2"),
        other => panic!("expected block math, got {other:?}"),
    }

    // Single-line form.
    let blocks = parse_blocks("$$ x^2 $$");
    match &blocks[0] {
        Block::BlockMath { raw } => assert_eq!(raw, "x^2"),
        other => panic!("expected block math, got {other:?}"),
    }

    // Unterminated math runs to document end.
    let blocks = parse_blocks("$$\na + b");
    match &blocks[0] {
        Block::BlockMath { raw } => assert_eq!(raw, "a + b"),
        other => panic!("expected block math, got {other:?}"),
    }
}

#[test]
fn thematic_break_between_paragraphs() {
    let blocks = parse_blocks("above\n\n---\n\nbelow");
    assert_eq!(blocks.len(), 3);
    assert!(matches!(blocks[1], Block::ThematicBreak));
}

// ---------------------------------------------------------------------------
// Inline parsing
// ---------------------------------------------------------------------------

#[test]
fn code_span_resolves_before_everything() {
    let inlines = parse_inlines("a `**raw**` b");
    assert_eq!(
        inlines,
        vec![
            text("a "),
            Inline::InlineCode("**raw**".to_string()),
            text(" b"),
        ]
    );
}

#[test]
fn emphasis_closer_never_matches_inside_code_span() {
    let inlines = parse_inlines("*a `b*` c");
    // The only candidate closer sits inside the code span, so the opening
    // asterisk stays literal.
    assert_eq!(
        inlines,
        vec![
            text("*a "),
            Inline::InlineCode("b*".to_string()),
            text(" c"),
        ]
    );
}

#[test]
fn strong_takes_precedence_over_emphasis() {
    let inlines = parse_inlines("**bold** and *slanted*");
    assert_eq!(
        inlines,
        vec![
            Inline::Strong(vec![text("bold")]),
            text(" and "),
            Inline::Emphasis(vec![text("slanted")]),
        ]
    );
}

#[test]
fn underscore_variants_and_intraword_guard() {
    let inlines = parse_inlines("__strong__ and snake_case_name");
    assert_eq!(
        inlines,
        vec![
            Inline::Strong(vec![text("strong")]),
            text(" and snake_case_name"),
        ]
    );
}

#[test]
fn strikethrough_requires_double_tilde() {
    let inlines = parse_inlines("~~gone~~ but ~not~");
    assert_eq!(
        inlines,
        vec![
            Inline::Strikethrough(vec![text("gone")]),
            text(" but ~not~"),
        ]
    );
}

#[test]
fn emphasis_wins_when_strikethrough_overlaps() {
    // Documented tie-break: the leftmost delimiter resolves first, and the
    // tildes inside it are left unmatched.
    let inlines = parse_inlines("*a~~b*c~~");
    assert_eq!(
        inlines,
        vec![Inline::Emphasis(vec![text("a~~b")]), text("c~~")]
    );
}

#[test]
fn links_parse_and_nest() {
    let inlines = parse_inlines("[click **here**](https://example.com)");
    match &inlines[0] {
        Inline::Link { href, content } => {
            assert_eq!(href, "https://example.com");
            assert_eq!(content[0], text("click "));
            assert_eq!(content[1], Inline::Strong(vec![text("here")]));
        }
        other => panic!("expected link, got {other:?}"),
    }
}

#[test]
fn malformed_link_degrades_to_text() {
    assert_eq!(
        parse_inlines("[unclosed](http://x"),
        vec![text("[unclosed](http://x")]
    );
    assert_eq!(parse_inlines("[no target]"), vec![text("[no target]")]);
}

#[test]
fn images_capture_alt_and_source() {
    let inlines = parse_inlines("![logo](https://example.com/a.png)");
    assert_eq!(
        inlines,
        vec![Inline::Image {
            alt: "logo".to_string(),
            src: "https://example.com/a.png".to_string(),
        }]
    );
}

#[test]
fn inline_math_is_non_greedy_and_guards_currency() {
    assert_eq!(
        parse_inlines("$x^2$ fits"),
        vec![Inline::InlineMath("x^2".to_string()), text(" fits")]
    );
    assert_eq!(
        parse_inlines("$5 and $6"),
        vec![text("$5 and $6")]
    );
}

#[test]
fn backslash_escapes_suppress_meaning() {
    assert_eq!(parse_inlines(r"\*literal\*"), vec![text("*literal*")]);
    assert_eq!(parse_inlines(r"\[x\](y)"), vec![text("[x](y)")]);
}

#[test]
fn unmatched_openers_emit_literally() {
    assert_eq!(parse_inlines("**dangling"), vec![text("**dangling")]);
    assert_eq!(parse_inlines("`tick"), vec![text("`tick")]);
    assert_eq!(parse_inlines("~~open"), vec![text("~~open")]);
}
