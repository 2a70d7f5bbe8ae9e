/// Inline parser: resolves delimiters within a raw text span.
///
/// Resolution runs left to right with no backtracking once a construct is
/// accepted. Precedence: backslash escapes, code spans, inline math, links
/// and images, strong emphasis (longest run first), emphasis, strikethrough.
/// Searches for closing emphasis markers skip over code and math spans so a
/// backtick span can never be split by a later delimiter. Unmatched openers
/// always fall back to literal text.
use crate::ast::Inline;

type Chars = [(usize, char)];

/// Parses a raw inline span into `Inline` nodes.
pub fn parse_inlines(text: &str) -> Vec<Inline> {
    let mut output = Vec::new();
    parse_into(text, &mut output);
    output
}

fn flush_text(buffer: &mut String, output: &mut Vec<Inline>) {
    if buffer.is_empty() {
        return;
    }
    output.push(Inline::Text(std::mem::take(buffer)));
}

fn run_length(chars: &Chars, start: usize, marker: char) -> usize {
    let mut idx = start;
    while idx < chars.len() && chars[idx].1 == marker {
        idx += 1;
    }
    idx - start
}

/// Finds the closing run for a code span: a backtick run of exactly the
/// opening length.
fn find_code_close(chars: &Chars, from: usize, length: usize) -> Option<usize> {
    let mut idx = from;
    while idx < chars.len() {
        if chars[idx].1 == '`' {
            let close = run_length(chars, idx, '`');
            if close == length {
                return Some(idx);
            }
            idx += close;
        } else {
            idx += 1;
        }
    }
    None
}

/// Finds the closing `$` of an inline math span opened at `open`. The span
/// is non-greedy: content must be non-empty, free of unescaped `$`, and must
/// not start or end with whitespace.
fn find_math_close(chars: &Chars, open: usize) -> Option<usize> {
    let first = chars.get(open + 1)?;
    if first.1.is_whitespace() || first.1 == '$' {
        return None;
    }
    let mut idx = open + 1;
    while idx < chars.len() {
        match chars[idx].1 {
            '\\' => idx += 2,
            '$' => {
                if chars[idx - 1].1.is_whitespace() {
                    return None;
                }
                return Some(idx);
            }
            _ => idx += 1,
        }
    }
    None
}

/// Finds the matching close bracket for the opener at `open`, honoring
/// escapes and nested brackets.
fn find_bracket_close(chars: &Chars, open: usize) -> Option<usize> {
    let mut depth = 1;
    let mut idx = open + 1;
    while idx < chars.len() {
        match chars[idx].1 {
            '\\' => idx += 2,
            '[' => {
                depth += 1;
                idx += 1;
            }
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(idx);
                }
                idx += 1;
            }
            _ => idx += 1,
        }
    }
    None
}

/// Finds the matching close paren for the opener at `open`, honoring escapes
/// and balanced inner parens.
fn find_paren_close(chars: &Chars, open: usize) -> Option<usize> {
    let mut depth = 1;
    let mut idx = open + 1;
    while idx < chars.len() {
        match chars[idx].1 {
            '\\' => idx += 2,
            '(' => {
                depth += 1;
                idx += 1;
            }
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(idx);
                }
                idx += 1;
            }
            _ => idx += 1,
        }
    }
    None
}

/// Finds a closing delimiter run of exactly `length` `marker` characters at
/// or after `from`, skipping escapes, code spans and math spans. Rule 1 and
/// 2 content is never re-scanned, so a closer inside a span cannot match.
fn find_delimiter_close(chars: &Chars, from: usize, marker: char, length: usize) -> Option<usize> {
    let mut idx = from;
    while idx < chars.len() {
        match chars[idx].1 {
            '\\' => idx += 2,
            '`' => {
                let open = run_length(chars, idx, '`');
                match find_code_close(chars, idx + open, open) {
                    Some(close) => idx = close + open,
                    None => idx += open,
                }
            }
            '$' => match find_math_close(chars, idx) {
                Some(close) => idx = close + 1,
                None => idx += 1,
            },
            ch if ch == marker => {
                let close = run_length(chars, idx, marker);
                if close == length {
                    return Some(idx);
                }
                idx += close;
            }
            _ => idx += 1,
        }
    }
    None
}

fn parse_into(text: &str, output: &mut Vec<Inline>) {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut buffer = String::new();
    let mut idx = 0usize;

    while idx < chars.len() {
        let (_, ch) = chars[idx];
        match ch {
            '\\' if idx + 1 < chars.len() && chars[idx + 1].1.is_ascii_punctuation() => {
                buffer.push(chars[idx + 1].1);
                idx += 2;
            }
            '`' => {
                let open = run_length(&chars, idx, '`');
                match find_code_close(&chars, idx + open, open) {
                    Some(close) => {
                        flush_text(&mut buffer, output);
                        let start = chars[idx + open].0;
                        let end = chars[close].0;
                        output.push(Inline::InlineCode(text[start..end].to_string()));
                        idx = close + open;
                    }
                    None => {
                        for _ in 0..open {
                            buffer.push('`');
                        }
                        idx += open;
                    }
                }
            }
            '$' => match find_math_close(&chars, idx) {
                Some(close) => {
                    flush_text(&mut buffer, output);
                    let start = chars[idx + 1].0;
                    let end = chars[close].0;
                    output.push(Inline::InlineMath(text[start..end].to_string()));
                    idx = close + 1;
                }
                None => {
                    buffer.push('$');
                    idx += 1;
                }
            },
            '!' if matches!(chars.get(idx + 1), Some((_, '['))) => {
                match parse_link_target(text, &chars, idx + 1) {
                    Some(target) => {
                        flush_text(&mut buffer, output);
                        output.push(Inline::Image {
                            alt: target.label.to_string(),
                            src: target.destination.to_string(),
                        });
                        idx = target.end;
                    }
                    None => {
                        buffer.push('!');
                        idx += 1;
                    }
                }
            }
            '[' => match parse_link_target(text, &chars, idx) {
                Some(target) => {
                    flush_text(&mut buffer, output);
                    let mut content = Vec::new();
                    parse_into(target.label, &mut content);
                    output.push(Inline::Link {
                        href: target.destination.to_string(),
                        content,
                    });
                    idx = target.end;
                }
                None => {
                    buffer.push('[');
                    idx += 1;
                }
            },
            '*' | '_' => {
                // Underscores inside words stay literal.
                if ch == '_' && idx > 0 && chars[idx - 1].1.is_alphanumeric() {
                    buffer.push('_');
                    idx += 1;
                    continue;
                }
                let run = run_length(&chars, idx, ch);
                match find_delimiter_close(&chars, idx + run, ch, run) {
                    Some(close) if close > idx + run => {
                        flush_text(&mut buffer, output);
                        let start = chars[idx + run].0;
                        let end = chars[close].0;
                        let mut content = Vec::new();
                        parse_into(&text[start..end], &mut content);
                        // Longest run first: double or longer is strong.
                        if run >= 2 {
                            output.push(Inline::Strong(content));
                        } else {
                            output.push(Inline::Emphasis(content));
                        }
                        idx = close + run;
                    }
                    _ => {
                        for _ in 0..run {
                            buffer.push(ch);
                        }
                        idx += run;
                    }
                }
            }
            '~' if matches!(chars.get(idx + 1), Some((_, '~'))) => {
                let run = run_length(&chars, idx, '~');
                match find_delimiter_close(&chars, idx + run, '~', run) {
                    Some(close) if close > idx + run => {
                        flush_text(&mut buffer, output);
                        let start = chars[idx + run].0;
                        let end = chars[close].0;
                        let mut content = Vec::new();
                        parse_into(&text[start..end], &mut content);
                        output.push(Inline::Strikethrough(content));
                        idx = close + run;
                    }
                    _ => {
                        for _ in 0..run {
                            buffer.push('~');
                        }
                        idx += run;
                    }
                }
            }
            _ => {
                buffer.push(ch);
                idx += 1;
            }
        }
    }

    flush_text(&mut buffer, output);
}

struct LinkTarget<'a> {
    label: &'a str,
    destination: &'a str,
    /// Index just past the closing paren.
    end: usize,
}

/// Parses `[label](destination)` starting at the `[` at `open`. Malformed
/// syntax returns `None` and the caller degrades to literal text.
fn parse_link_target<'a>(text: &'a str, chars: &Chars, open: usize) -> Option<LinkTarget<'a>> {
    let close_bracket = find_bracket_close(chars, open)?;
    let (_, after) = chars.get(close_bracket + 1)?;
    if *after != '(' {
        return None;
    }
    let close_paren = find_paren_close(chars, close_bracket + 1)?;

    let label_start = chars[open].0 + 1;
    let label_end = chars[close_bracket].0;
    let dest_start = chars[close_bracket + 1].0 + 1;
    let dest_end = chars[close_paren].0;

    Some(LinkTarget {
        label: &text[label_start..label_end],
        destination: text[dest_start..dest_end].trim(),
        end: close_paren + 1,
    })
}
