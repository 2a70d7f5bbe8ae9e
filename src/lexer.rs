/// Line classification: the first stage of the pipeline.
///
/// Splits input into logical lines and tags each with the block-starting
/// pattern it carries (heading marker, fence, list marker, table row, quote
/// marker, thematic break, math fence) plus extracted metadata. Inline
/// content is never consumed here; that belongs to `parser::inline`.
///
/// Indented (4+ space) code blocks are deliberately not recognized outside
/// list context. This is a documented deviation from CommonMark: the
/// publishing documents this engine targets never rely on them, and the
/// simplification removes a whole class of indent ambiguities.
use nom::branch::alt;
use nom::bytes::complete::take_while1;
use nom::character::complete::{char as marker_char, digit1, one_of, space0, space1};
use nom::combinator::{eof, opt, verify};
use nom::error::{Error as NomError, ErrorKind};
use nom::multi::separated_list1;
use nom::{Err as NomErr, IResult};

use crate::ast::Alignment;

/// A classified logical line.
#[derive(Debug, Clone, PartialEq)]
pub struct Line<'a> {
    /// 1-based line number within the classified span.
    pub number: usize,
    /// The full line as it appeared in the input, terminator stripped.
    pub raw: &'a str,
    /// Visual width of the leading whitespace (tabs expand to 4-column stops).
    pub indent: usize,
    pub kind: LineKind<'a>,
}

/// Block-starting pattern detected on a line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineKind<'a> {
    Blank,
    /// `#`x1-6 followed by a space. Longer marker runs clamp to level 6.
    AtxHeading { level: u8, text: &'a str },
    /// Opening or closing code fence: a run of 3+ backticks or tildes.
    FenceDelimiter {
        marker: char,
        length: usize,
        info: &'a str,
    },
    /// 3+ of `-`, `*` or `_` alone on the line.
    ThematicBreak,
    /// `>` prefix with one optional following space stripped. Nested quotes
    /// are handled by reclassifying `rest` recursively.
    Quote { rest: &'a str },
    /// `-`, `*` or `+` list marker, with optional task checkbox.
    BulletItem {
        checked: Option<bool>,
        text: &'a str,
        content_column: usize,
    },
    /// `digits.` or `digits)` list marker, with optional task checkbox.
    OrderedItem {
        start: u64,
        checked: Option<bool>,
        text: &'a str,
        content_column: usize,
    },
    /// A row of `-`/`:` cells confirming the preceding row as table header.
    TableDelimiter { alignments: Vec<Alignment> },
    /// Any other `|`-bearing line; a table row only if a delimiter follows.
    TableRow { row: &'a str },
    /// `$$` fence, either alone (`content: None`) or wrapping a one-line
    /// formula (`content: Some`).
    MathFence { content: Option<&'a str> },
    Text { text: &'a str },
}

impl<'a> Line<'a> {
    pub fn is_blank(&self) -> bool {
        matches!(self.kind, LineKind::Blank)
    }
}

/// Splits input into lines and classifies each one.
pub fn classify_lines(input: &str) -> Vec<Line<'_>> {
    input
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .enumerate()
        .map(|(index, raw)| classify_line(raw, index + 1))
        .collect()
}

/// Classifies a single line.
pub fn classify_line(raw: &str, number: usize) -> Line<'_> {
    let (indent, stripped) = measure_indent(raw);
    let kind = classify_stripped(stripped, indent);
    Line {
        number,
        raw,
        indent,
        kind,
    }
}

fn classify_stripped(stripped: &str, indent: usize) -> LineKind<'_> {
    if stripped.trim().is_empty() {
        return LineKind::Blank;
    }

    if let Some(rest) = stripped.strip_prefix('>') {
        let rest = rest.strip_prefix(' ').unwrap_or(rest);
        return LineKind::Quote { rest };
    }

    if let Ok((_, (marker, length, info))) = fence_delimiter(stripped) {
        return LineKind::FenceDelimiter {
            marker,
            length,
            info,
        };
    }

    if let Ok((_, (level, text))) = atx_heading(stripped) {
        return LineKind::AtxHeading { level, text };
    }

    if thematic_break(stripped).is_ok() {
        return LineKind::ThematicBreak;
    }

    if let Some(kind) = math_fence(stripped) {
        return kind;
    }

    if let Ok((rest, _)) = bullet_marker(stripped) {
        let (rest, checked) = optional_task(rest);
        return LineKind::BulletItem {
            checked,
            text: rest,
            content_column: indent + consumed(stripped, rest),
        };
    }

    if let Ok((rest, start)) = ordered_marker(stripped) {
        let (rest, checked) = optional_task(rest);
        return LineKind::OrderedItem {
            start,
            checked,
            text: rest,
            content_column: indent + consumed(stripped, rest),
        };
    }

    if stripped.contains('|') {
        if let Ok((_, alignments)) = table_delimiter_row(stripped) {
            return LineKind::TableDelimiter { alignments };
        }
        return LineKind::TableRow { row: stripped };
    }

    LineKind::Text { text: stripped }
}

/// Returns the visual width of the leading whitespace and the rest of the
/// line. Tabs advance to the next 4-column stop.
fn measure_indent(raw: &str) -> (usize, &str) {
    let mut width = 0;
    for (offset, ch) in raw.char_indices() {
        match ch {
            ' ' => width += 1,
            '\t' => width += 4 - width % 4,
            _ => return (width, &raw[offset..]),
        }
    }
    (width, "")
}

/// Bytes of `full` consumed to reach `rest`. Marker prefixes are ASCII, so
/// byte count equals column count.
fn consumed(full: &str, rest: &str) -> usize {
    full.len() - rest.len()
}

fn reject<T>(input: &str, kind: ErrorKind) -> IResult<&str, T> {
    Err(NomErr::Error(NomError::new(input, kind)))
}

fn atx_heading(input: &str) -> IResult<&str, (u8, &str)> {
    let (rest, hashes) = take_while1(|c| c == '#')(input)?;
    let (rest, _) = alt((space1, eof))(rest)?;
    let level = hashes.len().min(6) as u8;
    Ok(("", (level, trim_atx_closing(rest))))
}

/// Strips an optional closing `#` run (`## Title ##`) from heading text.
fn trim_atx_closing(text: &str) -> &str {
    let text = text.trim_end();
    let without = text.trim_end_matches('#');
    if without.len() != text.len() && (without.is_empty() || without.ends_with(' ')) {
        without.trim_end()
    } else {
        text
    }
}

fn fence_delimiter(input: &str) -> IResult<&str, (char, usize, &str)> {
    let (rest, run) = alt((
        take_while1(|c| c == '`'),
        take_while1(|c| c == '~'),
    ))(input)?;
    if run.len() < 3 {
        return reject(input, ErrorKind::TakeWhile1);
    }
    let marker = if run.as_bytes()[0] == b'`' { '`' } else { '~' };
    let info = rest.trim();
    // Info strings of backtick fences cannot contain backticks; that would
    // swallow inline code spans.
    if marker == '`' && info.contains('`') {
        return reject(input, ErrorKind::Verify);
    }
    Ok(("", (marker, run.len(), info)))
}

fn thematic_break(input: &str) -> IResult<&str, ()> {
    let (rest, marker) = one_of("-*_")(input)?;
    let mut count = 1;
    for ch in rest.chars() {
        if ch == marker {
            count += 1;
        } else if ch != ' ' && ch != '\t' {
            return reject(input, ErrorKind::Many1Count);
        }
    }
    if count >= 3 {
        Ok(("", ()))
    } else {
        reject(input, ErrorKind::Many1Count)
    }
}

fn bullet_marker(input: &str) -> IResult<&str, char> {
    let (rest, marker) = one_of("-*+")(input)?;
    let (rest, _) = alt((space1, eof))(rest)?;
    Ok((rest, marker))
}

fn ordered_marker(input: &str) -> IResult<&str, u64> {
    let (rest, digits) = verify(digit1, |d: &str| d.len() <= 9)(input)?;
    let (rest, _) = one_of(".)")(rest)?;
    let (rest, _) = alt((space1, eof))(rest)?;
    Ok((rest, digits.parse().unwrap_or(1)))
}

fn task_marker(input: &str) -> IResult<&str, bool> {
    let (rest, _) = marker_char('[')(input)?;
    let (rest, state) = one_of(" xX")(rest)?;
    let (rest, _) = marker_char(']')(rest)?;
    let (rest, _) = alt((space1, eof))(rest)?;
    Ok((rest, state != ' '))
}

fn optional_task(input: &str) -> (&str, Option<bool>) {
    match task_marker(input) {
        Ok((rest, checked)) => (rest, Some(checked)),
        Err(_) => (input, None),
    }
}

fn delimiter_cell(input: &str) -> IResult<&str, Alignment> {
    let (rest, _) = space0(input)?;
    let (rest, left) = opt(marker_char(':'))(rest)?;
    let (rest, _) = take_while1(|c| c == '-')(rest)?;
    let (rest, right) = opt(marker_char(':'))(rest)?;
    let (rest, _) = space0(rest)?;
    let alignment = match (left.is_some(), right.is_some()) {
        (true, true) => Alignment::Center,
        (true, false) => Alignment::Left,
        (false, true) => Alignment::Right,
        (false, false) => Alignment::None,
    };
    Ok((rest, alignment))
}

fn table_delimiter_row(input: &str) -> IResult<&str, Vec<Alignment>> {
    let (rest, _) = opt(marker_char('|'))(input)?;
    let (rest, alignments) = separated_list1(marker_char('|'), delimiter_cell)(rest)?;
    let (rest, _) = opt(marker_char('|'))(rest)?;
    let (rest, _) = space0(rest)?;
    let (rest, _) = eof(rest)?;
    Ok((rest, alignments))
}

fn math_fence(stripped: &str) -> Option<LineKind<'_>> {
    let trimmed = stripped.trim_end();
    if trimmed == "$$" {
        return Some(LineKind::MathFence { content: None });
    }
    if trimmed.len() >= 5 && trimmed.starts_with("$$") && trimmed.ends_with("$$") {
        let inner = trimmed[2..trimmed.len() - 2].trim();
        return Some(LineKind::MathFence {
            content: Some(inner),
        });
    }
    None
}

/// Splits a table row into cell slices at unescaped `|` characters, dropping
/// the optional outer pipes. `\|` stays inside its cell for the inline
/// parser to unescape.
pub fn split_table_cells(row: &str) -> Vec<&str> {
    let trimmed = row.trim();
    let trimmed = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('|').unwrap_or(trimmed);

    let mut cells = Vec::new();
    let mut start = 0;
    let mut escaped = false;
    for (offset, ch) in trimmed.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '|' => {
                cells.push(trimmed[start..offset].trim());
                start = offset + 1;
            }
            _ => {}
        }
    }
    cells.push(trimmed[start..].trim());
    cells
}
