// Shared scanners for placeholders and bare function names

use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;

static PLACEHOLDER_RE: OnceLock<Regex> = OnceLock::new();

fn placeholder_re() -> &'static Regex {
    PLACEHOLDER_RE.get_or_init(|| {
        Regex::new(r"\{\{\s*(\S+?)\s*\}\}").expect("placeholder pattern is valid")
    })
}

/// A piece of a portable expression string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Segment<'a> {
    Literal(&'a str),
    Placeholder { id: &'a str },
}

/// Split an expression into literal runs and placeholders, left to right.
/// Empty literal runs are omitted.
pub(crate) fn segments(expression: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut last = 0;

    for caps in placeholder_re().captures_iter(expression) {
        let (Some(whole), Some(id)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > last {
            out.push(Segment::Literal(&expression[last..whole.start()]));
        }
        out.push(Segment::Placeholder { id: id.as_str() });
        last = whole.end();
    }

    if last < expression.len() {
        out.push(Segment::Literal(&expression[last..]));
    }
    out
}

/// An uppercase identifier directly followed (ignoring whitespace) by `(`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NameMatch {
    /// Byte range of the name in the scanned text
    pub bytes: Range<usize>,
    /// Char range of the name in the scanned text
    pub chars: Range<usize>,
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_uppercase() || c == '_'
}

/// Find every call-shaped name in `text`, known or not.
///
/// A name starts where the previous char is not a word char, is a maximal
/// run of `[A-Z_]` at least two chars long, and is followed by optional
/// whitespace and `(`. Matches never overlap.
pub(crate) fn call_names(text: &str) -> Vec<NameMatch> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let byte_at = |i: usize| chars.get(i).map(|&(b, _)| b).unwrap_or(text.len());
    let mut out = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let at_boundary = i == 0 || !is_word_char(chars[i - 1].1);
        if !at_boundary || !is_name_char(chars[i].1) {
            i += 1;
            continue;
        }

        let start = i;
        while i < chars.len() && is_name_char(chars[i].1) {
            i += 1;
        }
        if i - start < 2 {
            continue;
        }

        let mut j = i;
        while j < chars.len() && chars[j].1.is_whitespace() {
            j += 1;
        }
        if j < chars.len() && chars[j].1 == '(' {
            out.push(NameMatch {
                bytes: byte_at(start)..byte_at(i),
                chars: start..i,
            });
        }
    }
    out
}
