//! Measuring and wrapping text
//!
//! Everything here works on Unicode scalar values, never bytes, so
//! multi-byte text measures and splits the same as ASCII. The functions are
//! free of font state: width-aware ones take an advance lookup instead, which
//! is how [`crate::Font`] plugs its glyph table in.
//!
//! Glyphs the lookup does not know measure as zero. Measurement therefore
//! stays total even for strings the font only partly covers.

use crate::config::WrapOptions;

/// Width of a single line (no line breaks expected)
pub fn line_width<F>(line: &str, advance: F) -> f32
where
    F: Fn(char) -> Option<f32>,
{
    line.chars().filter_map(advance).sum()
}

/// Width of the widest line in `text`
pub fn text_width<F>(text: &str, advance: F) -> f32
where
    F: Fn(char) -> Option<f32>,
{
    text.split('\n')
        .map(|line| line_width(line, &advance))
        .fold(0.0, f32::max)
}

/// Number of lines `text` occupies; the empty string is one line
pub fn line_count(text: &str) -> usize {
    text.bytes().filter(|&b| b == b'\n').count() + 1
}

/// Cut `text` so the head holds at most `max_chars` characters
///
/// Prefers the last whitespace run at or before position `max_chars`, falls
/// back to a hard break at `max_chars`. A line break inside the budget always
/// wins. Returns `(head, overflow)`; the overflow is empty when everything
/// fits.
pub fn wrap_to_chars(text: &str, max_chars: usize, options: &WrapOptions) -> (String, String) {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    if chars.len() <= max_chars {
        return (text.to_string(), String::new());
    }

    if let Some(nl) = chars[..=max_chars].iter().position(|&(_, ch)| ch == '\n') {
        return split(text, &chars, nl, nl + 1);
    }

    let min_head = (options.min_fill * max_chars as f32).ceil() as usize;
    if let Some((start, end)) = last_whitespace_run(&chars, max_chars) {
        if start >= min_head {
            return split(text, &chars, start, end);
        }
    }

    hard_break(text, &chars, max_chars)
}

/// Cut `text` so the head's first line fits inside `budget` pixels
///
/// Same greedy policy as [`wrap_to_chars`], except the break point is where
/// the running sum of advances would first exceed the budget. A hard
/// mid-word break happens only when no whitespace precedes that point, and
/// it always keeps at least one character so repeated wrapping terminates.
pub fn wrap_to_width<F>(
    text: &str,
    budget: f32,
    advance: F,
    options: &WrapOptions,
) -> (String, String)
where
    F: Fn(char) -> Option<f32>,
{
    if text_width(text, &advance) <= budget {
        return (text.to_string(), String::new());
    }

    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut width = 0.0;
    let mut overflow_at = None;
    for (i, &(_, ch)) in chars.iter().enumerate() {
        if ch == '\n' {
            return split(text, &chars, i, i + 1);
        }
        let w = advance(ch).unwrap_or(0.0);
        if width + w > budget {
            overflow_at = Some(i);
            break;
        }
        width += w;
    }

    // Only the first line is considered; a later line that overflows was
    // already handled by the newline split above.
    let Some(overflow_at) = overflow_at else {
        return (text.to_string(), String::new());
    };

    if let Some((start, end)) = last_whitespace_run(&chars, overflow_at) {
        let head_width = line_width(&text[..byte_at(text, &chars, start)], &advance);
        if head_width >= options.min_fill * budget {
            return split(text, &chars, start, end);
        }
    }

    hard_break(text, &chars, overflow_at.max(1))
}

/// Byte offset of char index `i` (one past the end maps to `text.len()`)
fn byte_at(text: &str, chars: &[(usize, char)], i: usize) -> usize {
    chars.get(i).map_or(text.len(), |&(b, _)| b)
}

/// The whitespace run holding the last whitespace char in `1..=limit`
///
/// Returns `(start, end)` char indices with `start > 0`. The run swallows
/// following blanks and at most one line break so none of them leak into
/// the overflow.
fn last_whitespace_run(chars: &[(usize, char)], limit: usize) -> Option<(usize, usize)> {
    let limit = limit.min(chars.len().saturating_sub(1));
    let i = (1..=limit).rev().find(|&i| chars[i].1.is_whitespace())?;

    let mut start = i;
    while start > 0 && chars[start - 1].1.is_whitespace() {
        start -= 1;
    }
    if start == 0 {
        return None;
    }

    let mut end = i + 1;
    if chars[i].1 != '\n' {
        while end < chars.len() && chars[end].1.is_whitespace() && chars[end].1 != '\n' {
            end += 1;
        }
        if end < chars.len() && chars[end].1 == '\n' {
            end += 1;
        }
    }

    Some((start, end))
}

fn split(text: &str, chars: &[(usize, char)], head_end: usize, rest_start: usize) -> (String, String) {
    let head = &text[..byte_at(text, chars, head_end)];
    let rest = &text[byte_at(text, chars, rest_start)..];
    (head.to_string(), rest.to_string())
}

fn hard_break(text: &str, chars: &[(usize, char)], at: usize) -> (String, String) {
    let at = byte_at(text, chars, at);
    let rest = text[at..].trim_start_matches(|c: char| c.is_whitespace() && c != '\n');
    (text[..at].to_string(), rest.to_string())
}
