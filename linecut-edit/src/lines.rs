//! Line sequences that keep their original terminators.
//!
//! A line ends at `\r\n` or at any single boundary character: `\n`, `\r`,
//! `\x0b`, `\x0c`, `\x1c`, `\x1d`, `\x1e`, `\u{85}`, `\u{2028}`, `\u{2029}`.
//! The last line may have no terminator at all. Joining the lines back yields
//! the input byte for byte.

use std::ops::Range;

/// A single line: its text and the terminator that followed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    raw: String,
    text_len: usize,
}

impl Line {
    fn new(raw: &str, text_len: usize) -> Self {
        Self {
            raw: raw.to_string(),
            text_len,
        }
    }

    /// Line content without the terminator.
    pub fn text(&self) -> &str {
        &self.raw[..self.text_len]
    }

    /// The terminator bytes as read (empty for an unterminated final line).
    pub fn terminator(&self) -> &str {
        &self.raw[self.text_len..]
    }

    /// Content plus terminator.
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

fn is_line_boundary(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r'
            | '\x0b'
            | '\x0c'
            | '\x1c'
            | '\x1d'
            | '\x1e'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

/// An ordered, fully materialized sequence of lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineSequence {
    lines: Vec<Line>,
}

impl LineSequence {
    /// Split `text` into lines, keeping each terminator attached.
    pub fn parse(text: &str) -> Self {
        let mut lines = Vec::new();
        let mut start = 0;
        let mut chars = text.char_indices().peekable();

        while let Some((i, c)) = chars.next() {
            if !is_line_boundary(c) {
                continue;
            }
            let mut end = i + c.len_utf8();
            if c == '\r' && chars.next_if(|&(_, n)| n == '\n').is_some() {
                end += 1;
            }
            lines.push(Line::new(&text[start..end], i - start));
            start = end;
        }

        if start < text.len() {
            lines.push(Line::new(&text[start..], text.len() - start));
        }

        Self { lines }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Zero-based access.
    pub fn get(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter()
    }

    /// A new sequence without the lines in `range`.
    ///
    /// Bounds are clamped to the sequence length, so a range running past the
    /// end drops everything from `range.start` on.
    pub fn excise(&self, range: Range<usize>) -> Self {
        let len = self.lines.len();
        let start = range.start.min(len);
        let end = range.end.max(start).min(len);

        let mut lines = Vec::with_capacity(len - (end - start));
        lines.extend_from_slice(&self.lines[..start]);
        lines.extend_from_slice(&self.lines[end..]);
        Self { lines }
    }

    /// Concatenate every line with its terminator.
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.lines.iter().map(|l| l.raw.len()).sum());
        for line in &self.lines {
            out.push_str(&line.raw);
        }
        out
    }
}
