//! Selector tokens under the cursor.
//!
//! Markup references classes and ids in many shapes: `class="card card--x"`,
//! pug's `.card.card--x`, `:class="{'card--x': on}"`. Rather than parse any
//! of them, the token is the run of `[A-Za-z0-9_-]` nearest to the cursor,
//! plus a directly preceding `.` or `#`.

use smol_str::SmolStr;

use crate::base::{LineCol, LineIndex};

fn is_token_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

/// A class- or id-like token found in a line of markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorToken {
    /// The token, including a leading `.` or `#` if present.
    pub text: SmolStr,
    pub line: u32,
    /// Start column (inclusive, bytes).
    pub start: u32,
    /// End column (exclusive, bytes).
    pub end: u32,
}

impl SelectorToken {
    /// The token without its `.`/`#` sigil.
    pub fn bare(&self) -> &str {
        self.text.trim_start_matches(['.', '#'])
    }

    pub fn sigil(&self) -> Option<char> {
        self.text.chars().next().filter(|c| matches!(*c, '.' | '#'))
    }

    pub fn start_pos(&self) -> LineCol {
        LineCol::new(self.line, self.start)
    }

    pub fn end_pos(&self) -> LineCol {
        LineCol::new(self.line, self.end)
    }
}

/// Find the token at or nearest to `col` in a single line.
///
/// When the cursor is not on a token character the search widens one
/// column at a time, checking left before right. A cursor past the end of
/// the line is clamped to the last character.
pub fn token_at(line_text: &str, col: u32) -> Option<SelectorToken> {
    let bytes = line_text.as_bytes();
    if bytes.is_empty() {
        return None;
    }
    let mut i = (col as usize).min(bytes.len() - 1);

    if !is_token_byte(bytes[i]) {
        let cursor = i;
        i = (1..bytes.len()).find_map(|step| {
            let left = cursor.checked_sub(step).filter(|&l| is_token_byte(bytes[l]));
            let right = Some(cursor + step).filter(|&r| r < bytes.len() && is_token_byte(bytes[r]));
            left.or(right)
        })?;
    }

    let mut start = i;
    while start > 0 && is_token_byte(bytes[start - 1]) {
        start -= 1;
    }
    let mut end = i + 1;
    while end < bytes.len() && is_token_byte(bytes[end]) {
        end += 1;
    }
    if start > 0 && matches!(bytes[start - 1], b'.' | b'#') {
        start -= 1;
    }

    Some(SelectorToken {
        text: SmolStr::new(&line_text[start..end]),
        line: 0,
        start: start as u32,
        end: end as u32,
    })
}

/// Find the token at a document position.
pub fn token_at_position(document: &str, position: LineCol) -> Option<SelectorToken> {
    let index = LineIndex::new(document);
    let range = index.line_range(position.line, document)?;
    let line_text = document[range].trim_end_matches('\r');

    token_at(line_text, position.col).map(|token| SelectorToken {
        line: position.line,
        ..token
    })
}
