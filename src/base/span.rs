//! Source text positions and ranges.

use std::fmt;

// Re-export from text-size for compatibility
pub use text_size::TextRange;
pub use text_size::TextSize;

/// A zero-based line and column position.
///
/// Columns count UTF-8 bytes, which matches how selector indentation is
/// measured. Displayed as 1-indexed.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default, Ord, PartialOrd)]
pub struct LineCol {
    pub line: u32,
    pub col: u32,
}

impl LineCol {
    #[inline]
    pub const fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }

    /// Translate a position inside an embedded fragment into the enclosing
    /// document, given where the fragment starts.
    ///
    /// Only the fragment's first line shares a row with text before the
    /// fragment, so only that line is shifted horizontally.
    #[inline]
    pub const fn relative_to(self, fragment_start: LineCol) -> Self {
        if self.line == 0 {
            Self::new(fragment_start.line, fragment_start.col + self.col)
        } else {
            Self::new(fragment_start.line + self.line, self.col)
        }
    }
}

impl fmt::Debug for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.col + 1)
    }
}

impl fmt::Display for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.col + 1)
    }
}

/// Byte offset to line/column conversion for one document.
#[derive(Clone, Debug)]
pub struct LineIndex {
    line_starts: Vec<TextSize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let line_starts = std::iter::once(TextSize::from(0))
            .chain(
                text.match_indices('\n')
                    .map(|(offset, _)| TextSize::from((offset + 1) as u32)),
            )
            .collect();

        Self { line_starts }
    }

    /// Convert a byte offset to a line/column position.
    pub fn line_col(&self, offset: TextSize) -> LineCol {
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);

        LineCol::new(line as u32, (offset - self.line_starts[line]).into())
    }

    /// Convert a line/column position back to a byte offset.
    pub fn offset(&self, pos: LineCol) -> Option<TextSize> {
        let start = self.line_starts.get(pos.line as usize)?;
        Some(*start + TextSize::from(pos.col))
    }

    /// Byte range of a line, excluding its terminator.
    pub fn line_range(&self, line: u32, text: &str) -> Option<TextRange> {
        let start = *self.line_starts.get(line as usize)?;
        let end = self
            .line_starts
            .get(line as usize + 1)
            .map(|next| *next - TextSize::from(1))
            .unwrap_or_else(|| TextSize::of(text));
        Some(TextRange::new(start, end))
    }

    pub fn len(&self) -> usize {
        self.line_starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.line_starts.is_empty()
    }
}
