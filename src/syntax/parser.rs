//! Selector extraction.
//!
//! A single top-to-bottom scan keeps a stack of open indentation frames.
//! Each selector line pops every frame at the same or deeper indentation,
//! then combines its token with whatever frame is left on top:
//!
//! ```text
//! .card              → .card
//!   &--active        → .card--active
//!   .title           → .card .title
//!     &__icon        → .card .title__icon
//! ```

use std::fmt;

use smol_str::{SmolStr, format_smolstr};

use super::rules::{classify_line, indent_of, selector_token};
use crate::base::LineCol;

/// A fully-qualified selector and where it was written.
///
/// `line` and `column` are zero-based and relative to the start of the text
/// that was parsed, which for embedded `<style>` blocks is the fragment, not
/// the enclosing document. `column` is the indentation in UTF-8 bytes, the
/// same unit as every [`LineCol`] column; a line indented with U+3000 has
/// column 3. Editors counting UTF-16 units convert at the boundary.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Symbol {
    pub selector: SmolStr,
    pub line: u32,
    pub column: u32,
}

impl Symbol {
    pub fn new(selector: impl Into<SmolStr>, line: u32, column: u32) -> Self {
        Self {
            selector: selector.into(),
            line,
            column,
        }
    }

    #[inline]
    pub fn position(&self) -> LineCol {
        LineCol::new(self.line, self.column)
    }

    /// Whether the selector is `target` or `.target`.
    pub fn matches_loosely(&self, target: &str) -> bool {
        self.selector == target
            || self
                .selector
                .strip_prefix('.')
                .is_some_and(|rest| rest == target)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({:?} @ {})", self.selector, self.position())
    }
}

/// An open nesting level.
struct IndentFrame {
    indent: usize,
    selector: SmolStr,
}

/// Extract every selector from stylesheet text.
///
/// Never fails: lines that don't look like selectors are skipped, so
/// arbitrary text produces a partial or empty table.
pub fn parse_selectors(text: &str) -> Vec<Symbol> {
    let mut symbols = Vec::new();
    let mut stack: Vec<IndentFrame> = Vec::new();

    for (line_no, line) in text.split('\n').enumerate() {
        if !classify_line(line).is_selector() {
            continue;
        }
        let Some(indent) = indent_of(line) else {
            continue;
        };
        let token = selector_token(line.trim());

        while stack.last().is_some_and(|top| top.indent >= indent) {
            stack.pop();
        }

        let selector = match (stack.last(), token.strip_prefix('&')) {
            (Some(parent), Some(suffix)) => format_smolstr!("{}{}", parent.selector, suffix),
            (Some(parent), None) => format_smolstr!("{} {}", parent.selector, token),
            (None, _) => SmolStr::new(token),
        };

        stack.push(IndentFrame {
            indent,
            selector: selector.clone(),
        });
        symbols.push(Symbol::new(selector, line_no as u32, indent as u32));
    }

    symbols
}
