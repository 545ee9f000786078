//! Line classification rules.
//!
//! A stylesheet line is either skipped or treated as a selector. The
//! decision is made by [`LineRule::ALL`], evaluated in order; the first rule
//! that matches decides the [`LineKind`].

/// Characters that may start a selector on an indented line.
const NESTED_SELECTOR_PREFIXES: [char; 3] = ['.', '&', '#'];

/// What a single line of stylesheet text contributes to the symbol table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// Whitespace only. Leaves the nesting stack untouched.
    Blank,
    /// A property declaration such as `color: red`.
    Declaration,
    /// An indented line that is not a class, id or `&` rule (tag selectors,
    /// bare property shorthands, stray prose).
    NestedPlain,
    /// A selector that produces a symbol.
    Selector,
}

impl LineKind {
    /// Whether lines of this kind produce a symbol.
    pub fn is_selector(self) -> bool {
        self == LineKind::Selector
    }
}

/// One named classification rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineRule {
    Blank,
    Declaration,
    NestedPlain,
}

impl LineRule {
    /// The rule set, in evaluation order.
    pub const ALL: [LineRule; 3] = [LineRule::Blank, LineRule::Declaration, LineRule::NestedPlain];

    /// Test the rule against a line's trimmed content and indentation.
    pub fn matches(self, trimmed: &str, indent: usize) -> bool {
        match self {
            LineRule::Blank => trimmed.is_empty(),
            // `&:hover` is a pseudo-class on the parent, not a declaration.
            LineRule::Declaration => trimmed.contains(':') && !trimmed.starts_with('&'),
            LineRule::NestedPlain => indent > 0 && !trimmed.starts_with(NESTED_SELECTOR_PREFIXES),
        }
    }

    /// The kind assigned to lines this rule matches.
    pub fn kind(self) -> LineKind {
        match self {
            LineRule::Blank => LineKind::Blank,
            LineRule::Declaration => LineKind::Declaration,
            LineRule::NestedPlain => LineKind::NestedPlain,
        }
    }
}

/// Byte column of the first non-whitespace character, if any. Unicode
/// whitespace counts by its encoded length.
pub(crate) fn indent_of(line: &str) -> Option<usize> {
    line.find(|c: char| !c.is_whitespace())
}

/// Classify a raw (untrimmed) line.
pub fn classify_line(line: &str) -> LineKind {
    let indent = indent_of(line).unwrap_or(0);
    let trimmed = line.trim();

    LineRule::ALL
        .iter()
        .find(|rule| rule.matches(trimmed, indent))
        .map_or(LineKind::Selector, |rule| rule.kind())
}

/// The selector token of a trimmed line: everything before the first space
/// or `{`.
pub fn selector_token(trimmed: &str) -> &str {
    trimmed.split([' ', '{']).next().unwrap_or_default()
}
