//! Stylesheet fragments embedded in template documents.
//!
//! Single-file components (`.vue`, `.svelte`, plain `.html`) carry their
//! styles in `<style lang="...">` blocks. Symbols parsed from a block are
//! relative to the block's first byte; [`StyleFragment::to_document`] maps
//! them back.

use once_cell::sync::Lazy;
use regex::Regex;
use smol_str::SmolStr;

use super::parser::{Symbol, parse_selectors};
use crate::base::{LineCol, LineIndex, TextRange, TextSize};

static STYLE_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<style\b([^>]*)>(.*?)</style\s*>").expect("valid regex"));

static LANG_ATTR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\blang\s*=\s*["']?([A-Za-z0-9_-]+)"#).expect("valid regex")
});

/// One `<style>` block's content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleFragment {
    /// Value of the `lang` attribute, lowercased.
    pub lang: SmolStr,
    /// Byte range of the block content within the document.
    pub range: TextRange,
    /// Where the content starts in the document.
    pub start: LineCol,
    /// Symbols parsed from the content, fragment-relative.
    pub symbols: Vec<Symbol>,
}

impl StyleFragment {
    /// Translate a fragment-relative symbol position into the document.
    pub fn to_document(&self, symbol: &Symbol) -> LineCol {
        symbol.position().relative_to(self.start)
    }
}

/// Find and parse every `<style>` block whose `lang` is one of `langs`.
///
/// Blocks without a `lang` attribute, or with a language not listed, are
/// ignored. Comparison is case-insensitive.
pub fn extract_style_blocks<S: AsRef<str>>(document: &str, langs: &[S]) -> Vec<StyleFragment> {
    let mut line_index = None;

    STYLE_BLOCK
        .captures_iter(document)
        .filter_map(|caps| {
            let attrs = caps.get(1)?.as_str();
            let lang = LANG_ATTR.captures(attrs)?.get(1)?.as_str().to_ascii_lowercase();
            if !langs.iter().any(|l| l.as_ref().eq_ignore_ascii_case(&lang)) {
                return None;
            }

            let body = caps.get(2)?;
            let range = TextRange::new(
                TextSize::from(body.start() as u32),
                TextSize::from(body.end() as u32),
            );
            let index = line_index.get_or_insert_with(|| LineIndex::new(document));

            Some(StyleFragment {
                lang: SmolStr::new(lang),
                range,
                start: index.line_col(range.start()),
                symbols: parse_selectors(body.as_str()),
            })
        })
        .collect()
}
