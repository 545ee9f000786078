//! Per-file symbol tables.

use std::sync::Arc;

use crate::base::NormalizedPath;
use crate::syntax::{Symbol, parse_selectors};

/// The symbols extracted from one stylesheet file.
///
/// Entries are immutable once built. Re-indexing a file builds a fresh
/// entry and swaps it in, so a reader holding an `Arc<FileEntry>` always sees
/// a complete table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileEntry {
    pub path: NormalizedPath,
    symbols: Arc<[Symbol]>,
}

impl FileEntry {
    /// Parse `text` into a new entry for `path`.
    pub fn parse(path: NormalizedPath, text: &str) -> Self {
        Self::new(path, parse_selectors(text))
    }

    pub fn new(path: NormalizedPath, symbols: Vec<Symbol>) -> Self {
        Self {
            path,
            symbols: symbols.into(),
        }
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// First symbol whose selector is `target` or `.target`.
    pub fn find_loose(&self, target: &str) -> Option<&Symbol> {
        self.symbols.iter().find(|s| s.matches_loosely(target))
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
