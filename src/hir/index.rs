//! The multi-file symbol index.
//!
//! One [`FileEntry`] per known stylesheet, keyed by [`NormalizedPath`].
//! All mutation is whole-entry replace or delete under a single write lock;
//! parsing happens before the lock is taken. Readers clone `Arc`s out of
//! the map and work against that snapshot.

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use tracing::debug;

use super::input::FileEntry;
use crate::base::NormalizedPath;
use crate::syntax::Symbol;

/// Index of parsed stylesheets.
///
/// Iteration order is discovery order: the order in which paths were first
/// inserted. Re-indexing a path keeps its position.
#[derive(Debug, Default)]
pub struct SymbolIndex {
    files: RwLock<IndexMap<NormalizedPath, Arc<FileEntry>>>,
}

impl SymbolIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index `text` as the contents of `path`.
    ///
    /// Without `force`, a path that is already indexed is left alone. That
    /// makes opening a file or rescanning a workspace cheap. Returns whether
    /// the entry was (re)built.
    pub fn update(&self, path: &NormalizedPath, text: &str, force: bool) -> bool {
        if !force && self.contains(path) {
            return false;
        }

        let entry = Arc::new(FileEntry::parse(path.clone(), text));
        let count = entry.len();
        self.insert(entry, force);
        debug!(path = %path, symbols = count, "indexed stylesheet");
        true
    }

    /// Commit a prebuilt entry.
    ///
    /// Without `force` an entry that appeared since the caller last checked
    /// wins, so two racing non-forced updates keep the first.
    pub fn insert(&self, entry: Arc<FileEntry>, force: bool) -> bool {
        let mut files = self.files.write();
        if !force && files.contains_key(&entry.path) {
            return false;
        }
        files.insert(entry.path.clone(), entry);
        true
    }

    /// Drop the entry for `path`. Returns whether one existed.
    pub fn invalidate(&self, path: &NormalizedPath) -> bool {
        let removed = self.files.write().shift_remove(path).is_some();
        if removed {
            debug!(path = %path, "invalidated stylesheet");
        }
        removed
    }

    /// Find the first symbol named `target` or `.target` in any file.
    ///
    /// Files are searched in discovery order. There is no project scoping
    /// or ranking; use it only when no origin file is known.
    pub fn lookup_exact(&self, target: &str) -> Option<(NormalizedPath, Symbol)> {
        self.entries().into_iter().find_map(|entry| {
            entry
                .find_loose(target)
                .map(|symbol| (entry.path.clone(), symbol.clone()))
        })
    }

    /// Snapshot of all entries.
    pub fn entries(&self) -> Vec<Arc<FileEntry>> {
        self.files.read().values().cloned().collect()
    }

    pub fn get(&self, path: &NormalizedPath) -> Option<Arc<FileEntry>> {
        self.files.read().get(path).cloned()
    }

    pub fn contains(&self, path: &NormalizedPath) -> bool {
        self.files.read().contains_key(path)
    }

    /// Total number of symbols across all files.
    pub fn symbol_count(&self) -> usize {
        self.files.read().values().map(|entry| entry.len()).sum()
    }

    pub fn len(&self) -> usize {
        self.files.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.read().is_empty()
    }
}
