//! Project root detection.
//!
//! A file's project root bounds cross-file resolution: a selector defined
//! in one repository never answers a lookup made from another. Roots are
//! computed per containing directory and memoized for the lifetime of the
//! resolver, so every file in a directory costs one ancestor walk.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use tracing::trace;

use super::config::ProjectConfig;
use crate::base::NormalizedPath;

/// Maps file paths to their project root.
#[derive(Debug, Default)]
pub struct ProjectRootResolver {
    marker_files: Vec<SmolStr>,
    root_dir_names: Vec<SmolStr>,
    workspace_folders: Vec<NormalizedPath>,
    /// Containing directory → root.
    cache: RwLock<FxHashMap<NormalizedPath, NormalizedPath>>,
}

impl ProjectRootResolver {
    pub fn new(config: &ProjectConfig) -> Self {
        Self {
            marker_files: config.marker_files.clone(),
            root_dir_names: config
                .root_dir_names
                .iter()
                .map(|n| SmolStr::new(n.to_lowercase()))
                .collect(),
            workspace_folders: config
                .workspace_folders
                .iter()
                .map(|folder| NormalizedPath::new(folder))
                .collect(),
            cache: RwLock::default(),
        }
    }

    /// The project root of the file at `path`.
    ///
    /// Never fails; the worst case is the file's own directory.
    pub fn resolve_root(&self, path: &NormalizedPath) -> NormalizedPath {
        let dir = path.parent().unwrap_or_else(|| path.clone());

        // Fast path: read lock
        if let Some(root) = self.cache.read().get(&dir) {
            return root.clone();
        }

        let root = self.detect(&dir);
        trace!(dir = %dir, root = %root, "resolved project root");

        // Two racing walks compute the same answer; keep the first.
        self.cache.write().entry(dir).or_insert(root).clone()
    }

    /// Whether two files share a project root.
    pub fn same_project(&self, a: &NormalizedPath, b: &NormalizedPath) -> bool {
        self.resolve_root(a) == self.resolve_root(b)
    }

    /// Number of memoized directories.
    pub fn cached_roots(&self) -> usize {
        self.cache.read().len()
    }

    fn detect(&self, dir: &NormalizedPath) -> NormalizedPath {
        if let Some(root) = dir.ancestors().find(|d| self.has_marker(d)) {
            return root;
        }

        if let Some(root) = dir.ancestors().find(|d| self.is_named_root(d)) {
            return root;
        }

        if let Some(folder) = self
            .workspace_folders
            .iter()
            .filter(|folder| dir.starts_with(folder))
            .max_by_key(|folder| folder.depth())
        {
            return folder.clone();
        }

        dir.clone()
    }

    fn has_marker(&self, dir: &NormalizedPath) -> bool {
        self.marker_files
            .iter()
            .any(|marker| dir.as_path().join(marker.as_str()).exists())
    }

    fn is_named_root(&self, dir: &NormalizedPath) -> bool {
        dir.file_name()
            .is_some_and(|name| self.root_dir_names.iter().any(|n| n == name))
    }
}
