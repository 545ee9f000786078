//! Session configuration.

use std::path::PathBuf;

use smol_str::SmolStr;

/// Default score penalty for a descendant-suffix match.
pub const DEFAULT_DESCENDANT_PENALTY: u32 = 10;

/// Settings for root detection, file discovery and ranking.
#[derive(Debug, Clone)]
pub struct ProjectConfig {
    /// File names whose presence marks a project root.
    pub marker_files: Vec<SmolStr>,
    /// Directory names that mark a project root when no marker file is
    /// found (matched case-insensitively).
    pub root_dir_names: Vec<SmolStr>,
    /// Workspace folders supplied by the host editor.
    pub workspace_folders: Vec<PathBuf>,
    /// Stylesheet file extensions, without the dot.
    pub extensions: Vec<SmolStr>,
    /// Directory names skipped during discovery.
    pub exclude_dirs: Vec<SmolStr>,
    /// Stop discovery after this many files.
    pub file_limit: Option<usize>,
    /// Added to the score of descendant-suffix matches.
    pub descendant_penalty: u32,
    /// `lang` values of embedded `<style>` blocks to parse.
    pub embedded_langs: Vec<SmolStr>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            marker_files: vec![SmolStr::new_static("package.json")],
            root_dir_names: Vec::new(),
            workspace_folders: Vec::new(),
            extensions: vec![SmolStr::new_static("styl")],
            exclude_dirs: vec![SmolStr::new_static("node_modules")],
            file_limit: None,
            descendant_penalty: DEFAULT_DESCENDANT_PENALTY,
            embedded_langs: vec![SmolStr::new_static("stylus")],
        }
    }
}

impl ProjectConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_marker_files<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        self.marker_files = markers.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_root_dir_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        self.root_dir_names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_workspace_folder(mut self, folder: impl Into<PathBuf>) -> Self {
        self.workspace_folders.push(folder.into());
        self
    }

    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_exclude_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        self.exclude_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_file_limit(mut self, limit: usize) -> Self {
        self.file_limit = Some(limit);
        self
    }

    pub fn with_descendant_penalty(mut self, penalty: u32) -> Self {
        self.descendant_penalty = penalty;
        self
    }

    pub fn with_embedded_langs<I, S>(mut self, langs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        self.embedded_langs = langs.into_iter().map(Into::into).collect();
        self
    }

    /// Whether `path` has one of the configured stylesheet extensions.
    pub fn is_style_file(&self, path: &std::path::Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }

    /// Whether a directory with this name is skipped during discovery.
    pub fn is_excluded_dir(&self, name: &str) -> bool {
        self.exclude_dirs.iter().any(|d| d == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_defaults() {
        let config = ProjectConfig::default();

        assert_eq!(config.descendant_penalty, 10);
        assert!(config.is_style_file(Path::new("/p/a.styl")));
        assert!(config.is_style_file(Path::new("/p/A.STYL")));
        assert!(!config.is_style_file(Path::new("/p/a.css")));
        assert!(config.is_excluded_dir("node_modules"));
    }

    #[test]
    fn test_builders() {
        let config = ProjectConfig::new()
            .with_extensions(["styl", "stylus"])
            .with_marker_files([".git"])
            .with_workspace_folder("/proj")
            .with_file_limit(10)
            .with_descendant_penalty(3);

        assert!(config.is_style_file(Path::new("x.stylus")));
        assert_eq!(config.marker_files, vec![SmolStr::new(".git")]);
        assert_eq!(config.workspace_folders, vec![PathBuf::from("/proj")]);
        assert_eq!(config.file_limit, Some(10));
        assert_eq!(config.descendant_penalty, 3);
    }
}
