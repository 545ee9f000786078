use std::path::Path;

use rayon::prelude::*;
use tracing::{info, warn};

use super::file_loader::{self, LoadError};
use crate::base::NormalizedPath;
use crate::hir::FileEntry;
use crate::ide::AnalysisHost;

/// What a load pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Files parsed and added.
    pub indexed: usize,
    /// Files already in the index, left alone.
    pub skipped: usize,
    /// Files that could not be read.
    pub failed: usize,
}

impl LoadReport {
    fn merge(self, other: LoadReport) -> LoadReport {
        LoadReport {
            indexed: self.indexed + other.indexed,
            skipped: self.skipped + other.skipped,
            failed: self.failed + other.failed,
        }
    }
}

/// Loads workspace stylesheets into an [`AnalysisHost`].
///
/// Loading never forces: a file that is already indexed (opened earlier,
/// or loaded from an overlapping folder) keeps its entry.
pub struct WorkspaceLoader;

impl WorkspaceLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load every stylesheet under `dir`. Files are read and parsed in
    /// parallel; unreadable files are logged and counted, not fatal.
    pub fn load_directory_into_host(
        &self,
        dir: impl AsRef<Path>,
        host: &AnalysisHost,
    ) -> Result<LoadReport, LoadError> {
        let dir = dir.as_ref();
        let files = file_loader::collect_style_files(dir, host.config())?;

        let (pending, known): (Vec<_>, Vec<_>) = files
            .into_iter()
            .map(|path| (NormalizedPath::new(&path), path))
            .partition(|(key, _)| !host.index().contains(key));

        let parsed: Vec<_> = pending
            .into_par_iter()
            .map(|(key, path)| match file_loader::read_style_file(&path) {
                Ok(text) => Some(FileEntry::parse(key, &text)),
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "skipping stylesheet");
                    None
                }
            })
            .collect();

        let mut report = LoadReport {
            skipped: known.len(),
            ..LoadReport::default()
        };
        for entry in parsed {
            match entry.map(|entry| host.index().insert(entry.into(), false)) {
                Some(true) => report.indexed += 1,
                Some(false) => report.skipped += 1,
                None => report.failed += 1,
            }
        }

        info!(
            dir = %dir.display(),
            indexed = report.indexed,
            skipped = report.skipped,
            failed = report.failed,
            "loaded stylesheets"
        );
        Ok(report)
    }

    /// Load every workspace folder in the host's configuration. Folders
    /// that no longer exist are logged and skipped.
    pub fn load_workspace(&self, host: &AnalysisHost) -> LoadReport {
        host.config()
            .workspace_folders
            .iter()
            .filter_map(|folder| {
                self.load_directory_into_host(folder, host)
                    .inspect_err(|err| warn!(error = %err, "skipping workspace folder"))
                    .ok()
            })
            .fold(LoadReport::default(), LoadReport::merge)
    }

    /// Load (or with `force`, reload) a single stylesheet.
    pub fn load_file_into_host(
        &self,
        path: impl AsRef<Path>,
        host: &AnalysisHost,
        force: bool,
    ) -> Result<bool, LoadError> {
        let path = path.as_ref();
        let text = file_loader::read_style_file(path)?;
        Ok(host.set_file_content(path, &text, force))
    }
}

impl Default for WorkspaceLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::ProjectConfig;
    use std::fs;
    use tempfile::TempDir;

    fn project() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("src/sub")).unwrap();
        fs::write(root.join("package.json"), "{}").unwrap();
        fs::write(root.join("src/a.styl"), ".btn\n  &--large").unwrap();
        fs::write(root.join("src/sub/b.styl"), ".btn").unwrap();
        fs::write(root.join("src/bad.styl"), [0xff, 0xfe]).unwrap();
        temp
    }

    #[test]
    fn test_load_directory() {
        let temp = project();
        let host = AnalysisHost::new();

        let report = WorkspaceLoader::new()
            .load_directory_into_host(temp.path(), &host)
            .unwrap();

        assert_eq!(report, LoadReport { indexed: 2, skipped: 0, failed: 1 });
        assert_eq!(host.index().symbol_count(), 3);
    }

    #[test]
    fn test_reload_skips_known_files() {
        let temp = project();
        let host = AnalysisHost::new();
        let loader = WorkspaceLoader::new();

        loader.load_directory_into_host(temp.path(), &host).unwrap();
        let report = loader.load_directory_into_host(temp.path(), &host).unwrap();

        assert_eq!(report.indexed, 0);
        assert_eq!(report.skipped, 2);
    }

    #[test]
    fn test_load_workspace_folders() {
        let temp = project();
        let host = AnalysisHost::with_config(
            ProjectConfig::default()
                .with_workspace_folder(temp.path())
                .with_workspace_folder(temp.path().join("missing")),
        );

        let report = WorkspaceLoader::new().load_workspace(&host);
        assert_eq!(report.indexed, 2);
    }

    #[test]
    fn test_load_single_file() {
        let temp = project();
        let host = AnalysisHost::new();
        let loader = WorkspaceLoader::new();
        let file = temp.path().join("src/a.styl");

        assert!(loader.load_file_into_host(&file, &host, false).unwrap());
        assert!(!loader.load_file_into_host(&file, &host, false).unwrap());
        assert!(loader.load_file_into_host(&file, &host, true).unwrap());
        assert!(loader.load_file_into_host(temp.path().join("nope.styl"), &host, true).is_err());
    }
}
