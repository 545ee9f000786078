//! Stylesheet discovery and reading.

use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

use super::config::ProjectConfig;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("directory not found: {0}")]
    DirectoryNotFound(PathBuf),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} is not valid UTF-8")]
    Decode { path: PathBuf },
}

/// Collect every stylesheet under `dir`.
///
/// Excluded directories are not descended into. Results are sorted so that
/// a `file_limit` cut is reproducible.
pub fn collect_style_files(dir: &Path, config: &ProjectConfig) -> Result<Vec<PathBuf>, LoadError> {
    if !dir.is_dir() {
        return Err(LoadError::DirectoryNotFound(dir.to_path_buf()));
    }

    let mut paths: Vec<PathBuf> = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0
                || !entry.file_type().is_dir()
                || !entry.file_name().to_str().is_some_and(|name| config.is_excluded_dir(name))
        })
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file() && config.is_style_file(entry.path()))
        .map(|entry| entry.into_path())
        .collect();

    if let Some(limit) = config.file_limit {
        paths.truncate(limit);
    }

    Ok(paths)
}

/// Read a stylesheet as UTF-8 text.
pub fn read_style_file(path: &Path) -> Result<String, LoadError> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    String::from_utf8(bytes).map_err(|_| LoadError::Decode {
        path: path.to_path_buf(),
    })
}
