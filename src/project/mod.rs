//! Project structure: configuration, root detection and workspace loading.

mod config;
mod file_loader;
mod root;
mod workspace_loader;

pub use config::{DEFAULT_DESCENDANT_PENALTY, ProjectConfig};
pub use file_loader::{LoadError, collect_style_files, read_style_file};
pub use root::ProjectRootResolver;
pub use workspace_loader::{LoadReport, WorkspaceLoader};
