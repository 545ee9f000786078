//! AnalysisHost — the session object owning the index.
//!
//! One host per editor session: it owns the [`SymbolIndex`], the project
//! root cache and the configuration, and is dropped when the session ends.
//! Nothing in the crate is global, so tests and parallel sessions stay
//! isolated.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::goto::{GotoError, GotoResult, GotoTarget, Match, MatchRanker, selector_form};
use super::token::token_at_position;
use crate::base::{LineCol, NormalizedPath};
use crate::hir::{Symbol, SymbolIndex};
use crate::project::{LoadError, ProjectConfig, ProjectRootResolver, read_style_file};
use crate::syntax::{StyleFragment, extract_style_blocks};

/// A filesystem event reported by the host's watcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileChange {
    Created(PathBuf),
    Changed(PathBuf),
    Deleted(PathBuf),
}

impl FileChange {
    pub fn path(&self) -> &Path {
        match self {
            FileChange::Created(p) | FileChange::Changed(p) | FileChange::Deleted(p) => p,
        }
    }
}

/// The referencing document of a goto-definition request.
#[derive(Debug, Clone, Copy)]
pub struct Document<'a> {
    pub path: &'a Path,
    pub text: &'a str,
    /// Editor version; unchanged versions reuse parsed `<style>` blocks.
    pub version: i32,
}

/// Parsed `<style>` blocks of the most recently queried document.
struct EmbeddedCache {
    path: NormalizedPath,
    version: i32,
    fragments: Arc<[StyleFragment]>,
}

/// Owns all per-session state.
pub struct AnalysisHost {
    config: ProjectConfig,
    index: SymbolIndex,
    roots: ProjectRootResolver,
    embedded: Mutex<Option<EmbeddedCache>>,
}

impl AnalysisHost {
    pub fn new() -> Self {
        Self::with_config(ProjectConfig::default())
    }

    pub fn with_config(config: ProjectConfig) -> Self {
        let roots = ProjectRootResolver::new(&config);
        Self {
            config,
            index: SymbolIndex::new(),
            roots,
            embedded: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    pub fn index(&self) -> &SymbolIndex {
        &self.index
    }

    pub fn roots(&self) -> &ProjectRootResolver {
        &self.roots
    }

    /// Index stylesheet text for `path`. See [`SymbolIndex::update`].
    pub fn set_file_content(&self, path: impl AsRef<Path>, text: &str, force: bool) -> bool {
        self.index.update(&NormalizedPath::new(path), text, force)
    }

    pub fn remove_file(&self, path: impl AsRef<Path>) -> bool {
        self.index.invalidate(&NormalizedPath::new(path))
    }

    /// A document was opened in the editor. Stylesheets not yet indexed are
    /// indexed from the editor's buffer; known ones are left alone.
    pub fn did_open(&self, path: impl AsRef<Path>, text: &str) -> bool {
        let path = path.as_ref();
        self.config.is_style_file(path) && self.set_file_content(path, text, false)
    }

    /// Apply a watcher event, reading the file from disk if needed.
    ///
    /// A failed read is logged and returned; the index is left without an
    /// entry for that file until a later event succeeds.
    pub fn apply_change(&self, change: &FileChange) -> Result<bool, LoadError> {
        match change {
            FileChange::Created(path) | FileChange::Changed(path) => {
                if !self.config.is_style_file(path) {
                    return Ok(false);
                }
                let text = read_style_file(path).inspect_err(|err| {
                    warn!(path = %path.display(), error = %err, "failed to index stylesheet");
                })?;
                Ok(self.set_file_content(path, &text, true))
            }
            FileChange::Deleted(path) => Ok(self.remove_file(path)),
        }
    }

    /// Get a read-only view for answering queries.
    pub fn analysis(&self) -> Analysis<'_> {
        Analysis { host: self }
    }

    fn ranker(&self) -> MatchRanker<'_> {
        MatchRanker::new(&self.index, &self.roots, self.config.descendant_penalty)
    }

    fn embedded_fragments(&self, document: &Document<'_>) -> Arc<[StyleFragment]> {
        let path = NormalizedPath::new(document.path);
        let mut cache = self.embedded.lock();

        if let Some(cached) = cache.as_ref() {
            if cached.path == path && cached.version == document.version {
                return Arc::clone(&cached.fragments);
            }
        }

        let fragments: Arc<[StyleFragment]> =
            extract_style_blocks(document.text, &self.config.embedded_langs).into();
        debug!(path = %path, version = document.version, blocks = fragments.len(), "parsed embedded styles");
        *cache = Some(EmbeddedCache {
            path,
            version: document.version,
            fragments: Arc::clone(&fragments),
        });
        fragments
    }
}

impl Default for AnalysisHost {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AnalysisHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisHost")
            .field("files", &self.index.len())
            .field("cached_roots", &self.roots.cached_roots())
            .finish()
    }
}

/// Read-only query interface over an [`AnalysisHost`].
#[derive(Debug, Clone, Copy)]
pub struct Analysis<'a> {
    host: &'a AnalysisHost,
}

impl<'a> Analysis<'a> {
    /// Ranked definitions of `target` in the project containing `origin`.
    pub fn resolve(&self, target: &str, origin: impl AsRef<Path>) -> Vec<Match> {
        self.host.ranker().resolve(target, &NormalizedPath::new(origin))
    }

    pub fn resolve_cancellable(
        &self,
        target: &str,
        origin: impl AsRef<Path>,
        cancel: &CancellationToken,
    ) -> Result<Vec<Match>, GotoError> {
        self.host
            .ranker()
            .resolve_cancellable(target, &NormalizedPath::new(origin), cancel)
    }

    /// Best-effort lookup for callers with no referencing file: the first
    /// indexed selector named `target` or `.target`, from any project.
    /// An `#id` target only finds that id.
    pub fn resolve_without_context(&self, target: &str) -> Option<GotoTarget> {
        let target = target.strip_prefix('.').unwrap_or(target);
        let (path, symbol) = self.host.index.lookup_exact(target)?;

        Some(GotoTarget {
            path: path.as_path().to_path_buf(),
            position: symbol.position(),
            selector: symbol.selector,
            score: 0,
        })
    }

    /// Resolve the selector under the cursor.
    ///
    /// `<style>` blocks of the document itself are searched first; a match
    /// there is returned alone, positioned in the document. Otherwise the
    /// ranked project-wide definitions are returned.
    pub fn goto_definition(
        &self,
        document: Document<'_>,
        position: LineCol,
        cancel: &CancellationToken,
    ) -> Result<GotoResult, GotoError> {
        let Some(token) = token_at_position(document.text, position) else {
            return Ok(GotoResult::NoToken);
        };
        if token.bare().is_empty() {
            return Ok(GotoResult::NoToken);
        }
        if cancel.is_cancelled() {
            return Err(GotoError::Cancelled);
        }

        let selector = selector_form(&token.text);
        // A `.`/`#` token names one selector; only bare tokens match loosely.
        let matches_token = |s: &Symbol| match token.sigil() {
            Some(_) => s.selector == selector,
            None => s.matches_loosely(&token.text),
        };
        let fragments = self.host.embedded_fragments(&document);
        let local = fragments.iter().find_map(|fragment| {
            fragment
                .symbols
                .iter()
                .find(|s| matches_token(*s))
                .map(|symbol| GotoTarget {
                    path: document.path.to_path_buf(),
                    position: fragment.to_document(symbol),
                    selector: symbol.selector.clone(),
                    score: 0,
                })
        });
        if let Some(target) = local {
            return Ok(GotoResult::Found {
                token,
                targets: vec![target],
            });
        }

        let matches = self.resolve_cancellable(&token.text, document.path, cancel)?;
        Ok(GotoResult::Found {
            token,
            targets: matches.into_iter().map(GotoTarget::from).collect(),
        })
    }
}
