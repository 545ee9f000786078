//! Goto definition — ranking selector definitions across files.
//!
//! A lookup only considers files in the same project as the referencing
//! file. Within the project, each candidate scores its path distance from
//! the origin, plus a penalty when it only matched as the last component of
//! a nested selector. Lower scores rank first.

use std::cmp::Ordering;
use std::path::PathBuf;

use smol_str::{SmolStr, format_smolstr};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::base::{LineCol, NormalizedPath};
use crate::hir::{Symbol, SymbolIndex};
use crate::project::ProjectRootResolver;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GotoError {
    #[error("goto-definition request was cancelled")]
    Cancelled,
}

/// How a symbol matched the target selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchKind {
    /// `selector == target`
    Exact,
    /// `selector` ends with `" " + target`: the target is the innermost
    /// component of a nested chain.
    Descendant,
}

/// A ranked candidate definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub path: NormalizedPath,
    pub symbol: Symbol,
    pub kind: MatchKind,
    /// Lower is better.
    pub score: u32,
}

impl Match {
    pub fn position(&self) -> LineCol {
        self.symbol.position()
    }

    /// Total order used for ranking: score, then path, then position.
    fn rank_cmp(&self, other: &Match) -> Ordering {
        self.score
            .cmp(&other.score)
            .then_with(|| self.path.cmp(&other.path))
            .then_with(|| self.position().cmp(&other.position()))
    }
}

/// Normalize a token to selector form: `.` or `#` prefixed tokens are kept,
/// anything else is treated as a class name.
pub fn selector_form(token: &str) -> SmolStr {
    if token.starts_with(['.', '#']) {
        SmolStr::new(token)
    } else {
        format_smolstr!(".{token}")
    }
}

/// Tree distance between two files: directory steps up from `a` to the
/// deepest shared directory, steps down to `b`'s directory, plus one for
/// leaving the file. Zero for the same file, one for siblings.
pub fn path_distance(a: &NormalizedPath, b: &NormalizedPath) -> u32 {
    if a == b {
        return 0;
    }
    let a_dirs = a.depth().saturating_sub(1);
    let b_dirs = b.depth().saturating_sub(1);
    let common = a.common_prefix_len(b).min(a_dirs).min(b_dirs);

    ((a_dirs - common) + (b_dirs - common) + 1) as u32
}

/// Project-scoped ranking over a [`SymbolIndex`].
#[derive(Debug, Clone, Copy)]
pub struct MatchRanker<'a> {
    index: &'a SymbolIndex,
    roots: &'a ProjectRootResolver,
    descendant_penalty: u32,
}

impl<'a> MatchRanker<'a> {
    pub fn new(index: &'a SymbolIndex, roots: &'a ProjectRootResolver, descendant_penalty: u32) -> Self {
        Self {
            index,
            roots,
            descendant_penalty,
        }
    }

    /// Every definition of `target` in the origin's project, best first.
    ///
    /// An empty result means the project has no such selector.
    pub fn resolve(&self, target: &str, origin: &NormalizedPath) -> Vec<Match> {
        self.rank(target, origin, || false).unwrap_or_default()
    }

    /// Like [`resolve`](Self::resolve), but gives up as soon as `cancel`
    /// fires. A cancelled request never returns partial results.
    pub fn resolve_cancellable(
        &self,
        target: &str,
        origin: &NormalizedPath,
        cancel: &CancellationToken,
    ) -> Result<Vec<Match>, GotoError> {
        self.rank(target, origin, || cancel.is_cancelled())
            .ok_or(GotoError::Cancelled)
    }

    fn rank(
        &self,
        target: &str,
        origin: &NormalizedPath,
        cancelled: impl Fn() -> bool,
    ) -> Option<Vec<Match>> {
        let target = target.trim();
        if target.is_empty() || target == "." || target == "#" {
            return Some(Vec::new());
        }
        let selector = selector_form(target);
        let descendant_suffix = format_smolstr!(" {selector}");

        if cancelled() {
            return None;
        }

        let mut matches = Vec::new();
        for entry in self.index.entries() {
            if cancelled() {
                return None;
            }
            if !self.roots.same_project(origin, &entry.path) {
                continue;
            }

            let distance = path_distance(origin, &entry.path);
            for symbol in entry.symbols() {
                let kind = if symbol.selector == selector {
                    MatchKind::Exact
                } else if symbol.selector.ends_with(descendant_suffix.as_str()) {
                    MatchKind::Descendant
                } else {
                    continue;
                };

                let penalty = match kind {
                    MatchKind::Exact => 0,
                    MatchKind::Descendant => self.descendant_penalty,
                };
                matches.push(Match {
                    path: entry.path.clone(),
                    symbol: symbol.clone(),
                    kind,
                    score: distance + penalty,
                });
            }
        }

        matches.sort_by(Match::rank_cmp);
        Some(matches)
    }
}

/// A navigable definition location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GotoTarget {
    /// The file, with its original casing.
    pub path: PathBuf,
    /// Document-absolute position.
    pub position: LineCol,
    pub selector: SmolStr,
    /// Ranking score; definitions in the referencing document score 0.
    pub score: u32,
}

impl From<Match> for GotoTarget {
    fn from(m: Match) -> Self {
        Self {
            path: m.path.as_path().to_path_buf(),
            position: m.symbol.position(),
            selector: m.symbol.selector,
            score: m.score,
        }
    }
}

/// Outcome of a goto-definition request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GotoResult {
    /// No selector-like token under the cursor.
    NoToken,
    /// A token was found; `targets` is empty when nothing defines it.
    Found {
        token: super::token::SelectorToken,
        targets: Vec<GotoTarget>,
    },
}

impl GotoResult {
    pub fn targets(&self) -> &[GotoTarget] {
        match self {
            GotoResult::NoToken => &[],
            GotoResult::Found { targets, .. } => targets,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.targets().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::ProjectConfig;
    use smol_str::SmolStr;

    fn setup(files: &[(&str, &str)]) -> (SymbolIndex, ProjectRootResolver) {
        let index = SymbolIndex::new();
        for (path, text) in files {
            index.update(&NormalizedPath::new(path), text, false);
        }
        let config = ProjectConfig::default()
            .with_marker_files(Vec::<SmolStr>::new())
            .with_workspace_folder("/proj")
            .with_workspace_folder("/other");
        (index, ProjectRootResolver::new(&config))
    }

    fn summary(matches: &[Match]) -> Vec<(String, String, u32)> {
        matches
            .iter()
            .map(|m| (m.path.to_string(), m.symbol.selector.to_string(), m.score))
            .collect()
    }

    #[test]
    fn test_selector_form() {
        assert_eq!(selector_form("btn"), ".btn");
        assert_eq!(selector_form(".btn"), ".btn");
        assert_eq!(selector_form("#app"), "#app");
    }

    #[test]
    fn test_path_distance() {
        let a = NormalizedPath::new("/proj/src/a.styl");
        assert_eq!(path_distance(&a, &a), 0);
        assert_eq!(path_distance(&a, &NormalizedPath::new("/PROJ/src/A.styl")), 0);
        assert_eq!(path_distance(&a, &NormalizedPath::new("/proj/src/b.styl")), 1);
        assert_eq!(path_distance(&a, &NormalizedPath::new("/proj/src/sub/b.styl")), 2);
        assert_eq!(path_distance(&a, &NormalizedPath::new("/proj/lib/x/c.styl")), 4);
        assert_eq!(path_distance(&a, &NormalizedPath::new("/proj/b.styl")), 2);
    }

    #[test]
    fn test_combinator_match_in_origin_file() {
        let (index, roots) = setup(&[
            ("/proj/src/a.styl", ".btn\n  &--large"),
            ("/proj/src/sub/b.styl", ".btn"),
        ]);
        let ranker = MatchRanker::new(&index, &roots, 10);

        let matches = ranker.resolve("btn--large", &NormalizedPath::new("/proj/src/a.styl"));
        assert_eq!(
            summary(&matches),
            vec![("/proj/src/a.styl".into(), ".btn--large".into(), 0)]
        );
    }

    #[test]
    fn test_nearer_file_ranks_first() {
        let (index, roots) = setup(&[
            ("/proj/src/sub/b.styl", ".btn"),
            ("/proj/src/a.styl", ".btn\n  &--large"),
        ]);
        let ranker = MatchRanker::new(&index, &roots, 10);

        let matches = ranker.resolve("btn", &NormalizedPath::new("/proj/src/a.styl"));
        let paths: Vec<_> = matches.iter().map(|m| m.path.as_str()).collect();

        assert_eq!(paths, vec!["/proj/src/a.styl", "/proj/src/sub/b.styl"]);
        assert_eq!(matches[0].score, 0);
        assert_eq!(matches[1].score, 2);
    }

    #[test]
    fn test_descendant_penalty() {
        let (index, roots) = setup(&[
            ("/proj/src/a.styl", ".card\n  .title"),
            ("/proj/src/b.styl", ".title"),
        ]);
        let ranker = MatchRanker::new(&index, &roots, 10);
        let matches = ranker.resolve("title", &NormalizedPath::new("/proj/src/a.styl"));

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].kind, MatchKind::Exact);
        assert_eq!(matches[0].score, 1);
        assert_eq!(matches[1].kind, MatchKind::Descendant);
        assert_eq!(matches[1].score, 10);
    }

    #[test]
    fn test_raw_suffix_is_not_a_match() {
        let (index, roots) = setup(&[("/proj/a.styl", ".apply\n  &__loading\n.big-loading")]);
        let ranker = MatchRanker::new(&index, &roots, 10);

        assert!(ranker.resolve("loading", &NormalizedPath::new("/proj/a.styl")).is_empty());
    }

    #[test]
    fn test_other_project_excluded() {
        let (index, roots) = setup(&[("/proj/a.styl", ".btn"), ("/other/a.styl", ".btn")]);
        let ranker = MatchRanker::new(&index, &roots, 10);

        let matches = ranker.resolve("btn", &NormalizedPath::new("/proj/page.vue"));
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].path.as_str(), "/proj/a.styl");
    }

    #[test]
    fn test_id_target() {
        let (index, roots) = setup(&[("/proj/a.styl", "#app\n.app")]);
        let ranker = MatchRanker::new(&index, &roots, 10);

        let matches = ranker.resolve("#app", &NormalizedPath::new("/proj/a.styl"));
        assert_eq!(summary(&matches), vec![("/proj/a.styl".into(), "#app".into(), 0)]);
    }

    #[test]
    fn test_ties_break_by_path() {
        let (index, roots) = setup(&[("/proj/z.styl", ".btn"), ("/proj/b.styl", ".btn")]);
        let ranker = MatchRanker::new(&index, &roots, 10);

        let matches = ranker.resolve("btn", &NormalizedPath::new("/proj/page.vue"));
        let paths: Vec<_> = matches.iter().map(|m| m.path.as_str()).collect();
        assert_eq!(paths, vec!["/proj/b.styl", "/proj/z.styl"]);
    }

    #[test]
    fn test_empty_target() {
        let (index, roots) = setup(&[("/proj/a.styl", ".btn")]);
        let ranker = MatchRanker::new(&index, &roots, 10);

        assert!(ranker.resolve("", &NormalizedPath::new("/proj/a.styl")).is_empty());
        assert!(ranker.resolve(".", &NormalizedPath::new("/proj/a.styl")).is_empty());
    }

    #[test]
    fn test_cancelled_request() {
        let (index, roots) = setup(&[("/proj/a.styl", ".btn")]);
        let ranker = MatchRanker::new(&index, &roots, 10);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = ranker.resolve_cancellable("btn", &NormalizedPath::new("/proj/a.styl"), &cancel);
        assert_eq!(result, Err(GotoError::Cancelled));
    }
}
