//! End-to-end goto-definition over an on-disk project.
//!
//! Builds small projects in a temp directory, loads them through the
//! workspace loader and checks ranking, project scoping and change events.

use std::fs;
use std::path::{Path, PathBuf};

use rstest::rstest;
use smol_str::SmolStr;
use stylnav::ide::{AnalysisHost, Document, FileChange, GotoResult, MatchKind};
use stylnav::project::{ProjectConfig, WorkspaceLoader};
use stylnav::LineCol;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

fn write(root: &Path, rel: &str, text: &str) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, text).unwrap();
    path
}

/// Two sibling projects under one temp dir, each with a `package.json`.
fn two_projects() -> (TempDir, AnalysisHost) {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    write(root, "proj/package.json", "{}");
    write(root, "proj/src/a.styl", ".btn\n  &--large\n");
    write(root, "proj/src/sub/b.styl", ".btn\n");
    write(root, "other/package.json", "{}");
    write(root, "other/src/a.styl", ".btn\n  &--large\n");

    let host = AnalysisHost::new();
    WorkspaceLoader::new()
        .load_directory_into_host(root, &host)
        .unwrap();
    (temp, host)
}

fn in_memory_host() -> AnalysisHost {
    AnalysisHost::with_config(
        ProjectConfig::default()
            .with_marker_files(Vec::<SmolStr>::new())
            .with_workspace_folder("/proj"),
    )
}

#[test]
fn test_combinator_target_resolves_in_origin() {
    let (temp, host) = two_projects();
    let origin = temp.path().join("proj/src/a.styl");

    let matches = host.analysis().resolve("btn--large", &origin);

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].path.as_path(), origin.as_path());
    assert_eq!(matches[0].symbol.selector, ".btn--large");
    assert_eq!(matches[0].score, 0);
}

#[test]
fn test_nearest_definition_first() {
    let (temp, host) = two_projects();
    let origin = temp.path().join("proj/src/a.styl");

    let matches = host.analysis().resolve("btn", &origin);
    let scored: Vec<_> = matches
        .iter()
        .map(|m| (m.path.as_path().to_path_buf(), m.score))
        .collect();

    assert_eq!(
        scored,
        vec![
            (origin.clone(), 0),
            (temp.path().join("proj/src/sub/b.styl"), 2),
        ]
    );
}

#[test]
fn test_results_stay_in_project() {
    let (temp, host) = two_projects();
    let proj = temp.path().join("proj");
    let origin = proj.join("src/page.vue");

    for m in host.analysis().resolve("btn", &origin) {
        assert!(
            m.path.as_path().starts_with(&proj),
            "{} leaked from another project",
            m.path
        );
    }
}

#[test]
fn test_unknown_selector_is_empty() {
    let (temp, host) = two_projects();
    let origin = temp.path().join("proj/src/a.styl");

    assert!(host.analysis().resolve("does-not-exist", &origin).is_empty());
}

#[test]
fn test_change_events() {
    let (temp, host) = two_projects();
    let origin = temp.path().join("proj/src/a.styl");
    let added = write(temp.path(), "proj/src/c.styl", ".chip\n");

    assert!(host.analysis().resolve("chip", &origin).is_empty());
    assert!(host.apply_change(&FileChange::Created(added.clone())).unwrap());
    assert_eq!(host.analysis().resolve("chip", &origin).len(), 1);

    fs::write(&added, ".chip-renamed\n").unwrap();
    host.apply_change(&FileChange::Changed(added.clone())).unwrap();
    assert!(host.analysis().resolve("chip", &origin).is_empty());
    assert_eq!(host.analysis().resolve("chip-renamed", &origin).len(), 1);

    fs::remove_file(&added).unwrap();
    assert!(host.apply_change(&FileChange::Deleted(added)).unwrap());
    assert!(host.analysis().resolve("chip-renamed", &origin).is_empty());
}

#[test]
fn test_failed_read_does_not_add_entry() {
    let (temp, host) = two_projects();
    let missing = temp.path().join("proj/src/ghost.styl");
    let before = host.index().len();

    assert!(host.apply_change(&FileChange::Changed(missing)).is_err());
    assert_eq!(host.index().len(), before);
}

#[test]
fn test_goto_from_template() {
    let (temp, host) = two_projects();
    let page = temp.path().join("proj/src/sub/Page.vue");
    let text = "<template lang=\"pug\">\n  button.btn.btn--large Save\n</template>\n";

    let doc = Document {
        path: &page,
        text,
        version: 3,
    };
    let result = host
        .analysis()
        .goto_definition(doc, LineCol::new(1, 16), &CancellationToken::new())
        .unwrap();

    let GotoResult::Found { token, targets } = result else {
        panic!("expected a token under the cursor");
    };
    assert_eq!(token.text, ".btn--large");
    assert_eq!(targets.len(), 1);
    assert_eq!(targets[0].path, temp.path().join("proj/src/a.styl"));
    assert_eq!(targets[0].position, LineCol::new(1, 2));
}

#[rstest]
#[case::exact_beats_descendant_at_equal_distance(
    &[("/proj/src/a.styl", ".x\n  .title"), ("/proj/src/b.styl", ".title")],
    "/proj/src/b.styl",
    MatchKind::Exact
)]
#[case::near_descendant_loses_to_far_exact(
    &[("/proj/src/a.styl", ".x\n  .title"), ("/proj/lib/deep/b.styl", ".title")],
    "/proj/src/a.styl",
    MatchKind::Exact
)]
#[case::descendant_only(
    &[("/proj/src/a.styl", ".x\n  .title")],
    "/proj/src/a.styl",
    MatchKind::Descendant
)]
fn test_ranking_prefers(
    #[case] files: &[(&str, &str)],
    #[case] origin: &str,
    #[case] best: MatchKind,
) {
    let host = in_memory_host();
    for (path, text) in files {
        host.set_file_content(path, text, false);
    }

    let matches = host.analysis().resolve("title", origin);
    assert_eq!(matches[0].kind, best);
    assert!(matches.windows(2).all(|w| w[0].score <= w[1].score));
}

#[test]
fn test_distance_orders_equal_purity() {
    let host = in_memory_host();
    host.set_file_content("/proj/a/b/c/far.styl", ".tag", false);
    host.set_file_content("/proj/a/near.styl", ".tag", false);

    let matches = host.analysis().resolve(".tag", "/proj/a/page.vue");
    let paths: Vec<_> = matches.iter().map(|m| m.path.as_str()).collect();

    assert_eq!(paths, vec!["/proj/a/near.styl", "/proj/a/b/c/far.styl"]);
}

#[test]
fn test_reindex_without_force_keeps_results() {
    let host = in_memory_host();
    host.set_file_content("/proj/a.styl", ".btn", false);
    let before = host.analysis().resolve("btn", "/proj/a.styl");

    host.set_file_content("/proj/a.styl", ".other", false);
    assert_eq!(host.analysis().resolve("btn", "/proj/a.styl"), before);

    host.set_file_content("/proj/a.styl", ".other", true);
    assert!(host.analysis().resolve("btn", "/proj/a.styl").is_empty());
}
