//! Integration tests for project root discovery.
//!
//! These tests build real directory trees and check that the located root
//! and its reason follow the marker rules:
//!
//! - `.git` (file or directory) and `.hg` directories beat a project file in
//!   the same directory
//! - a project file only counts when it has the tool's section
//! - the nearest marker above the common base wins
//! - no marker yields the filesystem root

mod common;

use common::ProjectTree;
use projroot::{DiscoveryReason, Error, Session};

#[test]
fn test_root_is_ancestor_of_every_source() {
    let tree = ProjectTree::new();
    tree.dir(".git");
    tree.file("pkg/a/one.py", "");
    tree.file("pkg/b/two.py", "");
    tree.file("docs/conf.py", "");

    let session = Session::with_base(tree.root());
    let sources = ["pkg/a/one.py", "pkg/b/two.py", "docs/conf.py"];
    let root = session.locate_root(&sources, None).unwrap();

    assert_eq!(root.path, tree.root());
    for source in sources {
        assert!(tree.path(source).starts_with(&root.path));
    }
}

#[test]
fn test_common_base_is_deepest_shared_directory() {
    let tree = ProjectTree::new();
    tree.dir(".git");
    tree.black_project("pkg", "");
    tree.file("pkg/a/one.py", "");
    tree.file("pkg/b/two.py", "");

    let session = Session::with_base(tree.root());
    let root = session
        .locate_root(&["pkg/a/one.py", "pkg/b/two.py"], None)
        .unwrap();
    assert_eq!(root.path, tree.path("pkg"));
    assert_eq!(root.reason, DiscoveryReason::ProjectFile);
}

#[test]
fn test_marker_priority_in_same_directory() {
    let tree = ProjectTree::new();
    tree.dir("repo/.git");
    tree.black_project("repo", "line-length = 100\n");

    let session = Session::with_base(tree.root());
    let root = session.locate_root(&["repo"], None).unwrap();
    assert_eq!(root.reason, DiscoveryReason::GitDirectory);
}

#[test]
fn test_project_file_without_section_does_not_stop_walk() {
    let tree = ProjectTree::new();
    tree.dir(".hg");
    tree.file("service/pyproject.toml", "[project]\nname = \"svc\"\n");
    tree.file("service/main.py", "");

    let session = Session::with_base(tree.root());
    let root = session.locate_root(&["service/main.py"], None).unwrap();
    assert_eq!(root.path, tree.root());
    assert_eq!(root.reason, DiscoveryReason::MercurialDirectory);
}

#[test]
fn test_pyproject_directory_is_not_a_marker() {
    let tree = ProjectTree::new();
    tree.dir(".git");
    tree.dir("odd/pyproject.toml");

    let session = Session::with_base(tree.root());
    let root = session.locate_root(&["odd"], None).unwrap();
    assert_eq!(root.path, tree.root());
}

#[test]
fn test_stdin_uses_filename_for_discovery() {
    let tree = ProjectTree::new();
    tree.dir(".git");
    tree.black_project("nested", "");

    let session = Session::with_base(tree.root());
    let with_name = session
        .locate_root(&["-"], Some("nested/from_stdin.py"))
        .unwrap();
    assert_eq!(with_name.path, tree.path("nested"));

    let without_name = session.locate_root(&["-"], None).unwrap();
    assert_eq!(without_name.path, tree.root());
}

#[test]
fn test_empty_sources_terminate() {
    let tree = ProjectTree::new();
    tree.dir(".git");

    let session = Session::with_base(tree.root());
    let root = session.locate_root::<&str>(&[], None).unwrap();
    assert_eq!(root.path, tree.root());
}

#[test]
fn test_same_inputs_share_one_result() {
    let tree = ProjectTree::new();
    tree.dir(".git");

    let session = Session::with_base(tree.root());
    let first = session.locate_root(&["a.py"], None).unwrap();
    std::fs::remove_dir(tree.path(".git")).unwrap();
    let second = session.locate_root(&["a.py"], None).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_malformed_project_file_is_an_error() {
    let tree = ProjectTree::new();
    tree.file("pyproject.toml", "[tool.black\nline-length = 88\n");

    let session = Session::with_base(tree.root());
    let err = session.locate_root(&["."], None).unwrap_err();
    match err {
        Error::InvalidDocument { path, .. } => assert_eq!(path, tree.path("pyproject.toml")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[cfg(unix)]
#[test]
fn test_symlinked_source_uses_target_location() {
    use std::os::unix::fs::symlink;

    let tree = ProjectTree::new();
    tree.black_project("real", "");
    tree.file("real/mod.py", "");
    tree.dir("other/.git");
    symlink(tree.path("real"), tree.path("other/link")).unwrap();

    let session = Session::with_base(tree.path("other"));
    let root = session.locate_root(&["link/mod.py"], None).unwrap();
    assert_eq!(root.path, tree.path("real"));
    assert_eq!(root.reason, DiscoveryReason::ProjectFile);
}

#[test]
fn test_no_marker_reaches_filesystem_root() {
    // The temp directory's ancestors may hold markers of their own, so only
    // the shape of the answer is checked.
    let tree = ProjectTree::new();
    tree.file("loose.py", "");

    let session = Session::with_base(tree.root());
    let root = session.locate_root(&["loose.py"], None).unwrap();
    assert!(tree.root().starts_with(&root.path));
    if root.reason == DiscoveryReason::FilesystemRoot {
        assert!(root.path.parent().is_none());
    }
}
