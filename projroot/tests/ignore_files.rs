//! Integration tests for `.gitignore` loading at a discovered root.

mod common;

use common::ProjectTree;
use projroot::path::relative_to_root;
use projroot::{Error, Session};
use std::path::Path;

#[test]
fn test_gitignore_at_discovered_root() {
    let tree = ProjectTree::new();
    tree.dir(".git");
    tree.file(".gitignore", "build/\n*.egg-info/\n# generated\n/docs/_build\n");
    tree.file("src/build.py", "");
    tree.file("build/output.txt", "");

    let session = Session::with_base(tree.root());
    let root = session.locate_root(&["src"], None).unwrap();
    let spec = session.load_ignore(&root.path).unwrap();

    assert!(spec.matches(Path::new("build/output.txt"), false));
    assert!(!spec.matches(Path::new("src/build.py"), false));
    assert!(spec.matches(Path::new("pkg.egg-info/PKG-INFO"), false));
    assert!(spec.matches(Path::new("docs/_build/index.html"), false));
    assert!(!spec.matches(Path::new("pkg/docs/_build/index.html"), false));
}

#[test]
fn test_relative_paths_feed_matching() {
    let tree = ProjectTree::new();
    tree.dir(".git");
    tree.file(".gitignore", "*.pyc\n");
    tree.file("pkg/mod.pyc", "");

    let session = Session::with_base(tree.path("pkg"));
    let root = session.locate_root(&["mod.pyc"], None).unwrap();
    let spec = session.load_ignore(&root.path).unwrap();
    let rel = relative_to_root(session.paths(), &root.path, Path::new("mod.pyc"))
        .unwrap()
        .unwrap();

    assert_eq!(rel, Path::new("pkg/mod.pyc"));
    assert!(spec.matches(&rel, false));
    assert!(spec.matches(&tree.path("pkg/mod.pyc"), false));
}

#[test]
fn test_missing_gitignore_is_empty() {
    let tree = ProjectTree::new();
    let session = Session::with_base(tree.root());
    let spec = session.load_ignore(tree.root()).unwrap();
    assert!(spec.is_empty());
    assert!(!spec.matches(Path::new("anything.py"), false));
}

#[test]
fn test_invalid_gitignore_is_a_hard_error() {
    let tree = ProjectTree::new();
    tree.file(".gitignore", "venv/\n\nsrc/[z-a]*.py\n");

    let session = Session::with_base(tree.root());
    let err = session.load_ignore(tree.root()).unwrap_err();
    match err {
        Error::InvalidIgnoreFile { path, line, .. } => {
            assert_eq!(path, tree.path(".gitignore"));
            assert_eq!(line, 3);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
