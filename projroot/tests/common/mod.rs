//! Common test utilities for integration tests.
//!
//! This module provides a project-tree fixture for testing the projroot
//! library against real directories.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary directory tree with helpers for laying out projects.
///
/// Paths handed out are canonical, so they compare equal to what the
/// library resolves.
pub struct ProjectTree {
    _dir: TempDir,
    root: PathBuf,
}

#[allow(dead_code)]
impl ProjectTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = fs::canonicalize(dir.path()).unwrap();
        Self { _dir: dir, root }
    }

    /// The canonical root of the tree.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of `rel` inside the tree.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    /// Creates a directory (and its parents).
    pub fn dir(&self, rel: &str) -> PathBuf {
        let path = self.path(rel);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Writes a file, creating parent directories.
    pub fn file(&self, rel: &str, contents: &str) -> PathBuf {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, contents).unwrap();
        path
    }

    /// Writes `<rel>/pyproject.toml` with a `[tool.black]` section.
    pub fn black_project(&self, rel: &str, body: &str) -> PathBuf {
        let file = if rel.is_empty() {
            "pyproject.toml".to_string()
        } else {
            format!("{rel}/pyproject.toml")
        };
        self.file(&file, &format!("[tool.black]\n{body}"))
    }
}
