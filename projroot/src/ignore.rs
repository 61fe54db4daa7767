//! `.gitignore` loading and matching.
//!
//! Patterns follow git's wildmatch rules through the `ignore` crate. A path
//! is ignored when it, or any directory above it, matches; so `build/`
//! ignores `build/output.txt` but not `src/build.py`.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use log::{debug, error};

use crate::error::{Error, Result};
use crate::path::PathCache;

/// File name of the ignore file read at the project root.
pub const IGNORE_FILE: &str = ".gitignore";

/// A compiled set of ignore patterns for one root.
///
/// # Examples
///
/// ```
/// use projroot::ignore::IgnoreSpec;
/// use std::path::Path;
///
/// let spec = IgnoreSpec::from_lines("/project", ["build/", "*.pyc"]).unwrap();
/// assert!(spec.matches(Path::new("build/output.txt"), false));
/// assert!(spec.matches(Path::new("pkg/mod.pyc"), false));
/// assert!(!spec.matches(Path::new("src/build.py"), false));
/// ```
#[derive(Debug, Clone)]
pub struct IgnoreSpec {
    root: PathBuf,
    matcher: Gitignore,
}

impl IgnoreSpec {
    /// A spec that matches nothing.
    #[must_use]
    pub fn empty(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            matcher: Gitignore::empty(),
        }
    }

    /// Compile patterns given as lines of an ignore file.
    ///
    /// Blank lines and `#` comments are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIgnoreFile`] for the first line that cannot be
    /// compiled, naming `<root>/.gitignore`.
    pub fn from_lines<'l>(
        root: impl Into<PathBuf>,
        lines: impl IntoIterator<Item = &'l str>,
    ) -> Result<Self> {
        let root = root.into();
        let file = root.join(IGNORE_FILE);
        let mut builder = GitignoreBuilder::new(&root);
        for (index, line) in lines.into_iter().enumerate() {
            builder
                .add_line(Some(file.clone()), line)
                .map_err(|e| Error::InvalidIgnoreFile {
                    path: file.clone(),
                    line: index + 1,
                    message: e.to_string(),
                })?;
        }
        let matcher = builder.build().map_err(|e| Error::InvalidIgnoreFile {
            path: file.clone(),
            line: 0,
            message: e.to_string(),
        })?;
        Ok(Self { root, matcher })
    }

    /// The directory patterns are relative to.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of compiled patterns, including negations.
    #[must_use]
    pub fn len(&self) -> usize {
        usize::try_from(self.matcher.num_ignores() + self.matcher.num_whitelists())
            .unwrap_or(usize::MAX)
    }

    /// Whether there are no patterns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `path` is ignored.
    ///
    /// `path` is relative to the root; an absolute path is accepted when it
    /// lies under the root and never matches otherwise.
    #[must_use]
    pub fn matches(&self, path: &Path, is_dir: bool) -> bool {
        let relative = if path.is_absolute() {
            match path.strip_prefix(&self.root) {
                Ok(rel) => rel,
                Err(_) => return false,
            }
        } else {
            path
        };
        if relative.as_os_str().is_empty() {
            return false;
        }
        self.matcher
            .matched_path_or_any_parents(relative, is_dir)
            .is_ignore()
    }
}

/// Compiled ignore specs, keyed by resolved root.
#[derive(Debug, Default)]
pub struct IgnoreCache {
    entries: Mutex<HashMap<PathBuf, Arc<IgnoreSpec>>>,
}

impl IgnoreCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached specs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing has been loaded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<PathBuf, Arc<IgnoreSpec>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Loads `.gitignore` files at project roots through the session caches.
#[derive(Debug, Clone, Copy)]
pub struct IgnoreLoader<'a> {
    paths: &'a PathCache,
    cache: &'a IgnoreCache,
}

impl<'a> IgnoreLoader<'a> {
    /// Create a loader over the given caches.
    #[must_use]
    pub fn new(paths: &'a PathCache, cache: &'a IgnoreCache) -> Self {
        Self { paths, cache }
    }

    /// The ignore spec for `root`; empty when there is no `.gitignore`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIgnoreFile`] when a line cannot be compiled
    /// (after logging it) and propagates read errors other than "not found".
    pub fn load(&self, root: &Path) -> Result<Arc<IgnoreSpec>> {
        let root = self.paths.resolve(root)?;
        if let Some(hit) = self.cache.lock().get(&root) {
            return Ok(Arc::clone(hit));
        }

        let spec = Arc::new(read_ignore_file(&root)?);
        let mut entries = self.cache.lock();
        let entry = entries.entry(root).or_insert_with(|| Arc::clone(&spec));
        Ok(Arc::clone(entry))
    }
}

/// Read and compile `<root>/.gitignore` without caching.
///
/// # Errors
///
/// See [`IgnoreLoader::load`].
pub fn read_ignore_file(root: &Path) -> Result<IgnoreSpec> {
    let file = root.join(IGNORE_FILE);
    let contents = match fs::read_to_string(&file) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("no {} at {}", IGNORE_FILE, root.display());
            return Ok(IgnoreSpec::empty(root));
        }
        Err(e) => return Err(Error::from_io(&file, e)),
    };

    IgnoreSpec::from_lines(root, contents.lines()).inspect_err(|e| {
        error!("{e}");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn spec(lines: &[&str]) -> IgnoreSpec {
        IgnoreSpec::from_lines("/project", lines.iter().copied()).unwrap()
    }

    #[test]
    fn test_directory_pattern_matches_contents() {
        let spec = spec(&["build/"]);
        assert!(spec.matches(Path::new("build"), true));
        assert!(spec.matches(Path::new("build/output.txt"), false));
        assert!(spec.matches(Path::new("pkg/build/deep/file.py"), false));
        assert!(!spec.matches(Path::new("src/build.py"), false));
        assert!(!spec.matches(Path::new("build"), false));
    }

    #[test]
    fn test_anchored_pattern() {
        let spec = spec(&["/dist"]);
        assert!(spec.matches(Path::new("dist/a.whl"), false));
        assert!(!spec.matches(Path::new("pkg/dist/a.whl"), false));
    }

    #[test]
    fn test_negation() {
        let spec = spec(&["*.log", "!keep.log"]);
        assert!(spec.matches(Path::new("debug.log"), false));
        assert!(!spec.matches(Path::new("keep.log"), false));
    }

    #[test]
    fn test_double_star() {
        let spec = spec(&["**/__pycache__/"]);
        assert!(spec.matches(Path::new("a/b/__pycache__/x.pyc"), false));
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let spec = spec(&["# comment", "", "   ", "*.tmp"]);
        assert_eq!(spec.len(), 1);
        assert!(spec.matches(Path::new("x.tmp"), false));
    }

    #[test]
    fn test_absolute_paths() {
        let spec = spec(&["build/"]);
        assert!(spec.matches(Path::new("/project/build/out.o"), false));
        assert!(!spec.matches(Path::new("/elsewhere/build/out.o"), false));
        assert!(!spec.matches(Path::new("/project"), true));
    }

    #[test]
    fn test_empty_spec_matches_nothing() {
        let spec = IgnoreSpec::empty("/project");
        assert!(spec.is_empty());
        assert!(!spec.matches(Path::new("anything"), false));
    }

    #[test]
    fn test_invalid_line_reports_line_number() {
        let err = IgnoreSpec::from_lines("/project", ["ok", "# fine", "bad[z-a].py"]).unwrap_err();
        match err {
            Error::InvalidIgnoreFile { path, line, .. } => {
                assert_eq!(path, Path::new("/project").join(".gitignore"));
                assert_eq!(line, 3);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let spec = read_ignore_file(dir.path()).unwrap();
        assert!(spec.is_empty());
    }

    #[test]
    fn test_loader_caches_by_resolved_root() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".gitignore"), "build/\n").unwrap();
        let paths = PathCache::with_base(dir.path());
        let cache = IgnoreCache::new();
        let loader = IgnoreLoader::new(&paths, &cache);

        let first = loader.load(Path::new(".")).unwrap();
        let second = loader.load(dir.path()).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
        assert!(first.matches(Path::new("build/x"), false));
    }

    #[test]
    fn test_loader_propagates_invalid_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".gitignore"), "*.pyc\nfoo[z-a]\n").unwrap();
        let paths = PathCache::with_base(dir.path());
        let cache = IgnoreCache::new();

        let err = IgnoreLoader::new(&paths, &cache)
            .load(dir.path())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidIgnoreFile { line: 2, .. }));
        assert!(cache.is_empty());
    }
}
