//! Memoized path resolution.

use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::error::{Error, Result};
use crate::path::canonicalize::resolve_lenient;
use crate::path::normalize::absolutize;

/// Memoizes symlink-following absolute-path resolution, keyed by raw path.
///
/// Relative inputs are resolved against the cache's base directory, which is
/// fixed when the cache is built. Entries are never invalidated: the
/// filesystem is assumed stable for the lifetime of the cache.
///
/// # Examples
///
/// ```no_run
/// use projroot::path::PathCache;
/// use std::path::Path;
///
/// let cache = PathCache::new().unwrap();
/// let first = cache.resolve(Path::new("src")).unwrap();
/// let second = cache.resolve(Path::new("src")).unwrap();
/// assert_eq!(first, second);
/// assert_eq!(cache.len(), 1);
/// ```
#[derive(Debug)]
pub struct PathCache {
    base: PathBuf,
    entries: Mutex<HashMap<PathBuf, PathBuf>>,
}

impl PathCache {
    /// Create a cache rooted at the current working directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory cannot be determined.
    pub fn new() -> Result<Self> {
        let base = env::current_dir().map_err(|e| Error::from_io(Path::new("."), e))?;
        Ok(Self::with_base(base))
    }

    /// Create a cache that resolves relative paths against `base`.
    #[must_use]
    pub fn with_base(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// The directory relative paths are resolved against.
    #[must_use]
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Resolve `path` to an absolute, symlink-free path.
    ///
    /// Missing trailing components are allowed and kept lexically.
    ///
    /// # Errors
    ///
    /// Propagates filesystem errors (e.g. permission denied) unchanged.
    /// Failed resolutions are not cached.
    pub fn resolve(&self, path: &Path) -> Result<PathBuf> {
        if let Some(hit) = self.lock().get(path) {
            return Ok(hit.clone());
        }

        // Resolve outside the lock; a racing thread computes the same value.
        let resolved = resolve_lenient(&absolutize(path, &self.base))?;
        self.lock()
            .entry(path.to_path_buf())
            .or_insert_with(|| resolved.clone());
        Ok(resolved)
    }

    /// Number of cached entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing has been resolved yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<PathBuf, PathBuf>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
