//! Project root discovery.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use log::debug;
use serde::{Serialize, Serializer};

use crate::config::{ConfigLoader, PROJECT_FILE};
use crate::error::{Error, Result};
use crate::path::PathCache;

/// Git marker; a file (worktrees, submodules) or a directory.
pub const GIT_MARKER: &str = ".git";
/// Mercurial marker; must be a directory.
pub const HG_MARKER: &str = ".hg";
/// Source path that stands for standard input.
pub const STDIN_SENTINEL: &str = "-";

/// Why a directory was chosen as the project root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiscoveryReason {
    /// The directory contains `.git`.
    GitDirectory,
    /// The directory contains a `.hg` directory.
    MercurialDirectory,
    /// The directory contains a project file with the tool's section.
    ProjectFile,
    /// No marker was found; the filesystem root was used.
    FilesystemRoot,
}

impl DiscoveryReason {
    /// Human-readable description, e.g. `.git directory`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GitDirectory => ".git directory",
            Self::MercurialDirectory => ".hg directory",
            Self::ProjectFile => "pyproject.toml",
            Self::FilesystemRoot => "file system root",
        }
    }
}

impl fmt::Display for DiscoveryReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for DiscoveryReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A discovered project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectRoot {
    /// The root directory, resolved.
    pub path: PathBuf,
    /// Which marker selected it.
    pub reason: DiscoveryReason,
}

type RootKey = (Vec<PathBuf>, Option<PathBuf>);

/// Memoized discovery results, keyed by the raw sources and stdin filename.
#[derive(Debug, Default)]
pub struct RootCache {
    entries: Mutex<HashMap<RootKey, ProjectRoot>>,
}

impl RootCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of memoized results.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing has been memoized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn get(&self, key: &RootKey) -> Option<ProjectRoot> {
        self.lock().get(key).cloned()
    }

    fn insert(&self, key: RootKey, root: ProjectRoot) {
        self.lock().entry(key).or_insert(root);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<RootKey, ProjectRoot>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Directories that could be the root for `resolved`: every strict ancestor,
/// plus `resolved` itself when it is a directory.
#[must_use]
pub fn candidate_roots(resolved: &Path) -> Vec<PathBuf> {
    let mut candidates: Vec<PathBuf> = resolved
        .ancestors()
        .skip(1)
        .map(Path::to_path_buf)
        .collect();
    if resolved.is_dir() {
        candidates.insert(0, resolved.to_path_buf());
    }
    candidates
}

/// Finds the project root for a set of source paths.
///
/// # Examples
///
/// ```no_run
/// use projroot::config::{ConfigLoader, DocumentCache};
/// use projroot::path::PathCache;
/// use projroot::project::{RootCache, RootLocator};
///
/// let paths = PathCache::new().unwrap();
/// let documents = DocumentCache::new();
/// let memo = RootCache::new();
/// let locator = RootLocator::new(&paths, ConfigLoader::new(&paths, &documents, "black"), &memo);
///
/// let root = locator.locate(&["src/app.py"], None).unwrap();
/// println!("{} ({})", root.path.display(), root.reason);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RootLocator<'a> {
    paths: &'a PathCache,
    config: ConfigLoader<'a>,
    memo: &'a RootCache,
}

impl<'a> RootLocator<'a> {
    /// Create a locator over the given caches.
    #[must_use]
    pub fn new(paths: &'a PathCache, config: ConfigLoader<'a>, memo: &'a RootCache) -> Self {
        Self {
            paths,
            config,
            memo,
        }
    }

    /// Locate the project root for `sources`.
    ///
    /// `-` in `sources` is replaced by `stdin_filename` when one is given.
    /// With no sources the cache's base directory is used.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors from marker checks and document errors from a
    /// malformed project file met on the way up.
    pub fn locate<S: AsRef<Path>>(
        &self,
        sources: &[S],
        stdin_filename: Option<&str>,
    ) -> Result<ProjectRoot> {
        let raw: Vec<PathBuf> = sources.iter().map(|s| s.as_ref().to_path_buf()).collect();
        let key = (raw, stdin_filename.map(PathBuf::from));
        if let Some(hit) = self.memo.get(&key) {
            return Ok(hit);
        }

        let base = self.common_base(&key.0, stdin_filename)?;
        let root = self.walk(&base)?;
        debug!(
            "project root {} ({}) from common base {}",
            root.path.display(),
            root.reason,
            base.display()
        );
        self.memo.insert(key, root.clone());
        Ok(root)
    }

    /// The deepest directory that is a candidate root for every source.
    ///
    /// Falls back to the filesystem root of the first source when the
    /// sources share no ancestor.
    ///
    /// # Errors
    ///
    /// Propagates path resolution errors.
    pub fn common_base(&self, sources: &[PathBuf], stdin_filename: Option<&str>) -> Result<PathBuf> {
        let substituted: Vec<PathBuf> = sources
            .iter()
            .map(|src| match stdin_filename {
                Some(name) if src.as_os_str() == STDIN_SENTINEL => PathBuf::from(name),
                _ => src.clone(),
            })
            .collect();

        let resolved = if substituted.is_empty() {
            vec![self.paths.resolve(self.paths.base())?]
        } else {
            substituted
                .iter()
                .map(|src| self.paths.resolve(src))
                .collect::<Result<Vec<_>>>()?
        };

        let mut per_source = resolved.iter().map(|p| candidate_roots(p));
        let mut common: HashSet<PathBuf> = per_source
            .next()
            .map(|first| first.into_iter().collect())
            .unwrap_or_default();
        for candidates in per_source {
            let candidates: HashSet<PathBuf> = candidates.into_iter().collect();
            common.retain(|dir| candidates.contains(dir));
        }

        let deepest = common
            .into_iter()
            .max_by_key(|dir| dir.components().count());
        Ok(deepest.unwrap_or_else(|| filesystem_root(&resolved[0])))
    }

    /// Walk from `base` upwards and return the first directory with a marker.
    ///
    /// # Errors
    ///
    /// See [`RootLocator::locate`].
    pub fn walk(&self, base: &Path) -> Result<ProjectRoot> {
        for directory in base.ancestors() {
            if let Some(reason) = self.marker_at(directory)? {
                return Ok(ProjectRoot {
                    path: directory.to_path_buf(),
                    reason,
                });
            }
        }
        Ok(ProjectRoot {
            path: filesystem_root(base),
            reason: DiscoveryReason::FilesystemRoot,
        })
    }

    fn marker_at(&self, directory: &Path) -> Result<Option<DiscoveryReason>> {
        if probe(&directory.join(GIT_MARKER))?.is_some() {
            return Ok(Some(DiscoveryReason::GitDirectory));
        }
        if probe(&directory.join(HG_MARKER))?.is_some_and(|m| m.is_dir()) {
            return Ok(Some(DiscoveryReason::MercurialDirectory));
        }
        let project_file = directory.join(PROJECT_FILE);
        if probe(&project_file)?.is_some_and(|m| m.is_file()) {
            if self.config.has_tool_section(&project_file)? {
                return Ok(Some(DiscoveryReason::ProjectFile));
            }
            debug!(
                "{} has no [tool.{}] section, continuing upwards",
                project_file.display(),
                self.config.tool()
            );
        }
        Ok(None)
    }
}

/// Metadata for `path`, following symlinks; `None` when nothing is there.
fn probe(path: &Path) -> Result<Option<fs::Metadata>> {
    match fs::metadata(path) {
        Ok(meta) => Ok(Some(meta)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        // Under a regular file nothing can exist.
        Err(_) if path.parent().is_some_and(|p| p.is_file()) => Ok(None),
        Err(e) => Err(Error::from_io(path, e)),
    }
}

fn filesystem_root(path: &Path) -> PathBuf {
    path.ancestors()
        .last()
        .map_or_else(|| path.to_path_buf(), Path::to_path_buf)
}
