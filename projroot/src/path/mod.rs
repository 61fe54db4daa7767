//! Path handling for root discovery.
//!
//! # Key Concepts
//!
//! ## Normalization
//!
//! Lexical clean-up that never touches the filesystem: tilde expansion,
//! joining relative paths onto a base, folding `.` and `..`.
//!
//! ## Canonicalization
//!
//! Follows symlinks to the real path. Missing paths are still resolvable:
//! the longest existing prefix is canonicalized and the rest is kept.
//!
//! ## Caching
//!
//! [`PathCache`] memoizes resolution per raw input for one run, since root
//! discovery and relative-path computation resolve the same inputs again and
//! again.
//!
//! # Examples
//!
//! ```no_run
//! use projroot::path::{relative_to_root, PathCache};
//! use std::path::Path;
//!
//! let cache = PathCache::new().unwrap();
//! let root = cache.resolve(Path::new(".")).unwrap();
//! let rel = relative_to_root(&cache, &root, Path::new("src/main.py")).unwrap();
//! assert_eq!(rel.as_deref(), Some(Path::new("src/main.py")));
//! ```

pub mod cache;
pub mod canonicalize;
pub mod normalize;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

use std::path::{Path, PathBuf};

use crate::error::Result;

pub use cache::PathCache;

/// Resolve `source` and express it relative to `root`.
///
/// `root` must already be resolved. Returns `None` when the resolved source
/// lies outside the root (for example through a symlink pointing elsewhere).
///
/// # Errors
///
/// Propagates resolution errors from the cache.
pub fn relative_to_root(cache: &PathCache, root: &Path, source: &Path) -> Result<Option<PathBuf>> {
    let resolved = cache.resolve(source)?;
    Ok(resolved.strip_prefix(root).ok().map(Path::to_path_buf))
}
