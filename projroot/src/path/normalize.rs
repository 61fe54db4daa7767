//! Lexical path normalization.
//!
//! Nothing in this module touches the filesystem. It handles:
//! - Expanding tilde (~) against a given home directory
//! - Joining relative paths onto a base directory
//! - Folding `.` and `..` components

use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Expand a leading tilde (~) against `home`.
///
/// Handles `~` and `~/path`. Paths without a leading tilde are returned
/// unchanged, and so is `~user` syntax, which is left to the caller to reject
/// or accept literally.
///
/// # Errors
///
/// Returns [`Error::HomeDirectoryUnknown`] if the path starts with `~` and
/// `home` is `None`.
///
/// # Examples
///
/// ```
/// use projroot::path::normalize::expand_tilde_with;
/// use std::path::{Path, PathBuf};
///
/// let home = Path::new("/home/dev");
/// assert_eq!(
///     expand_tilde_with(Path::new("~/.config"), Some(home)).unwrap(),
///     PathBuf::from("/home/dev/.config")
/// );
/// assert_eq!(
///     expand_tilde_with(Path::new("/etc"), None).unwrap(),
///     PathBuf::from("/etc")
/// );
/// ```
pub fn expand_tilde_with(path: &Path, home: Option<&Path>) -> Result<PathBuf> {
    let mut components = path.components();
    match components.next() {
        Some(Component::Normal(first)) if first == "~" => {
            let home = home.ok_or(Error::HomeDirectoryUnknown)?;
            let rest = components.as_path();
            if rest.as_os_str().is_empty() {
                Ok(home.to_path_buf())
            } else {
                Ok(home.join(rest))
            }
        }
        _ => Ok(path.to_path_buf()),
    }
}

/// Make `path` absolute by joining it onto `base` when it is relative.
///
/// # Examples
///
/// ```
/// use projroot::path::normalize::absolutize;
/// use std::path::{Path, PathBuf};
///
/// let base = Path::new("/work");
/// assert_eq!(absolutize(Path::new("src/a.py"), base), PathBuf::from("/work/src/a.py"));
/// assert_eq!(absolutize(Path::new("/abs"), base), PathBuf::from("/abs"));
/// ```
#[must_use]
pub fn absolutize(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Fold `.` and `..` components without consulting the filesystem.
///
/// `..` above the root stays at the root, matching POSIX path resolution.
///
/// # Examples
///
/// ```
/// use projroot::path::normalize::resolve_components;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(resolve_components(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
/// assert_eq!(resolve_components(Path::new("/a/../../c")), PathBuf::from("/c"));
/// ```
#[must_use]
pub fn resolve_components(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    // Number of Normal components currently in `result`.
    let mut depth = 0usize;

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {
                result.push(component);
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if depth > 0 {
                    result.pop();
                    depth -= 1;
                } else if !result.has_root() {
                    // Relative path climbing past its start keeps the `..`.
                    result.push(component);
                }
            }
            Component::Normal(c) => {
                result.push(c);
                depth += 1;
            }
        }
    }

    result
}
