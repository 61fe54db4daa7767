//! Path canonicalization functions.
//!
//! The longest existing prefix of a path is canonicalized and the rest is
//! folded lexically, so paths that do not exist (or that run through a
//! regular file) still resolve.

use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};
use crate::path::normalize::resolve_components;

/// Canonicalize the existing portion of an absolute path.
///
/// Returns the canonicalized longest existing prefix and the remaining,
/// non-existent components (if any).
///
/// # Errors
///
/// Returns an error if canonicalizing a prefix fails for any reason other
/// than the prefix not existing (including a prefix that runs through a
/// regular file), or if not even the root exists.
///
/// # Examples
///
/// ```no_run
/// use projroot::path::canonicalize::canonicalize_existing;
/// use std::path::{Path, PathBuf};
///
/// // For a path where /tmp exists but /tmp/nonexistent/file does not:
/// let (canonical, remainder) =
///     canonicalize_existing(Path::new("/tmp/nonexistent/file")).unwrap();
/// assert_eq!(remainder, Some(PathBuf::from("nonexistent/file")));
/// ```
pub fn canonicalize_existing(path: &Path) -> Result<(PathBuf, Option<PathBuf>)> {
    let components: Vec<Component<'_>> = path.components().collect();

    // Longest prefix first; the last candidate is the bare root.
    for split in (1..=components.len()).rev() {
        let prefix: PathBuf = components[..split].iter().collect();
        match fs::canonicalize(&prefix) {
            Ok(canonical) => {
                let remainder = if split == components.len() {
                    None
                } else {
                    Some(components[split..].iter().collect())
                };
                return Ok((canonical, remainder));
            }
            Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {}
            Err(e) => return Err(Error::from_io(&prefix, e)),
        }
    }

    Err(Error::InvalidPath {
        path: path.to_path_buf(),
        reason: "Cannot find any existing portion of path".to_string(),
    })
}

/// Resolve an absolute path the way a non-strict `realpath` does.
///
/// Symlinks in the existing prefix are followed. Components past the first
/// missing one are appended with `.` and `..` folded lexically. The result is
/// always absolute.
///
/// # Errors
///
/// Propagates permission and other I/O errors unchanged; a missing path is
/// not an error.
///
/// # Examples
///
/// ```no_run
/// use projroot::path::canonicalize::resolve_lenient;
/// use std::path::Path;
///
/// let resolved = resolve_lenient(Path::new("/tmp/not-there/../also-not")).unwrap();
/// assert!(resolved.ends_with("also-not"));
/// ```
pub fn resolve_lenient(path: &Path) -> Result<PathBuf> {
    let (canonical, remainder) = canonicalize_existing(path)?;
    Ok(match remainder {
        None => canonical,
        Some(rest) => resolve_components(&canonical.join(rest)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_canonicalize_existing_full_path_exists() {
        let dir = tempdir().unwrap();
        let path = dir.path();

        let (canonical, remainder) = canonicalize_existing(path).unwrap();
        assert_eq!(canonical, fs::canonicalize(path).unwrap());
        assert!(remainder.is_none());
    }

    #[test]
    fn test_canonicalize_existing_partial() {
        let dir = tempdir().unwrap();
        let existing = dir.path();
        let full = existing.join("nonexistent").join("path");

        let (canonical, remainder) = canonicalize_existing(&full).unwrap();
        assert_eq!(canonical, fs::canonicalize(existing).unwrap());
        assert_eq!(remainder, Some(PathBuf::from("nonexistent").join("path")));
    }

    #[test]
    fn test_resolve_lenient_folds_parent_refs_in_missing_tail() {
        let dir = tempdir().unwrap();
        let full = dir.path().join("ghost").join("..").join("file.py");

        let resolved = resolve_lenient(&full).unwrap();
        assert_eq!(resolved, fs::canonicalize(dir.path()).unwrap().join("file.py"));
    }

    #[test]
    fn test_resolve_lenient_through_regular_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("mod.py"), "").unwrap();
        let full = dir.path().join("mod.py").join("extra");

        let (canonical, remainder) = canonicalize_existing(&full).unwrap();
        assert_eq!(canonical, fs::canonicalize(dir.path().join("mod.py")).unwrap());
        assert_eq!(remainder, Some(PathBuf::from("extra")));

        let resolved = resolve_lenient(&full).unwrap();
        assert_eq!(
            resolved,
            fs::canonicalize(dir.path()).unwrap().join("mod.py").join("extra")
        );
    }

    #[test]
    fn test_resolve_lenient_existing_is_canonical() {
        let dir = tempdir().unwrap();
        let resolved = resolve_lenient(dir.path()).unwrap();
        assert_eq!(resolved, fs::canonicalize(dir.path()).unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_lenient_follows_symlinked_prefix() {
        use std::os::unix::fs::symlink;

        let dir = tempdir().unwrap();
        let target = dir.path().join("target");
        let link = dir.path().join("link");

        fs::create_dir(&target).unwrap();
        symlink(&target, &link).unwrap();

        let resolved = resolve_lenient(&link.join("missing.py")).unwrap();
        assert_eq!(
            resolved,
            fs::canonicalize(&target).unwrap().join("missing.py")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_lenient_propagates_permission_denied() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let locked = dir.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::create_dir(locked.join("inner")).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Privileged users bypass permission bits; nothing to observe there.
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let result = resolve_lenient(&locked.join("inner").join("x.py"));

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        assert!(result.unwrap_err().is_permission_denied());
    }
}
