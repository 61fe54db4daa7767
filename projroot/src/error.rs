//! Error types for the projroot library.
//!
//! This module provides the error hierarchy for root discovery, configuration
//! loading, version inference and ignore-file handling, using `thiserror` for
//! ergonomic error handling.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a projroot error.
///
/// # Examples
///
/// ```
/// use projroot::{Error, Result};
///
/// fn example_operation() -> Result<usize> {
///     Ok(88)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the projroot library.
///
/// Absence of optional inputs (an ignore file, a tool section, version
/// metadata, a root marker) is never an error. The variants below cover
/// malformed input and environment failures only.
#[derive(Debug, Error)]
pub enum Error {
    /// An invalid filesystem path was provided.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The invalid path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// A path does not exist.
    #[error("path not found: {}", path.display())]
    PathNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// Permission denied accessing a path.
    #[error("permission denied: {}", path.display())]
    PermissionDenied {
        /// The path that could not be accessed.
        path: PathBuf,
    },

    /// An I/O error occurred on a path.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// The path being accessed.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A configuration file explicitly asked for does not exist.
    #[error("configuration file not found: {}", path.display())]
    ConfigNotFound {
        /// The configuration file path.
        path: PathBuf,
    },

    /// A structured project file could not be parsed.
    #[error("could not parse {}: {message}", path.display())]
    InvalidDocument {
        /// The offending file.
        path: PathBuf,
        /// The parser message.
        message: String,
    },

    /// A version string is not a valid version.
    #[error("invalid version '{input}': {reason}")]
    InvalidVersion {
        /// The rejected input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A version specifier string is not valid.
    #[error("invalid specifier '{input}': {reason}")]
    InvalidSpecifier {
        /// The rejected input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// An unknown target version name was given.
    #[error("unknown target version '{name}'")]
    InvalidTargetVersion {
        /// The unrecognised name.
        name: String,
    },

    /// An ignore file contains a pattern that cannot be compiled.
    #[error("could not parse {} (line {line}): {message}", path.display())]
    InvalidIgnoreFile {
        /// The offending ignore file.
        path: PathBuf,
        /// One-based line number of the bad pattern.
        line: usize,
        /// The compiler message.
        message: String,
    },

    /// The home directory is needed but cannot be determined.
    #[error("cannot determine home directory")]
    HomeDirectoryUnknown,
}

impl Error {
    /// Check if error indicates a path does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use projroot::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::PathNotFound { path: PathBuf::from("/nonexistent") };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::PathNotFound { .. } | Self::ConfigNotFound { .. } => true,
            Self::Io { source, .. } => source.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }

    /// Check if error is permission-related.
    ///
    /// # Examples
    ///
    /// ```
    /// use projroot::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::PermissionDenied { path: PathBuf::from("/restricted") };
    /// assert!(err.is_permission_denied());
    /// ```
    #[must_use]
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied { .. })
    }

    /// Check if error came from parsing a version or specifier string.
    ///
    /// These are the failures that version inference downgrades to
    /// "nothing inferred".
    #[must_use]
    pub fn is_version_syntax(&self) -> bool {
        matches!(
            self,
            Self::InvalidVersion { .. } | Self::InvalidSpecifier { .. }
        )
    }

    /// Map an I/O error on `path`, keeping "not found" and "permission denied"
    /// distinguishable.
    pub(crate) fn from_io(path: &std::path::Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::PathNotFound {
                path: path.to_path_buf(),
            },
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => Self::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }
}
