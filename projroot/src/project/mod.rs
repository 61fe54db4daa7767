//! Project root discovery.
//!
//! The root is found in two steps:
//!
//! 1. The common base of all sources: the deepest directory that is an
//!    ancestor of every source (a directory source counts as its own
//!    ancestor, a file does not)
//! 2. A walk from the common base up to the filesystem root, stopping at the
//!    first directory holding a marker
//!
//! Markers are checked per directory in this order:
//!
//! | Marker           | Condition                                 |
//! |------------------|-------------------------------------------|
//! | `.git`           | exists (file or directory)                |
//! | `.hg`            | is a directory                            |
//! | `pyproject.toml` | is a file with a `[tool.<name>]` section  |
//!
//! When no directory has a marker the filesystem root is returned.

pub mod root;

pub use root::{
    candidate_roots, DiscoveryReason, ProjectRoot, RootCache, RootLocator, GIT_MARKER, HG_MARKER,
    STDIN_SENTINEL,
};
