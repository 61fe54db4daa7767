//! Version ranges and target-version inference.
//!
//! A project's `requires-python` value is either a single version or a set
//! of comparison clauses. [`infer_target_versions`] turns either form into
//! the ascending set of supported Python 3 minor versions it admits.
//!
//! Clauses are first narrowed to `major.minor` granularity, so `>3.7.4`
//! still admits 3.7 and `~=3.8.5` admits exactly 3.8. Each supported minor
//! version is then checked against every clause.
//!
//! # Examples
//!
//! ```
//! use projroot::version::{infer_target_versions, TargetVersion};
//!
//! let targets = infer_target_versions("~=3.8.5").unwrap();
//! assert_eq!(targets.into_iter().collect::<Vec<_>>(), vec![TargetVersion::Py38]);
//! ```

pub mod inference;
pub mod pep440;
pub mod specifier;
pub mod target;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use inference::{infer_target_versions, VersionRange};
pub use pep440::{PreRelease, Version};
pub use specifier::{Operator, Specifier, SpecifierSet};
pub use target::{TargetVersion, TargetVersionSet};
