//! Inferring target versions from a `requires-python` value.

use log::debug;

use crate::error::Result;
use crate::version::pep440::Version;
use crate::version::specifier::{Specifier, SpecifierSet};
use crate::version::target::{TargetVersion, TargetVersionSet};

/// A parsed `requires-python` value.
///
/// A bare version is tried first; only strings that are not a valid
/// version are read as a specifier set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionRange {
    /// A single version such as `3.9` or `3.11.0rc1`.
    Exact(Version),
    /// Comma-joined clauses such as `>=3.8,<3.12`.
    Specifiers(SpecifierSet),
}

impl VersionRange {
    /// Parse a `requires-python` value.
    ///
    /// # Errors
    ///
    /// Returns the specifier error when the input is neither a version nor a
    /// valid specifier set.
    pub fn parse(input: &str) -> Result<Self> {
        if let Ok(version) = Version::parse(input) {
            return Ok(Self::Exact(version));
        }
        SpecifierSet::parse(input).map(Self::Specifiers)
    }

    /// Supported targets admitted by this range, ascending.
    ///
    /// Returns `None` when nothing matches.
    ///
    /// # Errors
    ///
    /// Fails when a specifier set cannot be narrowed to minor granularity.
    pub fn target_versions(&self) -> Result<Option<TargetVersionSet>> {
        match self {
            Self::Exact(version) => Ok(exact_target(version).map(|t| TargetVersionSet::from([t]))),
            Self::Specifiers(set) => specifier_targets(set),
        }
    }
}

fn exact_target(version: &Version) -> Option<TargetVersion> {
    if version.major() != 3 {
        return None;
    }
    version.minor().and_then(TargetVersion::from_minor)
}

fn specifier_targets(set: &SpecifierSet) -> Result<Option<TargetVersionSet>> {
    let stripped = set.strip_to_minor()?;
    if stripped.is_empty() {
        return Ok(None);
    }

    let targets: TargetVersionSet = TargetVersion::ALL
        .into_iter()
        .filter(|target| stripped.contains(&target.as_version()))
        .collect();

    if targets.is_empty() {
        for (target, clause) in rejections(set, &stripped) {
            debug!("{} rejected by `{}`", target.pretty(), clause);
        }
        return Ok(None);
    }
    Ok(Some(targets))
}

/// For each supported target, the first clause as written that excludes it.
///
/// Matching happens against the narrowed clauses, but a narrowed `~=` prints
/// like a wider one, so the written clause is reported instead.
fn rejections<'a>(
    written: &'a SpecifierSet,
    narrowed: &SpecifierSet,
) -> Vec<(TargetVersion, &'a Specifier)> {
    TargetVersion::ALL
        .into_iter()
        .filter_map(|target| {
            let version = target.as_version();
            written
                .clauses()
                .iter()
                .zip(narrowed.clauses())
                .find(|(_, clause)| !clause.contains(&version))
                .map(|(original, _)| (target, original))
        })
        .collect()
}

/// Infer the target versions a project supports from its `requires-python`.
///
/// Malformed input means "no inference" and is only logged at debug level.
///
/// # Examples
///
/// ```
/// use projroot::version::{infer_target_versions, TargetVersion};
///
/// let targets = infer_target_versions(">=3.7,<3.10").unwrap();
/// assert_eq!(
///     targets.into_iter().collect::<Vec<_>>(),
///     vec![TargetVersion::Py37, TargetVersion::Py38, TargetVersion::Py39],
/// );
/// assert!(infer_target_versions("2.7").is_none());
/// ```
#[must_use]
pub fn infer_target_versions(requires_python: &str) -> Option<TargetVersionSet> {
    let outcome = VersionRange::parse(requires_python).and_then(|range| range.target_versions());
    match outcome {
        Ok(Some(targets)) => {
            debug!(
                "inferred targets {:?} from requires-python `{}`",
                targets.iter().map(|t| t.name()).collect::<Vec<_>>(),
                requires_python
            );
            Some(targets)
        }
        Ok(None) => {
            debug!("requires-python `{requires_python}` admits no supported target");
            None
        }
        Err(e) => {
            debug!("ignoring requires-python `{requires_python}`: {e}");
            None
        }
    }
}
