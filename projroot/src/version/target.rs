//! Python minor versions the formatter can target.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};
use crate::version::pep440::Version;

/// A Python 3 minor version that formatted output must stay valid for.
///
/// Variants are ordered by minor version.
///
/// # Examples
///
/// ```
/// use projroot::version::TargetVersion;
///
/// let target: TargetVersion = "py39".parse().unwrap();
/// assert_eq!(target.minor(), 9);
/// assert_eq!(target.pretty(), "3.9");
/// assert_eq!("3.9".parse::<TargetVersion>().unwrap(), target);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TargetVersion {
    /// Python 3.3
    Py33,
    /// Python 3.4
    Py34,
    /// Python 3.5
    Py35,
    /// Python 3.6
    Py36,
    /// Python 3.7
    Py37,
    /// Python 3.8
    Py38,
    /// Python 3.9
    Py39,
    /// Python 3.10
    Py310,
    /// Python 3.11
    Py311,
    /// Python 3.12
    Py312,
    /// Python 3.13
    Py313,
}

/// Ordered set of target versions, ascending.
pub type TargetVersionSet = BTreeSet<TargetVersion>;

impl TargetVersion {
    /// Every supported target, ascending.
    pub const ALL: [Self; 11] = [
        Self::Py33,
        Self::Py34,
        Self::Py35,
        Self::Py36,
        Self::Py37,
        Self::Py38,
        Self::Py39,
        Self::Py310,
        Self::Py311,
        Self::Py312,
        Self::Py313,
    ];

    /// The Python 3 minor number.
    #[must_use]
    pub const fn minor(self) -> u64 {
        match self {
            Self::Py33 => 3,
            Self::Py34 => 4,
            Self::Py35 => 5,
            Self::Py36 => 6,
            Self::Py37 => 7,
            Self::Py38 => 8,
            Self::Py39 => 9,
            Self::Py310 => 10,
            Self::Py311 => 11,
            Self::Py312 => 12,
            Self::Py313 => 13,
        }
    }

    /// The target for Python `3.minor`, if supported.
    #[must_use]
    pub fn from_minor(minor: u64) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.minor() == minor)
    }

    /// Configuration name, e.g. `py310`.
    #[must_use]
    pub fn name(self) -> String {
        format!("py3{}", self.minor())
    }

    /// Dotted form, e.g. `3.10`.
    #[must_use]
    pub fn pretty(self) -> String {
        format!("3.{}", self.minor())
    }

    /// The target as a final `3.minor` release, for specifier matching.
    #[must_use]
    pub fn as_version(self) -> Version {
        Version::from_release(&[3, self.minor()])
    }
}

impl fmt::Display for TargetVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for TargetVersion {
    type Err = Error;

    /// Accepts `py38`/`PY38` and `3.8`. The minor is plain decimal with no
    /// leading zero, so `py303` and `3.010` are rejected.
    fn from_str(s: &str) -> Result<Self> {
        let lowered = s.trim().to_ascii_lowercase();
        let minor = lowered
            .strip_prefix("py3")
            .or_else(|| lowered.strip_prefix("3."))
            .filter(|m| m.bytes().all(|b| b.is_ascii_digit()))
            .filter(|m| m.len() == 1 || !m.starts_with('0'))
            .and_then(|m| m.parse::<u64>().ok());
        minor
            .and_then(Self::from_minor)
            .ok_or_else(|| Error::InvalidTargetVersion {
                name: s.to_string(),
            })
    }
}

impl Serialize for TargetVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name())
    }
}

impl<'de> Deserialize<'de> for TargetVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
