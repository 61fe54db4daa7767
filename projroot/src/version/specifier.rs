//! Version specifiers (`>=3.8`, `~=3.9.1`, `==3.*`) and comma-joined sets of
//! them.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::version::pep440::Version;

/// Comparison operator of a specifier clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `~=`
    Compatible,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `<=`
    LessEqual,
    /// `>=`
    GreaterEqual,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `===`
    Arbitrary,
}

impl Operator {
    // Longest spellings first so `===` is not read as `==`.
    const SPELLINGS: [(&'static str, Self); 8] = [
        ("===", Self::Arbitrary),
        ("~=", Self::Compatible),
        ("==", Self::Equal),
        ("!=", Self::NotEqual),
        ("<=", Self::LessEqual),
        (">=", Self::GreaterEqual),
        ("<", Self::Less),
        (">", Self::Greater),
    ];

    /// The operator as written.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Compatible => "~=",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::Arbitrary => "===",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a clause compares against.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Operand {
    Version(Version),
    /// `==X.Y.*` / `!=X.Y.*`: epoch and release prefix.
    Prefix { epoch: u64, release: Vec<u64> },
    /// `===text`: compared as a case-insensitive string.
    Text(String),
}

/// A single `operator version` clause.
///
/// # Examples
///
/// ```
/// use projroot::version::{Specifier, Version};
///
/// let spec: Specifier = ">=3.8".parse().unwrap();
/// assert!(spec.contains(&Version::parse("3.10").unwrap()));
/// assert!(!spec.contains(&Version::parse("3.7").unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Specifier {
    operator: Operator,
    operand: Operand,
    /// For `~=`: how many leading release segments a candidate must share.
    /// Normally one less than the written release length; narrowing a
    /// patch-level pin to `major.minor` keeps the original minor pin.
    compatible_prefix: usize,
}

impl Specifier {
    /// Parse a single clause such as `>= 3.8` or `==3.*`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSpecifier`] for unknown operators, malformed
    /// versions, wildcards on operators other than `==`/`!=`, local labels on
    /// ordering operators and single-segment `~=` clauses.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let fail = |reason: String| Error::InvalidSpecifier {
            input: input.to_string(),
            reason,
        };

        let (operator, rest) = Operator::SPELLINGS
            .iter()
            .find_map(|(spelling, op)| trimmed.strip_prefix(spelling).map(|rest| (*op, rest)))
            .ok_or_else(|| fail("missing or unknown operator".to_string()))?;
        let text = rest.trim();
        if text.is_empty() {
            return Err(fail("missing version".to_string()));
        }
        if text.contains(char::is_whitespace) {
            return Err(fail("whitespace inside version".to_string()));
        }

        if operator == Operator::Arbitrary {
            return Ok(Self {
                operator,
                operand: Operand::Text(text.to_string()),
                compatible_prefix: 0,
            });
        }

        if let Some(prefix) = text.strip_suffix(".*") {
            if !matches!(operator, Operator::Equal | Operator::NotEqual) {
                return Err(fail(format!("wildcard not allowed with '{operator}'")));
            }
            let version = Version::parse(prefix).map_err(|e| fail(e.to_string()))?;
            if version.is_prerelease() || version.is_postrelease() || version.has_local() {
                return Err(fail("wildcard only applies to a release prefix".to_string()));
            }
            return Ok(Self {
                operator,
                operand: Operand::Prefix {
                    epoch: version.epoch(),
                    release: version.release().to_vec(),
                },
                compatible_prefix: 0,
            });
        }

        let version = Version::parse(text).map_err(|e| fail(e.to_string()))?;
        if version.has_local() && !matches!(operator, Operator::Equal | Operator::NotEqual) {
            return Err(fail(format!("local version not allowed with '{operator}'")));
        }
        let compatible_prefix = if operator == Operator::Compatible {
            if version.release().len() < 2 {
                return Err(fail("'~=' needs at least two release segments".to_string()));
            }
            version.release().len() - 1
        } else {
            0
        };

        Ok(Self {
            operator,
            operand: Operand::Version(version),
            compatible_prefix,
        })
    }

    /// The clause operator.
    #[must_use]
    pub const fn operator(&self) -> Operator {
        self.operator
    }

    /// Whether the clause ends in `.*`.
    #[must_use]
    pub const fn is_wildcard(&self) -> bool {
        matches!(self.operand, Operand::Prefix { .. })
    }

    /// The compared version, for non-wildcard, non-`===` clauses.
    #[must_use]
    pub fn version(&self) -> Option<&Version> {
        match &self.operand {
            Operand::Version(v) => Some(v),
            _ => None,
        }
    }

    /// Whether `candidate` satisfies this clause.
    #[must_use]
    pub fn contains(&self, candidate: &Version) -> bool {
        let public = candidate.public();
        match (&self.operand, self.operator) {
            (Operand::Text(text), _) => candidate.to_string().eq_ignore_ascii_case(text),
            (Operand::Prefix { epoch, release }, op) => {
                let matched = public.epoch() == *epoch && prefix_matches(&public, release);
                if op == Operator::Equal {
                    matched
                } else {
                    !matched
                }
            }
            (Operand::Version(v), Operator::Compatible) => {
                public >= *v && prefix_matches(&public, &v.release()[..self.compatible_prefix])
            }
            (Operand::Version(v), Operator::Equal) => equal(candidate, v),
            (Operand::Version(v), Operator::NotEqual) => !equal(candidate, v),
            (Operand::Version(v), Operator::LessEqual) => public <= *v,
            (Operand::Version(v), Operator::GreaterEqual) => public >= *v,
            (Operand::Version(v), Operator::Less) => {
                // `<3.9` does not admit `3.9rc1`.
                public < *v && !(!v.is_prerelease() && public.is_prerelease() && public.same_base(v))
            }
            (Operand::Version(v), Operator::Greater) => {
                // `>3.9` does not admit `3.9.post1`.
                public > *v
                    && !(!v.is_postrelease() && public.is_postrelease() && public.same_base(v))
            }
            (Operand::Version(_), Operator::Arbitrary) => false,
        }
    }

    /// Narrow this clause to `major.minor` granularity.
    ///
    /// - `~=`, `==`, `===` and `>=` keep their operator with the version cut
    ///   to `major.minor`.
    /// - `>` with more than two release segments becomes `>=major.minor`:
    ///   anything above `X.Y.Z` is still compatible with `X.Y`.
    /// - Wildcards and every other clause are returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidVersion`] when a `===` operand is not a
    /// version, since it cannot be narrowed.
    pub fn strip_to_minor(&self) -> Result<Self> {
        match (&self.operand, self.operator) {
            (Operand::Prefix { .. }, _) => Ok(self.clone()),
            (Operand::Text(text), Operator::Arbitrary) => {
                let version = Version::parse(text)?;
                Ok(Self {
                    operator: self.operator,
                    operand: Operand::Text(minor_of(&version).to_string()),
                    compatible_prefix: 0,
                })
            }
            (
                Operand::Version(v),
                Operator::Compatible | Operator::Equal | Operator::GreaterEqual,
            ) => Ok(Self {
                operator: self.operator,
                operand: Operand::Version(minor_of(v)),
                compatible_prefix: self.compatible_prefix.min(2),
            }),
            (Operand::Version(v), Operator::Greater) if v.release().len() > 2 => Ok(Self {
                operator: Operator::GreaterEqual,
                operand: Operand::Version(minor_of(v)),
                compatible_prefix: 0,
            }),
            _ => Ok(self.clone()),
        }
    }
}

fn minor_of(version: &Version) -> Version {
    Version::from_release(&[version.major(), version.segment(1)])
}

fn prefix_matches(candidate: &Version, prefix: &[u64]) -> bool {
    prefix
        .iter()
        .enumerate()
        .all(|(i, part)| candidate.segment(i) == *part)
}

fn equal(candidate: &Version, spec: &Version) -> bool {
    // Without a local label on the clause, the candidate's local label is ignored.
    if spec.has_local() {
        candidate == spec
    } else {
        candidate.public() == *spec
    }
}

impl FromStr for Specifier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Prints the clause in PEP 440 form.
///
/// A `~=` clause narrowed by [`Specifier::strip_to_minor`] prints as
/// `~=X.Y` but still pins minor `Y`, so parsing the printed text back gives
/// a wider clause.
impl fmt::Display for Specifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.operand {
            Operand::Version(v) => write!(f, "{}{v}", self.operator),
            Operand::Text(text) => write!(f, "{}{text}", self.operator),
            Operand::Prefix { epoch, release } => {
                write!(f, "{}", self.operator)?;
                if *epoch != 0 {
                    write!(f, "{epoch}!")?;
                }
                let parts: Vec<String> = release.iter().map(u64::to_string).collect();
                write!(f, "{}.*", parts.join("."))
            }
        }
    }
}

/// A comma-joined set of clauses; a version matches when it satisfies all of
/// them.
///
/// # Examples
///
/// ```
/// use projroot::version::{SpecifierSet, Version};
///
/// let set: SpecifierSet = ">=3.7, <3.10".parse().unwrap();
/// assert!(set.contains(&Version::parse("3.9").unwrap()));
/// assert!(!set.contains(&Version::parse("3.10").unwrap()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecifierSet {
    clauses: Vec<Specifier>,
}

impl SpecifierSet {
    /// Parse a comma-joined specifier string. Empty clauses are skipped, so
    /// an empty string is an empty set.
    ///
    /// # Errors
    ///
    /// Returns the first clause error.
    pub fn parse(input: &str) -> Result<Self> {
        let clauses = input
            .split(',')
            .map(str::trim)
            .filter(|clause| !clause.is_empty())
            .map(Specifier::parse)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { clauses })
    }

    /// The clauses in written order.
    #[must_use]
    pub fn clauses(&self) -> &[Specifier] {
        &self.clauses
    }

    /// Whether the set has no clauses.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Whether `candidate` satisfies every clause.
    #[must_use]
    pub fn contains(&self, candidate: &Version) -> bool {
        self.clauses.iter().all(|clause| clause.contains(candidate))
    }

    /// The first clause `candidate` fails, if any.
    #[must_use]
    pub fn first_rejecting(&self, candidate: &Version) -> Option<&Specifier> {
        self.clauses.iter().find(|clause| !clause.contains(candidate))
    }

    /// Keep the candidates that satisfy the set, preserving their order.
    pub fn filter<'a, I>(&'a self, candidates: I) -> impl Iterator<Item = I::Item> + 'a
    where
        I: IntoIterator + 'a,
        I::Item: AsRef<Version>,
    {
        candidates
            .into_iter()
            .filter(move |candidate| self.contains(candidate.as_ref()))
    }

    /// Narrow every clause to `major.minor` granularity.
    ///
    /// Idempotent: stripping an already stripped set returns it unchanged.
    ///
    /// # Errors
    ///
    /// Fails when a `===` operand is not a version.
    ///
    /// # Examples
    ///
    /// ```
    /// use projroot::version::SpecifierSet;
    ///
    /// let set: SpecifierSet = ">3.7.4,!=3.8.8,~=3.9.1".parse().unwrap();
    /// assert_eq!(set.strip_to_minor().unwrap().to_string(), ">=3.7,!=3.8.8,~=3.9");
    /// ```
    pub fn strip_to_minor(&self) -> Result<Self> {
        let clauses = self
            .clauses
            .iter()
            .map(Specifier::strip_to_minor)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { clauses })
    }
}

impl AsRef<Version> for Version {
    fn as_ref(&self) -> &Version {
        self
    }
}

impl FromStr for SpecifierSet {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for SpecifierSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let clauses: Vec<String> = self.clauses.iter().map(ToString::to_string).collect();
        f.write_str(&clauses.join(","))
    }
}
