//! Python package version numbers.
//!
//! Parses the public version scheme used by packaging metadata
//! (`[N!]N(.N)*[{a|b|rc}N][.postN][.devN][+local]`), including the
//! alternative spellings accepted by Python tooling, and orders versions the
//! way installers do.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Pre-release phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PreRelease {
    /// `a`, `alpha`
    Alpha,
    /// `b`, `beta`
    Beta,
    /// `rc`, `c`, `pre`, `preview`
    Candidate,
}

impl fmt::Display for PreRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alpha => write!(f, "a"),
            Self::Beta => write!(f, "b"),
            Self::Candidate => write!(f, "rc"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum LocalSegment {
    // Alphanumeric segments sort before numeric ones.
    Text(String),
    Number(u64),
}

impl fmt::Display for LocalSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s}"),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

/// A parsed version number.
///
/// Equality and ordering ignore trailing zeros in the release (`3.8 == 3.8.0`).
///
/// # Examples
///
/// ```
/// use projroot::version::Version;
///
/// let v: Version = "3.11.0rc1".parse().unwrap();
/// assert_eq!(v.major(), 3);
/// assert_eq!(v.minor(), Some(11));
/// assert!(v.is_prerelease());
/// assert!(v < "3.11".parse().unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct Version {
    epoch: u64,
    release: Vec<u64>,
    pre: Option<(PreRelease, u64)>,
    post: Option<u64>,
    dev: Option<u64>,
    local: Vec<LocalSegment>,
}

impl Version {
    /// Parse a version string.
    ///
    /// Surrounding whitespace and a leading `v` are accepted; matching is
    /// case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidVersion`] if the string is not a version.
    pub fn parse(input: &str) -> Result<Self> {
        let lowered = input.trim().to_ascii_lowercase();
        Parser::new(input, &lowered).version()
    }

    /// A final release with the given segments. An empty slice means `0`.
    #[must_use]
    pub fn from_release(release: &[u64]) -> Self {
        let release = if release.is_empty() {
            vec![0]
        } else {
            release.to_vec()
        };
        Self {
            epoch: 0,
            release,
            pre: None,
            post: None,
            dev: None,
            local: Vec::new(),
        }
    }

    /// Release segments as written.
    #[must_use]
    pub fn release(&self) -> &[u64] {
        &self.release
    }

    /// Version epoch (`0` when absent).
    #[must_use]
    pub const fn epoch(&self) -> u64 {
        self.epoch
    }

    /// First release segment.
    #[must_use]
    pub fn major(&self) -> u64 {
        self.segment(0)
    }

    /// Second release segment, if written.
    #[must_use]
    pub fn minor(&self) -> Option<u64> {
        self.release.get(1).copied()
    }

    /// Release segment `index`, with missing segments read as zero.
    #[must_use]
    pub fn segment(&self, index: usize) -> u64 {
        self.release.get(index).copied().unwrap_or(0)
    }

    /// Whether this is an alpha, beta, candidate or development release.
    #[must_use]
    pub const fn is_prerelease(&self) -> bool {
        self.pre.is_some() || self.dev.is_some()
    }

    /// Whether this is a post-release.
    #[must_use]
    pub const fn is_postrelease(&self) -> bool {
        self.post.is_some()
    }

    /// Whether a local label (`+...`) is present.
    #[must_use]
    pub fn has_local(&self) -> bool {
        !self.local.is_empty()
    }

    /// The same version without its local label.
    #[must_use]
    pub fn public(&self) -> Self {
        Self {
            local: Vec::new(),
            ..self.clone()
        }
    }

    /// Whether epoch and release match `other`, ignoring every suffix.
    #[must_use]
    pub fn same_base(&self, other: &Self) -> bool {
        self.epoch == other.epoch && cmp_release(&self.release, &other.release).is_eq()
    }

    fn cmp_key(&self, other: &Self) -> Ordering {
        self.epoch
            .cmp(&other.epoch)
            .then_with(|| cmp_release(&self.release, &other.release))
            .then_with(|| self.pre_key().cmp(&other.pre_key()))
            .then_with(|| self.post.cmp(&other.post))
            .then_with(|| self.dev_key().cmp(&other.dev_key()))
            .then_with(|| self.local.cmp(&other.local))
    }

    // A bare dev release sorts before every pre-release of the same release;
    // a final or post release sorts after them.
    fn pre_key(&self) -> (u8, Option<(PreRelease, u64)>) {
        match (self.pre, self.post, self.dev) {
            (None, None, Some(_)) => (0, None),
            (Some(pre), _, _) => (1, Some(pre)),
            _ => (2, None),
        }
    }

    fn dev_key(&self) -> (u8, u64) {
        match self.dev {
            Some(n) => (0, n),
            None => (1, 0),
        }
    }
}

/// Compare release tuples with implicit trailing zeros.
pub(crate) fn cmp_release(a: &[u64], b: &[u64]) -> Ordering {
    let len = a.len().max(b.len());
    (0..len)
        .map(|i| {
            let x = a.get(i).copied().unwrap_or(0);
            let y = b.get(i).copied().unwrap_or(0);
            x.cmp(&y)
        })
        .find(|o| o.is_ne())
        .unwrap_or(Ordering::Equal)
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp_key(other).is_eq()
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_key(other)
    }
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.epoch != 0 {
            write!(f, "{}!", self.epoch)?;
        }
        let release: Vec<String> = self.release.iter().map(u64::to_string).collect();
        write!(f, "{}", release.join("."))?;
        if let Some((phase, n)) = self.pre {
            write!(f, "{phase}{n}")?;
        }
        if let Some(n) = self.post {
            write!(f, ".post{n}")?;
        }
        if let Some(n) = self.dev {
            write!(f, ".dev{n}")?;
        }
        if !self.local.is_empty() {
            let local: Vec<String> = self.local.iter().map(ToString::to_string).collect();
            write!(f, "+{}", local.join("."))?;
        }
        Ok(())
    }
}

const PRE_SPELLINGS: &[(&str, PreRelease)] = &[
    ("alpha", PreRelease::Alpha),
    ("a", PreRelease::Alpha),
    ("beta", PreRelease::Beta),
    ("b", PreRelease::Beta),
    ("preview", PreRelease::Candidate),
    ("pre", PreRelease::Candidate),
    ("rc", PreRelease::Candidate),
    ("c", PreRelease::Candidate),
];

const POST_SPELLINGS: &[&str] = &["post", "rev", "r"];

/// Cursor over a lowercased version string.
struct Parser<'a> {
    original: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(original: &'a str, lowered: &'a str) -> Self {
        Self {
            original,
            bytes: lowered.as_bytes(),
            pos: 0,
        }
    }

    fn fail(&self, reason: impl Into<String>) -> Error {
        Error::InvalidVersion {
            input: self.original.to_string(),
            reason: reason.into(),
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn eat_separator(&mut self) -> bool {
        matches!(self.peek(), Some(b'-' | b'_' | b'.')) && {
            self.pos += 1;
            true
        }
    }

    fn eat_word(&mut self, word: &str) -> bool {
        if self.bytes[self.pos..].starts_with(word.as_bytes()) {
            self.pos += word.len();
            true
        } else {
            false
        }
    }

    fn number(&mut self) -> Result<Option<u64>> {
        let start = self.pos;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
        if start == self.pos {
            return Ok(None);
        }
        // Only ASCII digits were consumed.
        let digits = std::str::from_utf8(&self.bytes[start..self.pos]).unwrap_or_default();
        digits
            .parse()
            .map(Some)
            .map_err(|_| self.fail(format!("number '{digits}' is too large")))
    }

    fn version(mut self) -> Result<Version> {
        if self.bytes.is_empty() {
            return Err(self.fail("empty version"));
        }
        self.eat(b'v');

        let mut epoch = 0;
        let mut first = self
            .number()?
            .ok_or_else(|| self.fail("expected a release number"))?;
        if self.eat(b'!') {
            epoch = first;
            first = self
                .number()?
                .ok_or_else(|| self.fail("expected a release number after epoch"))?;
        }

        let mut release = vec![first];
        loop {
            let mark = self.pos;
            if !self.eat(b'.') {
                break;
            }
            match self.number()? {
                Some(n) => release.push(n),
                None => {
                    self.pos = mark;
                    break;
                }
            }
        }

        let pre = self.pre_release()?;
        let post = self.post_release()?;
        let dev = self.dev_release()?;
        let local = self.local()?;

        if self.pos != self.bytes.len() {
            return Err(self.fail(format!("unexpected text at offset {}", self.pos)));
        }

        Ok(Version {
            epoch,
            release,
            pre,
            post,
            dev,
            local,
        })
    }

    fn pre_release(&mut self) -> Result<Option<(PreRelease, u64)>> {
        let mark = self.pos;
        self.eat_separator();
        for (spelling, phase) in PRE_SPELLINGS {
            if self.eat_word(spelling) {
                self.eat_separator_before_digit();
                let n = self.number()?.unwrap_or(0);
                return Ok(Some((*phase, n)));
            }
        }
        self.pos = mark;
        Ok(None)
    }

    fn post_release(&mut self) -> Result<Option<u64>> {
        let mark = self.pos;
        if self.eat(b'-') {
            if let Some(n) = self.number()? {
                return Ok(Some(n));
            }
            self.pos = mark;
        }
        self.eat_separator();
        for spelling in POST_SPELLINGS {
            if self.eat_word(spelling) {
                self.eat_separator_before_digit();
                return Ok(Some(self.number()?.unwrap_or(0)));
            }
        }
        self.pos = mark;
        Ok(None)
    }

    fn dev_release(&mut self) -> Result<Option<u64>> {
        let mark = self.pos;
        self.eat_separator();
        if self.eat_word("dev") {
            self.eat_separator_before_digit();
            return Ok(Some(self.number()?.unwrap_or(0)));
        }
        self.pos = mark;
        Ok(None)
    }

    // `1.0a.1` is `1.0a1`, but `1.0a.post1` must leave the `.` for the post
    // segment.
    fn eat_separator_before_digit(&mut self) {
        if matches!(self.peek(), Some(b'-' | b'_' | b'.'))
            && matches!(self.bytes.get(self.pos + 1), Some(b'0'..=b'9'))
        {
            self.pos += 1;
        }
    }

    fn local(&mut self) -> Result<Vec<LocalSegment>> {
        if !self.eat(b'+') {
            return Ok(Vec::new());
        }
        let mut segments = Vec::new();
        loop {
            let start = self.pos;
            while matches!(self.peek(), Some(b'a'..=b'z' | b'0'..=b'9')) {
                self.pos += 1;
            }
            if start == self.pos {
                return Err(self.fail("empty local version segment"));
            }
            let text = std::str::from_utf8(&self.bytes[start..self.pos]).unwrap_or_default();
            segments.push(match text.parse::<u64>() {
                Ok(n) if text.bytes().all(|b| b.is_ascii_digit()) => LocalSegment::Number(n),
                _ => LocalSegment::Text(text.to_string()),
            });
            if !self.eat_separator() {
                break;
            }
        }
        Ok(segments)
    }
}
