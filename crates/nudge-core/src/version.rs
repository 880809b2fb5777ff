use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

const MAX_SEGMENTS: usize = 4;

/// A dotted numeric version (`major[.minor[.build[.revision]]]`).
///
/// Missing trailing segments compare as zero, so `1.0` and `1.0.0` are equal.
#[derive(Debug, Clone, Copy)]
pub struct Version {
    segments: [u32; MAX_SEGMENTS],
    len: usize,
}

impl Version {
    #[must_use]
    pub fn new(major: u32, minor: u32, build: u32, revision: u32) -> Self {
        Self {
            segments: [major, minor, build, revision],
            len: MAX_SEGMENTS,
        }
    }

    #[must_use]
    pub fn major(&self) -> u32 {
        self.segments[0]
    }

    #[must_use]
    pub fn minor(&self) -> u32 {
        self.segments[1]
    }

    #[must_use]
    pub fn build(&self) -> u32 {
        self.segments[2]
    }

    #[must_use]
    pub fn revision(&self) -> u32 {
        self.segments[3]
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.segments == other.segments
    }
}

impl Eq for Version {}

impl std::hash::Hash for Version {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.segments.hash(state);
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.segments.cmp(&other.segments)
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, segment) in self.segments[..self.len].iter().enumerate() {
            if index > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_version(s)
    }
}

/// Parse a version string, dropping everything from the first character that
/// is neither an ASCII digit nor a dot.
///
/// `"1.2.3-beta"` parses as `1.2.3`; `"v1.2"` fails because nothing numeric
/// precedes the `v`.
///
/// # Errors
/// Returns [`ValidationError::InvalidVersion`] for blank input or when the
/// numeric prefix is not 1 to 4 dot-separated integers.
pub fn parse_version(text: &str) -> Result<Version, ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::invalid_version(text));
    }

    let end = text
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(text.len());
    let numeric = &text[..end];

    let mut segments = [0_u32; MAX_SEGMENTS];
    let mut len = 0;
    for part in numeric.split('.') {
        if len == MAX_SEGMENTS || part.is_empty() {
            return Err(ValidationError::invalid_version(text));
        }
        segments[len] = part
            .parse()
            .map_err(|_| ValidationError::invalid_version(text))?;
        len += 1;
    }

    Ok(Version { segments, len })
}

/// Whether `latest` is strictly newer than `current`.
///
/// # Errors
/// Propagates [`ValidationError::InvalidVersion`] from either side.
pub fn is_newer_version(current: &str, latest: &str) -> Result<bool, ValidationError> {
    let current = parse_version(current)?;
    let latest = parse_version(latest)?;
    Ok(latest > current)
}
