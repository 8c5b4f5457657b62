//! Version pattern grammar
//!
//! A pattern has up to three dot-separated segments (major.minor.patch):
//! - `6.7.8` - concrete, matched by exact string presence
//! - `6.7.x`, `6.x`, `6.x.x` - `x` floats its segment and everything after it
//! - `2.0.*`, `2.0.1*` - trailing `*` on the patch token floats the remaining
//!   patch digits

use semver::Version;

use crate::version::error::ResolveError;

/// One segment of a floating pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Number(u64),
    /// `x`
    Any,
    /// Patch digits starting with the given prefix (`1*`), or anything (`*`)
    Prefix(String),
}

impl Segment {
    fn parse(pattern: &str, position: usize, token: &str) -> Result<Self, ResolveError> {
        if token == "x" {
            return Ok(Segment::Any);
        }

        if let Some(digits) = token.strip_suffix('*') {
            if position != 2 {
                return Err(ResolveError::malformed(
                    pattern,
                    "'*' is only allowed in the patch segment",
                ));
            }
            if !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(ResolveError::malformed(
                    pattern,
                    format!("'{token}' must be digits followed by '*'"),
                ));
            }
            return Ok(Segment::Prefix(digits.to_string()));
        }

        if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ResolveError::malformed(
                pattern,
                format!("segment '{token}' is neither a number nor 'x'"),
            ));
        }

        token
            .parse::<u64>()
            .map(Segment::Number)
            .map_err(|e| ResolveError::malformed(pattern, e.to_string()))
    }

    fn is_wildcard(&self) -> bool {
        !matches!(self, Segment::Number(_))
    }

    fn matches(&self, value: u64) -> bool {
        match self {
            Segment::Number(n) => *n == value,
            Segment::Any => true,
            Segment::Prefix(prefix) => value.to_string().starts_with(prefix.as_str()),
        }
    }
}

/// A parsed version pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionPattern {
    /// No wildcard anywhere
    Concrete(Version),
    Floating {
        major: Segment,
        minor: Segment,
        patch: Segment,
    },
}

impl VersionPattern {
    pub fn parse(pattern: &str) -> Result<Self, ResolveError> {
        let tokens: Vec<&str> = pattern.split('.').collect();

        // Pre-release suffixes may contain dots, so concrete versions go to semver first
        let has_wildcard = tokens.iter().any(|t| *t == "x" || t.ends_with('*'));
        if !has_wildcard {
            return Version::parse(pattern)
                .map(VersionPattern::Concrete)
                .map_err(|e| ResolveError::malformed(pattern, e.to_string()));
        }

        if tokens.len() > 3 {
            return Err(ResolveError::malformed(
                pattern,
                "expected at most three segments",
            ));
        }

        let mut segments = Vec::with_capacity(3);
        let mut floated = false;
        for (position, token) in tokens.iter().enumerate() {
            let segment = Segment::parse(pattern, position, token)?;
            if floated && segment != Segment::Any {
                return Err(ResolveError::malformed(
                    pattern,
                    "segments after a wildcard must be 'x'",
                ));
            }
            floated |= segment.is_wildcard();
            segments.push(segment);
        }
        // floated is always true here; trailing segments are implied wildcards
        segments.resize(3, Segment::Any);

        let mut segments = segments.into_iter();
        match (segments.next(), segments.next(), segments.next()) {
            (Some(major), Some(minor), Some(patch)) => Ok(VersionPattern::Floating {
                major,
                minor,
                patch,
            }),
            _ => Err(ResolveError::malformed(pattern, "expected major.minor.patch")),
        }
    }

    pub fn is_floating(&self) -> bool {
        matches!(self, VersionPattern::Floating { .. })
    }

    /// Check whether a concrete version satisfies this pattern.
    ///
    /// Floating patterns never match pre-release versions.
    pub fn matches(&self, version: &Version) -> bool {
        match self {
            VersionPattern::Concrete(v) => v == version,
            VersionPattern::Floating {
                major,
                minor,
                patch,
            } => {
                version.pre.is_empty()
                    && major.matches(version.major)
                    && minor.matches(version.minor)
                    && patch.matches(version.patch)
            }
        }
    }
}
