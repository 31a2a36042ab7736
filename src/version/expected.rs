//! Expected version specifications
//!
//! Supported forms:
//! - `7.1.0`, `=7.1.0` - exact match (after normalization)
//! - `>=7.0.5` - minimum version
//! - `7.0.0..7.2.0` - inclusive range
//! - `*` - any parseable version
//!
//! Every bound starts with a digit (optionally after `v`). Other operators
//! such as `>`, `<=` or `~` are rejected rather than read as exact versions.
//!
//! A regex expectation is built with [`ExpectedSpec::pattern`]; it has no
//! textual prefix because version patterns routinely contain `*` and `.`.

use std::fmt;
use std::str::FromStr;

use regex::Regex;

use crate::version::error::SpecError;
use crate::version::normalized::NormalizedVersion;

/// Leading characters of comparison operators that have no meaning here
const OPERATOR_CHARS: &[char] = &['>', '<', '=', '~', '^', '!'];

/// A version together with the text it was written as, so messages echo
/// what the operator configured.
#[derive(Debug, Clone)]
pub struct VersionBound {
    pub raw: String,
    pub normalized: NormalizedVersion,
}

impl VersionBound {
    /// Parse a single bound. It must start with a digit, optionally after a `v`.
    pub fn parse(raw: &str) -> Result<Self, SpecError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(SpecError::Empty);
        }

        let unprefixed = raw.strip_prefix(['v', 'V']).unwrap_or(raw);
        match unprefixed.chars().next() {
            Some(c) if c.is_ascii_digit() => {}
            Some(c) if OPERATOR_CHARS.contains(&c) => {
                return Err(SpecError::UnsupportedOperator(raw.to_string()));
            }
            _ => {
                // Report text without any digits as an unusable version first
                NormalizedVersion::parse(raw)?;
                return Err(SpecError::MalformedBound(raw.to_string()));
            }
        }

        Ok(Self {
            raw: raw.to_string(),
            normalized: NormalizedVersion::parse(raw)?,
        })
    }
}

impl fmt::Display for VersionBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Acceptance rule the probed version is checked against
#[derive(Debug, Clone, Default)]
pub enum ExpectedSpec {
    /// Any version that normalizes
    #[default]
    Any,
    Exact(VersionBound),
    Minimum(VersionBound),
    /// Inclusive on both ends
    Range(VersionBound, VersionBound),
    /// Anchored regex matched against the extracted text as-is
    Pattern { raw: String, regex: Regex },
}

impl ExpectedSpec {
    /// Build an anchored regex expectation
    pub fn pattern(pattern: &str) -> Result<Self, SpecError> {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return Err(SpecError::Empty);
        }
        let regex = Regex::new(&format!("^(?:{pattern})$"))?;
        Ok(ExpectedSpec::Pattern {
            raw: pattern.to_string(),
            regex,
        })
    }
}

impl FromStr for ExpectedSpec {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let spec = s.trim();

        if spec.is_empty() {
            Err(SpecError::Empty)
        } else if spec == "*" {
            Ok(ExpectedSpec::Any)
        } else if let Some(rest) = spec.strip_prefix(">=") {
            single_bound(spec, rest).map(ExpectedSpec::Minimum)
        } else if let Some(rest) = spec.strip_prefix('=') {
            single_bound(spec, rest).map(ExpectedSpec::Exact)
        } else if let Some((lo, hi)) = spec.split_once("..") {
            if hi.contains("..") {
                return Err(SpecError::UnsupportedOperator(spec.to_string()));
            }
            let lo = VersionBound::parse(lo)?;
            let hi = VersionBound::parse(hi)?;
            if lo.normalized > hi.normalized {
                return Err(SpecError::InvertedRange(spec.to_string()));
            }
            Ok(ExpectedSpec::Range(lo, hi))
        } else {
            VersionBound::parse(spec).map(ExpectedSpec::Exact)
        }
    }
}

/// Bound following `>=` or `=`; a range cannot be combined with either
fn single_bound(spec: &str, rest: &str) -> Result<VersionBound, SpecError> {
    if rest.contains("..") {
        return Err(SpecError::UnsupportedOperator(spec.to_string()));
    }
    VersionBound::parse(rest)
}

impl fmt::Display for ExpectedSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpectedSpec::Any => f.write_str("*"),
            ExpectedSpec::Exact(v) => write!(f, "{v}"),
            ExpectedSpec::Minimum(v) => write!(f, ">={v}"),
            ExpectedSpec::Range(lo, hi) => write!(f, "{lo}..{hi}"),
            ExpectedSpec::Pattern { raw, .. } => write!(f, "/{raw}/"),
        }
    }
}
