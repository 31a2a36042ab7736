//! Comparable version representation
//!
//! A version string is decomposed into numeric and textual components:
//! - `7.1.0` -> [7, 1, 0]
//! - `v7.1` -> [7, 1] (text before the first digit is dropped)
//! - `7.1.0-SNAPSHOT` -> [7, 1, 0, "snapshot"]
//! - `1.0-rc1` -> [1, 0, "rc", 1]
//!
//! Missing trailing components compare as zero, so `7.1 == 7.1.0`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::version::error::NormalizeError;

static COMPONENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+|[A-Za-z]+").expect("component pattern is valid"));

/// A single version component
#[derive(Debug, Clone)]
pub enum Component {
    Numeric(u64),
    /// Lower-cased pre-release or qualifier text
    Text(String),
}

/// Stand-in for a missing trailing component
static ZERO: Component = Component::Numeric(0);

impl Component {
    fn cmp_component(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Component::Numeric(a), Component::Numeric(b)) => a.cmp(b),
            (Component::Text(a), Component::Text(b)) => a.cmp(b),
            // A qualifier marks a pre-release, which sorts below any release number
            (Component::Text(_), Component::Numeric(_)) => Ordering::Less,
            (Component::Numeric(_), Component::Text(_)) => Ordering::Greater,
        }
    }
}

/// Ordered decomposition of a version string
#[derive(Debug, Clone)]
pub struct NormalizedVersion {
    components: Vec<Component>,
}

impl NormalizedVersion {
    /// Normalize a version string.
    ///
    /// Fails when the string contains no numeric component at all.
    pub fn parse(version: &str) -> Result<Self, NormalizeError> {
        let start = version
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(|| NormalizeError::NoNumericComponent(version.to_string()))?;

        let components = COMPONENT
            .find_iter(&version[start..])
            .map(|m| {
                let text = m.as_str();
                if text.as_bytes()[0].is_ascii_digit() {
                    text.parse::<u64>()
                        .map(Component::Numeric)
                        .map_err(|_| NormalizeError::Overflow(text.to_string()))
                } else {
                    Ok(Component::Text(text.to_ascii_lowercase()))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { components })
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }
}

impl FromStr for NormalizedVersion {
    type Err = NormalizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Ord for NormalizedVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.components.len().max(other.components.len());
        (0..len)
            .map(|i| {
                let a = self.components.get(i).unwrap_or(&ZERO);
                let b = other.components.get(i).unwrap_or(&ZERO);
                a.cmp_component(b)
            })
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for NormalizedVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for NormalizedVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NormalizedVersion {}

impl fmt::Display for NormalizedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, component) in self.components.iter().enumerate() {
            match component {
                Component::Numeric(n) if i == 0 => write!(f, "{n}")?,
                Component::Numeric(n) => write!(f, ".{n}")?,
                Component::Text(t) => write!(f, "-{t}")?,
            }
        }
        Ok(())
    }
}
