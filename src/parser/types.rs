//! Common types for response parsers

use std::fmt;

use serde::{Deserialize, Serialize};

/// A version string extracted from a response body. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedVersion(String);

impl ExtractedVersion {
    /// Wraps `value` trimmed, or returns `None` when nothing is left
    pub fn new(value: &str) -> Option<Self> {
        let value = value.trim();
        (!value.is_empty()).then(|| Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExtractedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key path into a structured (JSON) payload, e.g. `lucene.solr-spec-version`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Parse a dot separated path, ignoring empty segments
    pub fn from_dotted(path: &str) -> Self {
        Self::new(path.split('.').map(str::trim).filter(|s| !s.is_empty()))
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// The final segment, used as the default markup attribute value
    pub fn leaf(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

/// Locates the version element in a markup payload:
/// `<{tag} {attribute}="{value}">VERSION</{tag}>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MarkupKey {
    pub tag: String,
    pub attribute: String,
    pub value: String,
}

impl Default for MarkupKey {
    fn default() -> Self {
        Self {
            tag: "str".to_string(),
            attribute: "name".to_string(),
            value: String::new(),
        }
    }
}

impl fmt::Display for MarkupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} {}=\"{}\">", self.tag, self.attribute, self.value)
    }
}
