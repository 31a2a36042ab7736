//! Response parser trait definition

#[cfg(test)]
use mockall::automock;

use crate::parser::types::ExtractedVersion;

/// Extracts the reported version from a raw response body
#[cfg_attr(test, automock)]
pub trait ResponseParser: Send + Sync {
    /// Extract the version string from `body`
    fn parse(&self, body: &[u8]) -> Result<ExtractedVersion, ParseError>;

    /// Render the body's tag tree for diagnostics, if it is a markup payload
    fn render_tree(&self, _body: &[u8]) -> Option<String> {
        None
    }
}

/// Error type for response parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("empty response body")]
    EmptyBody,

    /// Structured payload without the configured key path
    #[error("missing field: {0}")]
    MissingField(String),

    /// Structured payload whose field is not a string
    #[error("unexpected type at {path}: expected string, got {found}")]
    UnexpectedType { path: String, found: &'static str },

    /// Markup payload without a matching element
    #[error("no version field found")]
    NoVersionField,

    #[error("version field is empty")]
    EmptyVersion,
}
