//! Structured (JSON) payload extraction

use serde_json::Value;

use crate::parser::traits::ParseError;
use crate::parser::types::{ExtractedVersion, FieldPath};

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// Try to interpret `body` as JSON.
///
/// Returns `None` when the body is not JSON at all, so the caller can fall
/// back to markup parsing. A leading UTF-8 byte order mark is skipped.
pub fn sniff(body: &[u8]) -> Option<Value> {
    let body = body.strip_prefix(UTF8_BOM).unwrap_or(body);
    serde_json::from_slice(body).ok()
}

/// Walk `path` through nested objects and return the string found there
pub fn extract(document: &Value, path: &FieldPath) -> Result<ExtractedVersion, ParseError> {
    let missing = || ParseError::MissingField(path.to_string());

    let value = path
        .segments()
        .iter()
        .try_fold(document, |node, key| node.as_object()?.get(key))
        .ok_or_else(missing)?;

    match value {
        Value::String(s) => ExtractedVersion::new(s).ok_or(ParseError::EmptyVersion),
        other => Err(ParseError::UnexpectedType {
            path: path.to_string(),
            found: type_name(other),
        }),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
