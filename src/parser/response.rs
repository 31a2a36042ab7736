//! Dual-format response parser
//!
//! Newer service generations answer with JSON, older ones with XML. The format
//! is decided by content sniffing: a body that deserializes as JSON is only
//! ever searched as JSON, anything else goes to the markup path.

use crate::error::SetupError;
use crate::parser::markup::MarkupExtractor;
use crate::parser::structured;
use crate::parser::traits::{ParseError, ResponseParser};
use crate::parser::types::{ExtractedVersion, FieldPath, MarkupKey};

/// Which extraction strategy a body was routed to
#[derive(Debug)]
enum Payload {
    Structured(serde_json::Value),
    Markup,
}

impl Payload {
    fn sniff(body: &[u8]) -> Self {
        match structured::sniff(body) {
            Some(document) => Payload::Structured(document),
            None => Payload::Markup,
        }
    }
}

/// Parser that accepts both JSON and markup responses
pub struct DualFormatParser {
    field_path: FieldPath,
    markup_key: MarkupKey,
    markup: MarkupExtractor,
}

impl DualFormatParser {
    pub fn new(field_path: FieldPath, markup_key: MarkupKey) -> Result<Self, SetupError> {
        Ok(Self {
            field_path,
            markup_key,
            markup: MarkupExtractor::new()?,
        })
    }
}

impl ResponseParser for DualFormatParser {
    fn parse(&self, body: &[u8]) -> Result<ExtractedVersion, ParseError> {
        if body.trim_ascii().is_empty() {
            return Err(ParseError::EmptyBody);
        }

        match Payload::sniff(body) {
            Payload::Structured(document) => structured::extract(&document, &self.field_path),
            Payload::Markup => self.markup.extract(body, &self.markup_key),
        }
    }

    fn render_tree(&self, body: &[u8]) -> Option<String> {
        match Payload::sniff(body) {
            Payload::Structured(_) => None,
            Payload::Markup => self.markup.render(body),
        }
    }
}
