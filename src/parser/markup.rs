//! Markup (XML/HTML) payload extraction
//!
//! Older service generations answer with an XML document such as:
//!
//! ```xml
//! <response>
//!   <lst name="lucene">
//!     <str name="solr-spec-version">6.6.0</str>
//!   </lst>
//! </response>
//! ```
//!
//! The body is parsed with tree-sitter's HTML grammar, which tolerates the
//! sloppy markup an HTML parser would, and the first element matching a
//! [`MarkupKey`] yields the version.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use tree_sitter::{Language, Node, Tree};

use crate::error::SetupError;
use crate::parser::traits::ParseError;
use crate::parser::types::{ExtractedVersion, MarkupKey};

/// Tag-tree search over markup bodies
pub struct MarkupExtractor {
    language: Language,
}

impl MarkupExtractor {
    /// Load the HTML grammar, failing if this build cannot use it
    pub fn new() -> Result<Self, SetupError> {
        let language: Language = tree_sitter_html::LANGUAGE.into();
        tree_sitter::Parser::new()
            .set_language(&language)
            .map_err(|e| SetupError::Grammar(e.to_string()))?;
        Ok(Self { language })
    }

    /// Find the element described by `key` and return its trimmed text
    pub fn extract(&self, body: &[u8], key: &MarkupKey) -> Result<ExtractedVersion, ParseError> {
        let source = markup_source(body);
        let tree = self.parse_tree(&source).ok_or(ParseError::NoVersionField)?;

        let element =
            find_element(tree.root_node(), &source, key).ok_or(ParseError::NoVersionField)?;

        ExtractedVersion::new(&text_content(element, &source)).ok_or(ParseError::EmptyVersion)
    }

    /// S-expression of the parsed tag tree
    pub fn render(&self, body: &[u8]) -> Option<String> {
        let source = markup_source(body);
        self.parse_tree(&source).map(|tree| tree.root_node().to_sexp())
    }

    fn parse_tree(&self, source: &str) -> Option<Tree> {
        let mut parser = tree_sitter::Parser::new();
        parser.set_language(&self.language).ok()?;
        parser.parse(source, None)
    }
}

static CDATA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<!\[CDATA\[(.*?)\]\]>").expect("CDATA pattern is valid")
});

/// Decode the body, drop a leading `<?xml ...?>` declaration and inline CDATA
/// sections as escaped text. The HTML grammar has no rule for either.
fn markup_source(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let mut text = text.trim_start_matches('\u{feff}').trim_start();

    if text.starts_with("<?xml")
        && let Some(end) = text.find("?>")
    {
        text = &text[end + 2..];
    }

    CDATA
        .replace_all(text, |caps: &Captures| escape_text(&caps[1]))
        .into_owned()
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn node_text<'s>(node: Node, source: &'s str) -> &'s str {
    source.get(node.byte_range()).unwrap_or_default()
}

/// Depth-first, document-order search for the first matching element
fn find_element<'t>(node: Node<'t>, source: &str, key: &MarkupKey) -> Option<Node<'t>> {
    if node.kind() == "element" && element_matches(node, source, key) {
        return Some(node);
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = find_element(child, source, key) {
            return Some(found);
        }
    }
    None
}

fn element_matches(element: Node, source: &str, key: &MarkupKey) -> bool {
    let mut cursor = element.walk();
    let Some(tag) = element
        .children(&mut cursor)
        .find(|n| matches!(n.kind(), "start_tag" | "self_closing_tag"))
    else {
        return false;
    };

    let mut tag_cursor = tag.walk();
    let mut name_matches = false;
    let mut attribute_matches = false;

    for child in tag.children(&mut tag_cursor) {
        match child.kind() {
            "tag_name" => {
                name_matches = node_text(child, source).eq_ignore_ascii_case(&key.tag);
            }
            "attribute" => {
                if let Some((name, value)) = attribute(child, source)
                    && name.eq_ignore_ascii_case(&key.attribute)
                    && value == key.value
                {
                    attribute_matches = true;
                }
            }
            _ => {}
        }
    }

    name_matches && attribute_matches
}

/// Split an `attribute` node into its name and (unquoted) value
fn attribute<'s>(node: Node, source: &'s str) -> Option<(&'s str, &'s str)> {
    let mut cursor = node.walk();
    let mut name = None;
    let mut value = "";

    for child in node.children(&mut cursor) {
        match child.kind() {
            "attribute_name" => name = Some(node_text(child, source)),
            "attribute_value" => value = node_text(child, source),
            "quoted_attribute_value" => {
                let mut inner = child.walk();
                value = child
                    .children(&mut inner)
                    .find(|n| n.kind() == "attribute_value")
                    .map(|n| node_text(n, source))
                    .unwrap_or_default();
            }
            _ => {}
        }
    }

    name.map(|name| (name, value))
}

/// Concatenated descendant text of `element`, trimmed
fn text_content(element: Node, source: &str) -> String {
    let mut out = String::new();
    let mut last_end = None;
    collect_text(element, source, &mut out, &mut last_end);
    out.trim().to_string()
}

fn collect_text(node: Node, source: &str, out: &mut String, last_end: &mut Option<usize>) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "text" | "entity" => {
                // The grammar leaves whitespace out of text nodes; keep what
                // sits between them so "a <b>b</b>" stays "a b".
                if let Some(end) = *last_end {
                    let gap = source.get(end..child.start_byte()).unwrap_or_default();
                    push_untagged_whitespace(gap, out);
                }
                let raw = node_text(child, source);
                if child.kind() == "entity" {
                    out.push_str(&decode_entity(raw));
                } else {
                    out.push_str(raw);
                }
                *last_end = Some(child.end_byte());
            }
            "element" => collect_text(child, source, out, last_end),
            _ => {}
        }
    }
}

fn push_untagged_whitespace(gap: &str, out: &mut String) {
    let mut in_tag = false;
    for c in gap.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag && c.is_whitespace() => out.push(c),
            _ => {}
        }
    }
}

fn decode_entity(raw: &str) -> String {
    let name = raw.trim_start_matches('&').trim_end_matches(';');

    let decoded = match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => name
            .strip_prefix("#x")
            .or_else(|| name.strip_prefix("#X"))
            .and_then(|hex| u32::from_str_radix(hex, 16).ok())
            .or_else(|| name.strip_prefix('#').and_then(|dec| dec.parse().ok()))
            .and_then(char::from_u32),
    };

    decoded.map(String::from).unwrap_or_else(|| raw.to_string())
}
