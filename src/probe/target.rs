//! Per-service probe settings
//!
//! Each probed service differs only in where it publishes its version, so a
//! target is plain data rather than its own parser type.

use serde::{Deserialize, Serialize};

use crate::error::SetupError;
use crate::parser::response::DualFormatParser;
use crate::parser::types::{FieldPath, MarkupKey};

/// Solr's default HTTP port
pub const SOLR_DEFAULT_PORT: u16 = 8983;

/// Where and how to find a service's version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProbeTarget {
    /// Display name, also the prefix of the `<NAME>_HOST`/`<NAME>_PORT` variables
    pub software: String,
    pub default_port: u16,
    pub url_path: String,
    /// Key path in a JSON response
    pub field_path: FieldPath,
    /// Element in a markup response. An empty `value` falls back to the last
    /// segment of `field_path`.
    pub markup: MarkupKey,
}

impl ProbeTarget {
    /// Solr: JSON from 7.0 onwards, XML before
    pub fn solr() -> Self {
        Self {
            software: "Solr".to_string(),
            default_port: SOLR_DEFAULT_PORT,
            url_path: "/solr/admin/info/system".to_string(),
            field_path: FieldPath::new(["lucene", "solr-spec-version"]),
            markup: MarkupKey {
                tag: "str".to_string(),
                attribute: "name".to_string(),
                value: "solr-spec-version".to_string(),
            },
        }
    }

    /// Environment variable prefix, e.g. `SOLR` or `MY_SERVICE`
    pub fn env_prefix(&self) -> String {
        self.software
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect()
    }

    /// Markup key with the attribute value filled in from the field path
    pub fn markup_key(&self) -> MarkupKey {
        let mut key = self.markup.clone();
        if key.value.is_empty()
            && let Some(leaf) = self.field_path.leaf()
        {
            key.value = leaf.to_string();
        }
        key
    }

    /// Build the response parser for this target
    pub fn parser(&self) -> Result<DualFormatParser, SetupError> {
        DualFormatParser::new(self.field_path.clone(), self.markup_key())
    }
}

impl Default for ProbeTarget {
    fn default() -> Self {
        Self::solr()
    }
}
