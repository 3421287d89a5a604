//! Front-matter line parsing and metadata validation.
//!
//! Front-matter is treated as flat `key: value` lines rather than full
//! YAML: a line contributes a pair only when it contains exactly one colon,
//! and later duplicates of a key are dropped.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Reserved metadata keys, always emitted first and in this order.
pub const RESERVED_KEYS: [&str; 3] = ["Title", "Author", "Published"];

/// Ordered key/value metadata attached to a converted document.
///
/// Serializes as a JSON object that preserves insertion order, so the
/// reserved keys always lead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    entries: Vec<(String, String)>,
}

impl Metadata {
    /// Create an empty metadata map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a value by exact key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Append a pair; the first occurrence of a key wins.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        if self.get(&key).is_none() {
            self.entries.push((key, value.into()));
        }
    }

    /// Remove and return the value for `key`, keeping the rest in order.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Iterate entries in serialization order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Serialize for Metadata {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Parse raw front-matter text into key/value pairs.
///
/// Lines with zero or multiple colons are dropped. Keys and values are
/// trimmed of surrounding whitespace, then of `"` quote characters.
pub fn parse_front_matter(block: &str) -> Metadata {
    let mut pairs = Metadata::new();
    for line in block.lines() {
        let mut parts = line.split(':');
        if let (Some(key), Some(value), None) = (parts.next(), parts.next(), parts.next()) {
            pairs.push(trim_part(key), trim_part(value));
        }
    }
    pairs
}

fn trim_part(part: &str) -> &str {
    part.trim().trim_matches('"')
}

/// Validate metadata, guaranteeing the reserved keys lead the map.
///
/// Each reserved key is looked up exact-case first, then all-lowercase;
/// the found value moves under the canonical-cased name, and a missing key
/// is inserted with an empty value. Remaining pairs follow in their
/// original relative order.
pub fn validate_metadata(mut pairs: Metadata) -> Metadata {
    let mut validated = Metadata::new();
    for reserved in RESERVED_KEYS {
        let value = pairs
            .remove(reserved)
            .or_else(|| pairs.remove(&reserved.to_lowercase()))
            .unwrap_or_default();
        validated.push(reserved, value);
    }
    for (key, value) in pairs.entries {
        validated.push(key, value);
    }
    validated
}
