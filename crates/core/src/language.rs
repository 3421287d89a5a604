//! Code-language moniker normalization.
//!
//! Free-text monikers from fenced code block info strings are mapped to
//! canonical display names through a closed, case-sensitive table. Anything
//! outside the table normalizes to the [`UNKNOWN_LANGUAGE`] sentinel; a miss
//! is never an error.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Sentinel label for monikers outside the mapping table.
pub const UNKNOWN_LANGUAGE: &str = "UNKNOWN";

static LANGUAGE_MAPPING: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("csharp", "CSharp"),
        ("charp", "CSharp"),
        ("python", "Python"),
        ("javascript", "JavaScript"),
        ("js", "JavaScript"),
        ("nodejs", "NodeJS"),
        ("java", "Java"),
        ("powershell", "PowerShell"),
        ("batch", "Batch"),
    ])
});

/// Normalize a free-text language moniker to its canonical display name.
///
/// Exact-match, case-sensitive lookup; no case folding, no fuzzy matching.
pub fn normalize_language(moniker: &str) -> &'static str {
    LANGUAGE_MAPPING
        .get(moniker)
        .copied()
        .unwrap_or(UNKNOWN_LANGUAGE)
}

/// A resolved code block language label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeLanguage {
    /// The moniker as written in the fence info string.
    pub moniker: String,
    /// Canonical display name, or [`UNKNOWN_LANGUAGE`].
    pub canonical: &'static str,
}

impl CodeLanguage {
    /// Resolve a moniker against the mapping table.
    pub fn resolve(moniker: &str) -> Self {
        Self {
            moniker: moniker.to_string(),
            canonical: normalize_language(moniker),
        }
    }

    /// Whether the moniker mapped to a known language.
    pub fn is_known(&self) -> bool {
        self.canonical != UNKNOWN_LANGUAGE
    }
}
