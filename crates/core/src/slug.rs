//! Anchor id generation for headings.

use std::collections::HashMap;

/// Auto-identifier generator for heading anchors.
///
/// Lowercases the text, collapses runs of non-alphanumeric characters into
/// single hyphens, and suffixes repeated ids with `-1`, `-2`, ...
#[derive(Debug, Default)]
pub struct Slugger {
    counts: HashMap<String, usize>,
}

impl Slugger {
    /// Creates a new slugger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates the next anchor id for the given heading text.
    pub fn next_slug(&mut self, text: &str) -> String {
        let mut slug = slugify(text);
        let entry = self.counts.entry(slug.clone()).or_insert(0);
        if *entry > 0 {
            slug.push_str(&format!("-{}", *entry));
        }
        *entry += 1;
        slug
    }
}

fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for ch in text.chars() {
        if ch.is_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            for lower in ch.to_lowercase() {
                slug.push(lower);
            }
        } else {
            pending_hyphen = true;
        }
    }

    if slug.is_empty() {
        slug.push_str("section");
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_hyphenates() {
        let mut slugger = Slugger::new();
        assert_eq!(slugger.next_slug("Sub sub header6"), "sub-sub-header6");
    }

    #[test]
    fn punctuation_runs_collapse_to_single_hyphen() {
        let mut slugger = Slugger::new();
        assert_eq!(
            slugger.next_slug("Active Directory B2C: WordPress plugin (OpenIDConnect)"),
            "active-directory-b2c-wordpress-plugin-openidconnect"
        );
    }

    #[test]
    fn leading_and_trailing_punctuation_trimmed() {
        let mut slugger = Slugger::new();
        assert_eq!(slugger.next_slug("  Hello, world!  "), "hello-world");
    }

    #[test]
    fn repeated_headings_get_numeric_suffixes() {
        let mut slugger = Slugger::new();
        assert_eq!(slugger.next_slug("Overview"), "overview");
        assert_eq!(slugger.next_slug("Overview"), "overview-1");
        assert_eq!(slugger.next_slug("Overview"), "overview-2");
    }

    #[test]
    fn symbol_only_heading_falls_back() {
        let mut slugger = Slugger::new();
        assert_eq!(slugger.next_slug("!!!"), "section");
    }

    #[test]
    fn unicode_letters_preserved() {
        let mut slugger = Slugger::new();
        assert_eq!(slugger.next_slug("Héllo Wörld"), "héllo-wörld");
    }
}
