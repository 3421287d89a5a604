#![deny(missing_docs)]
//! mdjson core: heading tree reconstruction, front-matter metadata, and
//! code-language normalization for the Markdown-to-JSON pipeline.

/// Core error types.
pub mod error;
/// Front-matter line parsing and metadata validation.
pub mod frontmatter;
/// Heading tree construction and compression.
pub mod headings;
/// Code-language moniker normalization.
pub mod language;
/// Markdown parsing options and markdown-rs adapter.
pub mod parse;
/// Anchor id generation for headings.
pub mod slug;

pub use error::{ConvertError, SourceLocation};
pub use frontmatter::{Metadata, RESERVED_KEYS, parse_front_matter, validate_metadata};
pub use headings::{Header, HeadingOccurrence, HeadingTree, build_heading_tree};
pub use language::{CodeLanguage, UNKNOWN_LANGUAGE, normalize_language};
pub use parse::{ParseOptions, parse_mdast};
pub use slug::Slugger;
