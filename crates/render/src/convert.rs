//! Document conversion: markdown text in, JSON artifact out.
//!
//! Orchestrates the pipeline: parse to mdast, render HTML (collecting
//! heading occurrences and front-matter on the way), build and compress the
//! heading tree, validate metadata, and serialize the combined record.

use mdjson_core::{
    ConvertError, Header, Metadata, ParseOptions, build_heading_tree, parse_front_matter,
    parse_mdast, validate_metadata,
};
use serde::Serialize;

use crate::code_block::{CodeRenderer, DecoratedCodeRenderer};
use crate::html::render_document;

/// Converted document artifact: rendered HTML, heading tree, and metadata.
#[derive(Debug, Serialize)]
pub struct MarkdownArtifact {
    /// Rendered HTML body.
    pub html: String,
    /// Hierarchical table of contents derived from heading markers.
    pub headings: Vec<Header>,
    /// Validated front-matter metadata; the reserved keys always lead.
    pub metadata: Metadata,
}

/// Converts a markdown document into its output artifact using the
/// decorated code block renderer.
pub fn convert_document(input: &str) -> Result<MarkdownArtifact, ConvertError> {
    convert_document_with(input, &DecoratedCodeRenderer::default())
}

/// Converts a markdown document with a caller-supplied code block renderer.
pub fn convert_document_with(
    input: &str,
    code_renderer: &dyn CodeRenderer,
) -> Result<MarkdownArtifact, ConvertError> {
    let root = parse_mdast(input, &ParseOptions::document())?;
    let output = render_document(&root, code_renderer);

    let tree = build_heading_tree(&output.headings);
    let metadata = validate_metadata(
        output
            .front_matter
            .as_deref()
            .map(parse_front_matter)
            .unwrap_or_default(),
    );

    Ok(MarkdownArtifact {
        html: output.html,
        headings: tree.compress(),
        metadata,
    })
}

/// Converts a markdown document to pretty-printed JSON text.
///
/// Empty input short-circuits to an empty string.
pub fn convert_to_json(input: &str) -> Result<String, ConvertError> {
    if input.is_empty() {
        return Ok(String::new());
    }
    let artifact = convert_document(input)?;
    Ok(serde_json::to_string_pretty(&artifact)?)
}
