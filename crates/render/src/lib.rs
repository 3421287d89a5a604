#![deny(missing_docs)]
//! mdjson render: mdast HTML rendering, code block decoration, and JSON assembly.

/// Code block rendering strategies.
pub mod code_block;
/// Document conversion entry points.
pub mod convert;
/// mdast to HTML rendering.
pub mod html;

pub use code_block::{CodeRenderer, DecoratedCodeRenderer, PlainCodeRenderer};
pub use convert::{MarkdownArtifact, convert_document, convert_document_with, convert_to_json};
pub use html::{RenderOutput, render_document};
