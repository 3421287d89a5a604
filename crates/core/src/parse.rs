//! Markdown parsing options and the markdown-rs adapter.

use crate::{ConvertError, SourceLocation};
use markdown::mdast::Node;
use markdown::message::{Message, Place};

/// Parser options for building markdown-rs parse options.
#[derive(Clone, Copy, Debug)]
pub struct ParseOptions {
    /// Enable YAML front-matter parsing.
    pub frontmatter: bool,
    /// Enable GFM pipe tables.
    pub tables: bool,
    /// Enable GFM strikethrough.
    pub strikethrough: bool,
    /// Enable indented code blocks.
    pub code_indented: bool,
}

impl ParseOptions {
    /// Defaults for documentation content (front-matter and pipe tables on).
    pub const fn document() -> Self {
        Self {
            frontmatter: true,
            tables: true,
            strikethrough: true,
            code_indented: true,
        }
    }

    /// Convert to markdown-rs `ParseOptions`.
    pub fn to_markdown(self) -> markdown::ParseOptions {
        let mut constructs = markdown::Constructs {
            frontmatter: self.frontmatter,
            code_indented: self.code_indented,
            ..Default::default()
        };

        if self.tables {
            constructs.gfm_table = true;
        }
        if self.strikethrough {
            constructs.gfm_strikethrough = true;
        }

        markdown::ParseOptions {
            constructs,
            ..markdown::ParseOptions::default()
        }
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::document()
    }
}

/// Parse markdown into an mdast tree.
pub fn parse_mdast(input: &str, options: &ParseOptions) -> Result<Node, ConvertError> {
    markdown::to_mdast(input, &options.to_markdown()).map_err(|err| {
        ConvertError::MarkdownAdapter {
            message: err.to_string(),
            location: message_location(&err),
        }
    })
}

fn message_location(message: &Message) -> SourceLocation {
    match &message.place {
        Some(place) => match place.as_ref() {
            Place::Point(point) => SourceLocation::new(point.line, point.column),
            Place::Position(position) => {
                SourceLocation::new(position.start.line, position.start.column)
            }
        },
        None => SourceLocation::new(1, 1),
    }
}
