use thiserror::Error;

/// Source location information for error reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
}

impl SourceLocation {
    /// Create a new source location.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Errors that can occur while converting a document.
///
/// The core algorithms themselves never fail on malformed-but-parseable
/// input; they degrade by dropping, substituting sentinels, or synthesizing
/// placeholders. Only the parsing adapter and output serialization return
/// errors.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// markdown-rs parser error surfaced through the adapter.
    #[error("Parse error at {location}: {message}")]
    MarkdownAdapter {
        /// Error message.
        message: String,
        /// Source location.
        location: SourceLocation,
    },
    /// JSON serialization of the output artifact failed.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
