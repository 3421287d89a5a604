//! Code block rendering with language decoration.
//!
//! The default renderer emits plain `<pre><code>` markup. The decorating
//! renderer wraps that markup in a labeled container carrying the canonical
//! language name, the original moniker, and an unknown-language flag, for
//! client-side highlighting and copy affordances. Blocks without a language
//! moniker (indented code never carries one) delegate to the fallback
//! unchanged.

use markdown::mdast::Code;
use mdjson_core::CodeLanguage;

use crate::html::{escape_attr, escape_text};

/// Strategy for turning a code block into HTML.
pub trait CodeRenderer {
    /// Append the HTML for `code` to `out`.
    fn render(&self, code: &Code, out: &mut String);
}

/// Default code block markup: `<pre><code class="language-…">`.
#[derive(Debug, Default)]
pub struct PlainCodeRenderer;

impl CodeRenderer for PlainCodeRenderer {
    fn render(&self, code: &Code, out: &mut String) {
        out.push_str("<pre><code");
        if let Some(lang) = code.lang.as_deref() {
            out.push_str(" class=\"language-");
            out.push_str(&escape_attr(lang));
            out.push('"');
        }
        out.push('>');
        out.push_str(&escape_text(&code.value));
        out.push_str("\n</code></pre>");
    }
}

/// Decorating renderer: wraps the fallback's markup in a labeled container.
///
/// The fallback output is appended verbatim; the decorator never re-renders
/// or re-escapes code content.
pub struct DecoratedCodeRenderer {
    fallback: Box<dyn CodeRenderer>,
}

impl DecoratedCodeRenderer {
    /// Wrap `fallback`, decorating blocks that carry a language moniker.
    pub fn new(fallback: Box<dyn CodeRenderer>) -> Self {
        Self { fallback }
    }
}

impl Default for DecoratedCodeRenderer {
    fn default() -> Self {
        Self::new(Box::new(PlainCodeRenderer))
    }
}

impl CodeRenderer for DecoratedCodeRenderer {
    fn render(&self, code: &Code, out: &mut String) {
        let Some(moniker) = code.lang.as_deref().filter(|lang| !lang.is_empty()) else {
            self.fallback.render(code, out);
            return;
        };

        let language = CodeLanguage::resolve(moniker);
        out.push_str("<div class=\"mdjson-code\" data-lang=\"");
        out.push_str(&escape_attr(language.canonical));
        out.push_str("\" data-original-lang=\"");
        out.push_str(&escape_attr(&language.moniker));
        out.push_str("\" data-lang-unknown=\"");
        out.push_str(if language.is_known() { "false" } else { "true" });
        out.push_str("\">\n<div class=\"mdjson-code-header\">\n<strong>");
        out.push_str(language.canonical);
        out.push_str("</strong>\n<button>Copy</button>\n</div>\n");
        self.fallback.render(code, out);
        out.push_str("\n</div>");
    }
}
