//! mdast to HTML rendering.
//!
//! A recursive `render_node` walk over a mutable [`Context`]. Headings get
//! auto-generated anchor ids and are recorded in document order for the
//! table-of-contents builder; code blocks route through the pluggable
//! [`CodeRenderer`] so decoration can be substituted without touching the
//! rest of the renderer.

use markdown::mdast::{AlignKind, Node};
use mdjson_core::{HeadingOccurrence, Slugger};
use std::collections::HashMap;

use crate::code_block::CodeRenderer;

/// Escapes text content for HTML output.
pub(crate) fn escape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escapes a string for use in an HTML attribute value.
pub(crate) fn escape_attr(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}

/// Result of rendering a document tree.
#[derive(Debug)]
pub struct RenderOutput {
    /// Rendered HTML.
    pub html: String,
    /// Heading occurrences in document order.
    pub headings: Vec<HeadingOccurrence>,
    /// Raw front-matter text, when the document had any.
    pub front_matter: Option<String>,
}

/// A link/image definition collected before rendering, keyed by its
/// normalized identifier.
#[derive(Debug, Clone)]
struct LinkDefinition {
    url: String,
    title: Option<String>,
}

/// Rendering state threaded through the node walk.
struct Context<'a> {
    out: String,
    slugger: Slugger,
    headings: Vec<HeadingOccurrence>,
    front_matter: Option<String>,
    code_renderer: &'a dyn CodeRenderer,
    tight_lists: Vec<bool>,
    definitions: HashMap<String, LinkDefinition>,
}

impl<'a> Context<'a> {
    fn new(code_renderer: &'a dyn CodeRenderer) -> Self {
        Self {
            out: String::new(),
            slugger: Slugger::new(),
            headings: Vec::new(),
            front_matter: None,
            code_renderer,
            tight_lists: Vec::new(),
            definitions: HashMap::new(),
        }
    }

    fn push_raw(&mut self, s: &str) {
        self.out.push_str(s);
    }

    fn push_text(&mut self, s: &str) {
        self.out.push_str(&escape_text(s));
    }

    fn push_attr(&mut self, s: &str) {
        self.out.push_str(&escape_attr(s));
    }

    fn in_tight_list(&self) -> bool {
        self.tight_lists.last().copied().unwrap_or(false)
    }
}

/// Renders a parsed document tree to HTML.
pub fn render_document(root: &Node, code_renderer: &dyn CodeRenderer) -> RenderOutput {
    let mut ctx = Context::new(code_renderer);
    collect_definitions(root, &mut ctx.definitions);
    render_node(root, &mut ctx);
    RenderOutput {
        html: ctx.out,
        headings: ctx.headings,
        front_matter: ctx.front_matter,
    }
}

/// Walks the tree up front so reference-style links and images can resolve
/// regardless of where their definition appears in the document.
fn collect_definitions(node: &Node, definitions: &mut HashMap<String, LinkDefinition>) {
    if let Node::Definition(def) = node {
        definitions
            .entry(def.identifier.clone())
            .or_insert_with(|| LinkDefinition {
                url: def.url.clone(),
                title: def.title.clone(),
            });
    }
    if let Some(children) = node.children() {
        for child in children {
            collect_definitions(child, definitions);
        }
    }
}

/// Heading text for slugs and table-of-contents entries: the concatenated
/// plain text of the heading's inline children.
fn heading_text(nodes: &[Node]) -> String {
    let mut text = String::new();
    for node in nodes {
        collect_text(node, &mut text);
    }
    text.trim().to_string()
}

fn collect_text(node: &Node, buffer: &mut String) {
    match node {
        Node::Text(text) => buffer.push_str(&text.value),
        Node::InlineCode(code) => buffer.push_str(&code.value),
        Node::Strong(n) => collect_child_text(&n.children, buffer),
        Node::Emphasis(n) => collect_child_text(&n.children, buffer),
        Node::Delete(n) => collect_child_text(&n.children, buffer),
        Node::Link(n) => collect_child_text(&n.children, buffer),
        Node::LinkReference(n) => collect_child_text(&n.children, buffer),
        // Images and the like contribute no text.
        _ => {}
    }
}

fn collect_child_text(nodes: &[Node], buffer: &mut String) {
    for node in nodes {
        collect_text(node, buffer);
    }
}

/// Renders a heading with an auto-generated anchor id, recording the
/// occurrence for the table-of-contents tree.
fn render_heading(heading: &markdown::mdast::Heading, ctx: &mut Context) {
    let text = heading_text(&heading.children);
    let slug = ctx.slugger.next_slug(&text);
    ctx.headings.push(HeadingOccurrence {
        level: heading.depth,
        text: text.clone(),
        id: slug.clone(),
    });

    ctx.push_raw(&format!("<h{} id=\"{}\">", heading.depth, slug));
    for child in &heading.children {
        render_node(child, ctx);
    }
    ctx.push_raw(&format!("</h{}>\n", heading.depth));
}

/// Renders a paragraph, suppressing the `<p>` wrapper in tight lists.
fn render_paragraph(para: &markdown::mdast::Paragraph, ctx: &mut Context) {
    let tight = ctx.in_tight_list();
    if !tight {
        ctx.push_raw("<p>");
    }
    for child in &para.children {
        render_node(child, ctx);
    }
    if !tight {
        ctx.push_raw("</p>\n");
    }
}

fn render_anchor(url: &str, title: Option<&str>, children: &[Node], ctx: &mut Context) {
    ctx.push_raw(r#"<a href=""#);
    ctx.push_attr(url);
    ctx.push_raw(r#"""#);
    if let Some(title) = title {
        ctx.push_raw(r#" title=""#);
        ctx.push_attr(title);
        ctx.push_raw(r#"""#);
    }
    ctx.push_raw(">");
    for child in children {
        render_node(child, ctx);
    }
    ctx.push_raw("</a>");
}

fn render_img(url: &str, alt: &str, title: Option<&str>, ctx: &mut Context) {
    ctx.push_raw(r#"<img src=""#);
    ctx.push_attr(url);
    ctx.push_raw(r#"" alt=""#);
    ctx.push_attr(alt);
    ctx.push_raw(r#"""#);
    if let Some(title) = title {
        ctx.push_raw(r#" title=""#);
        ctx.push_attr(title);
        ctx.push_raw(r#"""#);
    }
    ctx.push_raw(" />");
}

/// Renders a reference-style link by resolving its definition. A dangling
/// reference degrades to its inner content.
fn render_link_reference(linkref: &markdown::mdast::LinkReference, ctx: &mut Context) {
    match ctx.definitions.get(&linkref.identifier).cloned() {
        Some(def) => render_anchor(&def.url, def.title.as_deref(), &linkref.children, ctx),
        None => {
            for child in &linkref.children {
                render_node(child, ctx);
            }
        }
    }
}

/// Renders a reference-style image by resolving its definition. A dangling
/// reference degrades to its alt text.
fn render_image_reference(imgref: &markdown::mdast::ImageReference, ctx: &mut Context) {
    match ctx.definitions.get(&imgref.identifier).cloned() {
        Some(def) => render_img(&def.url, &imgref.alt, def.title.as_deref(), ctx),
        None => ctx.push_text(&imgref.alt),
    }
}

fn render_list(list: &markdown::mdast::List, ctx: &mut Context) {
    let tag = if list.ordered { "ol" } else { "ul" };
    match list.start {
        Some(start) if list.ordered && start != 1 => {
            ctx.push_raw(&format!("<{} start=\"{}\">\n", tag, start));
        }
        _ => ctx.push_raw(&format!("<{}>\n", tag)),
    }

    ctx.tight_lists.push(!list.spread);
    for child in &list.children {
        render_node(child, ctx);
    }
    ctx.tight_lists.pop();

    ctx.push_raw(&format!("</{}>\n", tag));
}

fn render_list_item(item: &markdown::mdast::ListItem, ctx: &mut Context) {
    ctx.push_raw("<li>");
    for child in &item.children {
        render_node(child, ctx);
    }
    ctx.push_raw("</li>\n");
}

fn render_table(table: &markdown::mdast::Table, ctx: &mut Context) {
    ctx.push_raw("<table>\n<thead>\n");
    if let Some(Node::TableRow(row)) = table.children.first() {
        render_table_row(row, ctx, true, &table.align);
    }
    ctx.push_raw("</thead>\n");

    if table.children.len() > 1 {
        ctx.push_raw("<tbody>\n");
        for row in table.children.iter().skip(1) {
            if let Node::TableRow(r) = row {
                render_table_row(r, ctx, false, &table.align);
            }
        }
        ctx.push_raw("</tbody>\n");
    }

    ctx.push_raw("</table>\n");
}

fn render_table_row(
    row: &markdown::mdast::TableRow,
    ctx: &mut Context,
    is_header: bool,
    aligns: &[AlignKind],
) {
    ctx.push_raw("<tr>\n");
    for (i, cell) in row.children.iter().enumerate() {
        if let Node::TableCell(c) = cell {
            let tag = if is_header { "th" } else { "td" };
            let align_attr = match aligns.get(i) {
                Some(AlignKind::Left) => " align=\"left\"",
                Some(AlignKind::Right) => " align=\"right\"",
                Some(AlignKind::Center) => " align=\"center\"",
                _ => "",
            };
            ctx.push_raw(&format!("<{}{}>", tag, align_attr));
            for child in &c.children {
                render_node(child, ctx);
            }
            ctx.push_raw(&format!("</{}>\n", tag));
        }
    }
    ctx.push_raw("</tr>\n");
}

fn render_blockquote(quote: &markdown::mdast::Blockquote, ctx: &mut Context) {
    ctx.push_raw("<blockquote>\n");
    for child in &quote.children {
        render_node(child, ctx);
    }
    ctx.push_raw("</blockquote>\n");
}

/// Recursively renders an AST node to HTML, updating the context state.
fn render_node(node: &Node, ctx: &mut Context) {
    match node {
        Node::Root(root) => {
            for child in &root.children {
                render_node(child, ctx);
            }
        }
        // Front-matter is captured for the metadata pipeline, never rendered.
        Node::Yaml(yaml) => ctx.front_matter = Some(yaml.value.clone()),
        Node::Text(text) => ctx.push_text(&text.value),
        Node::Paragraph(para) => render_paragraph(para, ctx),
        Node::Heading(heading) => render_heading(heading, ctx),
        Node::Code(code) => {
            ctx.code_renderer.render(code, &mut ctx.out);
            ctx.push_raw("\n");
        }
        Node::InlineCode(code) => {
            ctx.push_raw("<code>");
            ctx.push_text(&code.value);
            ctx.push_raw("</code>");
        }
        Node::Strong(strong) => {
            ctx.push_raw("<strong>");
            for child in &strong.children {
                render_node(child, ctx);
            }
            ctx.push_raw("</strong>");
        }
        Node::Emphasis(emphasis) => {
            ctx.push_raw("<em>");
            for child in &emphasis.children {
                render_node(child, ctx);
            }
            ctx.push_raw("</em>");
        }
        Node::Delete(delete) => {
            ctx.push_raw("<del>");
            for child in &delete.children {
                render_node(child, ctx);
            }
            ctx.push_raw("</del>");
        }
        Node::Link(link) => {
            render_anchor(&link.url, link.title.as_deref(), &link.children, ctx);
        }
        Node::Image(img) => render_img(&img.url, &img.alt, img.title.as_deref(), ctx),
        Node::LinkReference(linkref) => render_link_reference(linkref, ctx),
        Node::ImageReference(imgref) => render_image_reference(imgref, ctx),
        // Definitions were collected before rendering and emit no markup.
        Node::Definition(_) => {}
        Node::List(list) => render_list(list, ctx),
        Node::ListItem(item) => render_list_item(item, ctx),
        Node::Blockquote(quote) => render_blockquote(quote, ctx),
        Node::Table(table) => render_table(table, ctx),
        Node::TableRow(_) => {}
        Node::TableCell(_) => {}
        Node::ThematicBreak(_) => ctx.push_raw("<hr />\n"),
        Node::Break(_) => ctx.push_raw("<br />\n"),
        Node::Html(html) => {
            // Documents come from an untrusted-by-default pipeline; raw
            // HTML is escaped rather than emitted.
            log::debug!("Raw HTML in markdown will be escaped: {}", html.value);
            ctx.push_text(&html.value);
        }
        _ => {
            log::warn!("Unhandled markdown node type: {:?}", node);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code_block::DecoratedCodeRenderer;
    use mdjson_core::{ParseOptions, parse_mdast};

    fn render(input: &str) -> RenderOutput {
        let root = parse_mdast(input, &ParseOptions::document()).expect("parse should succeed");
        render_document(&root, &DecoratedCodeRenderer::default())
    }

    #[test]
    fn headings_get_anchor_ids_and_are_recorded() {
        let output = render("# Overview\n\n## Getting Started");
        assert!(output.html.contains(r#"<h1 id="overview">Overview</h1>"#));
        assert!(
            output
                .html
                .contains(r#"<h2 id="getting-started">Getting Started</h2>"#)
        );
        assert_eq!(output.headings.len(), 2);
        assert_eq!(output.headings[0].level, 1);
        assert_eq!(output.headings[0].id, "overview");
        assert_eq!(output.headings[1].level, 2);
        assert_eq!(output.headings[1].text, "Getting Started");
    }

    #[test]
    fn duplicate_heading_ids_deduplicated() {
        let output = render("# Intro\n\n# Intro");
        assert!(output.html.contains(r#"id="intro""#));
        assert!(output.html.contains(r#"id="intro-1""#));
    }

    #[test]
    fn front_matter_captured_not_rendered() {
        let output = render("---\ntitle: x\n---\n\nBody");
        assert_eq!(output.front_matter.as_deref(), Some("title: x"));
        assert!(!output.html.contains("title"));
        assert!(output.html.contains("<p>Body</p>"));
    }

    #[test]
    fn text_is_escaped() {
        let output = render("a < b & c > d");
        assert!(output.html.contains("a &lt; b &amp; c &gt; d"));
    }

    #[test]
    fn tight_list_suppresses_paragraphs() {
        let output = render("- one\n- two");
        assert!(output.html.contains("<li>one</li>"));
        assert!(!output.html.contains("<li><p>"));
    }

    #[test]
    fn loose_list_keeps_paragraphs() {
        let output = render("- one\n\n- two");
        assert!(output.html.contains("<li><p>one</p>"));
    }

    #[test]
    fn table_renders_with_alignment() {
        let output = render("| a | b |\n| :- | -: |\n| 1 | 2 |");
        assert!(output.html.contains("<table>"));
        assert!(output.html.contains(r#"<th align="left">a</th>"#));
        assert!(output.html.contains(r#"<th align="right">b</th>"#));
        assert!(output.html.contains("<td align=\"left\">1</td>"));
    }

    #[test]
    fn fenced_code_with_moniker_is_decorated() {
        let output = render("```js\nlet x = 1;\n```");
        assert!(output.html.contains(r#"data-lang="JavaScript""#));
        assert!(output.html.contains(r#"<code class="language-js">let x = 1;"#));
    }

    #[test]
    fn indented_code_uses_default_path() {
        let output = render("    indented code");
        assert!(output.html.contains("<pre><code>indented code"));
        assert!(!output.html.contains("mdjson-code"));
    }

    #[test]
    fn inline_markup_renders() {
        let output = render("*em* **strong** `code` [link](https://example.com) ~~gone~~");
        assert!(output.html.contains("<em>em</em>"));
        assert!(output.html.contains("<strong>strong</strong>"));
        assert!(output.html.contains("<code>code</code>"));
        assert!(
            output
                .html
                .contains(r#"<a href="https://example.com">link</a>"#)
        );
        assert!(output.html.contains("<del>gone</del>"));
    }

    #[test]
    fn raw_html_is_escaped() {
        let output = render("before\n\n<div onclick=\"x()\">raw</div>\n\nafter");
        assert!(output.html.contains("&lt;div onclick="));
        assert!(!output.html.contains("<div onclick"));
        assert!(output.html.contains("<p>after</p>"));
    }

    #[test]
    fn reference_link_resolves_definition() {
        let output = render("See [the docs][1] here.\n\n[1]: https://example.com\n");
        assert!(
            output
                .html
                .contains(r#"<a href="https://example.com">the docs</a>"#)
        );
    }

    #[test]
    fn reference_image_resolves_definition() {
        let output = render("![logo][img]\n\n[img]: /logo.png \"Logo\"\n");
        assert!(
            output
                .html
                .contains(r#"<img src="/logo.png" alt="logo" title="Logo" />"#)
        );
    }

    #[test]
    fn definition_emits_no_markup() {
        let output = render("[1]: https://example.com\n");
        assert!(!output.html.contains("example.com"));
    }

    #[test]
    fn heading_with_reference_link_keeps_text() {
        let output = render("# See [the docs][1]\n\n[1]: https://example.com\n");
        assert_eq!(output.headings[0].text, "See the docs");
        assert_eq!(output.headings[0].id, "see-the-docs");
    }

    #[test]
    fn image_attributes_escaped() {
        let output = render(r#"![an "alt"](pic.png "the title")"#);
        assert!(
            output
                .html
                .contains(r#"<img src="pic.png" alt="an &quot;alt&quot;" title="the title" />"#)
        );
    }
}
