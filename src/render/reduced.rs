use super::MarkdownRenderer;
use crate::document::{Block, escape, format_inline, parse_blocks};

/// The built-in reduced-grammar renderer.
///
/// Covers the common markdown elements (ATX headings, paragraphs, fenced
/// code, flat lists, blockquotes, rules, bold/italic/code spans) with a
/// deterministic two-phase parse. It is deliberately not full CommonMark;
/// use [`CommonMarkRenderer`](super::CommonMarkRenderer) for spec
/// conformance.
#[derive(Debug, Default)]
pub struct ReducedRenderer;

impl ReducedRenderer {
    pub const fn new() -> Self {
        Self
    }

    /// Render one block to its HTML fragment.
    ///
    /// Blocks map independently of their siblings; a full document render
    /// is the concatenation of per-block fragments in parse order.
    fn render_block(&self, block: &Block) -> String {
        match block {
            Block::Heading { level, content } => {
                format!("<h{level}>{}</h{level}>\n", format_inline(content))
            }
            Block::Paragraph { content } => {
                format!("<p>{}</p>\n", format_inline(content))
            }
            Block::FencedCode { language, content } => {
                // Code is escaped but never inline-formatted.
                let mut html = String::from("<pre><code");
                if !language.is_empty() {
                    html.push_str(" class=\"language-");
                    html.push_str(&escape(language));
                    html.push('"');
                }
                html.push('>');
                html.push_str(&escape(content));
                html.push_str("</code></pre>\n");
                html
            }
            Block::UnorderedList { items } => Self::render_list("ul", items),
            Block::OrderedList { items } => Self::render_list("ol", items),
            Block::Blockquote { content } => {
                // Quoted text is a document of its own; recurse one level
                // per nesting depth in the source.
                format!("<blockquote>\n{}</blockquote>\n", self.render_to_html(content))
            }
            Block::HorizontalRule => "<hr>\n".to_string(),
        }
    }

    fn render_list(tag: &str, items: &[String]) -> String {
        let mut html = format!("<{tag}>\n");
        for item in items {
            html.push_str("  <li>");
            html.push_str(&format_inline(item));
            html.push_str("</li>\n");
        }
        html.push_str(&format!("</{tag}>\n"));
        html
    }
}

impl MarkdownRenderer for ReducedRenderer {
    fn render_to_html(&self, markdown: &str) -> String {
        let blocks = parse_blocks(markdown);
        tracing::debug!(blocks = blocks.len(), bytes = markdown.len(), "reduced render");

        let mut html = String::with_capacity(markdown.len() * 2);
        for block in &blocks {
            html.push_str(&self.render_block(block));
        }
        html
    }

    fn parser_name(&self) -> &'static str {
        "reduced"
    }

    fn is_full_commonmark(&self) -> bool {
        false
    }
}
