use comrak::{Options, markdown_to_html};

use super::MarkdownRenderer;

/// Full-CommonMark rendering backed by comrak.
///
/// The interesting code lives in comrak; this adapter only carries the
/// option set and satisfies the [`MarkdownRenderer`] contract so that
/// callers can swap it with [`ReducedRenderer`](super::ReducedRenderer)
/// without branching on the concrete type.
#[derive(Debug, Default)]
pub struct CommonMarkRenderer;

impl CommonMarkRenderer {
    pub const fn new() -> Self {
        Self
    }
}

impl MarkdownRenderer for CommonMarkRenderer {
    fn render_to_html(&self, markdown: &str) -> String {
        let mut options = Options::default();

        // GFM extensions on top of base CommonMark
        options.extension.strikethrough = true;
        options.extension.table = true;
        options.extension.autolink = true;
        options.extension.tasklist = true;

        markdown_to_html(markdown, &options)
    }

    fn parser_name(&self) -> &'static str {
        "comrak"
    }

    fn is_full_commonmark(&self) -> bool {
        true
    }
}
