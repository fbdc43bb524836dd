//! Markdown-to-HTML rendering.
//!
//! [`MarkdownRenderer`] is the capability the rest of the system consumes:
//! render markdown text to HTML, report the implementation's identity and
//! its conformance level. Two interchangeable implementations exist — the
//! built-in reduced-grammar renderer and a comrak-backed full-CommonMark
//! one. Callers pick one through [`create_renderer`] and hold it as a
//! trait object; the two are behaviorally equivalent at the contract
//! level, not byte-for-byte in output.

mod commonmark;
mod reduced;

pub use commonmark::CommonMarkRenderer;
pub use reduced::ReducedRenderer;

/// The renderer contract consumed by the CLI and embedding layers.
///
/// `render_to_html` never fails: malformed or incomplete markdown degrades
/// gracefully (unterminated fences are flushed, unmatched delimiters stay
/// literal) rather than producing an error.
pub trait MarkdownRenderer {
    /// Render markdown source to an HTML fragment.
    fn render_to_html(&self, markdown: &str) -> String;

    /// Stable identifier for this implementation, for diagnostics.
    fn parser_name(&self) -> &'static str;

    /// Whether this implementation supports the full CommonMark spec.
    fn is_full_commonmark(&self) -> bool;
}

/// Which renderer implementation to use.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RendererChoice {
    /// Built-in reduced grammar; always available, not full CommonMark.
    Reduced,
    /// comrak-backed full CommonMark rendering.
    #[value(name = "commonmark")]
    CommonMark,
}

/// Construct the renderer for an explicit choice.
pub fn create_renderer(choice: RendererChoice) -> Box<dyn MarkdownRenderer> {
    match choice {
        RendererChoice::Reduced => Box::new(ReducedRenderer::new()),
        RendererChoice::CommonMark => Box::new(CommonMarkRenderer::new()),
    }
}

/// The default renderer: full CommonMark, since comrak is always built in.
pub fn default_renderer() -> Box<dyn MarkdownRenderer> {
    create_renderer(RendererChoice::CommonMark)
}
