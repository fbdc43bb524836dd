// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. render::ReducedRenderer)
    clippy::module_name_repetitions
)]

//! # Inkdown
//!
//! Gap-buffer text storage and markdown preview rendering.
//!
//! Inkdown is the editing core of a markdown editor: a byte-oriented
//! [`GapBuffer`](buffer::GapBuffer) with amortized O(1) local edits,
//! coalesced change tracking for undo/sync consumers, and a pluggable
//! markdown-to-HTML renderer with a built-in reduced grammar and a
//! comrak-backed full-CommonMark implementation.
//!
//! ## Data flow
//!
//! Raw text flows into the buffer, which owns the bytes and records every
//! edit as a patch. Rendering takes a full snapshot (`buffer.text()`)
//! through the block parser and inline formatter to an HTML string;
//! patches flow independently to whoever drains them.
//!
//! All buffer offsets are raw byte positions and all out-of-range input is
//! clamped, so no core operation fails.
//!
//! ## Modules
//!
//! - [`buffer`]: Gap-buffer storage, line/offset mapping, patch log
//! - [`document`]: Block and inline markdown parsing
//! - [`render`]: The renderer contract and its two implementations
//! - [`config`]: Persisted CLI defaults

pub mod buffer;
pub mod config;
pub mod document;
pub mod render;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::buffer::{GapBuffer, Patch};
    pub use crate::document::{Block, parse_blocks};
    pub use crate::render::{
        CommonMarkRenderer, MarkdownRenderer, ReducedRenderer, RendererChoice, create_renderer,
    };
}
