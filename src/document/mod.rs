//! Markdown document parsing.
//!
//! This module handles:
//! - Splitting a text snapshot into block elements (headings, paragraphs,
//!   fenced code, lists, blockquotes, rules)
//! - Inline formatting (bold, italic, code spans) with HTML escaping
//!
//! Parsing is two-phase: [`parse_blocks`] resolves block structure first,
//! then the renderer applies [`format_inline`] to block content. Block
//! grammar always wins over inline grammar, so a `*` inside a code fence
//! is never emphasis.

mod blocks;
mod inline;

pub use blocks::{Block, parse_blocks};
pub use inline::{escape, format_inline};
