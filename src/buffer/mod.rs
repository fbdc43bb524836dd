//! Gap-buffer text storage with change tracking.
//!
//! [`GapBuffer`] is the system of record for document bytes: a byte array
//! with a movable gap that absorbs the cost of local edits. Every edit is
//! recorded as a [`Patch`] and coalesced with its neighbor where the edits
//! are positionally adjacent, so an undo/sync consumer drains a compact
//! stream of changes rather than one record per keystroke.

mod gap;
mod patch;

pub use gap::GapBuffer;
pub use patch::{Patch, PatchLog};
