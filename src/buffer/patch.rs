use std::time::Instant;

/// A single recorded edit: what was removed and what was inserted at a
/// byte offset.
///
/// Patches are produced by [`GapBuffer`](super::GapBuffer) edits and drained
/// by an undo/sync consumer via `flush_patches`. A pure insert has
/// `removed_len == 0`; a pure delete has an empty `inserted_text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    /// Byte offset where the edit occurred.
    pub start: usize,
    /// Number of bytes removed (0 for a pure insert).
    pub removed_len: usize,
    /// Text that was inserted (empty for a pure delete).
    pub inserted_text: String,
    /// When the patch was created or last extended by coalescing.
    pub timestamp: Instant,
}

impl Patch {
    fn new(start: usize, removed_len: usize, inserted: &str) -> Self {
        Self {
            start,
            removed_len,
            inserted_text: inserted.to_string(),
            timestamp: Instant::now(),
        }
    }

    /// Whether this patch is a pure insert.
    pub fn is_insert(&self) -> bool {
        self.removed_len == 0 && !self.inserted_text.is_empty()
    }

    /// Whether this patch is a pure delete.
    pub fn is_delete(&self) -> bool {
        self.removed_len > 0 && self.inserted_text.is_empty()
    }
}

/// Accumulates pending patches, coalescing adjacent edits of the same kind.
///
/// Two merge rules apply, both against the *last* pending patch only:
/// consecutive typing (a pure insert continuing exactly where the previous
/// insert ended) appends to it, and consecutive backspacing (a pure delete
/// ending exactly where the previous delete started) extends it leftward.
/// An insert followed by a delete at the same spot is never synthesized
/// into a replace patch; consumers rely on patches reflecting raw
/// insert/delete semantics.
#[derive(Debug, Default, Clone)]
pub struct PatchLog {
    pending: Vec<Patch>,
}

impl PatchLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one edit, merging into the last pending patch when adjacent.
    pub fn record(&mut self, start: usize, removed_len: usize, inserted: &str) {
        if let Some(last) = self.pending.last_mut() {
            // Consecutive insert at the end of the last insert.
            if removed_len == 0
                && last.removed_len == 0
                && start == last.start + last.inserted_text.len()
            {
                last.inserted_text.push_str(inserted);
                last.timestamp = Instant::now();
                return;
            }

            // Consecutive delete (backspace) immediately before the last delete.
            if inserted.is_empty()
                && last.inserted_text.is_empty()
                && start + removed_len == last.start
            {
                last.start = start;
                last.removed_len += removed_len;
                last.timestamp = Instant::now();
                return;
            }
        }

        self.pending.push(Patch::new(start, removed_len, inserted));
    }

    /// Return all pending patches in insertion order and clear the log.
    pub fn flush(&mut self) -> Vec<Patch> {
        std::mem::take(&mut self.pending)
    }

    /// Whether unflushed patches exist.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Discard all pending patches without returning them.
    pub fn discard(&mut self) {
        self.pending.clear();
    }
}
