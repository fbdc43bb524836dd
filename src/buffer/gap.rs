use super::patch::{Patch, PatchLog};

/// Initial storage size for empty buffers.
const DEFAULT_CAPACITY: usize = 4096;
/// Minimum gap to leave after a load or a growth reallocation.
const MIN_GAP: usize = 256;

/// A gap-buffer text store with amortized O(1) local edits.
///
/// Storage is a single byte array logically divided into
/// `[text before gap][gap][text after gap]`. Insertions fill the gap and
/// deletions widen it, so repeated edits near one position cost only the
/// distance the gap has to move. Every edit is recorded as a [`Patch`] for
/// an undo/sync consumer to drain via [`flush_patches`](Self::flush_patches).
///
/// All offsets and lengths are **byte** positions. Out-of-range offsets are
/// clamped rather than rejected, so no operation here fails or panics.
/// Callers working with multi-byte UTF-8 are responsible for keeping
/// offsets on character boundaries; a read that splits a multi-byte
/// sequence yields replacement characters.
#[derive(Clone)]
pub struct GapBuffer {
    storage: Vec<u8>,
    gap_start: usize,
    gap_end: usize,
    patches: PatchLog,
}

impl GapBuffer {
    /// Create an empty buffer with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create an empty buffer with at least the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: vec![0; capacity],
            gap_start: 0,
            gap_end: capacity,
            patches: PatchLog::new(),
        }
    }

    /// Create a buffer holding `text`, with the gap placed after it.
    pub fn from_text(text: &str) -> Self {
        let mut buffer = Self::new();
        buffer.load_from_str(text);
        buffer
    }

    // --- Loading ---

    /// Replace all content with `text`, discarding pending patches.
    ///
    /// Loading is not an edit: it resets the document rather than mutating
    /// it, so no patch is recorded.
    pub fn load_from_str(&mut self, text: &str) {
        self.patches.discard();

        let new_capacity = (text.len() + MIN_GAP).max(DEFAULT_CAPACITY);
        let mut storage = vec![0; new_capacity];
        storage[..text.len()].copy_from_slice(text.as_bytes());

        self.storage = storage;
        self.gap_start = text.len();
        self.gap_end = new_capacity;
        tracing::debug!(bytes = text.len(), capacity = new_capacity, "buffer loaded");
    }

    /// Remove all content, discarding pending patches. Capacity is kept.
    pub fn clear(&mut self) {
        self.gap_start = 0;
        self.gap_end = self.storage.len();
        self.patches.discard();
    }

    // --- Reading ---

    /// The entire text content.
    pub fn text(&self) -> String {
        let mut bytes = Vec::with_capacity(self.len());
        bytes.extend_from_slice(&self.storage[..self.gap_start]);
        bytes.extend_from_slice(&self.storage[self.gap_end..]);
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// A substring of the content, clamped to the valid range.
    ///
    /// Returns an empty string when `start` is past the end. A range that
    /// straddles the gap is spliced from the two text regions; gap bytes are
    /// never visible in the result.
    pub fn text_range(&self, start: usize, len: usize) -> String {
        let text_len = self.len();
        if start >= text_len {
            return String::new();
        }
        let len = len.min(text_len - start);
        if len == 0 {
            return String::new();
        }

        let mut bytes = Vec::with_capacity(len);
        if start < self.gap_start {
            let end_before = (start + len).min(self.gap_start);
            bytes.extend_from_slice(&self.storage[start..end_before]);
            if start + len > self.gap_start {
                // Remainder continues after the gap.
                let after_len = start + len - self.gap_start;
                bytes.extend_from_slice(&self.storage[self.gap_end..self.gap_end + after_len]);
            }
        } else {
            let adjusted = self.gap_end + (start - self.gap_start);
            bytes.extend_from_slice(&self.storage[adjusted..adjusted + len]);
        }
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Text length in bytes, excluding the gap.
    pub fn len(&self) -> usize {
        self.storage.len() - (self.gap_end - self.gap_start)
    }

    /// Whether the buffer contains no text.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // --- Editing ---

    /// Insert `text` at the given byte offset, clamped to `[0, len()]`.
    pub fn insert(&mut self, offset: usize, text: &str) {
        if text.is_empty() {
            return;
        }
        let offset = offset.min(self.len());

        self.ensure_gap_capacity(text.len());
        self.move_gap_to(offset);

        self.storage[self.gap_start..self.gap_start + text.len()]
            .copy_from_slice(text.as_bytes());
        self.gap_start += text.len();

        self.patches.record(offset, 0, text);
    }

    /// Erase up to `len` bytes starting at `offset`.
    ///
    /// Erasure moves the gap to `offset` and widens it over the removed
    /// range; nothing is overwritten. Callers that need the removed text
    /// should read it with [`text_range`](Self::text_range) first — the
    /// recorded patch carries only the removed length.
    pub fn erase(&mut self, offset: usize, len: usize) {
        let text_len = self.len();
        if offset >= text_len || len == 0 {
            return;
        }
        let len = len.min(text_len - offset);

        self.move_gap_to(offset);
        self.gap_end += len;

        self.patches.record(offset, len, "");
    }

    // --- Line/offset mapping ---

    /// The 0-indexed line containing the given byte offset.
    ///
    /// Counts `'\n'` bytes strictly before the (clamped) offset. O(n); the
    /// index is computed on demand, not cached.
    pub fn line_from_offset(&self, offset: usize) -> usize {
        let offset = offset.min(self.len());

        let before = offset.min(self.gap_start);
        let mut line = count_newlines(&self.storage[..before]);

        if offset > self.gap_start {
            let after_end = self.gap_end + (offset - self.gap_start);
            line += count_newlines(&self.storage[self.gap_end..after_end]);
        }
        line
    }

    /// The byte offset of `(line, column)`, clamped to `len()`.
    ///
    /// Scans forward counting newlines until `line` is reached; a line past
    /// the last one resolves to the end of the buffer.
    pub fn offset_from_line(&self, line: usize, column: usize) -> usize {
        if line == 0 && column == 0 {
            return 0;
        }

        let mut current_line = 0;
        let mut offset = 0;

        for &byte in &self.storage[..self.gap_start] {
            if current_line >= line {
                break;
            }
            if byte == b'\n' {
                current_line += 1;
            }
            offset += 1;
        }
        if current_line < line {
            for &byte in &self.storage[self.gap_end..] {
                if current_line >= line {
                    break;
                }
                if byte == b'\n' {
                    current_line += 1;
                }
                offset += 1;
            }
        }

        (offset + column).min(self.len())
    }

    /// Total number of lines: 0 for an empty buffer, otherwise one more
    /// than the number of `'\n'` bytes (a trailing newline opens a final
    /// empty line).
    pub fn line_count(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        1 + count_newlines(&self.storage[..self.gap_start])
            + count_newlines(&self.storage[self.gap_end..])
    }

    // --- Patch management ---

    /// Return and clear the patches accumulated since the last flush.
    ///
    /// Adjacent edits of the same kind arrive pre-coalesced; see
    /// [`PatchLog`](super::patch::PatchLog) for the merge rules.
    pub fn flush_patches(&mut self) -> Vec<Patch> {
        self.patches.flush()
    }

    /// Whether unflushed patches exist.
    pub fn has_pending_patches(&self) -> bool {
        self.patches.has_pending()
    }

    // --- Private helpers ---

    fn gap_size(&self) -> usize {
        self.gap_end - self.gap_start
    }

    /// Move the gap so that `gap_start == position`.
    ///
    /// Shifts only the bytes between the old and new gap location; all
    /// other bytes stay where they are.
    fn move_gap_to(&mut self, position: usize) {
        if position == self.gap_start {
            return;
        }
        let gap_size = self.gap_size();

        if position < self.gap_start {
            // Gap moves left: text in [position, gap_start) shifts right.
            let shift = self.gap_start - position;
            self.storage
                .copy_within(position..self.gap_start, self.gap_end - shift);
        } else {
            // Gap moves right: text after the gap shifts left into it.
            let shift = position - self.gap_start;
            self.storage
                .copy_within(self.gap_end..self.gap_end + shift, self.gap_start);
        }
        self.gap_start = position;
        self.gap_end = position + gap_size;
    }

    /// Grow storage until the gap can hold `required` bytes.
    fn ensure_gap_capacity(&mut self, required: usize) {
        if self.gap_size() >= required {
            return;
        }
        let needed = self.len() + required + MIN_GAP;
        let new_capacity = (self.storage.len() * 2).max(needed);
        self.grow(new_capacity);
    }

    /// Reallocate to `new_capacity`, keeping before-gap bytes at the front
    /// and moving after-gap bytes to the end. `gap_start` is unchanged.
    fn grow(&mut self, new_capacity: usize) {
        let old_capacity = self.storage.len();
        let tail_len = old_capacity - self.gap_end;

        self.storage.resize(new_capacity, 0);
        if tail_len > 0 {
            self.storage
                .copy_within(self.gap_end..old_capacity, new_capacity - tail_len);
        }
        self.gap_end = new_capacity - tail_len;
    }
}

impl Default for GapBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GapBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GapBuffer")
            .field("len", &self.len())
            .field("capacity", &self.storage.len())
            .field("gap", &(self.gap_start..self.gap_end))
            .finish()
    }
}

fn count_newlines(bytes: &[u8]) -> usize {
    bytes.iter().filter(|&&b| b == b'\n').count()
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- Construction and basic queries ---

    #[test]
    fn test_new_buffer_is_empty() {
        let buf = GapBuffer::new();
        assert!(buf.is_empty());
        assert_eq!(buf.len(), 0);
        assert_eq!(buf.text(), "");
    }

    #[test]
    fn test_from_text_preserves_content() {
        let buf = GapBuffer::from_text("hello\nworld");
        assert_eq!(buf.len(), 11);
        assert_eq!(buf.text(), "hello\nworld");
    }

    #[test]
    fn test_load_replaces_content_and_discards_patches() {
        let mut buf = GapBuffer::from_text("old");
        buf.insert(3, "!");
        assert!(buf.has_pending_patches());

        buf.load_from_str("new content");
        assert_eq!(buf.text(), "new content");
        assert!(!buf.has_pending_patches());
    }

    #[test]
    fn test_clear_empties_buffer() {
        let mut buf = GapBuffer::from_text("hello");
        buf.insert(0, "x");
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.text(), "");
        assert!(!buf.has_pending_patches());
    }

    // --- Insertion ---

    #[test]
    fn test_insert_at_start() {
        let mut buf = GapBuffer::from_text("Hello, World!");
        buf.insert(0, "Hi, ");
        assert_eq!(buf.text(), "Hi, Hello, World!");
    }

    #[test]
    fn test_insert_in_middle() {
        let mut buf = GapBuffer::from_text("helloworld");
        buf.insert(5, ", ");
        assert_eq!(buf.text(), "hello, world");
    }

    #[test]
    fn test_insert_at_end() {
        let mut buf = GapBuffer::from_text("hello");
        buf.insert(5, "!");
        assert_eq!(buf.text(), "hello!");
    }

    #[test]
    fn test_insert_past_end_clamps() {
        let mut buf = GapBuffer::from_text("hello");
        buf.insert(999, "!");
        assert_eq!(buf.text(), "hello!");
    }

    #[test]
    fn test_insert_empty_is_noop() {
        let mut buf = GapBuffer::from_text("hello");
        buf.insert(2, "");
        assert_eq!(buf.text(), "hello");
        assert!(!buf.has_pending_patches());
    }

    #[test]
    fn test_insert_larger_than_gap_grows_buffer() {
        let mut buf = GapBuffer::with_capacity(8);
        let big = "x".repeat(10_000);
        buf.insert(0, &big);
        assert_eq!(buf.len(), 10_000);
        assert_eq!(buf.text(), big);
    }

    #[test]
    fn test_growth_preserves_text_on_both_sides_of_gap() {
        let mut buf = GapBuffer::with_capacity(16);
        buf.insert(0, "abcdef");
        // Park the gap in the middle, then force a growth.
        buf.insert(3, &"y".repeat(500));
        let text = buf.text();
        assert!(text.starts_with("abc"));
        assert!(text.ends_with("def"));
        assert_eq!(text.len(), 506);
    }

    // --- Erasure ---

    #[test]
    fn test_erase_range() {
        let mut buf = GapBuffer::from_text("hello, world");
        buf.erase(5, 2);
        assert_eq!(buf.text(), "helloworld");
    }

    #[test]
    fn test_erase_at_start() {
        let mut buf = GapBuffer::from_text("hello");
        buf.erase(0, 2);
        assert_eq!(buf.text(), "llo");
    }

    #[test]
    fn test_erase_past_end_is_noop() {
        let mut buf = GapBuffer::from_text("hello");
        buf.erase(10, 3);
        assert_eq!(buf.text(), "hello");
        assert!(!buf.has_pending_patches());
    }

    #[test]
    fn test_erase_zero_len_is_noop() {
        let mut buf = GapBuffer::from_text("hello");
        buf.erase(2, 0);
        assert_eq!(buf.text(), "hello");
        assert!(!buf.has_pending_patches());
    }

    #[test]
    fn test_erase_clamps_overlong_range() {
        let mut buf = GapBuffer::from_text("hello");
        buf.erase(3, 999);
        assert_eq!(buf.text(), "hel");
    }

    #[test]
    fn test_interleaved_edits() {
        let mut buf = GapBuffer::from_text("The quick brown fox");
        buf.erase(4, 6); // "The brown fox"
        buf.insert(4, "slow "); // "The slow brown fox"
        buf.insert(buf.len(), " jumps");
        assert_eq!(buf.text(), "The slow brown fox jumps");
    }

    // --- Ranged reads ---

    #[test]
    fn test_text_range_basic() {
        let buf = GapBuffer::from_text("hello, world");
        assert_eq!(buf.text_range(0, 5), "hello");
        assert_eq!(buf.text_range(7, 5), "world");
    }

    #[test]
    fn test_text_range_out_of_range_start() {
        let buf = GapBuffer::from_text("hello");
        assert_eq!(buf.text_range(99, 5), "");
    }

    #[test]
    fn test_text_range_clamps_len() {
        let buf = GapBuffer::from_text("hello");
        assert_eq!(buf.text_range(3, 99), "lo");
    }

    #[test]
    fn test_text_range_straddles_gap() {
        // Editing at offset 5 parks the gap there; a read across it must
        // splice the two regions.
        let mut buf = GapBuffer::from_text("hello world");
        buf.insert(5, ",");
        assert_eq!(buf.text(), "hello, world");
        assert_eq!(buf.text_range(3, 6), "lo, wo");
    }

    #[test]
    fn test_text_range_entirely_after_gap() {
        let mut buf = GapBuffer::from_text("hello world");
        buf.insert(0, ">");
        assert_eq!(buf.text_range(7, 5), "world");
    }

    #[test]
    fn test_text_range_matches_full_text_substrings() {
        let mut buf = GapBuffer::from_text("abcdefghij");
        buf.erase(4, 2); // gap parked mid-buffer
        let full = buf.text();
        for start in 0..=full.len() {
            for len in 0..=full.len() {
                let end = (start + len).min(full.len());
                let expected = if start <= full.len() { &full[start..end] } else { "" };
                assert_eq!(buf.text_range(start, len), expected, "range {start}+{len}");
            }
        }
    }

    // --- Length invariant ---

    #[test]
    fn test_len_matches_text_len_after_edits() {
        let mut buf = GapBuffer::from_text("hello\nworld");
        assert_eq!(buf.len(), buf.text().len());
        buf.insert(5, "!!!");
        assert_eq!(buf.len(), buf.text().len());
        buf.erase(2, 4);
        assert_eq!(buf.len(), buf.text().len());
        buf.clear();
        assert_eq!(buf.len(), buf.text().len());
    }

    // --- Line/offset mapping ---

    #[test]
    fn test_line_count_empty_buffer_is_zero() {
        let buf = GapBuffer::new();
        assert_eq!(buf.line_count(), 0);
    }

    #[test]
    fn test_line_count_single_line() {
        let buf = GapBuffer::from_text("hello");
        assert_eq!(buf.line_count(), 1);
    }

    #[test]
    fn test_line_count_trailing_newline_adds_empty_line() {
        let buf = GapBuffer::from_text("hello\n");
        assert_eq!(buf.line_count(), 2);
    }

    #[test]
    fn test_line_count_multiline() {
        let buf = GapBuffer::from_text("a\nb\nc");
        assert_eq!(buf.line_count(), 3);
    }

    #[test]
    fn test_line_from_offset() {
        let buf = GapBuffer::from_text("ab\ncd\nef");
        assert_eq!(buf.line_from_offset(0), 0);
        assert_eq!(buf.line_from_offset(2), 0); // the '\n' itself is on line 0
        assert_eq!(buf.line_from_offset(3), 1);
        assert_eq!(buf.line_from_offset(6), 2);
        assert_eq!(buf.line_from_offset(999), 2); // clamped to end
    }

    #[test]
    fn test_line_from_offset_with_gap_mid_text() {
        let mut buf = GapBuffer::from_text("ab\ncd\nef");
        buf.insert(4, "X"); // gap parked on line 1
        assert_eq!(buf.text(), "ab\ncXd\nef");
        assert_eq!(buf.line_from_offset(0), 0);
        assert_eq!(buf.line_from_offset(5), 1);
        assert_eq!(buf.line_from_offset(8), 2);
    }

    #[test]
    fn test_offset_from_line() {
        let buf = GapBuffer::from_text("ab\ncd\nef");
        assert_eq!(buf.offset_from_line(0, 0), 0);
        assert_eq!(buf.offset_from_line(1, 0), 3);
        assert_eq!(buf.offset_from_line(2, 0), 6);
        assert_eq!(buf.offset_from_line(1, 1), 4);
    }

    #[test]
    fn test_offset_from_line_past_last_line_clamps() {
        let buf = GapBuffer::from_text("ab\ncd");
        assert_eq!(buf.offset_from_line(99, 0), 5);
        assert_eq!(buf.offset_from_line(1, 99), 5);
    }

    #[test]
    fn test_line_offset_weak_inverse() {
        let buf = GapBuffer::from_text("one\ntwo\nthree\n\nfive");
        for line in 0..buf.line_count() {
            let offset = buf.offset_from_line(line, 0);
            assert_eq!(buf.line_from_offset(offset), line, "line {line}");
        }
    }

    // --- Patch recording through the buffer ---

    #[test]
    fn test_sequential_typing_yields_one_patch() {
        let mut buf = GapBuffer::new();
        buf.insert(0, "A");
        buf.insert(1, "B");
        buf.insert(2, "C");

        let patches = buf.flush_patches();
        assert_eq!(patches.len(), 1);
        assert_eq!(patches[0].start, 0);
        assert_eq!(patches[0].inserted_text, "ABC");
    }

    #[test]
    fn test_non_adjacent_inserts_yield_multiple_patches() {
        let mut buf = GapBuffer::from_text("hello world");
        buf.insert(0, "A");
        buf.insert(6, "B");

        let patches = buf.flush_patches();
        assert!(patches.len() >= 2);
    }

    #[test]
    fn test_backspacing_yields_one_patch() {
        let mut buf = GapBuffer::from_text("abc");
        buf.erase(2, 1);
        buf.erase(1, 1);
        buf.erase(0, 1);

        let patches = buf.flush_patches();
        assert_eq!(patches.len(), 1);
        assert_eq!(patches[0].start, 0);
        assert_eq!(patches[0].removed_len, 3);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_patch_records_clamped_offset() {
        let mut buf = GapBuffer::from_text("hi");
        buf.insert(999, "!");
        let patches = buf.flush_patches();
        assert_eq!(patches[0].start, 2);
    }

    // --- Clone semantics ---

    #[test]
    fn test_clone_is_a_deep_copy() {
        let mut original = GapBuffer::from_text("shared");
        let mut copy = original.clone();

        original.insert(0, "A");
        copy.insert(6, "B");

        assert_eq!(original.text(), "Ashared");
        assert_eq!(copy.text(), "sharedB");
    }

    // --- Property tests ---

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        /// One clamped edit, mirroring the buffer's permissive contract.
        #[derive(Debug, Clone)]
        enum Edit {
            Insert(usize, String),
            Erase(usize, usize),
        }

        fn edit_strategy() -> impl Strategy<Value = Edit> {
            prop_oneof![
                (0..600usize, "[a-z \\n]{0,12}").prop_map(|(o, s)| Edit::Insert(o, s)),
                (0..600usize, 0..20usize).prop_map(|(o, l)| Edit::Erase(o, l)),
            ]
        }

        fn apply_to_reference(reference: &mut String, edit: &Edit) {
            match edit {
                Edit::Insert(offset, text) => {
                    let offset = (*offset).min(reference.len());
                    reference.insert_str(offset, text);
                }
                Edit::Erase(offset, len) => {
                    if *offset >= reference.len() || *len == 0 {
                        return;
                    }
                    let end = (offset + len).min(reference.len());
                    reference.replace_range(*offset..end, "");
                }
            }
        }

        proptest! {
            #[test]
            fn edits_match_reference_string(edits in prop::collection::vec(edit_strategy(), 0..40)) {
                let mut buf = GapBuffer::new();
                let mut reference = String::new();

                for edit in &edits {
                    match edit {
                        Edit::Insert(offset, text) => buf.insert(*offset, text),
                        Edit::Erase(offset, len) => buf.erase(*offset, *len),
                    }
                    apply_to_reference(&mut reference, edit);
                }

                prop_assert_eq!(buf.text(), reference);
            }

            #[test]
            fn len_always_matches_text(edits in prop::collection::vec(edit_strategy(), 0..40)) {
                let mut buf = GapBuffer::new();
                for edit in &edits {
                    match edit {
                        Edit::Insert(offset, text) => buf.insert(*offset, text),
                        Edit::Erase(offset, len) => buf.erase(*offset, *len),
                    }
                    prop_assert_eq!(buf.len(), buf.text().len());
                }
            }

            #[test]
            fn ranged_reads_never_expose_the_gap(
                edits in prop::collection::vec(edit_strategy(), 1..20),
                start in 0..700usize,
                len in 0..700usize,
            ) {
                let mut buf = GapBuffer::new();
                for edit in &edits {
                    match edit {
                        Edit::Insert(offset, text) => buf.insert(*offset, text),
                        Edit::Erase(offset, len) => buf.erase(*offset, *len),
                    }
                }

                let full = buf.text();
                let expected = if start >= full.len() {
                    String::new()
                } else {
                    let end = (start + len).min(full.len());
                    full[start..end].to_string()
                };
                prop_assert_eq!(buf.text_range(start, len), expected);
            }

            #[test]
            fn line_offset_inverse_holds(text in "[a-z\\n]{0,100}") {
                let buf = GapBuffer::from_text(&text);
                for line in 0..buf.line_count() {
                    let offset = buf.offset_from_line(line, 0);
                    prop_assert_eq!(buf.line_from_offset(offset), line);
                }
            }
        }
    }
}
