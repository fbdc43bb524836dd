//! Block-level markdown parsing.
//!
//! [`parse_blocks`] scans a document line by line into an ordered list of
//! [`Block`]s. The parser is a small state machine: at most one multi-line
//! construct (fenced code, list, blockquote) accumulates at a time, with a
//! paragraph accumulator active independently. Blocks are ephemeral — they
//! are produced fresh for one render pass and never cached.

/// One parsed top-level block element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// ATX heading, level 1-6.
    Heading { level: u8, content: String },
    /// Blank-line separated run of text, lines joined by `\n`.
    Paragraph { content: String },
    /// Fenced code block; `language` is the first word of the info string.
    FencedCode { language: String, content: String },
    /// `-`/`*`/`+` list, one string per item.
    UnorderedList { items: Vec<String> },
    /// `1.`/`1)` list, one string per item.
    OrderedList { items: Vec<String> },
    /// `>` quoted region; content is re-parsed recursively at render time.
    Blockquote { content: String },
    /// `---`, `***`, or `___`.
    HorizontalRule,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Unordered,
    Ordered,
}

/// Open fenced-code state: the closing fence must repeat the same character
/// at least as many times as the opener.
struct FenceState {
    fence_char: u8,
    fence_len: usize,
    language: String,
    content: String,
}

/// Parse a complete markdown snapshot into blocks.
pub fn parse_blocks(markdown: &str) -> Vec<Block> {
    let mut parser = BlockFsm::default();
    for line in markdown.split('\n') {
        parser.feed(line);
    }
    parser.finish()
}

#[derive(Default)]
struct BlockFsm {
    blocks: Vec<Block>,
    paragraph: String,
    fence: Option<FenceState>,
    list_items: Vec<String>,
    list_kind: Option<ListKind>,
    quote: String,
    in_quote: bool,
}

impl BlockFsm {
    fn feed(&mut self, line: &str) {
        // Inside a fence, only the matching closer is grammar; everything
        // else is verbatim code, indentation included.
        if let Some(mut fence) = self.fence.take() {
            if is_fence_close(line, fence.fence_char, fence.fence_len) {
                self.blocks.push(Block::FencedCode {
                    language: fence.language,
                    content: fence.content,
                });
            } else {
                if !fence.content.is_empty() {
                    fence.content.push('\n');
                }
                fence.content.push_str(line);
                self.fence = Some(fence);
            }
            return;
        }

        if let Some((fence_char, fence_len, language)) = fence_open(line) {
            self.flush_paragraph();
            self.flush_list();
            self.flush_quote();
            self.fence = Some(FenceState {
                fence_char,
                fence_len,
                language,
                content: String::new(),
            });
            return;
        }

        if is_horizontal_rule(line) {
            self.flush_paragraph();
            self.flush_list();
            self.flush_quote();
            self.blocks.push(Block::HorizontalRule);
            return;
        }

        if let Some((level, content)) = heading(line) {
            self.flush_paragraph();
            self.flush_list();
            self.flush_quote();
            self.blocks.push(Block::Heading { level, content });
            return;
        }

        if let Some(content) = blockquote_line(line) {
            self.flush_paragraph();
            self.flush_list();
            if !self.quote.is_empty() {
                self.quote.push('\n');
            }
            self.quote.push_str(content);
            self.in_quote = true;
            return;
        }
        if self.in_quote {
            self.flush_quote();
        }

        if let Some(item) = list_item(line, ListKind::Unordered) {
            self.flush_paragraph();
            if self.list_kind == Some(ListKind::Ordered) {
                self.flush_list();
            }
            self.list_kind = Some(ListKind::Unordered);
            self.list_items.push(item);
            return;
        }

        if let Some(item) = list_item(line, ListKind::Ordered) {
            self.flush_paragraph();
            if self.list_kind == Some(ListKind::Unordered) {
                self.flush_list();
            }
            self.list_kind = Some(ListKind::Ordered);
            self.list_items.push(item);
            return;
        }

        if line.trim().is_empty() {
            self.flush_paragraph();
            self.flush_list();
            return;
        }

        if !self.paragraph.is_empty() {
            self.paragraph.push('\n');
        }
        self.paragraph.push_str(line);
    }

    fn finish(mut self) -> Vec<Block> {
        // An unclosed fence still yields its accumulated content; losing
        // text on a missing closer would be worse than a malformed block.
        if let Some(fence) = self.fence.take() {
            self.blocks.push(Block::FencedCode {
                language: fence.language,
                content: fence.content,
            });
        }
        self.flush_paragraph();
        self.flush_list();
        self.flush_quote();
        self.blocks
    }

    fn flush_paragraph(&mut self) {
        if self.paragraph.is_empty() {
            return;
        }
        let content = self.paragraph.trim().to_string();
        self.paragraph.clear();
        if !content.is_empty() {
            self.blocks.push(Block::Paragraph { content });
        }
    }

    fn flush_list(&mut self) {
        if self.list_items.is_empty() {
            self.list_kind = None;
            return;
        }
        let items = std::mem::take(&mut self.list_items);
        let block = match self.list_kind.take() {
            Some(ListKind::Ordered) => Block::OrderedList { items },
            _ => Block::UnorderedList { items },
        };
        self.blocks.push(block);
    }

    fn flush_quote(&mut self) {
        if !self.quote.is_empty() {
            let content = std::mem::take(&mut self.quote);
            self.blocks.push(Block::Blockquote {
                content: content.trim().to_string(),
            });
        }
        self.in_quote = false;
    }
}

// --- Line classifiers ---

/// Skip up to three leading spaces; returns the index of the first
/// significant byte.
fn skip_indent(bytes: &[u8]) -> usize {
    let mut i = 0;
    while i < bytes.len() && bytes[i] == b' ' && i < 3 {
        i += 1;
    }
    i
}

/// A trimmed run of at least three `-`, `*`, or `_` with optional interior
/// spaces and nothing else.
fn is_horizontal_rule(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.len() < 3 {
        return false;
    }
    let rule_char = trimmed.as_bytes()[0];
    if rule_char != b'-' && rule_char != b'*' && rule_char != b'_' {
        return false;
    }
    if trimmed.bytes().any(|b| b != rule_char && b != b' ') {
        return false;
    }
    trimmed.bytes().filter(|&b| b == rule_char).count() >= 3
}

/// Fence opener: up to 3 leading spaces, then 3+ of the same `` ` `` or `~`,
/// then an optional language word. Returns `(fence_char, fence_len, language)`.
fn fence_open(line: &str) -> Option<(u8, usize, String)> {
    let bytes = line.as_bytes();
    let mut i = skip_indent(bytes);
    if i >= bytes.len() {
        return None;
    }

    let fence_char = bytes[i];
    if fence_char != b'`' && fence_char != b'~' {
        return None;
    }
    let fence_start = i;
    while i < bytes.len() && bytes[i] == fence_char {
        i += 1;
    }
    let fence_len = i - fence_start;
    if fence_len < 3 {
        return None;
    }

    while i < bytes.len() && (bytes[i] == b' ' || bytes[i] == b'\t') {
        i += 1;
    }
    let lang_start = i;
    while i < bytes.len()
        && bytes[i] != b' '
        && bytes[i] != b'\t'
        && bytes[i] != b'`'
        && bytes[i] != b'\r'
    {
        i += 1;
    }
    Some((fence_char, fence_len, line[lang_start..i].to_string()))
}

/// Fence closer: same character, at least the opening length, then only
/// whitespace.
fn is_fence_close(line: &str, fence_char: u8, min_len: usize) -> bool {
    let bytes = line.as_bytes();
    let mut i = skip_indent(bytes);
    if i >= bytes.len() || bytes[i] != fence_char {
        return false;
    }

    let mut count = 0;
    while i < bytes.len() && bytes[i] == fence_char {
        count += 1;
        i += 1;
    }
    if count < min_len {
        return false;
    }
    bytes[i..]
        .iter()
        .all(|&b| b == b' ' || b == b'\t' || b == b'\r')
}

/// ATX heading: 1-6 `#` followed by space, tab, or end of line. Returns the
/// level and the content with the marker and any trailing `#`s stripped.
fn heading(line: &str) -> Option<(u8, String)> {
    let bytes = line.as_bytes();
    let mut i = skip_indent(bytes);

    let mut level = 0u8;
    while i < bytes.len() && bytes[i] == b'#' && level < 6 {
        level += 1;
        i += 1;
    }
    if level == 0 {
        return None;
    }
    if i < bytes.len() && bytes[i] != b' ' && bytes[i] != b'\t' {
        return None;
    }

    while i < bytes.len() && (bytes[i] == b' ' || bytes[i] == b'\t') {
        i += 1;
    }
    let content = line[i..]
        .trim_end()
        .trim_end_matches('#')
        .trim_end()
        .to_string();
    Some((level, content))
}

/// Blockquote marker: `>` after up to 3 spaces, one following space consumed.
/// Returns the remainder of the line.
fn blockquote_line(line: &str) -> Option<&str> {
    let bytes = line.as_bytes();
    let mut i = skip_indent(bytes);
    if i >= bytes.len() || bytes[i] != b'>' {
        return None;
    }
    i += 1;
    if i < bytes.len() && bytes[i] == b' ' {
        i += 1;
    }
    Some(&line[i..])
}

/// List item marker for the given kind; returns the trimmed item content.
fn list_item(line: &str, kind: ListKind) -> Option<String> {
    let bytes = line.as_bytes();
    let mut i = skip_indent(bytes);
    if i >= bytes.len() {
        return None;
    }

    match kind {
        ListKind::Unordered => {
            let marker = bytes[i];
            if marker != b'-' && marker != b'*' && marker != b'+' {
                return None;
            }
            i += 1;
        }
        ListKind::Ordered => {
            if !bytes[i].is_ascii_digit() {
                return None;
            }
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            if i >= bytes.len() || (bytes[i] != b'.' && bytes[i] != b')') {
                return None;
            }
            i += 1;
        }
    }

    if i >= bytes.len() || (bytes[i] != b' ' && bytes[i] != b'\t') {
        return None;
    }
    Some(line[i + 1..].trim().to_string())
}
