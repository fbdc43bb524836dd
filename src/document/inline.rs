//! Inline markdown formatting and HTML escaping.

/// Escape HTML special characters (`&`, `<`, `>`, `"`, `'`).
pub fn escape(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + text.len() / 8);
    for ch in text.chars() {
        match ch {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(ch),
        }
    }
    result
}

/// Convert inline spans (code, bold, italic) in block content to escaped
/// HTML.
///
/// A single left-to-right scan applies the first matching rule at each
/// position: `` `code` ``, then `**bold**`/`__bold__`, then
/// `*italic*`/`_italic_`. Span contents are escaped, never re-parsed, so
/// there is no nesting and no overlap; the scan resumes right after each
/// consumed span. A delimiter with no matching close is literal text and
/// takes the escaping path like any other character.
pub fn format_inline(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut result = String::with_capacity(text.len() + text.len() / 4);
    let mut i = 0;

    while i < bytes.len() {
        // Inline code span.
        if bytes[i] == b'`' {
            if let Some(end) = find_byte(bytes, b'`', i + 1) {
                result.push_str("<code>");
                result.push_str(&escape(&text[i + 1..end]));
                result.push_str("</code>");
                i = end + 1;
                continue;
            }
        }

        // Bold. Checked before italic so `**` is consumed as one delimiter
        // rather than two empty emphasis spans.
        if let Some(next) = emphasis_pair(text, bytes, i, b'*') {
            result.push_str(&next.0);
            i = next.1;
            continue;
        }
        if let Some(next) = emphasis_pair(text, bytes, i, b'_') {
            result.push_str(&next.0);
            i = next.1;
            continue;
        }

        match bytes[i] {
            b'&' => result.push_str("&amp;"),
            b'<' => result.push_str("&lt;"),
            b'>' => result.push_str("&gt;"),
            b'"' => result.push_str("&quot;"),
            _ => {
                // Copy the full UTF-8 sequence starting here.
                let ch_len = utf8_len(bytes[i]);
                result.push_str(&text[i..i + ch_len]);
                i += ch_len;
                continue;
            }
        }
        i += 1;
    }

    result
}

/// Try to consume a bold (`dd...dd`) or italic (`d...d`) span opening at
/// `i` with delimiter byte `d`. Returns the rendered HTML and the resume
/// position.
fn emphasis_pair(text: &str, bytes: &[u8], i: usize, delim: u8) -> Option<(String, usize)> {
    if bytes[i] != delim {
        return None;
    }

    // Double delimiter: bold, first matching closing pair wins.
    if i + 1 < bytes.len() && bytes[i + 1] == delim {
        let open_end = i + 2;
        if let Some(close) = find_pair(bytes, delim, open_end) {
            let html = format!("<strong>{}</strong>", escape(&text[open_end..close]));
            return Some((html, close + 2));
        }
        return None;
    }

    // Single delimiter: italic, requires non-empty content so that a
    // stray `*` next to text never produces an empty span.
    if let Some(close) = find_byte(bytes, delim, i + 1) {
        if close > i + 1 {
            let html = format!("<em>{}</em>", escape(&text[i + 1..close]));
            return Some((html, close + 1));
        }
    }
    None
}

fn find_byte(bytes: &[u8], target: u8, from: usize) -> Option<usize> {
    bytes[from..].iter().position(|&b| b == target).map(|p| from + p)
}

fn find_pair(bytes: &[u8], target: u8, from: usize) -> Option<usize> {
    let mut i = from;
    while i + 1 < bytes.len() {
        if bytes[i] == target && bytes[i + 1] == target {
            return Some(i);
        }
        i += 1;
    }
    None
}

const fn utf8_len(first_byte: u8) -> usize {
    match first_byte {
        b if b < 0x80 => 1,
        b if b < 0xE0 => 2,
        b if b < 0xF0 => 3,
        _ => 4,
    }
}
