// src/escape.rs

use std::borrow::Cow;

#[inline]
fn needs_escape(b: u8) -> bool {
    matches!(b, b'&' | b'<' | b'>' | b'"' | b'\'')
}

/// Escape the five HTML-significant characters.
///
/// Every entity emitted here is in the reducer's decode table, so escaped
/// text survives a trip through `reduce_to_plain_text` unchanged.
pub fn escape_html(s: &str) -> Cow<'_, str> {
    let bytes = s.as_bytes();
    let Some(first) = bytes.iter().position(|&b| needs_escape(b)) else {
        return Cow::Borrowed(s);
    };

    let mut out = String::with_capacity(s.len() + s.len() / 8 + 8);
    out.push_str(&s[..first]);
    // All escaped characters are ASCII, so slicing at them stays on char boundaries.
    let mut seg_start = first;
    for (i, &b) in bytes.iter().enumerate().skip(first) {
        let rep = match b {
            b'&' => "&amp;",
            b'<' => "&lt;",
            b'>' => "&gt;",
            b'"' => "&quot;",
            b'\'' => "&#39;",
            _ => continue,
        };
        out.push_str(&s[seg_start..i]);
        out.push_str(rep);
        seg_start = i + 1;
    }
    out.push_str(&s[seg_start..]);
    Cow::Owned(out)
}
