// src/plain.rs

use memchr::memmem;

use crate::escape::escape_html;

/// Split on runs of two or more line feeds.
fn paragraphs(s: &str) -> Vec<&str> {
    let bytes = s.as_bytes();
    let finder = memmem::Finder::new(b"\n\n");
    let mut out = Vec::new();
    let mut start = 0usize;
    while let Some(off) = finder.find(&bytes[start..]) {
        let end = start + off;
        out.push(&s[start..end]);
        let mut next = end;
        while next < bytes.len() && bytes[next] == b'\n' {
            next += 1;
        }
        start = next;
    }
    out.push(&s[start..]);
    out
}

/// Plain text → HTML fragment of escaped `<p>` paragraphs.
///
/// Single line breaks inside a paragraph become `<br>`. No Markdown is
/// interpreted; whitespace-only paragraphs are dropped.
pub fn text_to_html_fragment(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + s.len() / 4 + 16);
    for para in paragraphs(s) {
        let para = para.trim();
        if para.is_empty() {
            continue;
        }
        out.push_str("<p>");
        out.push_str(&escape_html(para).replace('\n', "<br>\n"));
        out.push_str("</p>\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_blank_lines() {
        assert_eq!(
            text_to_html_fragment("first\n\nsecond\n\n\n\nthird"),
            "<p>first</p>\n<p>second</p>\n<p>third</p>\n"
        );
    }

    #[test]
    fn single_breaks_become_br() {
        assert_eq!(
            text_to_html_fragment("line one\nline two"),
            "<p>line one<br>\nline two</p>\n"
        );
    }

    #[test]
    fn escapes_markup_and_ignores_markdown() {
        assert_eq!(
            text_to_html_fragment("**a** <b> & `c`"),
            "<p>**a** &lt;b&gt; &amp; `c`</p>\n"
        );
    }

    #[test]
    fn drops_blank_paragraphs() {
        assert_eq!(text_to_html_fragment("\n\n   \n\nhi\n\n \t "), "<p>hi</p>\n");
        assert_eq!(text_to_html_fragment(""), "");
    }
}
