// src/document.rs
//
// Complete-document wrapping, and the inverse: pulling the inner content back
// out of a document's <body>. The extractor anchors on the FIRST `<body` and
// the LAST `</body>`, both ASCII case-insensitive, so quoted text that happens
// to contain body tags stays inside the result.

use memchr::{memchr, memmem};

/// Stylesheet embedded in every outgoing message.
pub const EMAIL_CSS: &str = r#"
body {
  font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Helvetica, Arial, sans-serif;
  font-size: 14px;
  line-height: 1.6;
  color: #222;
  margin: 0;
  padding: 16px;
}
p  { margin: 0 0 12px; }
h1 { font-size: 1.5em;  font-weight: 600; margin: 16px 0 8px; }
h2 { font-size: 1.3em;  font-weight: 600; margin: 14px 0 7px; }
h3 { font-size: 1.1em;  font-weight: 600; margin: 12px 0 6px; }
h4, h5, h6 { font-size: 1em; font-weight: 600; margin: 10px 0 5px; }
ul, ol { margin: 0 0 12px; padding-left: 24px; }
li { margin-bottom: 4px; }
code {
  font-family: "SFMono-Regular", Consolas, "Liberation Mono", Menlo, monospace;
  background: #f4f4f4;
  padding: 1px 4px;
  border-radius: 3px;
  font-size: 0.9em;
}
pre {
  background: #f4f4f4;
  padding: 12px;
  border-radius: 4px;
  overflow-x: auto;
  margin: 0 0 12px;
}
pre code { background: none; padding: 0; }
blockquote {
  border-left: 3px solid #ccc;
  margin: 0 0 12px;
  padding-left: 12px;
  color: #555;
}
hr {
  border: none;
  border-top: 1px solid #ddd;
  margin: 16px 0;
}
a { color: #0066cc; }
strong { font-weight: 600; }
em { font-style: italic; }
"#;

const DOC_HEAD: &str = "<!DOCTYPE html>\n<html>\n<head><meta charset=\"UTF-8\"><style>";
const DOC_BODY_OPEN: &str = "</style></head>\n<body>";
const DOC_TAIL: &str = "</body>\n</html>";

/// Separator placed between a new message and the quoted original.
pub const FORWARD_SEPARATOR: &str = "\n<hr>\n";

/// Wrap an HTML fragment into a complete, styled document.
///
/// The fragment is placed between `<body>` and `</body>` with nothing added,
/// so `extract_body_content(&wrap_document(f)) == f`.
pub fn wrap_document(fragment: &str) -> String {
    let mut out = String::with_capacity(
        DOC_HEAD.len() + EMAIL_CSS.len() + DOC_BODY_OPEN.len() + fragment.len() + DOC_TAIL.len(),
    );
    out.push_str(DOC_HEAD);
    out.push_str(EMAIL_CSS);
    out.push_str(DOC_BODY_OPEN);
    out.push_str(fragment);
    out.push_str(DOC_TAIL);
    out
}

/// Return the content of the `<body>` element of `doc`.
///
/// Without a `<body` open tag (or when that tag never closes with `>`) the
/// input is already a fragment and comes back unchanged. Without a `</body>`
/// after the open tag, everything after it is returned.
pub fn extract_body_content(doc: &str) -> &str {
    // ASCII lowercasing keeps byte offsets aligned with `doc`.
    let lower = doc.as_bytes().to_ascii_lowercase();
    let Some(start) = memmem::find(&lower, b"<body") else {
        return doc;
    };
    let Some(gt) = memchr(b'>', &lower[start..]) else {
        return doc;
    };
    let body_start = start + gt + 1;

    match memmem::rfind(&lower, b"</body>") {
        Some(close) if close >= body_start => &doc[body_start..close],
        _ => &doc[body_start..],
    }
}

/// Put `fragment` above the body content of `original`, separated by a rule,
/// and wrap the result as a fresh document.
pub fn splice_above(fragment: &str, original: &str) -> String {
    let quoted = extract_body_content(original);
    tracing::debug!(
        new_len = fragment.len(),
        quoted_len = quoted.len(),
        "splicing fragment above quoted message"
    );
    let mut combined = String::with_capacity(fragment.len() + FORWARD_SEPARATOR.len() + quoted.len());
    combined.push_str(fragment);
    combined.push_str(FORWARD_SEPARATOR);
    combined.push_str(quoted);
    wrap_document(&combined)
}
