// src/lib.rs
//
// mailbody — email body conversion.
//
// Outbound: body + format → fragment (Markdown, plain text, or HTML as-is)
// → complete styled document. Forwards splice the new fragment above the
// original message's <body> content and re-wrap.
// Inbound: remote HTML → plain text for the terminal.
//
// Everything here is a pure function of its input: no I/O, no shared state.

mod block;
mod body;
mod document;
mod error;
mod escape;
mod format;
mod inline;
mod plain;
mod reduce;

pub use block::{markdown_to_html, try_markdown_to_html, MarkdownRenderer, DEFAULT_MAX_QUOTE_DEPTH};
pub use body::BodyRenderer;
pub use document::{extract_body_content, splice_above, wrap_document, EMAIL_CSS, FORWARD_SEPARATOR};
pub use error::{Error, Result};
pub use escape::escape_html;
pub use format::BodyFormat;
pub use inline::render_inline;
pub use plain::text_to_html_fragment;
pub use reduce::reduce_to_plain_text;

/// Body → complete HTML document, ready to send.
pub fn render_body(body: &str, format: BodyFormat) -> String {
    BodyRenderer::default().render(body, format)
}

/// Body → HTML fragment with no document wrapper, for splicing.
pub fn render_body_inner(body: &str, format: BodyFormat) -> String {
    BodyRenderer::default().render_inner(body, format)
}

/// Reply body → document. The remote side quotes the original itself.
pub fn compose_reply(body: &str, format: BodyFormat) -> String {
    render_body(body, format)
}

/// Forward: `body` rendered above the content of `original_html`.
pub fn compose_forward(body: &str, format: BodyFormat, original_html: &str) -> String {
    BodyRenderer::default().compose_forward(body, format, original_html)
}
