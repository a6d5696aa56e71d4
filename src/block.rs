// src/block.rs
//
// Block-level Markdown → HTML fragment.
//
// - One forward scan over lines. Each block is recognized at its first line and
//   consumed whole before moving on; there is no AST and no backtracking.
// - Recognition order (first match wins): fenced code, blockquote, horizontal
//   rule, ATX heading, unordered list, ordered list, blank line, paragraph.
// - Blockquotes strip one `>` (and one following space) per line and recurse.
//   Recursion is capped; past the cap, quote markers are left as paragraph text.
// - Every emitted block is followed by '\n'.

use crate::error::{Error, Result};
use crate::escape::escape_html;
use crate::inline::render_inline;

/// Blockquote nesting rendered before quote markers are left as text.
pub const DEFAULT_MAX_QUOTE_DEPTH: usize = 32;

/// Markdown block renderer.
#[derive(Clone, Copy, Debug)]
pub struct MarkdownRenderer {
    max_quote_depth: usize,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self {
            max_quote_depth: DEFAULT_MAX_QUOTE_DEPTH,
        }
    }
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how many blockquote levels are unwrapped. Zero disables blockquotes.
    pub fn with_max_quote_depth(mut self, depth: usize) -> Self {
        self.max_quote_depth = depth;
        self
    }

    pub fn max_quote_depth(&self) -> usize {
        self.max_quote_depth
    }

    /// Render `src`, flattening blockquotes nested past the limit.
    pub fn render(&self, src: &str) -> String {
        self.render_checked(src).0
    }

    /// Render `src`, failing if blockquotes are nested past the limit.
    pub fn try_render(&self, src: &str) -> Result<String> {
        match self.render_checked(src) {
            (html, false) => Ok(html),
            (_, true) => Err(Error::QuoteNestingTooDeep {
                limit: self.max_quote_depth,
            }),
        }
    }

    fn render_checked(&self, src: &str) -> (String, bool) {
        let lines: Vec<&str> = src.split('\n').collect();
        let mut out = String::with_capacity(src.len() + src.len() / 4 + 16);
        let mut capped = false;
        self.render_lines(&lines, 0, &mut out, &mut capped);
        (out, capped)
    }

    fn render_lines(&self, lines: &[&str], depth: usize, out: &mut String, capped: &mut bool) {
        let quotes = depth < self.max_quote_depth;
        let n = lines.len();
        let mut i = 0usize;

        while i < n {
            let line = lines[i];

            if let Some(lang) = fence_open(line) {
                i += 1;
                let mut code = String::new();
                while i < n && fence_open(lines[i]).is_none() {
                    code.push_str(&escape_html(lines[i]));
                    code.push('\n');
                    i += 1;
                }
                i += 1; // closing fence, if any
                if lang.is_empty() {
                    out.push_str("<pre><code>");
                } else {
                    out.push_str("<pre><code class=\"language-");
                    out.push_str(&escape_html(lang));
                    out.push_str("\">");
                }
                out.push_str(&code);
                out.push_str("</code></pre>\n");
                continue;
            }

            if quote_body(line).is_some() {
                if quotes {
                    let mut inner: Vec<&str> = Vec::new();
                    while i < n {
                        let Some(body) = quote_body(lines[i]) else { break };
                        inner.push(body);
                        i += 1;
                    }
                    out.push_str("<blockquote>\n");
                    self.render_lines(&inner, depth + 1, out, capped);
                    out.push_str("</blockquote>\n");
                    continue;
                }
                if !*capped {
                    tracing::warn!(
                        limit = self.max_quote_depth,
                        "blockquote nesting limit reached; rendering deeper quotes as text"
                    );
                    *capped = true;
                }
            }

            if is_hr(line) {
                out.push_str("<hr>\n");
                i += 1;
                continue;
            }

            if let Some((level, content)) = atx_heading(line) {
                out.push_str(&format!("<h{level}>{}</h{level}>\n", render_inline(content)));
                i += 1;
                continue;
            }

            if bullet_item(line).is_some() {
                i = render_list(lines, i, "ul", bullet_item, out);
                continue;
            }

            if ordered_item(line).is_some() {
                i = render_list(lines, i, "ol", ordered_item, out);
                continue;
            }

            if line.trim().is_empty() {
                i += 1;
                continue;
            }

            // Paragraph: the first line is always taken, so the scan always advances.
            let mut para = String::new();
            para.push_str(line.trim());
            i += 1;
            while i < n && !lines[i].trim().is_empty() && !starts_block(lines[i], quotes) {
                para.push_str("<br>\n");
                para.push_str(lines[i].trim());
                i += 1;
            }
            out.push_str("<p>");
            out.push_str(&render_inline(&para));
            out.push_str("</p>\n");
        }
    }
}

/// Render `src` with the default renderer.
pub fn markdown_to_html(src: &str) -> String {
    MarkdownRenderer::default().render(src)
}

/// Render `src` with the default renderer, failing on over-deep blockquotes.
pub fn try_markdown_to_html(src: &str) -> Result<String> {
    MarkdownRenderer::default().try_render(src)
}

fn render_list(
    lines: &[&str],
    mut i: usize,
    tag: &str,
    item: fn(&str) -> Option<&str>,
    out: &mut String,
) -> usize {
    out.push('<');
    out.push_str(tag);
    out.push_str(">\n");
    while i < lines.len() {
        let Some(content) = item(lines[i]) else { break };
        out.push_str("<li>");
        out.push_str(&render_inline(content.trim()));
        out.push_str("</li>\n");
        i += 1;
    }
    out.push_str("</");
    out.push_str(tag);
    out.push_str(">\n");
    i
}

/* ============================ Line predicates ============================ */

/// "```lang" → Some("lang"); the tag may be empty.
fn fence_open(line: &str) -> Option<&str> {
    line.strip_prefix("```").map(str::trim)
}

/// "> text" or ">text" → Some("text").
fn quote_body(line: &str) -> Option<&str> {
    let rest = line.strip_prefix('>')?;
    Some(rest.strip_prefix(' ').unwrap_or(rest))
}

fn is_hr(line: &str) -> bool {
    matches!(line.trim(), "---" | "***" | "___")
}

/// `#{1,6}` followed by a space or end of line.
fn atx_heading(line: &str) -> Option<(usize, &str)> {
    let level = line.bytes().take_while(|&b| b == b'#').count();
    if level == 0 || level > 6 {
        return None;
    }
    let rest = &line[level..];
    if rest.is_empty() || rest.starts_with(' ') {
        Some((level, rest.trim()))
    } else {
        None
    }
}

/// `-`, `*` or `+` then a space.
fn bullet_item(line: &str) -> Option<&str> {
    let bytes = line.as_bytes();
    if bytes.len() >= 2 && matches!(bytes[0], b'-' | b'*' | b'+') && bytes[1] == b' ' {
        Some(&line[2..])
    } else {
        None
    }
}

/// Digits, '.', then a space.
fn ordered_item(line: &str) -> Option<&str> {
    let bytes = line.as_bytes();
    let digits = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    if digits > 0 && bytes.get(digits) == Some(&b'.') && bytes.get(digits + 1) == Some(&b' ') {
        Some(&line[digits + 2..])
    } else {
        None
    }
}

fn starts_block(line: &str, quotes: bool) -> bool {
    fence_open(line).is_some()
        || (quotes && quote_body(line).is_some())
        || is_hr(line)
        || atx_heading(line).is_some()
        || bullet_item(line).is_some()
        || ordered_item(line).is_some()
}
