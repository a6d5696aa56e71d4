// src/inline.rs
//
// Inline Markdown: `code`, **bold** / __bold__, *italic* / _italic_, [text](url).
//
// - The line is exploded into pieces: literal chars, and opaque markup that an
//   earlier pass produced. Later passes only ever match delimiters made of
//   literal chars, so markup is never re-processed.
// - Passes run in a fixed order from a static table. Each pass is a single
//   left-to-right scan; matches are leftmost and shortest, never overlapping.
// - Emphasis never crosses a line feed. Code spans may.
// - Unmatched delimiters stay literal.

use crate::escape::escape_html;

#[derive(Clone, Debug)]
enum Piece {
    Char(char),
    Markup(String),
}

#[derive(Clone, Copy)]
enum Pass {
    Code,
    Wrap {
        delim: &'static str,
        tag: &'static str,
    },
    Link,
}

static PASSES: &[Pass] = &[
    Pass::Code,
    Pass::Wrap { delim: "**", tag: "strong" },
    Pass::Wrap { delim: "__", tag: "strong" },
    Pass::Wrap { delim: "*", tag: "em" },
    Pass::Wrap { delim: "_", tag: "em" },
    Pass::Link,
];

/// Render inline Markdown in `s` to an HTML fragment.
///
/// Only code span content is escaped; everything else is emitted as written.
pub fn render_inline(s: &str) -> String {
    let mut pieces: Vec<Piece> = s.chars().map(Piece::Char).collect();
    for pass in PASSES {
        pieces = match *pass {
            Pass::Code => code_pass(pieces),
            Pass::Wrap { delim, tag } => wrap_pass(pieces, delim, tag),
            Pass::Link => link_pass(pieces),
        };
    }

    let mut out = String::with_capacity(s.len() + 16);
    for p in &pieces {
        match p {
            Piece::Char(c) => out.push(*c),
            Piece::Markup(m) => out.push_str(m),
        }
    }
    out
}

/* ============================ Piece predicates =========================== */

#[inline]
fn is_char(p: &Piece, want: char) -> bool {
    matches!(p, Piece::Char(c) if *c == want)
}

/// Whether the ASCII delimiter `delim` starts at `pieces[i]`.
fn delim_at(pieces: &[Piece], i: usize, delim: &str) -> bool {
    let d = delim.as_bytes();
    i + d.len() <= pieces.len()
        && d.iter()
            .zip(&pieces[i..])
            .all(|(&b, p)| is_char(p, b as char))
}

/* ================================ Passes ================================= */

fn code_pass(pieces: Vec<Piece>) -> Vec<Piece> {
    let n = pieces.len();
    let mut out = Vec::with_capacity(n);
    let mut i = 0usize;
    while i < n {
        if is_char(&pieces[i], '`') && i + 1 < n && !is_char(&pieces[i + 1], '`') {
            if let Some(close) = (i + 1..n).find(|&j| is_char(&pieces[j], '`')) {
                let mut code = String::new();
                for p in &pieces[i + 1..close] {
                    if let Piece::Char(c) = p {
                        code.push(*c);
                    }
                }
                out.push(Piece::Markup(format!("<code>{}</code>", escape_html(&code))));
                i = close + 1;
                continue;
            }
        }
        out.push(pieces[i].clone());
        i += 1;
    }
    out
}

/// Find the closer for an emphasis span whose content starts at `from`.
fn find_wrap_close(pieces: &[Piece], from: usize, delim: &str) -> Option<usize> {
    let mut j = from;
    while j < pieces.len() {
        if is_char(&pieces[j], '\n') {
            return None;
        }
        if j > from && delim_at(pieces, j, delim) {
            return Some(j);
        }
        j += 1;
    }
    None
}

fn wrap_pass(pieces: Vec<Piece>, delim: &str, tag: &str) -> Vec<Piece> {
    let n = pieces.len();
    let len = delim.len();
    let mut out = Vec::with_capacity(n);
    let mut i = 0usize;
    while i < n {
        if delim_at(&pieces, i, delim) {
            if let Some(close) = find_wrap_close(&pieces, i + len, delim) {
                out.push(Piece::Markup(format!("<{tag}>")));
                out.extend_from_slice(&pieces[i + len..close]);
                out.push(Piece::Markup(format!("</{tag}>")));
                i = close + len;
                continue;
            }
        }
        out.push(pieces[i].clone());
        i += 1;
    }
    out
}

/// `next[k]` is the first index `>= k` holding `want`, or `pieces.len()`.
fn next_index_of(pieces: &[Piece], want: char) -> Vec<usize> {
    let n = pieces.len();
    let mut next = vec![n; n + 1];
    for k in (0..n).rev() {
        next[k] = if is_char(&pieces[k], want) { k } else { next[k + 1] };
    }
    next
}

/// Match `[text](url)` at `i`. Returns (close_bracket, close_paren).
fn match_link(
    pieces: &[Piece],
    i: usize,
    next_bracket: &[usize],
    next_paren: &[usize],
) -> Option<(usize, usize)> {
    let n = pieces.len();
    if !is_char(&pieces[i], '[') {
        return None;
    }
    let bracket = next_bracket[i + 1];
    if bracket == n || bracket == i + 1 || bracket + 1 >= n || !is_char(&pieces[bracket + 1], '(') {
        return None;
    }
    let url_start = bracket + 2;
    let paren = next_paren[url_start];
    if paren == n || paren == url_start {
        return None;
    }
    Some((bracket, paren))
}

fn link_pass(pieces: Vec<Piece>) -> Vec<Piece> {
    let n = pieces.len();
    let next_bracket = next_index_of(&pieces, ']');
    let next_paren = next_index_of(&pieces, ')');
    let mut out = Vec::with_capacity(n);
    let mut i = 0usize;
    while i < n {
        if let Some((bracket, paren)) = match_link(&pieces, i, &next_bracket, &next_paren) {
            out.push(Piece::Markup("<a href=\"".to_string()));
            out.extend_from_slice(&pieces[bracket + 2..paren]);
            out.push(Piece::Markup("\">".to_string()));
            out.extend_from_slice(&pieces[i + 1..bracket]);
            out.push(Piece::Markup("</a>".to_string()));
            i = paren + 1;
            continue;
        }
        out.push(pieces[i].clone());
        i += 1;
    }
    out
}
