// src/reduce.rs
//
// HTML → plain text for terminal display.
//
// Pipeline, in order:
//   1. Strip tags. Any '<' opens a tag that runs to the next '>'. A stray '>'
//      outside a tag is text. The content of <style>/<script> is dropped,
//      closing paragraph-level tags end the paragraph, and <br>, </li> and
//      </tr> end the line unless the source already does.
//   2. Decode a fixed table of entities in one pass; unknown entities stay.
//   3. Drop invisible formatting code points.
//   4. Per line: trim the right edge, collapse space/tab runs; keep at most one
//      blank line in a row.
//   5. Trim the whole result.

use memchr::memchr;

/* =============================== Tag sets ================================ */

fn matches_ignore_ascii_case(name: &[u8], set: &[&[u8]]) -> bool {
    set.iter().any(|&s| name.eq_ignore_ascii_case(s))
}

fn is_raw_text(name: &[u8]) -> bool {
    matches_ignore_ascii_case(name, &[b"style", b"script"])
}

/// Closing one of these ends a paragraph.
fn is_paragraph_end(name: &[u8]) -> bool {
    matches_ignore_ascii_case(
        name,
        &[
            b"p", b"div", b"h1", b"h2", b"h3", b"h4", b"h5", b"h6", b"blockquote", b"pre",
            b"table", b"ul", b"ol",
        ],
    )
}

/// These end a line.
fn is_line_end(name: &[u8], is_end: bool) -> bool {
    if is_end {
        matches_ignore_ascii_case(name, &[b"li", b"tr"])
    } else {
        name.eq_ignore_ascii_case(b"br")
    }
}

/* ============================== Tag parsing ============================== */

#[inline]
fn is_name_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b':'
}

#[inline]
fn is_ws(b: u8) -> bool {
    b == b' ' || b == b'\t' || b == b'\n' || b == b'\r'
}

#[derive(Clone, Copy, Debug)]
struct TagInfo<'a> {
    name: &'a [u8],
    is_end: bool,
    self_closing: bool,
}

/// Tag name and end/self-closing flags from raw `<...>` bytes.
fn parse_tag_info(tag: &[u8]) -> TagInfo<'_> {
    let n = tag.len();
    let mut i = 1;

    let mut is_end = false;
    if i < n && tag[i] == b'/' {
        is_end = true;
        i += 1;
    }
    while i < n && is_ws(tag[i]) {
        i += 1;
    }
    let start = i;
    while i < n && is_name_char(tag[i]) {
        i += 1;
    }
    let name = &tag[start..i];

    let mut j = n - 1;
    while j > 0 && is_ws(tag[j - 1]) {
        j -= 1;
    }
    let self_closing = j >= 2 && tag[j - 1] == b'/';

    TagInfo {
        name,
        is_end,
        self_closing,
    }
}

/// Index just past the `</name ...>` that closes a raw-text element whose
/// content starts at `i`, or the end of input if it never closes.
fn skip_raw_text(src: &[u8], mut i: usize, name: &[u8]) -> usize {
    let n = src.len();
    while let Some(off) = memchr(b'<', &src[i..]) {
        let lt = i + off;
        let Some(gt) = memchr(b'>', &src[lt..]).map(|o| lt + o) else {
            return n;
        };
        let ti = parse_tag_info(&src[lt..=gt]);
        if ti.is_end && ti.name.eq_ignore_ascii_case(name) {
            return gt + 1;
        }
        i = lt + 1;
    }
    n
}

/* ================================ Passes ================================= */

fn strip_tags(s: &str) -> String {
    let src = s.as_bytes();
    let n = src.len();
    let mut out = String::with_capacity(n);
    let mut i = 0usize;

    while i < n {
        let Some(lt) = memchr(b'<', &src[i..]).map(|off| i + off) else {
            out.push_str(&s[i..]);
            break;
        };
        out.push_str(&s[i..lt]);

        // Unterminated tag: everything after '<' is inside it.
        let Some(gt) = memchr(b'>', &src[lt..]).map(|off| lt + off) else {
            break;
        };
        let ti = parse_tag_info(&src[lt..=gt]);
        i = gt + 1;

        if !ti.is_end && !ti.self_closing && is_raw_text(ti.name) {
            i = skip_raw_text(src, i, ti.name);
        } else if ti.is_end && is_paragraph_end(ti.name) {
            out.push_str("\n\n");
        } else if is_line_end(ti.name, ti.is_end) && src.get(i) != Some(&b'\n') {
            out.push('\n');
        }
    }
    out
}

static ENTITIES: &[(&str, &str)] = &[
    ("&nbsp;", " "),
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#34;", "\""),
    ("&#39;", "'"),
    ("&apos;", "'"),
    ("&mdash;", "\u{2014}"),
    ("&ndash;", "\u{2013}"),
    ("&hellip;", "\u{2026}"),
    ("&laquo;", "\u{ab}"),
    ("&raquo;", "\u{bb}"),
    ("&#160;", " "),
    ("&#8203;", ""),
];

/// Single left-to-right pass; decoded text is never decoded again.
fn decode_entities(s: &str) -> String {
    let src = s.as_bytes();
    let mut out = String::with_capacity(s.len());
    let mut i = 0usize;

    while let Some(off) = memchr(b'&', &src[i..]) {
        let amp = i + off;
        out.push_str(&s[i..amp]);
        let rest = &s[amp..];
        match ENTITIES.iter().find(|(name, _)| rest.starts_with(name)) {
            Some((name, rep)) => {
                out.push_str(rep);
                i = amp + name.len();
            }
            None => {
                out.push('&');
                i = amp + 1;
            }
        }
    }
    out.push_str(&s[i..]);
    out
}

const INVISIBLE: &[char] = &[
    '\u{200B}', // zero-width space
    '\u{200C}', // zero-width non-joiner
    '\u{200D}', // zero-width joiner
    '\u{200E}', // left-to-right mark
    '\u{200F}', // right-to-left mark
    '\u{034F}', // combining grapheme joiner
    '\u{FEFF}', // byte-order mark
    '\u{00AD}', // soft hyphen
];

fn strip_invisible(s: &str) -> String {
    s.chars().filter(|c| !INVISIBLE.contains(c)).collect()
}

fn collapse_spaces(line: &str, out: &mut String) {
    let mut prev_space = false;
    for ch in line.chars() {
        if ch == ' ' || ch == '\t' {
            if !prev_space {
                out.push(' ');
            }
            prev_space = true;
        } else {
            prev_space = false;
            out.push(ch);
        }
    }
}

fn normalize_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut blanks = 0usize;
    let mut first = true;
    for line in s.split('\n') {
        let line = line.trim_end_matches([' ', '\t', '\r']);
        if line.is_empty() {
            blanks += 1;
            if blanks > 1 {
                continue;
            }
        } else {
            blanks = 0;
        }
        if !first {
            out.push('\n');
        }
        first = false;
        collapse_spaces(line, &mut out);
    }
    out.trim().to_string()
}

/// Reduce an arbitrary HTML string to readable plain text.
pub fn reduce_to_plain_text(html: &str) -> String {
    let text = strip_tags(html);
    let text = decode_entities(&text);
    let text = strip_invisible(&text);
    normalize_whitespace(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("<b>bold</b> text", "bold text")]
    #[case("Tom &amp; Jerry", "Tom & Jerry")]
    #[case("&amp;lt;", "&lt;")]
    #[case("&lt;tag&gt;", "<tag>")]
    #[case("&quot;q&quot; &#34;r&#34; &#39;s&#39; &apos;t&apos;", "\"q\" \"r\" 's' 't'")]
    #[case("a&mdash;b&ndash;c&hellip;", "a\u{2014}b\u{2013}c\u{2026}")]
    #[case("&laquo;x&raquo;", "\u{ab}x\u{bb}")]
    #[case("a&nbsp;&nbsp;b&#160;c", "a b c")]
    #[case("&copy; &#x27; & alone", "&copy; &#x27; & alone")]
    fn decodes_known_entities_only(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(reduce_to_plain_text(input), expected);
    }

    #[test]
    fn strips_invisible_code_points() {
        assert_eq!(reduce_to_plain_text("foo\u{200B}bar"), "foobar");
        assert_eq!(reduce_to_plain_text("foo&#8203;bar"), "foobar");
        assert_eq!(
            reduce_to_plain_text("\u{FEFF}a\u{200C}b\u{200D}c\u{200E}d\u{200F}e\u{034F}f\u{00AD}g"),
            "abcdefg"
        );
    }

    #[test]
    fn paragraphs_are_separated_by_one_blank_line() {
        assert_eq!(
            reduce_to_plain_text("<p>Hello</p><p>World</p>"),
            "Hello\n\nWorld"
        );
        assert_eq!(
            reduce_to_plain_text("<div>a</div>\n\n\n\n<div>b</div>"),
            "a\n\nb"
        );
    }

    #[test]
    fn list_items_and_breaks_end_lines() {
        assert_eq!(reduce_to_plain_text("<ul><li>a</li><li>b</li></ul>"), "a\nb");
        assert_eq!(reduce_to_plain_text("a<br>b<br/>c"), "a\nb\nc");
        assert_eq!(reduce_to_plain_text("a<br>\nb"), "a\nb");
    }

    #[test]
    fn drops_style_and_script_content() {
        assert_eq!(
            reduce_to_plain_text(
                "<head><style>p { color: red; }</style></head><body>x<SCRIPT type=\"t\">if (a < b) {}</script>y</body>"
            ),
            "xy"
        );
    }

    #[test]
    fn stray_close_angle_is_text() {
        assert_eq!(reduce_to_plain_text("a > b"), "a > b");
    }

    #[test]
    fn unterminated_tag_swallows_rest() {
        assert_eq!(reduce_to_plain_text("keep <span class="), "keep");
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(
            reduce_to_plain_text("  \n\n a \t  b  \r\n\n\n\nc\t\n\n"),
            "a b\n\nc"
        );
    }

    #[test]
    fn empty_and_markup_only_input() {
        assert_eq!(reduce_to_plain_text(""), "");
        assert_eq!(reduce_to_plain_text("<html><body></body></html>"), "");
    }
}
