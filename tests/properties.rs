//! Property tests for the conversion engine.
//!
//! These cover the laws the engine promises for any input: extract undoes
//! wrap, plain-text rendering never leaks markup characters, plain text
//! survives render → reduce, and nothing panics on arbitrary input.

use mailbody::{
    extract_body_content, markdown_to_html, reduce_to_plain_text, render_body,
    text_to_html_fragment, wrap_document, BodyFormat,
};
use proptest::prelude::*;

/// A word of visible characters, including the ones HTML cares about.
fn word_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9<>&\"'.,;:!?()-]{1,8}"
}

/// A line of single-space separated words, no edge whitespace.
fn line_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(word_strategy(), 1..6).prop_map(|words| words.join(" "))
}

/// Paragraphs of lines, separated by one blank line.
fn text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::collection::vec(line_strategy(), 1..4).prop_map(|lines| lines.join("\n")),
        1..5,
    )
    .prop_map(|paras| paras.join("\n\n"))
}

/// Strip the markup the plain-text renderer inserts itself.
fn without_inserted_markup(fragment: &str) -> String {
    fragment
        .replace("<p>", "")
        .replace("</p>", "")
        .replace("<br>", "")
}

proptest! {
    #[test]
    fn extract_undoes_wrap(fragment in "(\\PC|\n){0,200}") {
        let wrapped = wrap_document(&fragment);
        prop_assert_eq!(extract_body_content(&wrapped), fragment.as_str());
    }

    #[test]
    fn extract_undoes_wrap_around_body_tags(
        before in "[a-z<>/ ]{0,20}",
        after in "[a-z<>/ ]{0,20}",
    ) {
        let fragment = format!("{before}<BODY x>{after}</body>{before}");
        let wrapped = wrap_document(&fragment);
        prop_assert_eq!(extract_body_content(&wrapped), fragment.as_str());
    }

    #[test]
    fn plain_fragment_escapes_markup(text in "\\PC{0,200}") {
        let stripped = without_inserted_markup(&text_to_html_fragment(&text));
        prop_assert!(!stripped.contains('<'));
        prop_assert!(!stripped.contains('>'));
        // Every remaining '&' starts an entity.
        for (i, _) in stripped.match_indices('&') {
            let rest = &stripped[i..];
            prop_assert!(
                rest.starts_with("&amp;")
                    || rest.starts_with("&lt;")
                    || rest.starts_with("&gt;")
                    || rest.starts_with("&quot;")
                    || rest.starts_with("&#39;"),
                "bare ampersand in {:?}", stripped
            );
        }
    }

    #[test]
    fn plain_text_round_trips(text in text_strategy()) {
        prop_assert_eq!(reduce_to_plain_text(&render_body(&text, BodyFormat::PlainText)), text);
    }

    #[test]
    fn markdown_is_total(src in "(\\PC|\n){0,300}") {
        let _ = markdown_to_html(&src);
    }

    #[test]
    fn markdown_with_block_markers_is_total(
        lines in prop::collection::vec(
            prop_oneof![
                Just("```".to_string()),
                Just("```rust".to_string()),
                Just("> ".to_string()),
                Just(">".to_string()),
                Just("# ".to_string()),
                Just("#".to_string()),
                Just("- ".to_string()),
                Just("1. ".to_string()),
                Just("---".to_string()),
                Just(String::new()),
                "[*_`\\[\\]() a-z]{0,12}",
            ],
            0..30,
        )
    ) {
        let src = lines.join("\n");
        let html = markdown_to_html(&src);
        prop_assert_eq!(html.matches("<blockquote>").count(), html.matches("</blockquote>").count());
    }

    #[test]
    fn reduced_text_is_clean(html in "(\\PC|\n){0,300}") {
        let text = reduce_to_plain_text(&html);
        for c in ['\u{200B}', '\u{200C}', '\u{200D}', '\u{200E}', '\u{200F}', '\u{034F}', '\u{FEFF}', '\u{00AD}'] {
            prop_assert!(!text.contains(c));
        }
        prop_assert!(!text.contains("\n\n\n"));
        prop_assert_eq!(text.trim(), text.as_str());
    }
}

#[test]
fn list_boundary() {
    assert_eq!(
        markdown_to_html("- a\n- b\n\nNot a list"),
        "<ul>\n<li>a</li>\n<li>b</li>\n</ul>\n<p>Not a list</p>\n"
    );
}

#[test]
fn heading_boundary() {
    assert_eq!(markdown_to_html("#Heading"), "<p>#Heading</p>\n");
    assert_eq!(markdown_to_html("# Heading"), "<h1>Heading</h1>\n");
}

#[test]
fn code_span_protection() {
    assert_eq!(
        markdown_to_html("`**not bold**`"),
        "<p><code>**not bold**</code></p>\n"
    );
}

#[test]
fn blockquote_nesting() {
    let html = markdown_to_html("> > nested");
    assert_eq!(html.matches("<blockquote>").count(), 2);
    assert!(html.contains("<p>nested</p>"));
}

#[test]
fn invisible_unicode_between_words() {
    assert_eq!(reduce_to_plain_text("two\u{200B}words"), "twowords");
}

#[test]
fn entity_decoding_is_not_re_escaped() {
    assert_eq!(reduce_to_plain_text("<p>R&amp;D</p>"), "R&D");
}
