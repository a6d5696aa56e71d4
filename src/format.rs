// src/format.rs

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// How the caller's body string should be interpreted before sending.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BodyFormat {
    /// Plain text, escaped and split into paragraphs.
    #[default]
    PlainText,
    /// The small Markdown dialect understood by the block renderer.
    Markdown,
    /// Caller-supplied HTML, passed through verbatim.
    Html,
}

impl BodyFormat {
    /// Map a flag value to a format. Unknown or empty values mean plain text.
    pub fn parse(s: &str) -> BodyFormat {
        let s = s.trim();
        if s.eq_ignore_ascii_case("md") || s.eq_ignore_ascii_case("markdown") {
            BodyFormat::Markdown
        } else if s.eq_ignore_ascii_case("html") {
            BodyFormat::Html
        } else {
            BodyFormat::PlainText
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BodyFormat::PlainText => "text",
            BodyFormat::Markdown => "markdown",
            BodyFormat::Html => "html",
        }
    }
}

impl FromStr for BodyFormat {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(BodyFormat::parse(s))
    }
}

impl fmt::Display for BodyFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
