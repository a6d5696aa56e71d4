// src/body.rs

use crate::block::MarkdownRenderer;
use crate::document::{splice_above, wrap_document};
use crate::error::Result;
use crate::format::BodyFormat;
use crate::plain::text_to_html_fragment;

/// Renders outgoing bodies. Carries the Markdown renderer's limits so callers
/// that tune them get the same behavior for every operation.
#[derive(Clone, Copy, Debug, Default)]
pub struct BodyRenderer {
    markdown: MarkdownRenderer,
}

impl BodyRenderer {
    pub fn new(markdown: MarkdownRenderer) -> Self {
        Self { markdown }
    }

    pub fn markdown(&self) -> &MarkdownRenderer {
        &self.markdown
    }

    /// Body → HTML fragment. Never fails.
    pub fn render_inner(&self, body: &str, format: BodyFormat) -> String {
        tracing::debug!(%format, len = body.len(), "rendering body");
        match format {
            BodyFormat::Html => body.to_string(),
            BodyFormat::Markdown => self.markdown.render(body),
            BodyFormat::PlainText => text_to_html_fragment(body),
        }
    }

    /// Body → HTML fragment, failing where the lenient path would flatten.
    pub fn try_render_inner(&self, body: &str, format: BodyFormat) -> Result<String> {
        match format {
            BodyFormat::Markdown => {
                tracing::debug!(%format, len = body.len(), "rendering body (strict)");
                self.markdown.try_render(body)
            }
            _ => Ok(self.render_inner(body, format)),
        }
    }

    /// Body → complete HTML document.
    pub fn render(&self, body: &str, format: BodyFormat) -> String {
        wrap_document(&self.render_inner(body, format))
    }

    pub fn try_render(&self, body: &str, format: BodyFormat) -> Result<String> {
        Ok(wrap_document(&self.try_render_inner(body, format)?))
    }

    /// New body above the quoted original, as one document. A blank body
    /// leaves the original untouched.
    pub fn compose_forward(&self, body: &str, format: BodyFormat, original: &str) -> String {
        if body.trim().is_empty() {
            return original.to_string();
        }
        splice_above(&self.render_inner(body, format), original)
    }

    pub fn try_compose_forward(
        &self,
        body: &str,
        format: BodyFormat,
        original: &str,
    ) -> Result<String> {
        if body.trim().is_empty() {
            return Ok(original.to_string());
        }
        Ok(splice_above(&self.try_render_inner(body, format)?, original))
    }
}
