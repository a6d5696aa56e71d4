// src/error.rs

use thiserror::Error;

/// Errors surfaced by the strict rendering entry points.
///
/// The lenient operations never fail; they degrade to some reasonable output
/// instead. Only callers that opt into strictness see these.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Blockquotes were nested deeper than the renderer's limit.
    #[error("blockquote nesting exceeds the limit of {limit} levels")]
    QuoteNestingTooDeep { limit: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
