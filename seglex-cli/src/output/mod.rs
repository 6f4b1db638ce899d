//! Output formatting module

use anyhow::Result;
use seglex_core::TextSpan;

/// Sink for segmented spans, one document after another
pub trait OutputFormatter: Send + Sync {
    /// Start a new document
    fn begin_document(&mut self, name: &str) -> Result<()>;

    /// Emit one span of the current document
    fn format_span(&mut self, text: &str, span: TextSpan) -> Result<()>;

    /// Flush everything after the last document
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod markdown;
pub mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;
