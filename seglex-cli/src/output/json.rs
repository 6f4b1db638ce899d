//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use seglex_core::TextSpan;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// JSON formatter - buffers every document and writes one array at the end
pub struct JsonFormatter<W: Write> {
    writer: W,
    documents: Vec<DocumentData>,
}

/// One input file in the JSON output
#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentData {
    /// Input file name
    pub file: String,
    /// Segmented spans in index order
    pub spans: Vec<SpanData>,
}

/// One span in the JSON output
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SpanData {
    /// Covered text
    pub text: String,
    /// Start character offset
    pub begin: usize,
    /// End character offset (exclusive)
    pub end: usize,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            documents: Vec::new(),
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn begin_document(&mut self, name: &str) -> Result<()> {
        self.documents.push(DocumentData {
            file: name.to_string(),
            spans: Vec::new(),
        });
        Ok(())
    }

    fn format_span(&mut self, text: &str, span: TextSpan) -> Result<()> {
        let Some(document) = self.documents.last_mut() else {
            anyhow::bail!("span emitted before any document");
        };
        document.spans.push(SpanData {
            text: text.to_string(),
            begin: span.begin,
            end: span.end,
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, &self.documents)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
