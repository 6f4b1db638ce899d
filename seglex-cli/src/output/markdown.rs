//! Markdown output formatter

use super::OutputFormatter;
use anyhow::Result;
use seglex_core::TextSpan;
use std::io::Write;

/// Markdown formatter - a numbered list per document and a final total
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    document_spans: usize,
    total_spans: usize,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            document_spans: 0,
            total_spans: 0,
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for MarkdownFormatter<W> {
    fn begin_document(&mut self, name: &str) -> Result<()> {
        if self.total_spans > 0 || self.document_spans > 0 {
            writeln!(self.writer)?;
        }
        writeln!(self.writer, "## {name}")?;
        writeln!(self.writer)?;
        self.document_spans = 0;
        Ok(())
    }

    fn format_span(&mut self, text: &str, span: TextSpan) -> Result<()> {
        self.document_spans += 1;
        self.total_spans += 1;
        writeln!(
            self.writer,
            "{}. `{}` ({}..{})",
            self.document_spans, text, span.begin, span.end
        )?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "---")?;
        writeln!(self.writer, "*Total spans: {}*", self.total_spans)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_list_and_total() {
        let mut buffer = Vec::new();
        {
            let mut formatter = MarkdownFormatter::new(&mut buffer);
            formatter.begin_document("a.txt").unwrap();
            formatter.format_span("La", TextSpan::new(0, 2)).unwrap();
            formatter.format_span(".", TextSpan::new(3, 4)).unwrap();
            formatter.begin_document("b.txt").unwrap();
            formatter.format_span("Ce", TextSpan::new(0, 2)).unwrap();
            formatter.finish().unwrap();
        }

        let output = String::from_utf8(buffer).unwrap();
        assert!(output.starts_with("## a.txt\n\n1. `La` (0..2)\n2. `.` (3..4)\n"));
        assert!(output.contains("## b.txt\n\n1. `Ce` (0..2)\n"));
        assert!(output.ends_with("---\n*Total spans: 3*\n"));
    }
}
