//! Plain text output formatter

use super::OutputFormatter;
use anyhow::Result;
use seglex_core::TextSpan;
use std::io::Write;

/// Plain text formatter - one `begin<TAB>end<TAB>text` line per span
pub struct TextFormatter<W: Write> {
    writer: W,
    headers: bool,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            headers: false,
        }
    }

    /// Prefix each document with a `# name` line
    pub fn with_headers(mut self, headers: bool) -> Self {
        self.headers = headers;
        self
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn begin_document(&mut self, name: &str) -> Result<()> {
        if self.headers {
            writeln!(self.writer, "# {name}")?;
        }
        Ok(())
    }

    fn format_span(&mut self, text: &str, span: TextSpan) -> Result<()> {
        writeln!(self.writer, "{}\t{}\t{}", span.begin, span.end, text)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_line_per_span() {
        let mut buffer = Vec::new();
        {
            let mut formatter = TextFormatter::new(&mut buffer);
            formatter.begin_document("a.txt").unwrap();
            formatter.format_span("Ce", TextSpan::new(0, 2)).unwrap();
            formatter.format_span("c'est-à-dire", TextSpan::new(3, 15)).unwrap();
            formatter.finish().unwrap();
        }
        assert_eq!(String::from_utf8(buffer).unwrap(), "0\t2\tCe\n3\t15\tc'est-à-dire\n");
    }

    #[test]
    fn test_headers() {
        let mut buffer = Vec::new();
        {
            let mut formatter = TextFormatter::new(&mut buffer).with_headers(true);
            formatter.begin_document("a.txt").unwrap();
            formatter.format_span("La", TextSpan::new(0, 2)).unwrap();
            formatter.finish().unwrap();
        }
        assert_eq!(String::from_utf8(buffer).unwrap(), "# a.txt\n0\t2\tLa\n");
    }
}
