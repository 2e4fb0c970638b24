//! Development-friendly text handler

use super::{paint, shared_writer, SharedWriter};
use crate::core::{Handler, LogEntry, Result};
use std::fmt::Write as _;
use std::io::Write;
use std::time::Instant;

/// Text handler
///
/// Writes one line per entry: the right-aligned level, seconds since the
/// handler was created, the message padded to 25 columns, then the fields in
/// key order.
///
/// ```text
///   INFO[0000] upload complete           file=sloth.png user=tobi
/// ```
pub struct TextHandler {
    writer: SharedWriter,
    start: Instant,
    use_colors: bool,
}

impl TextHandler {
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: shared_writer(writer),
            start: Instant::now(),
            use_colors: cfg!(feature = "console"),
        }
    }

    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }

    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }

    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    fn format(&self, entry: &LogEntry) -> String {
        let level = format!("{:>6}", entry.level.label());
        let elapsed = self.start.elapsed().as_secs();

        let mut line = format!(
            "{}[{:04}] {:<25}",
            paint(&level, entry.level, self.use_colors),
            elapsed,
            entry.sanitized_message()
        );

        for (name, value) in &entry.fields {
            let _ = write!(
                line,
                " {}={}",
                paint(name, entry.level, self.use_colors),
                value
            );
        }

        line
    }
}

impl Handler for TextHandler {
    fn handle(&self, entry: &LogEntry) -> Result<()> {
        let line = self.format(entry);
        writeln!(self.writer.lock(), "{}", line)?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "text"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Fields, LogLevel};
    use crate::handlers::testing::SharedBuffer;

    #[test]
    fn test_text_line() {
        let buffer = SharedBuffer::default();
        let handler = TextHandler::new(buffer.clone()).with_colors(false);

        let entry = LogEntry::new(LogLevel::Info, "upload complete").with_fields(
            Fields::new().with("user", "tobi").with("file", "sloth.png"),
        );
        handler.handle(&entry).unwrap();

        assert_eq!(
            buffer.contents(),
            "  INFO[0000] upload complete           file=sloth.png user=tobi\n"
        );
    }

    #[test]
    fn test_text_escapes_newlines() {
        let buffer = SharedBuffer::default();
        let handler = TextHandler::new(buffer.clone()).with_colors(false);

        handler
            .handle(&LogEntry::new(LogLevel::Warn, "login\n ERROR forged"))
            .unwrap();

        let contents = buffer.contents();
        assert_eq!(contents.lines().count(), 1);
        assert!(contents.starts_with("  WARN[0000] login\\n ERROR forged"));
    }
}
