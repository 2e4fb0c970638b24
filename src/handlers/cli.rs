//! Colored text handler suitable for command-line interfaces

use super::{paint, shared_writer, SharedWriter};
use crate::core::{Handler, LogEntry, LogLevel, Result};
use std::fmt::Write as _;
use std::io::Write;

/// CLI handler
///
/// Prints a symbol instead of the level name and hides the `"source"` field.
pub struct CliHandler {
    writer: SharedWriter,
    padding: usize,
    use_colors: bool,
}

impl CliHandler {
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: shared_writer(writer),
            padding: 3,
            use_colors: cfg!(feature = "console"),
        }
    }

    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }

    /// Columns before the level symbol (default 3)
    #[must_use]
    pub fn with_padding(mut self, padding: usize) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    fn symbol(level: LogLevel) -> &'static str {
        match level {
            LogLevel::Error | LogLevel::Fatal => "⨯",
            _ => "•",
        }
    }

    fn format(&self, entry: &LogEntry) -> String {
        let symbol = format!(
            "{:>width$}",
            Self::symbol(entry.level),
            width = self.padding + 1
        );

        let mut line = format!(
            "{} {:<25}",
            paint(&symbol, entry.level, self.use_colors),
            entry.sanitized_message()
        );

        for (name, value) in &entry.fields {
            if name == "source" {
                continue;
            }
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

impl Handler for CliHandler {
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
        "cli"
    }
}
