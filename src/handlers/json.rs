//! JSON handler for structured logging

use super::{shared_writer, SharedWriter};
use crate::core::{Handler, LogEntry, Result};
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

/// JSON handler
///
/// Writes each entry as a single-line JSON object (JSONL format) in the
/// `{"fields","level","timestamp","message"}` shape. Compatible with log
/// aggregation tools like ELK, Loki, etc.
pub struct JsonHandler {
    writer: SharedWriter,
    pretty: bool,
}

impl JsonHandler {
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: shared_writer(writer),
            pretty: false,
        }
    }

    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }

    /// Append to the file at `path`, creating it if needed
    pub fn file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }

    /// Pretty-print entries (multi-line)
    #[must_use]
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Handler for JsonHandler {
    fn handle(&self, entry: &LogEntry) -> Result<()> {
        let json = if self.pretty {
            serde_json::to_string_pretty(entry)?
        } else {
            serde_json::to_string(entry)?
        };

        writeln!(self.writer.lock(), "{}", json)?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Fields, LogLevel};
    use crate::handlers::testing::SharedBuffer;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_json_handler_shape() {
        let buffer = SharedBuffer::default();
        let handler = JsonHandler::new(buffer.clone());

        let entry = LogEntry::new(LogLevel::Warn, "upload retry")
            .with_fields(Fields::new().with("user", "tobi").with("size", 1024));
        handler.handle(&entry).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(buffer.contents().trim()).unwrap();
        assert_eq!(parsed["level"], "warn");
        assert_eq!(parsed["message"], "upload retry");
        assert_eq!(parsed["fields"]["user"], "tobi");
        assert_eq!(parsed["fields"]["size"], 1024);
        assert!(parsed["timestamp"].is_string());
    }

    #[test]
    fn test_json_file_multiple_entries() -> Result<()> {
        let dir = tempdir()?;
        let log_path = dir.path().join("test.jsonl");

        let handler = JsonHandler::file(&log_path)?;
        for i in 0..5 {
            let entry = LogEntry::new(LogLevel::Debug, format!("Iteration {}", i))
                .with_fields(Fields::new().with("iteration", i));
            handler.handle(&entry)?;
        }
        handler.flush()?;

        let content = fs::read_to_string(&log_path)?;
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 5);

        for (i, line) in lines.into_iter().enumerate() {
            let entry: LogEntry = serde_json::from_str(line)?;
            assert_eq!(entry.message, format!("Iteration {}", i));
            assert_eq!(entry.level, LogLevel::Debug);
        }

        Ok(())
    }
}
