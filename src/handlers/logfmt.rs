//! Logfmt handler (key=value pairs)

use super::{shared_writer, SharedWriter};
use crate::core::{FieldValue, Handler, LogEntry, Result};
use chrono::SecondsFormat;
use std::io::Write;

/// Logfmt handler
///
/// Example: `timestamp=2025-01-08T10:30:45.000Z level=info message="Request processed" user=tobi`
pub struct LogfmtHandler {
    writer: SharedWriter,
}

impl LogfmtHandler {
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: shared_writer(writer),
        }
    }

    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }

    /// Format an entry as a single logfmt line (without newline)
    pub fn format(entry: &LogEntry) -> String {
        let mut parts = Vec::with_capacity(3 + entry.fields.len());

        parts.push(format!(
            "timestamp={}",
            entry.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
        ));
        parts.push(format!("level={}", entry.level));

        // Message is always quoted
        parts.push(format!("message={}", quote_value(&entry.message)));

        for (key, value) in &entry.fields {
            let formatted = match value {
                FieldValue::String(s) => escape_value(s),
                other => escape_value(&other.to_string()),
            };
            parts.push(format!("{}={}", escape_key(key), formatted));
        }

        parts.join(" ")
    }
}

impl Handler for LogfmtHandler {
    fn handle(&self, entry: &LogEntry) -> Result<()> {
        let line = Self::format(entry);
        writeln!(self.writer.lock(), "{}", line)?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "logfmt"
    }
}

/// Keep only characters valid in a logfmt key
fn escape_key(key: &str) -> String {
    key.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || *c == '.')
        .collect()
}

/// Quote a value if it is empty or contains spaces, quotes, `=` or control characters
fn escape_value(value: &str) -> String {
    let needs_quotes = value.is_empty()
        || value
            .chars()
            .any(|c| c == ' ' || c == '"' || c == '=' || c.is_control());

    if needs_quotes {
        quote_value(value)
    } else {
        value.to_string()
    }
}

fn quote_value(value: &str) -> String {
    format!(
        "\"{}\"",
        value
            .replace('\\', "\\\\")
            .replace('"', "\\\"")
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    )
}
