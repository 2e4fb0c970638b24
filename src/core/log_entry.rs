//! Log entry structure

use super::field::{FieldValue, Fields};
use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A finalized log event.
///
/// Serializes to the interchange shape
/// `{"fields":{..},"level":"info","timestamp":"..","message":".."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub fields: Fields,
    pub level: LogLevel,
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            fields: Fields::new(),
            level,
            timestamp: Utc::now(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn with_fields(mut self, fields: Fields) -> Self {
        self.fields = fields;
        self
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn field(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Message with newlines, carriage returns and tabs escaped
    ///
    /// Line-oriented renderers use this so a message cannot forge extra
    /// log lines.
    pub fn sanitized_message(&self) -> String {
        self.message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }
}
