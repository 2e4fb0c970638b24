//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Level name that does not match any known severity
    #[error("invalid level: '{name}'")]
    InvalidLevel { name: String },

    /// A handler reported that it could not process an entry
    #[error("handler '{handler}' failed: {message}")]
    HandlerFailure { handler: String, message: String },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Writer error (generic)
    #[error("Writer error: {0}")]
    WriterError(String),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Encoded message exceeds what the transport can carry
    #[error("message of {size} bytes exceeds the limit of {limit} bytes")]
    MessageTooLarge { size: usize, limit: usize },

    /// Telemetry backend failure
    #[error("telemetry error: {message}")]
    Telemetry { message: String },

    /// Increment of a counter that was never registered
    #[error("unknown counter '{name}'")]
    UnknownCounter { name: String },

    /// Tag count does not match the counter's label names
    #[error("counter '{name}' expects {expected} labels, got {actual}")]
    LabelMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },
}

impl LoggerError {
    /// Create an invalid level error
    pub fn invalid_level(name: impl Into<String>) -> Self {
        LoggerError::InvalidLevel { name: name.into() }
    }

    /// Create a handler failure
    pub fn handler(handler: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::HandlerFailure {
            handler: handler.into(),
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a telemetry error
    pub fn telemetry(message: impl Into<String>) -> Self {
        LoggerError::Telemetry {
            message: message.into(),
        }
    }

    /// Create a writer error (generic)
    pub fn writer<S: Into<String>>(msg: S) -> Self {
        LoggerError::WriterError(msg.into())
    }
}
