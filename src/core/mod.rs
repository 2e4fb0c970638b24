//! Core logger types and traits

pub mod capability;
pub mod error;
pub mod field;
pub mod handler;
pub mod log_context;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod telemetry;

pub use capability::{Frame, LogError, StackTracer, Traced};
pub use error::{LoggerError, Result};
pub use field::{FieldValue, Fielder, Fields};
pub use handler::{Handler, HandlerFn};
pub use log_context::{Log, LogContext, Trace};
pub use log_entry::LogEntry;
pub use log_level::LogLevel;
pub use logger::{Clock, ErrorCallback, ExitHook, Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use telemetry::Telemetry;
