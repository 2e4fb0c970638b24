//! # Rust Context Logger
//!
//! A structured, leveled logging facade. Log calls go through immutable
//! contexts that accumulate key/value fields; each finalized entry is handed
//! to a pluggable [`Handler`], and contexts can also bump named counters on an
//! optional [`Telemetry`] backend.
//!
//! ## Features
//!
//! - **Copy-on-extend contexts**: deriving a context never changes its parent,
//!   so a base context can be shared across threads
//! - **Error capabilities**: errors can contribute a stack frame (`source`)
//!   and their own fields
//! - **Tracing**: [`Log::trace`] logs a start entry and completes with the
//!   elapsed `duration`
//! - **Handlers**: text, CLI, JSON, logfmt, level filter, fan-out, memory,
//!   discard and (feature `network`) Graylog GELF
//! - **Telemetry**: in-process labelled counters and (feature `network`)
//!   DogStatsD
//!
//! ```
//! use rust_context_logger::prelude::*;
//! use std::sync::Arc;
//!
//! let memory = Arc::new(MemoryHandler::new());
//! let logger = Logger::new(Arc::clone(&memory));
//!
//! let ctx = logger.with_field("file", "sloth.png").with_field("user", "tobi");
//! ctx.info("upload");
//! ctx.with_error(&std::io::Error::other("unauthorized")).error("upload failed");
//!
//! let entries = memory.entries();
//! assert_eq!(entries[1].field("error").and_then(|v| v.as_str()), Some("unauthorized"));
//! assert_eq!(entries[1].field("user").and_then(|v| v.as_str()), Some("tobi"));
//! ```

pub mod core;
pub mod global;
pub mod handlers;
pub mod macros;
pub mod telemetry;

pub mod prelude {
    pub use crate::core::{
        FieldValue, Fielder, Fields, Frame, Handler, HandlerFn, Log, LogContext, LogEntry,
        LogError, LogLevel, Logger, LoggerBuilder, LoggerError, LoggerMetrics, Result,
        StackTracer, Telemetry, Trace, Traced,
    };
    pub use crate::handlers::{
        CliHandler, DiscardHandler, JsonHandler, LevelFilter, LogfmtHandler, MemoryHandler,
        MultiHandler, TextHandler,
    };
}

pub use crate::core::{
    Clock, ErrorCallback, ExitHook, FieldValue, Fielder, Fields, Frame, Handler, HandlerFn, Log,
    LogContext, LogEntry, LogError, LogLevel, Logger, LoggerBuilder, LoggerError, LoggerMetrics,
    Result, StackTracer, Telemetry, Trace, Traced,
};
