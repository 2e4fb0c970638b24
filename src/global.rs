//! Process-wide default logger
//!
//! Package-level convenience functions forwarding to a shared [`Logger`].
//! The logger is created lazily (info level, text handler on stderr) and can
//! be replaced with [`set_logger`] or dropped with [`reset`], which is what
//! tests use to get a fresh logger per case.
//!
//! The default logger lives in a static and is never dropped at process exit,
//! so a buffering handler such as [`JsonHandler::file`] must be flushed with
//! [`flush`] before `main` returns or its tail is lost.
//!
//! [`JsonHandler::file`]: crate::handlers::JsonHandler::file
//!
//! ```
//! use rust_context_logger::global;
//! use rust_context_logger::prelude::*;
//! use std::sync::Arc;
//!
//! let memory = Arc::new(MemoryHandler::new());
//! global::set_handler(Arc::clone(&memory));
//!
//! global::with_field("user", "tobi").info("logged in");
//! global::infof(format_args!("{} items", 3));
//!
//! assert_eq!(memory.len(), 2);
//! global::flush().unwrap();
//! global::reset();
//! ```

use crate::core::{
    Fielder, FieldValue, Log, LogContext, LogError, LogLevel, Logger, Result, Telemetry, Trace,
};
use crate::core::Handler;
use parking_lot::RwLock;
use std::fmt;

static DEFAULT: RwLock<Option<Logger>> = parking_lot::const_rwlock(None);

/// The default logger, creating it on first use
pub fn logger() -> Logger {
    if let Some(logger) = DEFAULT.read().as_ref() {
        return logger.clone();
    }

    DEFAULT.write().get_or_insert_with(Logger::default).clone()
}

/// Replace the default logger
pub fn set_logger(logger: Logger) {
    *DEFAULT.write() = Some(logger);
}

/// Drop the default logger; the next use creates a fresh one
pub fn reset() {
    *DEFAULT.write() = None;
}

pub fn set_handler(handler: impl Handler + 'static) {
    logger().set_handler(handler);
}

pub fn set_level(level: LogLevel) {
    logger().set_level(level);
}

/// Set the default logger's level from its name
pub fn set_level_from_str(name: &str) -> Result<()> {
    logger().set_level_from_str(name)
}

pub fn set_telemetry(telemetry: impl Telemetry + 'static) {
    logger().set_telemetry(telemetry);
}

pub fn flush() -> Result<()> {
    logger().flush()
}

pub fn with_fields<F: Fielder + ?Sized>(fielder: &F) -> LogContext {
    logger().with_fields(fielder)
}

pub fn with_field<K, V>(key: K, value: V) -> LogContext
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    logger().with_field(key, value)
}

pub fn with_error<E: LogError + ?Sized>(err: &E) -> LogContext {
    logger().with_error(err)
}

pub fn with_tags<I, S>(tags: I) -> LogContext
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    logger().with_tags(tags)
}

pub fn inc(name: &str, value: f64) -> LogContext {
    logger().inc(name, value)
}

pub fn debug(message: impl Into<String>) {
    logger().debug(message);
}

pub fn info(message: impl Into<String>) {
    logger().info(message);
}

pub fn warn(message: impl Into<String>) {
    logger().warn(message);
}

pub fn error(message: impl Into<String>) {
    logger().error(message);
}

pub fn fatal(message: impl Into<String>) -> ! {
    logger().fatal(message)
}

pub fn debugf(args: fmt::Arguments<'_>) {
    logger().debugf(args);
}

pub fn infof(args: fmt::Arguments<'_>) {
    logger().infof(args);
}

pub fn warnf(args: fmt::Arguments<'_>) {
    logger().warnf(args);
}

pub fn errorf(args: fmt::Arguments<'_>) {
    logger().errorf(args);
}

pub fn fatalf(args: fmt::Arguments<'_>) -> ! {
    logger().fatalf(args)
}

pub fn trace(message: impl Into<String>) -> Trace {
    logger().trace(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::MemoryHandler;
    use parking_lot::Mutex;
    use std::sync::Arc;

    // The default logger is process-wide; serialize the tests touching it.
    static SERIAL: Mutex<()> = parking_lot::const_mutex(());

    fn install() -> Arc<MemoryHandler> {
        let memory = Arc::new(MemoryHandler::new());
        set_logger(Logger::new(Arc::clone(&memory)));
        memory
    }

    #[test]
    fn test_flush_reaches_buffered_file() {
        let _guard = SERIAL.lock();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.jsonl");
        set_logger(Logger::new(crate::handlers::JsonHandler::file(&path).unwrap()));

        info("shutting down");
        flush().unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("shutting down"));
        reset();
    }

    #[test]
    fn test_package_level_logging() {
        let _guard = SERIAL.lock();
        let memory = install();

        infof(format_args!("logged in {}", "Tobi"));
        debug("hidden");

        let entries = memory.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].message, "logged in Tobi");
        assert_eq!(entries[0].level, LogLevel::Info);
        reset();
    }

    #[test]
    fn test_reset_gives_fresh_logger() {
        let _guard = SERIAL.lock();
        let memory = install();
        set_level(LogLevel::Error);

        reset();
        assert_eq!(logger().level(), LogLevel::Info);

        logger().set_handler(crate::handlers::DiscardHandler);
        warn("not captured");
        assert_eq!(memory.len(), 0);
        reset();
    }

    #[test]
    fn test_trace_and_error() {
        let _guard = SERIAL.lock();
        let memory = install();

        trace("upload").stop(Some(&std::io::Error::other("boom")));
        with_error(&std::io::Error::other("unauthorized")).error("upload failed");

        let entries = memory.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[1].level, LogLevel::Error);
        assert!(entries[1].field("duration").is_some());
        assert_eq!(
            entries[2].field("error").and_then(|v| v.as_str()),
            Some("unauthorized")
        );
        reset();
    }
}
