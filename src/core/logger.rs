//! Main logger implementation

use super::{
    error::{LoggerError, Result},
    handler::Handler,
    log_context::{Log, LogContext},
    log_entry::LogEntry,
    log_level::LogLevel,
    metrics::LoggerMetrics,
    telemetry::Telemetry,
};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Timestamp source for finalized entries
pub type Clock = fn() -> DateTime<Utc>;

/// Process termination used by fatal-level calls
pub type ExitHook = fn(i32) -> !;

/// Receives handler and telemetry failures
pub type ErrorCallback = Arc<dyn Fn(&LoggerError) + Send + Sync>;

struct Shared {
    min_level: RwLock<LogLevel>,
    handler: RwLock<Arc<dyn Handler>>,
    telemetry: RwLock<Option<Arc<dyn Telemetry>>>,
    /// Metrics for observability (dispatched, filtered, failures)
    metrics: LoggerMetrics,
    clock: Clock,
    exit: ExitHook,
    on_error: Option<ErrorCallback>,
}

/// A minimum level, a handler and an optional telemetry binding.
///
/// `Logger` is a cheap handle: clones share configuration, and contexts
/// derived from it keep a clone so they can outlive the original binding.
#[derive(Clone)]
pub struct Logger {
    shared: Arc<Shared>,
}

impl Logger {
    /// Create a logger at info level writing to `handler`
    #[must_use]
    pub fn new(handler: impl Handler + 'static) -> Self {
        Self::builder().handler(handler).build()
    }

    /// Create a new logger builder
    ///
    /// # Example
    ///
    /// ```
    /// use rust_context_logger::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .min_level(LogLevel::Debug)
    ///     .handler(JsonHandler::stderr())
    ///     .build();
    ///
    /// logger.with_field("user", "tobi").debug("logged in");
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub fn level(&self) -> LogLevel {
        *self.shared.min_level.read()
    }

    pub fn set_level(&self, level: LogLevel) {
        *self.shared.min_level.write() = level;
    }

    /// Set the minimum level from its name
    pub fn set_level_from_str(&self, name: &str) -> Result<()> {
        self.set_level(LogLevel::parse(name)?);
        Ok(())
    }

    /// Whether a call at `level` would reach the handler.
    ///
    /// `Invalid` is never enabled, whatever the minimum level.
    #[inline]
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level != LogLevel::Invalid && level >= self.level()
    }

    pub fn handler(&self) -> Arc<dyn Handler> {
        Arc::clone(&self.shared.handler.read())
    }

    pub fn set_handler(&self, handler: impl Handler + 'static) {
        *self.shared.handler.write() = Arc::new(handler);
    }

    pub fn telemetry(&self) -> Option<Arc<dyn Telemetry>> {
        self.shared.telemetry.read().clone()
    }

    pub fn set_telemetry(&self, telemetry: impl Telemetry + 'static) {
        *self.shared.telemetry.write() = Some(Arc::new(telemetry));
    }

    pub fn clear_telemetry(&self) {
        *self.shared.telemetry.write() = None;
    }

    /// Get the logger metrics for detailed observability
    ///
    /// # Example
    ///
    /// ```
    /// use rust_context_logger::prelude::*;
    ///
    /// let logger = Logger::new(DiscardHandler);
    /// logger.debug("below the default level");
    /// logger.info("dispatched");
    ///
    /// assert_eq!(logger.metrics().filtered(), 1);
    /// assert_eq!(logger.metrics().dispatched(), 1);
    /// ```
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.shared.metrics
    }

    pub fn flush(&self) -> Result<()> {
        self.handler().flush()
    }

    /// Gate, finalize and hand an entry to the handler.
    ///
    /// Below the minimum level nothing is rendered or merged. Handler
    /// failures go to the error callback and never reach the caller.
    pub(crate) fn dispatch(
        &self,
        level: LogLevel,
        context: &LogContext,
        message: impl FnOnce() -> String,
    ) {
        if !self.is_enabled(level) {
            self.shared.metrics.record_filtered();
            return;
        }

        let entry = LogEntry {
            fields: context.fields(),
            level,
            timestamp: (self.shared.clock)(),
            message: message(),
        };

        // Clone out of the lock so a handler may itself reconfigure or log.
        let handler = self.handler();
        self.shared.metrics.record_dispatched();
        if let Err(e) = handler.handle(&entry) {
            self.shared.metrics.record_handler_failure();
            self.report(&e);
        }
    }

    pub(crate) fn increment(&self, name: &str, value: f64, tags: &[String]) {
        let Some(telemetry) = self.telemetry() else {
            return;
        };

        if let Err(e) = telemetry.increment(name, value, tags) {
            self.shared.metrics.record_telemetry_failure();
            self.report(&e);
        }
    }

    /// Flush the handler and end the process, whatever the flush outcome.
    pub(crate) fn terminate(&self) -> ! {
        if let Err(e) = self.flush() {
            self.report(&e);
        }
        (self.shared.exit)(1)
    }

    fn report(&self, err: &LoggerError) {
        match self.shared.on_error {
            Some(ref callback) => callback(err),
            None => eprintln!("[LOGGER ERROR] error logging: {}", err),
        }
    }
}

impl Log for Logger {
    fn logger(&self) -> &Logger {
        self
    }

    fn context(&self) -> Cow<'_, LogContext> {
        Cow::Owned(LogContext::new(self.clone()))
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level())
            .field("handler", &self.handler().name())
            .field("telemetry", &self.telemetry().is_some())
            .finish()
    }
}

/// Builder for configuring a Logger
///
/// # Example
///
/// ```
/// use rust_context_logger::prelude::*;
/// use std::sync::Arc;
///
/// let logger = Logger::builder()
///     .min_level_str("warning")
///     .unwrap()
///     .handler(TextHandler::stderr())
///     .on_handler_error(Arc::new(|err| {
///         eprintln!("log sink failed: {}", err);
///     }))
///     .build();
///
/// assert_eq!(logger.level(), LogLevel::Warn);
/// ```
pub struct LoggerBuilder {
    min_level: LogLevel,
    handler: Option<Arc<dyn Handler>>,
    telemetry: Option<Arc<dyn Telemetry>>,
    clock: Clock,
    exit: ExitHook,
    on_error: Option<ErrorCallback>,
}

impl LoggerBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self {
            min_level: LogLevel::Info,
            handler: None,
            telemetry: None,
            clock: Utc::now,
            exit: std::process::exit,
            on_error: None,
        }
    }

    /// Set the minimum log level
    #[must_use]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Set the minimum log level from its name
    pub fn min_level_str(mut self, name: &str) -> Result<Self> {
        self.min_level = LogLevel::parse(name)?;
        Ok(self)
    }

    /// Set the handler
    ///
    /// Defaults to a [`TextHandler`](crate::handlers::TextHandler) on stderr.
    #[must_use]
    pub fn handler<H: Handler + 'static>(mut self, handler: H) -> Self {
        self.handler = Some(Arc::new(handler));
        self
    }

    /// Bind a telemetry backend for `inc` calls
    #[must_use]
    pub fn telemetry<T: Telemetry + 'static>(mut self, telemetry: T) -> Self {
        self.telemetry = Some(Arc::new(telemetry));
        self
    }

    /// Set the timestamp source
    #[must_use]
    pub fn clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Replace process termination for fatal-level calls
    #[must_use]
    pub fn exit_hook(mut self, exit: ExitHook) -> Self {
        self.exit = exit;
        self
    }

    /// Receive handler and telemetry failures instead of printing them
    #[must_use]
    pub fn on_handler_error(mut self, callback: ErrorCallback) -> Self {
        self.on_error = Some(callback);
        self
    }

    /// Build the logger
    pub fn build(self) -> Logger {
        let handler = self
            .handler
            .unwrap_or_else(|| Arc::new(crate::handlers::TextHandler::stderr()));

        Logger {
            shared: Arc::new(Shared {
                min_level: RwLock::new(self.min_level),
                handler: RwLock::new(handler),
                telemetry: RwLock::new(self.telemetry),
                metrics: LoggerMetrics::new(),
                clock: self.clock,
                exit: self.exit,
                on_error: self.on_error,
            }),
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
