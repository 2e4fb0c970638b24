//! Field-accumulating log contexts
//!
//! This module provides:
//! - `Log`: the context-building contract shared by `Logger`, `LogContext`
//!   and `Trace`
//! - `LogContext`: an immutable chain of field layers bound to a logger
//! - `Trace`: a start/stop handle produced by `Log::trace`
//!
//! Deriving a context (`with_field`, `with_fields`, `with_error`,
//! `with_tags`) never touches the parent. Each derivation adds one shared,
//! immutable layer on top of the parent's chain, so a base context can be
//! cloned into many threads and extended independently.

use super::capability::LogError;
use super::field::{FieldValue, Fielder, Fields};
use super::log_level::LogLevel;
use super::logger::Logger;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Context-building and leveled logging, available on loggers and contexts
/// alike so library code can take either.
///
/// ```
/// use rust_context_logger::prelude::*;
///
/// fn upload(log: &impl Log, file: &str) {
///     log.with_field("file", file).info("upload");
/// }
///
/// let handler = std::sync::Arc::new(MemoryHandler::new());
/// let logger = Logger::new(handler.clone());
///
/// upload(&logger, "a.png");
/// upload(&logger.with_field("user", "tobi"), "b.png");
/// assert_eq!(handler.len(), 2);
/// ```
pub trait Log {
    /// The logger entries are dispatched through.
    fn logger(&self) -> &Logger;

    /// The context new layers are derived from.
    fn context(&self) -> Cow<'_, LogContext>;

    /// Derive a context with `fielder`'s fields as a new layer.
    fn with_fields<F: Fielder + ?Sized>(&self, fielder: &F) -> LogContext {
        self.context().extend(fielder.fields())
    }

    /// Derive a context with a single field.
    fn with_field<K, V>(&self, key: K, value: V) -> LogContext
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.context().extend(Fields::new().with(key, value))
    }

    /// Derive a context with `"error"` set to the error's message.
    ///
    /// An error with a stack trace also gets `"source"` from its first
    /// frame. An error that provides fields contributes them as a further
    /// layer, so they win over `"error"` and `"source"`.
    fn with_error<E: LogError + ?Sized>(&self, err: &E) -> LogContext {
        let mut fields = Fields::new().with("error", err.to_string());
        if let Some(frame) = err.stack_tracer().and_then(|t| t.stack_trace().first()) {
            fields.insert("source", frame.to_string());
        }

        let ctx = self.context().extend(fields);
        match err.fielder() {
            Some(fielder) => ctx.extend(fielder.fields()),
            None => ctx,
        }
    }

    /// Derive a context whose telemetry increments carry `tags`.
    fn with_tags<I, S>(&self, tags: I) -> LogContext
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ctx = self.context().into_owned();
        ctx.tags = Some(tags.into_iter().map(Into::<String>::into).collect());
        ctx
    }

    /// Increment the named counter on the logger's telemetry, if any.
    fn inc(&self, name: &str, value: f64) -> LogContext {
        let ctx = self.context().into_owned();
        ctx.logger.increment(name, value, ctx.tags());
        ctx
    }

    fn log(&self, level: LogLevel, message: impl Into<String>) {
        let ctx = self.context();
        ctx.logger.dispatch(level, &ctx, || message.into());
    }

    /// Like [`Log::log`], but the message is only rendered if `level` passes.
    fn logf(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        let ctx = self.context();
        ctx.logger.dispatch(level, &ctx, || fmt::format(args));
    }

    #[inline]
    fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::Warn, message);
    }

    #[inline]
    fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    /// Log at fatal level, flush the handler and terminate the process.
    ///
    /// Termination does not depend on whether the handler succeeded.
    fn fatal(&self, message: impl Into<String>) -> ! {
        self.log(LogLevel::Fatal, message);
        self.logger().terminate()
    }

    #[inline]
    fn debugf(&self, args: fmt::Arguments<'_>) {
        self.logf(LogLevel::Debug, args);
    }

    #[inline]
    fn infof(&self, args: fmt::Arguments<'_>) {
        self.logf(LogLevel::Info, args);
    }

    #[inline]
    fn warnf(&self, args: fmt::Arguments<'_>) {
        self.logf(LogLevel::Warn, args);
    }

    #[inline]
    fn errorf(&self, args: fmt::Arguments<'_>) {
        self.logf(LogLevel::Error, args);
    }

    fn fatalf(&self, args: fmt::Arguments<'_>) -> ! {
        self.logf(LogLevel::Fatal, args);
        self.logger().terminate()
    }

    /// Log `message` at info level now and return a handle whose
    /// [`Trace::stop`] logs the completion with a `"duration"` field.
    ///
    /// ```
    /// use rust_context_logger::prelude::*;
    ///
    /// fn upload(log: &impl Log) -> std::io::Result<()> {
    ///     let trace = log.with_field("file", "sloth.png").trace("upload");
    ///     let result = std::fs::metadata("/").map(|_| ());
    ///     trace.stop_with(&result);
    ///     result
    /// }
    /// # upload(&Logger::new(DiscardHandler)).unwrap();
    /// ```
    fn trace(&self, message: impl Into<String>) -> Trace {
        let message = message.into();
        let context = self.context().into_owned();
        context.info(message.as_str());

        Trace {
            context,
            message,
            start: Instant::now(),
            finished: false,
        }
    }
}

struct Layer {
    fields: Fields,
    parent: Option<Arc<Layer>>,
}

impl Drop for Layer {
    // Unlink iteratively so long chains don't recurse on drop.
    fn drop(&mut self) {
        let mut next = self.parent.take();
        while let Some(layer) = next {
            match Arc::try_unwrap(layer) {
                Ok(mut layer) => next = layer.parent.take(),
                Err(_) => break,
            }
        }
    }
}

/// An unfinalized log context: a logger plus the field layers accumulated
/// so far.
///
/// Cloning is cheap; layers are shared, never copied.
#[derive(Clone)]
pub struct LogContext {
    pub(crate) logger: Logger,
    layers: Option<Arc<Layer>>,
    tags: Option<Arc<[String]>>,
}

impl LogContext {
    /// An empty context bound to `logger`
    pub fn new(logger: Logger) -> Self {
        Self {
            logger,
            layers: None,
            tags: None,
        }
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Telemetry tags set by the nearest `with_tags`
    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or(&[])
    }

    /// Number of layers accumulated
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut cursor = self.layers.as_deref();
        while let Some(layer) = cursor {
            depth += 1;
            cursor = layer.parent.as_deref();
        }
        depth
    }

    /// All layers collapsed into one map; later layers win.
    pub fn fields(&self) -> Fields {
        let mut chain = Vec::new();
        let mut cursor = self.layers.as_deref();
        while let Some(layer) = cursor {
            chain.push(&layer.fields);
            cursor = layer.parent.as_deref();
        }

        let mut merged = Fields::new();
        for fields in chain.into_iter().rev() {
            merged.extend_from(fields);
        }
        merged
    }

    /// Run `f` inside a trace, logging its completion with the outcome.
    pub fn traced<T, E, F>(&self, message: impl Into<String>, f: F) -> Result<T, E>
    where
        E: LogError,
        F: FnOnce() -> Result<T, E>,
    {
        let trace = self.trace(message);
        let result = f();
        trace.stop_with(&result);
        result
    }

    fn extend(&self, fields: Fields) -> LogContext {
        LogContext {
            logger: self.logger.clone(),
            layers: Some(Arc::new(Layer {
                fields,
                parent: self.layers.clone(),
            })),
            tags: self.tags.clone(),
        }
    }
}

impl Log for LogContext {
    fn logger(&self) -> &Logger {
        &self.logger
    }

    fn context(&self) -> Cow<'_, LogContext> {
        Cow::Borrowed(self)
    }
}

impl fmt::Debug for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogContext")
            .field("fields", &self.fields())
            .field("tags", &self.tags())
            .finish()
    }
}

/// Handle returned by [`Log::trace`].
///
/// Dropping it without calling [`Trace::stop`] logs a successful completion.
pub struct Trace {
    context: LogContext,
    message: String,
    start: Instant,
    finished: bool,
}

impl Trace {
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Log the completion entry.
    ///
    /// `None` logs at info level. `Some(err)` logs at error level with `err`
    /// attached as by [`Log::with_error`].
    pub fn stop(mut self, err: Option<&dyn LogError>) {
        self.finish(err);
    }

    /// Log the completion entry for the outcome of an operation.
    pub fn stop_with<T, E: LogError>(self, result: &Result<T, E>) {
        self.stop(result.as_ref().err().map(|e| e as &dyn LogError));
    }

    fn finish(&mut self, err: Option<&dyn LogError>) {
        if self.finished {
            return;
        }
        self.finished = true;

        let ctx = self.context.with_field("duration", self.start.elapsed());
        match err {
            Some(err) => ctx.with_error(err).error(self.message.as_str()),
            None => ctx.info(self.message.as_str()),
        }
    }
}

impl Drop for Trace {
    fn drop(&mut self) {
        self.finish(None);
    }
}

impl Log for Trace {
    fn logger(&self) -> &Logger {
        &self.context.logger
    }

    fn context(&self) -> Cow<'_, LogContext> {
        Cow::Borrowed(&self.context)
    }
}

impl fmt::Debug for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trace")
            .field("message", &self.message)
            .field("elapsed", &self.elapsed())
            .field("finished", &self.finished)
            .finish()
    }
}
