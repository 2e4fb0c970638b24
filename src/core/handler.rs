//! Handler trait for log output destinations

use super::{error::Result, log_entry::LogEntry};
use std::sync::Arc;

/// Sink for finalized entries: renders them or ships them elsewhere.
///
/// Loggers may be shared across threads, so implementations must make
/// `handle` safe to call concurrently.
pub trait Handler: Send + Sync {
    fn handle(&self, entry: &LogEntry) -> Result<()>;

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "handler"
    }
}

impl<H: Handler + ?Sized> Handler for Arc<H> {
    fn handle(&self, entry: &LogEntry) -> Result<()> {
        (**self).handle(entry)
    }

    fn flush(&self) -> Result<()> {
        (**self).flush()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<H: Handler + ?Sized> Handler for Box<H> {
    fn handle(&self, entry: &LogEntry) -> Result<()> {
        (**self).handle(entry)
    }

    fn flush(&self) -> Result<()> {
        (**self).flush()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Adapter allowing an ordinary closure to be used as a handler.
///
/// ```
/// use rust_context_logger::prelude::*;
///
/// let logger = Logger::new(HandlerFn::new(|entry: &LogEntry| {
///     println!("{} {}", entry.level, entry.message);
///     Ok(())
/// }));
/// logger.info("hello");
/// ```
pub struct HandlerFn<F>(pub F);

impl<F> HandlerFn<F>
where
    F: Fn(&LogEntry) -> Result<()> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> Handler for HandlerFn<F>
where
    F: Fn(&LogEntry) -> Result<()> + Send + Sync,
{
    fn handle(&self, entry: &LogEntry) -> Result<()> {
        (self.0)(entry)
    }

    fn name(&self) -> &str {
        "fn"
    }
}
