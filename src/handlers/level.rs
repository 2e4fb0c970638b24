//! Level filter handler

use crate::core::{Handler, LogEntry, LogLevel, Result};

/// Passes entries at or above `level` to the wrapped handler.
///
/// Useful for routing only warnings and errors to one destination of a
/// [`MultiHandler`](super::MultiHandler) while a logger runs at debug.
pub struct LevelFilter<H> {
    level: LogLevel,
    inner: H,
}

impl<H: Handler> LevelFilter<H> {
    pub fn new(inner: H, level: LogLevel) -> Self {
        Self { level, inner }
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn inner(&self) -> &H {
        &self.inner
    }
}

impl<H: Handler> Handler for LevelFilter<H> {
    fn handle(&self, entry: &LogEntry) -> Result<()> {
        if entry.level < self.level {
            return Ok(());
        }

        self.inner.handle(entry)
    }

    fn flush(&self) -> Result<()> {
        self.inner.flush()
    }

    fn name(&self) -> &str {
        "level"
    }
}
