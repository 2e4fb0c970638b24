//! Fan-out handler

use crate::core::{Handler, LogEntry, Result};

/// Sends every entry to each of its handlers, in order.
///
/// All handlers are invoked even if one fails; the first failure is
/// returned.
///
/// ```
/// use rust_context_logger::prelude::*;
///
/// let logger = Logger::new(
///     MultiHandler::new()
///         .with(TextHandler::stderr())
///         .with(LevelFilter::new(JsonHandler::stderr(), LogLevel::Error)),
/// );
/// logger.with_field("user", "tobi").info("upload");
/// ```
#[derive(Default)]
pub struct MultiHandler {
    handlers: Vec<Box<dyn Handler>>,
}

impl MultiHandler {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    #[must_use]
    pub fn with<H: Handler + 'static>(mut self, handler: H) -> Self {
        self.push(handler);
        self
    }

    pub fn push<H: Handler + 'static>(&mut self, handler: H) {
        self.handlers.push(Box::new(handler));
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Handler for MultiHandler {
    fn handle(&self, entry: &LogEntry) -> Result<()> {
        let mut first_err = None;
        for handler in &self.handlers {
            if let Err(e) = handler.handle(entry) {
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    fn flush(&self) -> Result<()> {
        let mut first_err = None;
        for handler in &self.handlers {
            if let Err(e) = handler.flush() {
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    fn name(&self) -> &str {
        "multi"
    }
}
