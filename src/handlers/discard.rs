//! Handler that drops every entry

use crate::core::{Handler, LogEntry, Result};

/// Discards entries; useful for benchmarks.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardHandler;

impl Handler for DiscardHandler {
    #[inline]
    fn handle(&self, _entry: &LogEntry) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "discard"
    }
}
