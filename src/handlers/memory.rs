//! In-memory handler, mostly for tests

use crate::core::{Handler, LogEntry, Result};
use parking_lot::Mutex;

/// Stores every entry it receives.
#[derive(Debug, Default)]
pub struct MemoryHandler {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemoryHandler {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of the stored entries
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().clone()
    }

    pub fn last(&self) -> Option<LogEntry> {
        self.entries.lock().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl Handler for MemoryHandler {
    fn handle(&self, entry: &LogEntry) -> Result<()> {
        self.entries.lock().push(entry.clone());
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
