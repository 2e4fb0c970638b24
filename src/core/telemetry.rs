//! Telemetry trait for counter sinks attached to a logger

use super::error::Result;
use std::sync::Arc;

/// Named-counter sink.
///
/// `tags` come from the context the increment was issued on. Backends decide
/// how to interpret them (label values, DogStatsD tags, ...).
pub trait Telemetry: Send + Sync {
    fn increment(&self, name: &str, value: f64, tags: &[String]) -> Result<()>;
}

impl<T: Telemetry + ?Sized> Telemetry for Arc<T> {
    fn increment(&self, name: &str, value: f64, tags: &[String]) -> Result<()> {
        (**self).increment(name, value, tags)
    }
}
