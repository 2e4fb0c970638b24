//! In-process labelled counters

use crate::core::{LoggerError, Result, Telemetry};
use parking_lot::{Mutex, RwLock};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::Arc;

/// A family of counters sharing a name, distinguished by label values.
#[derive(Debug)]
pub struct CounterVec {
    name: String,
    help: String,
    labels: Vec<String>,
    values: Mutex<BTreeMap<Vec<String>, f64>>,
}

impl CounterVec {
    pub fn new(name: impl Into<String>, help: impl Into<String>, labels: &[&str]) -> Self {
        Self {
            name: name.into(),
            help: help.into(),
            labels: labels.iter().map(|l| l.to_string()).collect(),
            values: Mutex::new(BTreeMap::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label_names(&self) -> &[String] {
        &self.labels
    }

    /// Add `value` to the counter identified by `label_values`
    pub fn add<S: AsRef<str>>(&self, label_values: &[S], value: f64) -> Result<()> {
        if label_values.len() != self.labels.len() {
            return Err(LoggerError::LabelMismatch {
                name: self.name.clone(),
                expected: self.labels.len(),
                actual: label_values.len(),
            });
        }
        if value.is_nan() || value < 0.0 {
            return Err(LoggerError::telemetry(format!(
                "counter '{}' cannot be incremented by {}",
                self.name, value
            )));
        }

        let key = label_values.iter().map(|v| v.as_ref().to_string()).collect();
        *self.values.lock().entry(key).or_insert(0.0) += value;
        Ok(())
    }

    /// Current value; `None` if that label combination was never incremented
    pub fn get<S: AsRef<str>>(&self, label_values: &[S]) -> Option<f64> {
        let key: Vec<String> = label_values.iter().map(|v| v.as_ref().to_string()).collect();
        self.values.lock().get(&key).copied()
    }

    fn render_into(&self, out: &mut String) {
        let _ = writeln!(out, "# HELP {} {}", self.name, self.help);
        let _ = writeln!(out, "# TYPE {} counter", self.name);

        for (values, total) in self.values.lock().iter() {
            if self.labels.is_empty() {
                let _ = writeln!(out, "{} {}", self.name, total);
                continue;
            }

            let labels: Vec<String> = self
                .labels
                .iter()
                .zip(values)
                .map(|(name, value)| format!("{}=\"{}\"", name, escape_label(value)))
                .collect();
            let _ = writeln!(out, "{}{{{}}} {}", self.name, labels.join(","), total);
        }
    }
}

fn escape_label(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// Counter registry usable as a logger's [`Telemetry`].
///
/// Counters must be registered before use. The tags of the context issuing
/// an increment are the label values, in order.
///
/// ```
/// use rust_context_logger::prelude::*;
/// use rust_context_logger::telemetry::{CounterRegistry, CounterVec};
/// use std::sync::Arc;
///
/// let registry = Arc::new(CounterRegistry::new());
/// registry.register(CounterVec::new("hd_errors_total", "Number of hard-disk errors.", &["device"]))?;
///
/// let logger = Logger::builder()
///     .handler(DiscardHandler)
///     .telemetry(Arc::clone(&registry))
///     .build();
///
/// logger.with_tags(["sda"]).inc("hd_errors_total", 1.0).error("read failed");
/// assert_eq!(registry.value("hd_errors_total", &["sda"]), Some(1.0));
/// # Ok::<(), LoggerError>(())
/// ```
#[derive(Debug, Default)]
pub struct CounterRegistry {
    counters: RwLock<BTreeMap<String, Arc<CounterVec>>>,
}

impl CounterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a counter family; names must be unique
    pub fn register(&self, counter: CounterVec) -> Result<Arc<CounterVec>> {
        let mut counters = self.counters.write();
        if counters.contains_key(counter.name()) {
            return Err(LoggerError::config(
                "telemetry",
                format!("counter '{}' is already registered", counter.name()),
            ));
        }

        let counter = Arc::new(counter);
        counters.insert(counter.name().to_string(), Arc::clone(&counter));
        Ok(counter)
    }

    pub fn get(&self, name: &str) -> Option<Arc<CounterVec>> {
        self.counters.read().get(name).cloned()
    }

    pub fn value(&self, name: &str, label_values: &[&str]) -> Option<f64> {
        self.get(name)?.get(label_values)
    }

    /// Prometheus text exposition of every registered counter
    pub fn render(&self) -> String {
        let mut out = String::new();
        for counter in self.counters.read().values() {
            counter.render_into(&mut out);
        }
        out
    }
}

impl Telemetry for CounterRegistry {
    fn increment(&self, name: &str, value: f64, tags: &[String]) -> Result<()> {
        let counter = self.get(name).ok_or_else(|| LoggerError::UnknownCounter {
            name: name.to_string(),
        })?;
        counter.add(tags, value)
    }
}
