//! Telemetry backends
//!
//! [`CounterRegistry`] keeps Prometheus-style labelled counters in process;
//! [`StatsdTelemetry`] (feature `network`) ships DogStatsD counters over UDP.

pub mod counters;
#[cfg(feature = "network")]
pub mod statsd;

pub use counters::{CounterRegistry, CounterVec};
#[cfg(feature = "network")]
pub use statsd::StatsdTelemetry;

pub use crate::core::Telemetry;
