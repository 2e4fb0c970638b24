//! DogStatsD counters over UDP

use crate::core::{LoggerError, Result, Telemetry};
use parking_lot::RwLock;
use std::net::{ToSocketAddrs, UdpSocket};

/// Default DogStatsD agent address
pub const DEFAULT_ADDR: &str = "127.0.0.1:8125";

/// StatsD telemetry
///
/// Each increment is sent as one datagram:
/// `<namespace><name>:<value>|c` followed by `|#tag1,tag2` when the context
/// carries tags.
#[derive(Debug)]
pub struct StatsdTelemetry {
    socket: UdpSocket,
    namespace: RwLock<String>,
}

impl StatsdTelemetry {
    pub fn connect<A: ToSocketAddrs>(addr: A) -> Result<Self> {
        let target = addr
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| LoggerError::config("statsd", "address did not resolve"))?;

        let socket = UdpSocket::bind(if target.is_ipv4() { "0.0.0.0:0" } else { "[::]:0" })?;
        socket.connect(target)?;

        Ok(Self {
            socket,
            namespace: RwLock::new(String::new()),
        })
    }

    /// Connect to the local agent on [`DEFAULT_ADDR`]
    pub fn local() -> Result<Self> {
        Self::connect(DEFAULT_ADDR)
    }

    /// Prefix prepended to every metric name, e.g. `"myapp."`
    pub fn set_namespace(&self, namespace: impl Into<String>) {
        *self.namespace.write() = namespace.into();
    }

    pub fn namespace(&self) -> String {
        self.namespace.read().clone()
    }

    fn format(&self, name: &str, value: f64, tags: &[String]) -> String {
        let mut line = format!("{}{}:{}|c", self.namespace.read(), name, value);
        if !tags.is_empty() {
            line.push_str("|#");
            line.push_str(&tags.join(","));
        }
        line
    }
}

impl Telemetry for StatsdTelemetry {
    fn increment(&self, name: &str, value: f64, tags: &[String]) -> Result<()> {
        let line = self.format(name, value, tags);
        self.socket.send(line.as_bytes())?;
        Ok(())
    }
}
