//! Graylog handler (GELF 1.1 over UDP)
//!
//! Entries are encoded as GELF JSON messages, optionally gzip-compressed, and
//! split into GELF chunks when they exceed the configured datagram size.

use crate::core::{FieldValue, Handler, LogEntry, LogLevel, LoggerError, Result};
use flate2::write::GzEncoder;
use flate2::Compression;
use serde_json::{Map, Value};
use std::io::Write;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, ToSocketAddrs, UdpSocket};

/// GELF chunk magic bytes
const CHUNK_MAGIC: [u8; 2] = [0x1e, 0x0f];
/// Magic (2) + message id (8) + sequence number (1) + sequence count (1)
const CHUNK_HEADER_LEN: usize = 12;
/// Graylog rejects messages split into more chunks than this
const MAX_CHUNKS: usize = 128;

pub const DEFAULT_CHUNK_SIZE: usize = 8192;

/// Graylog handler
///
/// # Example
///
/// ```no_run
/// use rust_context_logger::handlers::GraylogHandler;
/// use rust_context_logger::prelude::*;
///
/// let handler = GraylogHandler::connect("udp://127.0.0.1:12201")?
///     .with_compression(true);
///
/// let logger = Logger::new(handler);
/// logger.with_field("user", "tobi").info("upload");
/// # Ok::<(), LoggerError>(())
/// ```
pub struct GraylogHandler {
    socket: UdpSocket,
    target: SocketAddr,
    host: String,
    compress: bool,
    chunk_size: usize,
}

impl GraylogHandler {
    /// Connect to a GELF UDP input.
    ///
    /// The address must be of the form `udp://<host>:<port>`.
    pub fn connect(url: &str) -> Result<Self> {
        let addr = url.strip_prefix("udp://").ok_or_else(|| {
            LoggerError::config("graylog", format!("unsupported address '{}', expected udp://host:port", url))
        })?;

        let target = addr
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| LoggerError::config("graylog", format!("'{}' did not resolve", addr)))?;

        let bind = if target.is_ipv4() {
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
        } else {
            SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))
        };
        let socket = UdpSocket::bind(bind)?;
        socket.connect(target)?;

        Ok(Self {
            socket,
            target,
            host: std::env::var("HOSTNAME").unwrap_or_else(|_| "localhost".to_string()),
            compress: false,
            chunk_size: DEFAULT_CHUNK_SIZE,
        })
    }

    /// Value of the GELF `host` field
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Gzip each message before sending
    #[must_use]
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Largest datagram sent, header included
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(CHUNK_HEADER_LEN + 1);
        self
    }

    pub fn target(&self) -> SocketAddr {
        self.target
    }

    /// GELF payload for `entry`, before compression
    pub fn encode(&self, entry: &LogEntry) -> Result<Vec<u8>> {
        let mut message = Map::new();
        message.insert("version".into(), Value::from("1.1"));
        message.insert("host".into(), Value::from(self.host.as_str()));
        message.insert("short_message".into(), Value::from(entry.message.as_str()));
        message.insert(
            "timestamp".into(),
            Value::from(entry.timestamp.timestamp_millis() as f64 / 1000.0),
        );
        message.insert("level".into(), Value::from(severity(entry.level)));

        for (key, value) in &entry.fields {
            message.insert(additional_field_name(key), additional_field_value(value));
        }

        Ok(serde_json::to_vec(&Value::Object(message))?)
    }

    fn compress(payload: &[u8]) -> Result<Vec<u8>> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(payload)?;
        Ok(encoder.finish()?)
    }

    /// Split `payload` into GELF chunks; a payload that fits is returned whole
    fn chunks(&self, payload: &[u8]) -> Result<Vec<Vec<u8>>> {
        if payload.len() <= self.chunk_size {
            return Ok(vec![payload.to_vec()]);
        }

        let body = self.chunk_size - CHUNK_HEADER_LEN;
        let count = payload.len().div_ceil(body);
        if count > MAX_CHUNKS {
            return Err(LoggerError::MessageTooLarge {
                size: payload.len(),
                limit: MAX_CHUNKS * body,
            });
        }

        let id = rand::random::<u64>().to_be_bytes();
        Ok(payload
            .chunks(body)
            .enumerate()
            .map(|(seq, part)| {
                let mut chunk = Vec::with_capacity(CHUNK_HEADER_LEN + part.len());
                chunk.extend_from_slice(&CHUNK_MAGIC);
                chunk.extend_from_slice(&id);
                chunk.push(seq as u8);
                chunk.push(count as u8);
                chunk.extend_from_slice(part);
                chunk
            })
            .collect())
    }
}

impl Handler for GraylogHandler {
    fn handle(&self, entry: &LogEntry) -> Result<()> {
        let mut payload = self.encode(entry)?;
        if self.compress {
            payload = Self::compress(&payload)?;
        }

        for chunk in self.chunks(&payload)? {
            self.socket.send(&chunk)?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "graylog"
    }
}

/// Syslog severity
fn severity(level: LogLevel) -> u8 {
    match level {
        LogLevel::Debug | LogLevel::Invalid => 7,
        LogLevel::Info => 6,
        LogLevel::Warn => 4,
        LogLevel::Error => 3,
        LogLevel::Fatal => 2,
    }
}

/// GELF additional fields are `_`-prefixed, restricted to `[\w.-]`, and `_id`
/// is reserved.
fn additional_field_name(key: &str) -> String {
    let cleaned: String = key
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned == "id" {
        "_id_".to_string()
    } else {
        format!("_{}", cleaned)
    }
}

/// GELF only accepts strings and numbers
fn additional_field_value(value: &FieldValue) -> Value {
    match value.to_json_value() {
        number @ Value::Number(_) => number,
        Value::String(s) => Value::String(s),
        _ => Value::String(value.to_string()),
    }
}
