//! Handler implementations
//!
//! Renderers (`text`, `cli`, `json`, `logfmt`), composites (`level`,
//! `multi`), test doubles (`memory`, `discard`) and, with the `network`
//! feature, a GELF shipper for Graylog.

pub mod cli;
pub mod discard;
#[cfg(feature = "network")]
pub mod graylog;
pub mod json;
pub mod level;
pub mod logfmt;
pub mod memory;
pub mod multi;
pub mod text;

pub use cli::CliHandler;
pub use discard::DiscardHandler;
#[cfg(feature = "network")]
pub use graylog::GraylogHandler;
pub use json::JsonHandler;
pub use level::LevelFilter;
pub use logfmt::LogfmtHandler;
pub use memory::MemoryHandler;
pub use multi::MultiHandler;
pub use text::TextHandler;

// Re-export the trait for convenience
pub use crate::core::{Handler, HandlerFn};

use crate::core::LogLevel;
use parking_lot::Mutex;
use std::io::Write;

/// Writer shared by the line-oriented handlers
pub(crate) type SharedWriter = Mutex<Box<dyn Write + Send>>;

pub(crate) fn shared_writer<W: Write + Send + 'static>(writer: W) -> SharedWriter {
    Mutex::new(Box::new(writer))
}

/// Color `text` for `level` when enabled
#[cfg(feature = "console")]
pub(crate) fn paint(text: &str, level: LogLevel, enabled: bool) -> String {
    use colored::Colorize;

    if enabled {
        text.color(level.color_code()).to_string()
    } else {
        text.to_string()
    }
}

#[cfg(not(feature = "console"))]
pub(crate) fn paint(text: &str, _level: LogLevel, _enabled: bool) -> String {
    text.to_string()
}

#[cfg(test)]
pub(crate) mod testing {
    use parking_lot::Mutex;
    use std::io::{self, Write};
    use std::sync::Arc;

    /// In-memory writer whose contents stay readable after being handed out
    #[derive(Clone, Default)]
    pub(crate) struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        pub(crate) fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock()).into_owned()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }
}
