//! Logging macros for ergonomic log message formatting.
//!
//! The leveled macros take anything implementing [`Log`](crate::Log) (a
//! [`Logger`](crate::Logger), a [`LogContext`](crate::LogContext) or a
//! [`Trace`](crate::Trace)) followed by `format!`-style arguments. The message
//! is only rendered when the level is enabled.
//!
//! # Examples
//!
//! ```
//! use rust_context_logger::prelude::*;
//! use rust_context_logger::{fields, info, warn};
//!
//! let logger = Logger::new(DiscardHandler);
//!
//! info!(logger, "Server started");
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! let ctx = logger.with_fields(&fields! { "user" => "tobi", "attempt" => 2 });
//! warn!(ctx, "Retry {} of {}", 2, 5);
//! ```

/// Log a message at the given level with automatic formatting.
///
/// ```
/// # use rust_context_logger::prelude::*;
/// # let logger = Logger::new(DiscardHandler);
/// use rust_context_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($ctx:expr, $level:expr, $($arg:tt)+) => {{
        use $crate::Log as _;
        ($ctx).logf($level, ::std::format_args!($($arg)+))
    }};
}

/// Log a debug-level message.
///
/// ```
/// # use rust_context_logger::prelude::*;
/// # let logger = Logger::new(DiscardHandler);
/// use rust_context_logger::debug;
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($ctx:expr, $($arg:tt)+) => {
        $crate::log!($ctx, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($ctx:expr, $($arg:tt)+) => {
        $crate::log!($ctx, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($ctx:expr, $($arg:tt)+) => {
        $crate::log!($ctx, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
///
/// ```
/// # use rust_context_logger::prelude::*;
/// # let logger = Logger::new(DiscardHandler);
/// use rust_context_logger::error;
/// error!(logger, "Code: {}, message: {}", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($ctx:expr, $($arg:tt)+) => {
        $crate::log!($ctx, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message, flush, and terminate the process.
///
/// ```no_run
/// # use rust_context_logger::prelude::*;
/// # let logger = Logger::new(DiscardHandler);
/// use rust_context_logger::fatal;
/// fatal!(logger, "Unable to recover from error: {}", "disk full");
/// ```
#[macro_export]
macro_rules! fatal {
    ($ctx:expr, $($arg:tt)+) => {{
        use $crate::Log as _;
        ($ctx).fatalf(::std::format_args!($($arg)+))
    }};
}

/// Build a [`Fields`](crate::Fields) map.
///
/// ```
/// use rust_context_logger::fields;
///
/// let fields = fields! { "user" => "tobi", "size" => 1024 };
/// assert_eq!(fields.len(), 2);
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        $crate::Fields::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut fields = $crate::Fields::new();
        $(fields.insert($key, $value);)+
        fields
    }};
}

/// Path of the enclosing function, e.g. `my_crate::upload::send`.
#[macro_export]
macro_rules! function_name {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let name = type_name_of(f);
        name.strip_suffix("::f").unwrap_or(name)
    }};
}

/// [`Frame`](crate::Frame) for the current function, file and line.
#[macro_export]
macro_rules! frame {
    () => {
        $crate::Frame::new($crate::function_name!(), ::std::file!(), ::std::line!())
    };
}

/// Wrap an error in [`Traced`](crate::Traced), recording the current frame.
///
/// ```
/// use rust_context_logger::prelude::*;
/// use rust_context_logger::traced;
///
/// fn read_config() -> std::result::Result<String, Traced<std::io::Error>> {
///     std::fs::read_to_string("/nonexistent/app.toml").map_err(|e| traced!(e))
/// }
///
/// let logger = Logger::new(MemoryHandler::new());
/// if let Err(err) = read_config() {
///     let ctx = logger.with_error(&err);
///     assert!(ctx.fields().contains_key("source"));
/// }
/// ```
#[macro_export]
macro_rules! traced {
    ($err:expr) => {
        $crate::Traced::new($err, $crate::frame!())
    };
}
