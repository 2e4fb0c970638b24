//! Optional capabilities of error values attached with `with_error`
//!
//! An error may expose a stack trace ([`StackTracer`]), structured fields
//! ([`Fielder`]), both or neither. [`LogError`] is the probe through which
//! the context chain discovers them; both probes default to `None`.

use super::error::LoggerError;
use super::field::Fielder;
use std::error::Error as StdError;
use std::fmt;

/// A single call-site frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub function: String,
    pub file: String,
    pub line: u32,
}

impl Frame {
    pub fn new(function: impl Into<String>, file: impl Into<String>, line: u32) -> Self {
        Self {
            function: function.into(),
            file: file.into(),
            line,
        }
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}:{}", self.function, self.file, self.line)
    }
}

/// Errors that carry the frames they were raised through, innermost first.
pub trait StackTracer {
    fn stack_trace(&self) -> &[Frame];
}

/// An error value that can be attached to a log context.
pub trait LogError: fmt::Display {
    fn stack_tracer(&self) -> Option<&dyn StackTracer> {
        None
    }

    fn fielder(&self) -> Option<&dyn Fielder> {
        None
    }
}

impl LogError for dyn StdError + '_ {}
impl LogError for dyn StdError + Send + Sync + '_ {}
impl LogError for std::io::Error {}
impl LogError for std::fmt::Error {}
impl LogError for serde_json::Error {}
impl LogError for LoggerError {}

impl<E: LogError + ?Sized> LogError for Box<E> {
    fn stack_tracer(&self) -> Option<&dyn StackTracer> {
        (**self).stack_tracer()
    }

    fn fielder(&self) -> Option<&dyn Fielder> {
        (**self).fielder()
    }
}

/// An error annotated with the frames it passed through.
///
/// Build one with the [`traced!`](crate::traced) macro, which records the
/// enclosing function, file and line. The wrapped error's fielder capability
/// is forwarded.
#[derive(Debug, Clone)]
pub struct Traced<E> {
    error: E,
    frames: Vec<Frame>,
}

impl<E> Traced<E> {
    pub fn new(error: E, frame: Frame) -> Self {
        Self {
            error,
            frames: vec![frame],
        }
    }

    /// Record an outer frame the error propagated through
    #[must_use]
    pub fn with_frame(mut self, frame: Frame) -> Self {
        self.frames.push(frame);
        self
    }

    pub fn inner(&self) -> &E {
        &self.error
    }

    pub fn into_inner(self) -> E {
        self.error
    }
}

impl<E: fmt::Display> fmt::Display for Traced<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.error.fmt(f)
    }
}

impl<E: StdError> StdError for Traced<E> {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.error.source()
    }
}

impl<E> StackTracer for Traced<E> {
    fn stack_trace(&self) -> &[Frame] {
        &self.frames
    }
}

impl<E: LogError> LogError for Traced<E> {
    fn stack_tracer(&self) -> Option<&dyn StackTracer> {
        Some(self)
    }

    fn fielder(&self) -> Option<&dyn Fielder> {
        self.error.fielder()
    }
}
