//! Log recording.

use std::fmt;

use tracing::trace;
use vardump_foundation::{Dict, Result, Seq, Value};

use crate::clock::timestamp;
use crate::target::{Collector, SharedTarget, TargetSlot};

/// Severity of a log message, most severe first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// System is unusable.
    Emergency,
    /// Action must be taken immediately.
    Alert,
    /// Critical conditions.
    Critical,
    /// Runtime errors.
    Error,
    /// Exceptional occurrences that are not errors.
    Warning,
    /// Normal but significant events.
    Notice,
    /// Interesting events.
    Info,
    /// Detailed debug information.
    Debug,
}

impl Level {
    /// Returns the lowercase level name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Emergency => "emergency",
            Self::Alert => "alert",
            Self::Critical => "critical",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Notice => "notice",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structured logger.
///
/// Only [`Logger::log`] is required; the per-level methods route through it.
pub trait Logger {
    /// Logs a message at `level`.
    fn log(&mut self, level: Level, message: &str, context: Dict);

    /// Logs at [`Level::Emergency`].
    fn emergency(&mut self, message: &str, context: Dict) {
        self.log(Level::Emergency, message, context);
    }

    /// Logs at [`Level::Alert`].
    fn alert(&mut self, message: &str, context: Dict) {
        self.log(Level::Alert, message, context);
    }

    /// Logs at [`Level::Critical`].
    fn critical(&mut self, message: &str, context: Dict) {
        self.log(Level::Critical, message, context);
    }

    /// Logs at [`Level::Error`].
    fn error(&mut self, message: &str, context: Dict) {
        self.log(Level::Error, message, context);
    }

    /// Logs at [`Level::Warning`].
    fn warning(&mut self, message: &str, context: Dict) {
        self.log(Level::Warning, message, context);
    }

    /// Logs at [`Level::Notice`].
    fn notice(&mut self, message: &str, context: Dict) {
        self.log(Level::Notice, message, context);
    }

    /// Logs at [`Level::Info`].
    fn info(&mut self, message: &str, context: Dict) {
        self.log(Level::Info, message, context);
    }

    /// Logs at [`Level::Debug`].
    fn debug(&mut self, message: &str, context: Dict) {
        self.log(Level::Debug, message, context);
    }
}

/// Forwards messages to `tracing` events.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&mut self, level: Level, message: &str, context: Dict) {
        match level {
            Level::Emergency | Level::Alert | Level::Critical | Level::Error => {
                tracing::error!(%level, ?context, "{message}");
            }
            Level::Warning => tracing::warn!(%level, ?context, "{message}"),
            Level::Notice | Level::Info => tracing::info!(%level, ?context, "{message}"),
            Level::Debug => tracing::debug!(%level, ?context, "{message}"),
        }
    }
}

/// Records every message, then passes it to the wrapped logger unchanged.
pub struct LogCollector<L: Logger> {
    inner: L,
    messages: Vec<Value>,
    target: TargetSlot,
}

impl<L: Logger> LogCollector<L> {
    /// Wraps `inner`.
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            messages: Vec::new(),
            target: TargetSlot::new(),
        }
    }

    /// Returns the buffered messages, oldest first.
    ///
    /// Each is a mapping with `time`, `level`, `message` and `context`.
    #[must_use]
    pub fn messages(&self) -> &[Value] {
        &self.messages
    }

    /// Returns the wrapped logger.
    pub fn inner(&self) -> &L {
        &self.inner
    }
}

impl<L: Logger> Logger for LogCollector<L> {
    fn log(&mut self, level: Level, message: &str, context: Dict) {
        trace!(%level, "log message buffered");
        self.messages.push(Value::Dict(
            Dict::new()
                .insert("time", timestamp())
                .insert("level", level.as_str())
                .insert("message", message)
                .insert("context", context.clone()),
        ));
        self.inner.log(level, message, context);
    }
}

impl<L: Logger> Collector for LogCollector<L> {
    fn set_target(&mut self, target: SharedTarget) {
        self.target.set(target);
    }

    fn export(&self) -> Result<()> {
        let payload: Seq = self.messages.iter().cloned().collect();
        self.target.send("LogCollector", Value::Seq(payload))
    }
}
