//! Error types for vardump.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use thiserror::Error;

/// Result alias used throughout vardump.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for vardump operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<String>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Creates a "not configured" error for a component exported without a sink.
    #[must_use]
    pub fn not_configured(component: &'static str) -> Self {
        Self::new(ErrorKind::NotConfigured { component })
    }

    /// Creates a closed handle error.
    #[must_use]
    pub fn closed_handle() -> Self {
        Self::new(ErrorKind::ClosedHandle)
    }

    /// Creates an invalid open-mode error.
    #[must_use]
    pub fn invalid_mode(mode: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidMode(mode.into()))
    }

    /// Creates a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Serialization(message.into()))
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::new(ErrorKind::Io(err))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Collected data was exported before a destination was attached.
    #[error("{component} is not configured: no target attached")]
    NotConfigured {
        /// The component that was asked to export.
        component: &'static str,
    },

    /// Read or write on a handle that has already been closed.
    #[error("handle is closed")]
    ClosedHandle,

    /// Unsupported open mode for a file handle.
    #[error("invalid open mode: {0:?}")]
    InvalidMode(String),

    /// Underlying I/O failure.
    #[error("i/o error: {0}")]
    Io(#[source] std::io::Error),

    /// Emitter failed to produce text.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}
