//! Error types for Hermes.
//!
//! This module provides the [`HermesError`] type, the standard error type
//! used throughout the framework.
//!
//! The error taxonomy separates failures by *when* they can happen:
//!
//! - [`HermesError::Configuration`] - assembly or call-construction time,
//!   before the pipeline runs. Never produced by the chain itself.
//! - [`HermesError::Middleware`] / [`HermesError::Transport`] - request
//!   execution time, raised by a stage or the adapter. The pipeline
//!   propagates these unchanged; no later step executes once one is raised.
//! - [`HermesError::StatusMismatch`] / [`HermesError::Request`] - produced
//!   only by the strict verb forms when interpreting a finished dispatch.
//!
//! Execution-time variants carry the context as of the failure when one is
//! available, so callers can inspect the partially-processed request. A
//! middleware that raised before touching the context may omit it; both
//! shapes are terminal and equivalent for propagation purposes.

use crate::conn::Conn;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using [`HermesError`].
pub type HermesResult<T> = Result<T, HermesError>;

/// Categories of errors for classification and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Invalid middleware options, method name, or request construction.
    Configuration,
    /// A middleware stage short-circuited the pipeline.
    Middleware,
    /// The transport adapter failed (connection refused, timeout, ...).
    Transport,
    /// A structurally successful response fell outside the accepted range.
    StatusMismatch,
    /// A strict-form call observed a pipeline failure.
    Request,
}

/// Standard error type for Hermes.
///
/// # Example
///
/// ```
/// use hermes_core::{ErrorCategory, HermesError};
///
/// fn check_base(base: &str) -> Result<(), HermesError> {
///     if base.is_empty() {
///         return Err(HermesError::configuration("base URL cannot be empty"));
///     }
///     Ok(())
/// }
///
/// let err = check_base("").unwrap_err();
/// assert_eq!(err.category(), ErrorCategory::Configuration);
/// ```
#[derive(Error, Debug)]
pub enum HermesError {
    /// Invalid configuration, detected at assembly or call-construction time.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Human-readable error message.
        message: String,
    },

    /// A middleware stage aborted the pipeline without calling its
    /// continuation.
    #[error("Middleware error: {reason}")]
    Middleware {
        /// Why the stage short-circuited.
        reason: String,
        /// The context as of the abort, when the stage supplied one.
        conn: Option<Box<Conn>>,
    },

    /// The transport adapter failed to produce a response.
    #[error("Transport error: {reason}")]
    Transport {
        /// Why the transport failed.
        reason: String,
        /// The context as of the failure, when the adapter supplied one.
        conn: Option<Box<Conn>>,
        /// The underlying transport error, when one exists.
        #[source]
        source: Option<anyhow::Error>,
    },

    /// A successful response carried a status outside the accepted range.
    ///
    /// Surfaced only by strict-form verb calls.
    #[error("Unacceptable response status: {status}")]
    StatusMismatch {
        /// The status the response actually carried.
        status: StatusCode,
        /// The finished context, for diagnostics.
        conn: Box<Conn>,
    },

    /// A strict-form verb call observed a pipeline failure.
    #[error("Request failed: {reason}")]
    Request {
        /// The reason reported by the failing step.
        reason: String,
        /// The context as of the failure, when one was carried.
        conn: Option<Box<Conn>>,
    },
}

impl HermesError {
    /// Creates a configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates a middleware short-circuit error without a context.
    #[must_use]
    pub fn middleware(reason: impl Into<String>) -> Self {
        Self::Middleware {
            reason: reason.into(),
            conn: None,
        }
    }

    /// Creates a middleware short-circuit error carrying the context as of
    /// the abort.
    #[must_use]
    pub fn middleware_with_conn(reason: impl Into<String>, conn: Conn) -> Self {
        Self::Middleware {
            reason: reason.into(),
            conn: Some(Box::new(conn)),
        }
    }

    /// Creates a transport error without a context.
    #[must_use]
    pub fn transport(reason: impl Into<String>) -> Self {
        Self::Transport {
            reason: reason.into(),
            conn: None,
            source: None,
        }
    }

    /// Creates a transport error carrying the context as of the failure.
    #[must_use]
    pub fn transport_with_conn(reason: impl Into<String>, conn: Conn) -> Self {
        Self::Transport {
            reason: reason.into(),
            conn: Some(Box::new(conn)),
            source: None,
        }
    }

    /// Creates a transport error wrapping an underlying I/O-level error.
    pub fn transport_with_source(
        reason: impl Into<String>,
        source: impl Into<anyhow::Error>,
    ) -> Self {
        Self::Transport {
            reason: reason.into(),
            conn: None,
            source: Some(source.into()),
        }
    }

    /// Creates a status-mismatch error for a strict-form call.
    #[must_use]
    pub fn status_mismatch(status: StatusCode, conn: Conn) -> Self {
        Self::StatusMismatch {
            status,
            conn: Box::new(conn),
        }
    }

    /// Creates a request error for a strict-form call.
    #[must_use]
    pub fn request(reason: impl Into<String>, conn: Option<Conn>) -> Self {
        Self::Request {
            reason: reason.into(),
            conn: conn.map(Box::new),
        }
    }

    /// Returns the error category.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Middleware { .. } => ErrorCategory::Middleware,
            Self::Transport { .. } => ErrorCategory::Transport,
            Self::StatusMismatch { .. } => ErrorCategory::StatusMismatch,
            Self::Request { .. } => ErrorCategory::Request,
        }
    }

    /// Returns the context carried by this error, if any.
    #[must_use]
    pub fn conn(&self) -> Option<&Conn> {
        match self {
            Self::Configuration { .. } => None,
            Self::Middleware { conn, .. }
            | Self::Transport { conn, .. }
            | Self::Request { conn, .. } => conn.as_deref(),
            Self::StatusMismatch { conn, .. } => Some(conn),
        }
    }

    /// Consumes the error and returns the carried context, if any.
    #[must_use]
    pub fn into_conn(self) -> Option<Conn> {
        match self {
            Self::Configuration { .. } => None,
            Self::Middleware { conn, .. }
            | Self::Transport { conn, .. }
            | Self::Request { conn, .. } => conn.map(|c| *c),
            Self::StatusMismatch { conn, .. } => Some(*conn),
        }
    }
}
