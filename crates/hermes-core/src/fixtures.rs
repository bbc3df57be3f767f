//! Test fixtures for Hermes development and testing.
//!
//! This module provides stub adapters usable in tests across the Hermes
//! workspace. They are compiled unconditionally (not behind `cfg(test)`) so
//! downstream crates' tests and doctests can use them without their own
//! copies.
//!
//! # Example
//!
//! ```
//! use hermes_core::fixtures::StubAdapter;
//! use hermes_core::{Adapter, Conn};
//! use http::StatusCode;
//!
//! let adapter = StubAdapter::new(StatusCode::OK).with_body("pong");
//! let conn = adapter.call(Conn::new("/ping")).unwrap();
//! assert_eq!(conn.status(), Some(StatusCode::OK));
//! ```

use crate::adapter::Adapter;
use crate::conn::Conn;
use crate::error::{HermesError, HermesResult};
use bytes::Bytes;
use http::StatusCode;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// An adapter that returns a fixed response for every request.
#[derive(Debug, Clone)]
pub struct StubAdapter {
    status: StatusCode,
    body: Option<Bytes>,
    headers: Vec<(String, String)>,
}

impl StubAdapter {
    /// Creates a stub that responds with the given status and no body.
    #[must_use]
    pub const fn new(status: StatusCode) -> Self {
        Self {
            status,
            body: None,
            headers: Vec::new(),
        }
    }

    /// Sets the response body the stub returns.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Adds a response header the stub returns.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

impl Adapter for StubAdapter {
    fn call(&self, conn: Conn) -> HermesResult<Conn> {
        let mut conn = conn.with_status(self.status);
        for (name, value) in &self.headers {
            conn = conn.put_resp_header(name, value)?;
        }
        if let Some(body) = &self.body {
            conn = conn.with_resp_body(body.clone());
        }
        Ok(conn)
    }
}

/// An adapter that records every call it receives.
///
/// Clones share the same counters, so a test can keep a clone while the
/// pipeline owns the original.
///
/// # Example
///
/// ```
/// use hermes_core::fixtures::RecordingAdapter;
/// use hermes_core::{Adapter, Conn};
///
/// let adapter = RecordingAdapter::new();
/// let probe = adapter.clone();
/// adapter.call(Conn::new("/a")).unwrap();
///
/// assert_eq!(probe.calls(), 1);
/// assert_eq!(probe.seen_urls(), vec!["/a".to_string()]);
/// ```
#[derive(Debug, Clone)]
pub struct RecordingAdapter {
    status: StatusCode,
    calls: Arc<AtomicUsize>,
    seen_urls: Arc<Mutex<Vec<String>>>,
}

impl RecordingAdapter {
    /// Creates a recording adapter that responds with `200 OK`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_status(StatusCode::OK)
    }

    /// Creates a recording adapter with a fixed response status.
    #[must_use]
    pub fn with_status(status: StatusCode) -> Self {
        Self {
            status,
            calls: Arc::new(AtomicUsize::new(0)),
            seen_urls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns how many times the adapter has been invoked.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Returns the URLs the adapter received, query params merged, in
    /// invocation order.
    #[must_use]
    pub fn seen_urls(&self) -> Vec<String> {
        self.seen_urls.lock().expect("fixture lock poisoned").clone()
    }
}

impl Default for RecordingAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl Adapter for RecordingAdapter {
    fn call(&self, conn: Conn) -> HermesResult<Conn> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen_urls
            .lock()
            .expect("fixture lock poisoned")
            .push(conn.url_with_query());
        Ok(conn.with_status(self.status))
    }
}

/// An adapter that fails every call with a transport error.
#[derive(Debug, Clone)]
pub struct FailingAdapter {
    reason: String,
}

impl FailingAdapter {
    /// Creates an adapter that fails with the given reason.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl Adapter for FailingAdapter {
    fn call(&self, conn: Conn) -> HermesResult<Conn> {
        Err(HermesError::transport_with_conn(self.reason.clone(), conn))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stub_adapter_returns_configured_response() {
        let adapter = StubAdapter::new(StatusCode::NOT_FOUND)
            .with_header("content-type", "text/plain")
            .with_body("missing");

        let conn = adapter.call(Conn::new("/missing")).unwrap();
        assert_eq!(conn.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(conn.get_resp_header("content-type"), Some("text/plain"));
        assert_eq!(conn.get_resp_body().unwrap(), &Bytes::from("missing"));
    }

    #[test]
    fn test_recording_adapter_counts_and_records() {
        let adapter = RecordingAdapter::new();
        let probe = adapter.clone();

        adapter.call(Conn::new("/a")).unwrap();
        adapter
            .call(Conn::new("/b").put_query_param("x", "1"))
            .unwrap();

        assert_eq!(probe.calls(), 2);
        assert_eq!(
            probe.seen_urls(),
            vec!["/a".to_string(), "/b?x=1".to_string()]
        );
    }

    #[test]
    fn test_failing_adapter_carries_conn() {
        let adapter = FailingAdapter::new("connection refused");
        let error = adapter.call(Conn::new("/x")).unwrap_err();
        assert_eq!(error.category(), crate::ErrorCategory::Transport);
        assert_eq!(error.conn().unwrap().url(), "/x");
    }
}
