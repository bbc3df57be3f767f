//! Request logging middleware.
//!
//! Emits a structured `tracing` event on the way in (method, URL) and on
//! the way out (status, elapsed time, or the error). The stage passes the
//! context through unchanged in both directions.

use crate::middleware::{Middleware, Next};
use hermes_core::{Conn, HermesResult};
use std::time::Instant;

/// Middleware that logs each request via `tracing`.
///
/// # Example
///
/// ```
/// use hermes_middleware::stages::Logger;
///
/// let stage = Logger::new();
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Logger;

impl Logger {
    /// Creates the logging stage.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Middleware for Logger {
    fn name(&self) -> &'static str {
        "logger"
    }

    fn call(&self, conn: Conn, next: Next<'_>) -> HermesResult<Conn> {
        let method = conn.method().map_or("-", |m| m.as_str());
        let url = conn.url().to_string();
        tracing::debug!(method, url = %url, "dispatching request");

        let started = Instant::now();
        let result = next.run(conn);
        let elapsed_ms = started.elapsed().as_millis();

        match &result {
            Ok(conn) => {
                let status = conn.status().map_or(0, |s| s.as_u16());
                tracing::debug!(method, url = %url, status, elapsed_ms, "request completed");
            }
            Err(error) => {
                tracing::warn!(method, url = %url, elapsed_ms, %error, "request failed");
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::Pipeline;
    use hermes_core::fixtures::{FailingAdapter, StubAdapter};
    use hermes_core::Method;
    use http::StatusCode;

    #[test]
    fn test_logger_passes_success_through_unchanged() {
        let pipeline = Pipeline::builder()
            .middleware(Logger::new())
            .adapter(StubAdapter::new(StatusCode::NOT_FOUND))
            .build()
            .unwrap();

        let conn = pipeline
            .run(Conn::new("/missing").with_method(Method::Get))
            .unwrap();
        assert_eq!(conn.status(), Some(StatusCode::NOT_FOUND));
    }

    #[test]
    fn test_logger_passes_errors_through_untouched() {
        let pipeline = Pipeline::builder()
            .middleware(Logger::new())
            .adapter(FailingAdapter::new("timed out"))
            .build()
            .unwrap();

        let error = pipeline.run(Conn::new("/x")).unwrap_err();
        assert!(error.to_string().contains("timed out"));
    }
}
