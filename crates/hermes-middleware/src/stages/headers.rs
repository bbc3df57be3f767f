//! Default request headers middleware.
//!
//! Merges configured headers into requests that don't already carry them.
//! Caller-set headers always win; the stage never overwrites.

use crate::middleware::{Middleware, Next};
use hermes_core::{Conn, HermesError, HermesResult};
use http::header::{HeaderName, HeaderValue};

/// Middleware that fills in default request headers.
///
/// Header names and values are validated once, at assembly time.
///
/// # Example
///
/// ```
/// use hermes_middleware::stages::DefaultHeaders;
///
/// let stage = DefaultHeaders::new(&[
///     ("user-agent", "hermes/0.1"),
///     ("accept", "application/json"),
/// ])
/// .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct DefaultHeaders {
    headers: Vec<(HeaderName, HeaderValue)>,
}

impl DefaultHeaders {
    /// Creates the stage from name/value pairs.
    ///
    /// # Errors
    ///
    /// Fails with [`HermesError::Configuration`] on a malformed header name
    /// or value, aborting client assembly.
    pub fn new(pairs: &[(&str, &str)]) -> HermesResult<Self> {
        let mut headers = Vec::with_capacity(pairs.len());
        for (name, value) in pairs {
            let name: HeaderName = name.parse().map_err(|_| {
                HermesError::configuration(format!("invalid default header name: '{name}'"))
            })?;
            let value = HeaderValue::from_str(value).map_err(|_| {
                HermesError::configuration(format!("invalid value for default header '{name}'"))
            })?;
            headers.push((name, value));
        }
        Ok(Self { headers })
    }
}

impl Middleware for DefaultHeaders {
    fn name(&self) -> &'static str {
        "default_headers"
    }

    fn call(&self, conn: Conn, next: Next<'_>) -> HermesResult<Conn> {
        let mut conn = conn;
        for (name, value) in &self.headers {
            if conn.request_headers().contains_key(name) {
                continue;
            }
            conn = conn.put_req_header_value(name.clone(), value.clone());
        }
        next.run(conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::Pipeline;
    use hermes_core::fixtures::StubAdapter;
    use http::StatusCode;

    fn pipeline_with(stage: DefaultHeaders) -> Pipeline {
        Pipeline::builder()
            .middleware(stage)
            .adapter(StubAdapter::new(StatusCode::OK))
            .build()
            .unwrap()
    }

    #[test]
    fn test_fills_in_missing_headers() {
        let stage = DefaultHeaders::new(&[("user-agent", "hermes/0.1")]).unwrap();
        // The stub adapter echoes the request side back, so the merged
        // header is observable on the returned conn.
        let conn = pipeline_with(stage).run(Conn::new("/x")).unwrap();
        assert_eq!(conn.get_req_header("user-agent"), Some("hermes/0.1"));
    }

    #[test]
    fn test_never_overwrites_caller_headers() {
        let stage = DefaultHeaders::new(&[("accept", "application/json")]).unwrap();
        let incoming = Conn::new("/x").put_req_header("accept", "text/html").unwrap();

        let conn = pipeline_with(stage).run(incoming).unwrap();
        assert_eq!(conn.get_req_header("accept"), Some("text/html"));
    }

    #[test]
    fn test_invalid_name_fails_assembly() {
        let error = DefaultHeaders::new(&[("bad header", "v")]).unwrap_err();
        assert!(matches!(error, HermesError::Configuration { .. }));
    }

    #[test]
    fn test_invalid_value_fails_assembly() {
        assert!(DefaultHeaders::new(&[("x-a", "bad\nvalue")]).is_err());
    }
}
