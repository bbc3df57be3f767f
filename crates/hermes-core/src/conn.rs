//! The per-request context.
//!
//! A [`Conn`] carries one request/response cycle through the pipeline. It is
//! immutable by convention: every update consumes the value and returns a
//! new one, so a middleware step can never observe another step's partial
//! mutation. This is what makes the compiled chain composable and safe to
//! run from many threads at once.
//!
//! A `Conn` is created by the dispatch layer (or by a caller preparing a
//! request up front), threaded through the pipeline, and discarded after
//! result interpretation. No component holds a `Conn` beyond one execution.

use crate::error::{HermesError, HermesResult};
use crate::method::Method;
use bytes::Bytes;
use http::header::{HeaderMap, HeaderName, HeaderValue};
use http::StatusCode;
use std::collections::HashMap;

/// Immutable request/response context for one pipeline execution.
///
/// # Example
///
/// ```
/// use hermes_core::Conn;
///
/// let conn = Conn::new("/users/42")
///     .put_req_header("accept", "application/json")
///     .unwrap()
///     .put_query_param("verbose", "true");
///
/// assert_eq!(conn.url(), "/users/42");
/// assert_eq!(conn.url_with_query(), "/users/42?verbose=true");
/// assert_eq!(conn.get_req_header("Accept"), Some("application/json"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Conn {
    /// The HTTP verb; unset until dispatch assigns one.
    method: Option<Method>,

    /// Absolute or relative request URL. Middleware may rewrite it.
    url: String,

    /// Request headers, names normalized case-insensitively.
    request_headers: HeaderMap,

    /// Opaque request payload, if any.
    request_body: Option<Bytes>,

    /// Ordered query parameters, merged into the URL at adapter time.
    query_params: Vec<(String, String)>,

    /// Response status; absent until a response exists.
    status: Option<StatusCode>,

    /// Response headers, populated by the adapter or middleware.
    response_headers: HeaderMap,

    /// Opaque response payload, if any.
    response_body: Option<Bytes>,

    /// Open key/value map for middleware to pass data along the chain.
    state: HashMap<String, serde_json::Value>,
}

impl Conn {
    /// Creates a context for the given URL with no method, empty headers
    /// and params, no body, and no response fields.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            method: None,
            url: url.into(),
            request_headers: HeaderMap::new(),
            request_body: None,
            query_params: Vec::new(),
            status: None,
            response_headers: HeaderMap::new(),
            response_body: None,
            state: HashMap::new(),
        }
    }

    // --- request side -----------------------------------------------------

    /// Returns a context with the given method set.
    #[must_use]
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Returns a context with the URL replaced.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Returns a context with the header set. Last write for a name wins;
    /// names are matched case-insensitively.
    ///
    /// # Errors
    ///
    /// Fails with [`HermesError::Configuration`] on a malformed header name
    /// or value. Malformed input is a construction mistake, caught here
    /// rather than at network time.
    pub fn put_req_header(self, name: &str, value: &str) -> HermesResult<Self> {
        let name: HeaderName = name.parse().map_err(|_| {
            HermesError::configuration(format!("invalid header name: '{name}'"))
        })?;
        let value = HeaderValue::from_str(value).map_err(|_| {
            HermesError::configuration(format!("invalid value for header '{name}'"))
        })?;
        Ok(self.put_req_header_value(name, value))
    }

    /// Returns a context with an already-validated header set.
    ///
    /// Stages that validated their header configuration at assembly time
    /// use this to skip per-request re-parsing.
    #[must_use]
    pub fn put_req_header_value(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.request_headers.insert(name, value);
        self
    }

    /// Returns a context with the request body set.
    ///
    /// Method compatibility is not checked here; the dispatch layer rejects
    /// bodies on body-less verbs, since the check is call-site-specific.
    #[must_use]
    pub fn put_req_body(mut self, body: impl Into<Bytes>) -> Self {
        self.request_body = Some(body.into());
        self
    }

    /// Returns a context with the query parameter appended.
    #[must_use]
    pub fn put_query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.push((name.into(), value.into()));
        self
    }

    /// Returns a context with a state entry set.
    ///
    /// State is an open map for middleware to pass data along the chain
    /// (timing, correlation IDs, ...) without touching request fields.
    #[must_use]
    pub fn put_state(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.state.insert(key.into(), value.into());
        self
    }

    // --- response side ----------------------------------------------------

    /// Returns a context with the response status set.
    #[must_use]
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns a context with the response header set. Last write wins.
    ///
    /// # Errors
    ///
    /// Fails with [`HermesError::Configuration`] on a malformed header name
    /// or value.
    pub fn put_resp_header(mut self, name: &str, value: &str) -> HermesResult<Self> {
        let name: HeaderName = name.parse().map_err(|_| {
            HermesError::configuration(format!("invalid header name: '{name}'"))
        })?;
        let value = HeaderValue::from_str(value).map_err(|_| {
            HermesError::configuration(format!("invalid value for header '{name}'"))
        })?;
        self.response_headers.insert(name, value);
        Ok(self)
    }

    /// Returns a context with the response body set.
    #[must_use]
    pub fn with_resp_body(mut self, body: impl Into<Bytes>) -> Self {
        self.response_body = Some(body.into());
        self
    }

    // --- accessors --------------------------------------------------------

    /// Returns the method, if one has been assigned.
    #[must_use]
    pub const fn method(&self) -> Option<Method> {
        self.method
    }

    /// Returns the request URL, without query parameters merged.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the URL with the ordered query parameters merged in.
    #[must_use]
    pub fn url_with_query(&self) -> String {
        if self.query_params.is_empty() {
            return self.url.clone();
        }
        let encoded = serde_urlencoded::to_string(&self.query_params)
            .expect("string pairs always encode");
        let separator = if self.url.contains('?') { '&' } else { '?' };
        format!("{}{}{}", self.url, separator, encoded)
    }

    /// Returns the request headers.
    #[must_use]
    pub const fn request_headers(&self) -> &HeaderMap {
        &self.request_headers
    }

    /// Returns a request header value as a string, if present and valid
    /// UTF-8. Name matching is case-insensitive.
    #[must_use]
    pub fn get_req_header(&self, name: &str) -> Option<&str> {
        self.request_headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns the request body, if one is set.
    #[must_use]
    pub const fn request_body(&self) -> Option<&Bytes> {
        self.request_body.as_ref()
    }

    /// Returns `true` if a non-empty request body is set.
    #[must_use]
    pub fn has_request_body(&self) -> bool {
        self.request_body.as_ref().is_some_and(|b| !b.is_empty())
    }

    /// Returns the ordered query parameters.
    #[must_use]
    pub fn query_params(&self) -> &[(String, String)] {
        &self.query_params
    }

    /// Returns the response status, if a response exists.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        self.status
    }

    /// Returns the response headers.
    #[must_use]
    pub const fn response_headers(&self) -> &HeaderMap {
        &self.response_headers
    }

    /// Returns a response header value as a string, if present and valid
    /// UTF-8.
    #[must_use]
    pub fn get_resp_header(&self, name: &str) -> Option<&str> {
        self.response_headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns the response body, if one is set.
    #[must_use]
    pub const fn get_resp_body(&self) -> Option<&Bytes> {
        self.response_body.as_ref()
    }

    /// Returns a state entry, if set.
    #[must_use]
    pub fn get_state(&self, key: &str) -> Option<&serde_json::Value> {
        self.state.get(key)
    }
}
