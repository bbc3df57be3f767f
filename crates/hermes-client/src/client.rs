//! The client and its generic dispatch function.

use crate::accept::StatusAccept;
use crate::target::RequestTarget;
use bytes::Bytes;
use hermes_core::{Adapter, Conn, HermesError, HermesResult, Method};
use hermes_middleware::{Middleware, Pipeline, PipelineBuilder};

/// An HTTP client module: a compiled pipeline plus the verbs it exposes.
///
/// Assembly happens once, single-threaded, via [`ClientBuilder`]; after
/// `build` the client is immutable and safe to share across threads (wrap
/// it in an `Arc` or store it in process-wide read-only state).
///
/// # Example
///
/// ```
/// use hermes_client::Client;
/// use hermes_core::fixtures::StubAdapter;
/// use hermes_middleware::stages::BaseUrl;
/// use http::StatusCode;
///
/// let client = Client::builder()
///     .middleware(BaseUrl::new("http://api.test").unwrap())
///     .adapter(StubAdapter::new(StatusCode::OK))
///     .build()
///     .unwrap();
///
/// let conn = client.get("/ping").unwrap();
/// assert_eq!(conn.status(), Some(StatusCode::OK));
/// ```
pub struct Client {
    pipeline: Pipeline,
    verbs: Vec<Method>,
}

impl Client {
    /// Creates a new client builder.
    #[must_use]
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Returns the verbs this client exposes.
    #[must_use]
    pub fn verbs(&self) -> &[Method] {
        &self.verbs
    }

    // --- generic dispatch -------------------------------------------------

    /// Dispatches a request with the given verb (safe form).
    ///
    /// The target is either a raw URL (wrapped into a fresh context) or an
    /// existing context (its verb field overwritten).
    ///
    /// # Errors
    ///
    /// - [`HermesError::Configuration`] if the verb is not exposed by this
    ///   client, or if a body-less verb receives a context with a non-empty
    ///   request body. The pipeline is not invoked in either case.
    /// - [`HermesError::Middleware`] / [`HermesError::Transport`] exactly as
    ///   produced by the chain, unchanged.
    pub fn request(
        &self,
        method: Method,
        target: impl Into<RequestTarget>,
    ) -> HermesResult<Conn> {
        let conn = self.prepare(method, target.into())?;
        tracing::debug!(method = %method, url = conn.url(), "dispatching request");
        self.pipeline.run(conn)
    }

    /// Dispatches a request built from URL, headers, and an optional body.
    ///
    /// Covers the `V(url, headers)` and `V(url, headers, body)` call
    /// shapes without per-verb variants.
    ///
    /// # Errors
    ///
    /// As [`Client::request`], plus [`HermesError::Configuration`] for
    /// malformed header names or values.
    pub fn request_parts(
        &self,
        method: Method,
        url: impl Into<String>,
        headers: &[(&str, &str)],
        body: Option<Bytes>,
    ) -> HermesResult<Conn> {
        let mut conn = Conn::new(url);
        for (name, value) in headers {
            conn = conn.put_req_header(name, value)?;
        }
        if let Some(body) = body {
            conn = conn.put_req_body(body);
        }
        self.request(method, conn)
    }

    /// Dispatches a request and enforces an acceptable status (strict form).
    ///
    /// # Errors
    ///
    /// - [`HermesError::Configuration`] exactly as the safe form would
    ///   return it (a caller-contract violation, not a request outcome).
    /// - [`HermesError::StatusMismatch`] if the pipeline succeeded but the
    ///   status falls outside `accept`; carries the finished context.
    /// - [`HermesError::Request`] if the pipeline failed; carries the
    ///   failing step's reason and the context as of the failure.
    pub fn request_strict(
        &self,
        method: Method,
        target: impl Into<RequestTarget>,
        accept: &StatusAccept,
    ) -> HermesResult<Conn> {
        match self.request(method, target) {
            Ok(conn) => match conn.status() {
                Some(status) if accept.accepts(status) => Ok(conn),
                Some(status) => Err(HermesError::status_mismatch(status, conn)),
                None => Err(HermesError::request(
                    "adapter produced no response status",
                    Some(conn),
                )),
            },
            Err(error @ HermesError::Configuration { .. }) => Err(error),
            Err(error) => {
                let reason = error.to_string();
                let conn = error.into_conn();
                Err(HermesError::request(reason, conn))
            }
        }
    }

    /// Validates the call and builds the context the pipeline will see.
    fn prepare(&self, method: Method, target: RequestTarget) -> HermesResult<Conn> {
        if !self.verbs.contains(&method) {
            return Err(HermesError::configuration(format!(
                "client does not expose {method}"
            )));
        }
        let conn = target.into_conn();
        if !method.allows_body() && conn.has_request_body() {
            return Err(HermesError::configuration(format!(
                "{method} requests cannot carry a body"
            )));
        }
        Ok(conn.with_method(method))
    }

    // --- per-verb entry points (safe form) --------------------------------

    /// Dispatches a GET request.
    pub fn get(&self, target: impl Into<RequestTarget>) -> HermesResult<Conn> {
        self.request(Method::Get, target)
    }

    /// Dispatches a HEAD request.
    pub fn head(&self, target: impl Into<RequestTarget>) -> HermesResult<Conn> {
        self.request(Method::Head, target)
    }

    /// Dispatches a DELETE request.
    pub fn delete(&self, target: impl Into<RequestTarget>) -> HermesResult<Conn> {
        self.request(Method::Delete, target)
    }

    /// Dispatches a TRACE request.
    pub fn trace(&self, target: impl Into<RequestTarget>) -> HermesResult<Conn> {
        self.request(Method::Trace, target)
    }

    /// Dispatches an OPTIONS request.
    pub fn options(&self, target: impl Into<RequestTarget>) -> HermesResult<Conn> {
        self.request(Method::Options, target)
    }

    /// Dispatches a POST request.
    pub fn post(&self, target: impl Into<RequestTarget>) -> HermesResult<Conn> {
        self.request(Method::Post, target)
    }

    /// Dispatches a PUT request.
    pub fn put(&self, target: impl Into<RequestTarget>) -> HermesResult<Conn> {
        self.request(Method::Put, target)
    }

    /// Dispatches a PATCH request.
    pub fn patch(&self, target: impl Into<RequestTarget>) -> HermesResult<Conn> {
        self.request(Method::Patch, target)
    }

    // --- per-verb entry points (strict form, default 2xx acceptance) ------

    /// Dispatches a GET request, failing on a non-2xx status.
    pub fn get_strict(&self, target: impl Into<RequestTarget>) -> HermesResult<Conn> {
        self.request_strict(Method::Get, target, &StatusAccept::default())
    }

    /// Dispatches a HEAD request, failing on a non-2xx status.
    pub fn head_strict(&self, target: impl Into<RequestTarget>) -> HermesResult<Conn> {
        self.request_strict(Method::Head, target, &StatusAccept::default())
    }

    /// Dispatches a DELETE request, failing on a non-2xx status.
    pub fn delete_strict(&self, target: impl Into<RequestTarget>) -> HermesResult<Conn> {
        self.request_strict(Method::Delete, target, &StatusAccept::default())
    }

    /// Dispatches a TRACE request, failing on a non-2xx status.
    pub fn trace_strict(&self, target: impl Into<RequestTarget>) -> HermesResult<Conn> {
        self.request_strict(Method::Trace, target, &StatusAccept::default())
    }

    /// Dispatches an OPTIONS request, failing on a non-2xx status.
    pub fn options_strict(&self, target: impl Into<RequestTarget>) -> HermesResult<Conn> {
        self.request_strict(Method::Options, target, &StatusAccept::default())
    }

    /// Dispatches a POST request, failing on a non-2xx status.
    pub fn post_strict(&self, target: impl Into<RequestTarget>) -> HermesResult<Conn> {
        self.request_strict(Method::Post, target, &StatusAccept::default())
    }

    /// Dispatches a PUT request, failing on a non-2xx status.
    pub fn put_strict(&self, target: impl Into<RequestTarget>) -> HermesResult<Conn> {
        self.request_strict(Method::Put, target, &StatusAccept::default())
    }

    /// Dispatches a PATCH request, failing on a non-2xx status.
    pub fn patch_strict(&self, target: impl Into<RequestTarget>) -> HermesResult<Conn> {
        self.request_strict(Method::Patch, target, &StatusAccept::default())
    }

    // --- per-verb entry points (strict form, explicit acceptance) ---------

    /// Dispatches a GET request, failing on a status outside `accept`.
    pub fn get_strict_within(
        &self,
        target: impl Into<RequestTarget>,
        accept: &StatusAccept,
    ) -> HermesResult<Conn> {
        self.request_strict(Method::Get, target, accept)
    }

    /// Dispatches a HEAD request, failing on a status outside `accept`.
    pub fn head_strict_within(
        &self,
        target: impl Into<RequestTarget>,
        accept: &StatusAccept,
    ) -> HermesResult<Conn> {
        self.request_strict(Method::Head, target, accept)
    }

    /// Dispatches a DELETE request, failing on a status outside `accept`.
    pub fn delete_strict_within(
        &self,
        target: impl Into<RequestTarget>,
        accept: &StatusAccept,
    ) -> HermesResult<Conn> {
        self.request_strict(Method::Delete, target, accept)
    }

    /// Dispatches a TRACE request, failing on a status outside `accept`.
    pub fn trace_strict_within(
        &self,
        target: impl Into<RequestTarget>,
        accept: &StatusAccept,
    ) -> HermesResult<Conn> {
        self.request_strict(Method::Trace, target, accept)
    }

    /// Dispatches an OPTIONS request, failing on a status outside `accept`.
    pub fn options_strict_within(
        &self,
        target: impl Into<RequestTarget>,
        accept: &StatusAccept,
    ) -> HermesResult<Conn> {
        self.request_strict(Method::Options, target, accept)
    }

    /// Dispatches a POST request, failing on a status outside `accept`.
    pub fn post_strict_within(
        &self,
        target: impl Into<RequestTarget>,
        accept: &StatusAccept,
    ) -> HermesResult<Conn> {
        self.request_strict(Method::Post, target, accept)
    }

    /// Dispatches a PUT request, failing on a status outside `accept`.
    pub fn put_strict_within(
        &self,
        target: impl Into<RequestTarget>,
        accept: &StatusAccept,
    ) -> HermesResult<Conn> {
        self.request_strict(Method::Put, target, accept)
    }

    /// Dispatches a PATCH request, failing on a status outside `accept`.
    pub fn patch_strict_within(
        &self,
        target: impl Into<RequestTarget>,
        accept: &StatusAccept,
    ) -> HermesResult<Conn> {
        self.request_strict(Method::Patch, target, accept)
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("pipeline", &self.pipeline)
            .field("verbs", &self.verbs)
            .finish()
    }
}

/// Builder for constructing a [`Client`].
///
/// Middleware run in the order they are added; exactly one adapter must be
/// supplied. By default all eight verbs are exposed.
#[derive(Debug)]
pub struct ClientBuilder {
    pipeline: PipelineBuilder,
    verbs: Vec<Method>,
}

impl ClientBuilder {
    /// Creates a builder exposing every verb.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pipeline: PipelineBuilder::new(),
            verbs: Method::all().to_vec(),
        }
    }

    /// Appends a middleware stage.
    #[must_use]
    pub fn middleware<M: Middleware>(mut self, middleware: M) -> Self {
        self.pipeline = self.pipeline.middleware(middleware);
        self
    }

    /// Sets the terminal adapter.
    #[must_use]
    pub fn adapter<A: Adapter>(mut self, adapter: A) -> Self {
        self.pipeline = self.pipeline.adapter(adapter);
        self
    }

    /// Restricts which verbs the client exposes.
    #[must_use]
    pub fn verbs(mut self, verbs: &[Method]) -> Self {
        self.verbs = verbs.to_vec();
        self
    }

    /// Assembles the client.
    ///
    /// # Errors
    ///
    /// Fails with [`HermesError::Configuration`] if no adapter was supplied
    /// or the exposed verb list is empty. A load-time failure, never a
    /// per-request one.
    pub fn build(self) -> HermesResult<Client> {
        if self.verbs.is_empty() {
            return Err(HermesError::configuration(
                "client must expose at least one verb",
            ));
        }
        Ok(Client {
            pipeline: self.pipeline.build()?,
            verbs: self.verbs,
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hermes_core::fixtures::{RecordingAdapter, StubAdapter};
    use http::StatusCode;

    fn ok_client() -> Client {
        Client::builder()
            .adapter(StubAdapter::new(StatusCode::OK))
            .build()
            .unwrap()
    }

    #[test]
    fn test_url_target_sets_verb() {
        let conn = ok_client().get("/users").unwrap();
        assert_eq!(conn.method(), Some(Method::Get));
        assert_eq!(conn.url(), "/users");
    }

    #[test]
    fn test_conn_target_verb_is_overwritten() {
        let prepared = Conn::new("/users").with_method(Method::Put);
        let conn = ok_client().post(prepared).unwrap();
        assert_eq!(conn.method(), Some(Method::Post));
    }

    #[test]
    fn test_bodyless_verb_rejects_populated_body() {
        let adapter = RecordingAdapter::new();
        let probe = adapter.clone();
        let client = Client::builder().adapter(adapter).build().unwrap();

        let prepared = Conn::new("/users").put_req_body("oops");
        let error = client.get(prepared).unwrap_err();

        assert!(matches!(error, HermesError::Configuration { .. }));
        // The pipeline never ran.
        assert_eq!(probe.calls(), 0);
    }

    #[test]
    fn test_body_verb_accepts_body() {
        let prepared = Conn::new("/users").put_req_body("{}");
        assert!(ok_client().post(prepared).is_ok());
    }

    #[test]
    fn test_unexposed_verb_is_configuration_error() {
        let client = Client::builder()
            .adapter(StubAdapter::new(StatusCode::OK))
            .verbs(&[Method::Get])
            .build()
            .unwrap();

        let error = client.delete("/users/1").unwrap_err();
        assert!(matches!(error, HermesError::Configuration { .. }));
        assert!(client.get("/users/1").is_ok());
    }

    #[test]
    fn test_empty_verb_list_fails_build() {
        let error = Client::builder()
            .adapter(StubAdapter::new(StatusCode::OK))
            .verbs(&[])
            .build()
            .unwrap_err();
        assert!(matches!(error, HermesError::Configuration { .. }));
    }

    #[test]
    fn test_missing_adapter_fails_build() {
        assert!(Client::builder().build().is_err());
    }

    #[test]
    fn test_request_parts_sets_headers_and_body() {
        let conn = ok_client()
            .request_parts(
                Method::Post,
                "/users",
                &[("content-type", "application/json")],
                Some("{}".into()),
            )
            .unwrap();

        assert_eq!(conn.get_req_header("content-type"), Some("application/json"));
        assert!(conn.has_request_body());
    }

    #[test]
    fn test_strict_passes_in_range_status() {
        let conn = ok_client().get_strict("/users").unwrap();
        assert_eq!(conn.status(), Some(StatusCode::OK));
    }

    #[test]
    fn test_strict_rejects_out_of_range_status() {
        let client = Client::builder()
            .adapter(StubAdapter::new(StatusCode::NOT_FOUND))
            .build()
            .unwrap();

        let error = client.get_strict("/missing").unwrap_err();
        match error {
            HermesError::StatusMismatch { status, conn } => {
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert_eq!(conn.url(), "/missing");
            }
            other => panic!("expected status mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_strict_explicit_list() {
        let client = Client::builder()
            .adapter(StubAdapter::new(StatusCode::NOT_FOUND))
            .build()
            .unwrap();

        let conn = client
            .request_strict(Method::Get, "/missing", &StatusAccept::list([404]))
            .unwrap();
        assert_eq!(conn.status(), Some(StatusCode::NOT_FOUND));
    }

    #[test]
    fn test_strict_within_accepts_only_the_listed_statuses() {
        let client = Client::builder()
            .adapter(StubAdapter::new(StatusCode::NOT_FOUND))
            .build()
            .unwrap();

        let conn = client
            .get_strict_within("/missing", &StatusAccept::list([404]))
            .unwrap();
        assert_eq!(conn.status(), Some(StatusCode::NOT_FOUND));

        let error = client
            .get_strict_within("/missing", &StatusAccept::list([200]))
            .unwrap_err();
        assert!(matches!(error, HermesError::StatusMismatch { .. }));
    }

    #[test]
    fn test_strict_within_covers_body_verbs() {
        let client = Client::builder()
            .adapter(StubAdapter::new(StatusCode::CONFLICT))
            .build()
            .unwrap();

        let prepared = Conn::new("/orders").put_req_body("{}");
        let conn = client
            .post_strict_within(prepared, &StatusAccept::list([409]))
            .unwrap();
        assert_eq!(conn.status(), Some(StatusCode::CONFLICT));
    }

    #[test]
    fn test_strict_configuration_error_passes_through() {
        let prepared = Conn::new("/users").put_req_body("oops");
        let error = ok_client()
            .request_strict(Method::Get, prepared, &StatusAccept::default())
            .unwrap_err();
        assert!(matches!(error, HermesError::Configuration { .. }));
    }
}
