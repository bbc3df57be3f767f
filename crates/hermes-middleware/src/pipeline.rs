//! The compiled middleware chain.
//!
//! A [`Pipeline`] is built once per client from an ordered middleware list
//! and exactly one adapter, then shared read-only by every request. The
//! composition is a right fold: the chain starts at the adapter and each
//! middleware, taken in reverse registration order, wraps what is already
//! there. The first-registered middleware therefore ends up outermost - it
//! runs first on the way in and last on the way out - while the
//! last-registered middleware sits innermost, closest to the adapter, which
//! is where response-shaping stages want to be.
//!
//! Assembly is a one-time, single-threaded setup phase; after `build`, the
//! pipeline holds no mutable state and is safe to run from many threads.
//!
//! # Example
//!
//! ```
//! use hermes_core::fixtures::StubAdapter;
//! use hermes_core::Conn;
//! use hermes_middleware::stages::BaseUrl;
//! use hermes_middleware::Pipeline;
//! use http::StatusCode;
//!
//! let pipeline = Pipeline::builder()
//!     .middleware(BaseUrl::new("http://api.test").unwrap())
//!     .adapter(StubAdapter::new(StatusCode::OK))
//!     .build()
//!     .unwrap();
//!
//! let conn = pipeline.run(Conn::new("/ping")).unwrap();
//! assert_eq!(conn.status(), Some(StatusCode::OK));
//! ```

use crate::middleware::{Middleware, Next};
use hermes_core::{Adapter, Conn, HermesError, HermesResult};
use std::sync::Arc;

/// A type-erased middleware that can be stored in the pipeline.
pub type BoxedMiddleware = Arc<dyn Middleware>;

/// A type-erased adapter.
pub type BoxedAdapter = Arc<dyn Adapter>;

/// An immutable, compiled middleware chain ending in one adapter.
pub struct Pipeline {
    middlewares: Vec<BoxedMiddleware>,
    adapter: BoxedAdapter,
}

impl Pipeline {
    /// Creates a new pipeline builder.
    #[must_use]
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// Runs a context through the entire chain.
    ///
    /// # Errors
    ///
    /// Propagates, unchanged, the first error any stage or the adapter
    /// returns; no step after the failing one executes.
    pub fn run(&self, conn: Conn) -> HermesResult<Conn> {
        self.build_chain().run(conn)
    }

    /// Builds the nested continuation for one execution.
    fn build_chain(&self) -> Next<'_> {
        // Start with the adapter as the terminal point, then wrap in
        // reverse registration order so the first-registered middleware
        // is outermost.
        let mut next = Next::adapter(self.adapter.as_ref());
        for middleware in self.middlewares.iter().rev() {
            next = Next::new(middleware.as_ref(), next);
        }
        next
    }

    /// Returns the names of all stages in registration order.
    #[must_use]
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.middlewares.iter().map(|mw| mw.name()).collect()
    }

    /// Returns the number of middleware stages.
    #[must_use]
    pub fn stage_count(&self) -> usize {
        self.middlewares.len()
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("stages", &self.stage_names())
            .finish_non_exhaustive()
    }
}

/// Builder for constructing a [`Pipeline`].
///
/// Stages run in the order they are added. Exactly one adapter must be
/// supplied before `build`.
#[derive(Default)]
pub struct PipelineBuilder {
    middlewares: Vec<BoxedMiddleware>,
    adapter: Option<BoxedAdapter>,
}

impl PipelineBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a middleware stage.
    #[must_use]
    pub fn middleware<M: Middleware>(mut self, middleware: M) -> Self {
        self.middlewares.push(Arc::new(middleware));
        self
    }

    /// Appends an already-shared middleware stage.
    #[must_use]
    pub fn middleware_shared(mut self, middleware: BoxedMiddleware) -> Self {
        self.middlewares.push(middleware);
        self
    }

    /// Sets the terminal adapter.
    #[must_use]
    pub fn adapter<A: Adapter>(mut self, adapter: A) -> Self {
        self.adapter = Some(Arc::new(adapter));
        self
    }

    /// Compiles the pipeline.
    ///
    /// # Errors
    ///
    /// Fails with [`HermesError::Configuration`] if no adapter was supplied.
    /// This is a load-time failure: it aborts client construction, never a
    /// request.
    pub fn build(self) -> HermesResult<Pipeline> {
        let adapter = self
            .adapter
            .ok_or_else(|| HermesError::configuration("pipeline requires an adapter"))?;

        Ok(Pipeline {
            middlewares: self.middlewares,
            adapter,
        })
    }
}

impl std::fmt::Debug for PipelineBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineBuilder")
            .field("stages", &self.middlewares.len())
            .field("has_adapter", &self.adapter.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hermes_core::fixtures::{FailingAdapter, RecordingAdapter, StubAdapter};
    use http::StatusCode;
    use std::sync::Mutex;

    /// A middleware that records entry and exit order.
    struct OrderTracking {
        name: &'static str,
        order: Arc<Mutex<Vec<String>>>,
    }

    impl Middleware for OrderTracking {
        fn name(&self) -> &'static str {
            self.name
        }

        fn call(&self, conn: Conn, next: Next<'_>) -> HermesResult<Conn> {
            self.order
                .lock()
                .unwrap()
                .push(format!("enter:{}", self.name));
            let result = next.run(conn);
            self.order
                .lock()
                .unwrap()
                .push(format!("exit:{}", self.name));
            result
        }
    }

    #[test]
    fn test_entry_order_is_registration_order_exit_reversed() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let make = |name| OrderTracking {
            name,
            order: order.clone(),
        };

        let pipeline = Pipeline::builder()
            .middleware(make("first"))
            .middleware(make("second"))
            .middleware(make("third"))
            .adapter(StubAdapter::new(StatusCode::OK))
            .build()
            .unwrap();

        pipeline.run(Conn::new("/test")).unwrap();

        let recorded = order.lock().unwrap();
        assert_eq!(
            *recorded,
            vec![
                "enter:first",
                "enter:second",
                "enter:third",
                "exit:third",
                "exit:second",
                "exit:first",
            ]
        );
    }

    #[test]
    fn test_empty_pipeline_runs_only_the_adapter() {
        let pipeline = Pipeline::builder()
            .adapter(StubAdapter::new(StatusCode::NO_CONTENT))
            .build()
            .unwrap();

        let conn = pipeline.run(Conn::new("/test")).unwrap();
        assert_eq!(conn.status(), Some(StatusCode::NO_CONTENT));
        assert_eq!(pipeline.stage_count(), 0);
    }

    #[test]
    fn test_short_circuit_skips_later_stages_and_adapter() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let before = OrderTracking {
            name: "before",
            order: order.clone(),
        };
        let guard = crate::FnMiddleware::new("guard", |_conn: Conn, _next: Next<'_>| {
            Err(HermesError::middleware("token expired"))
        });
        let after = OrderTracking {
            name: "after",
            order: order.clone(),
        };
        let adapter = RecordingAdapter::new();
        let probe = adapter.clone();

        let pipeline = Pipeline::builder()
            .middleware(before)
            .middleware(guard)
            .middleware(after)
            .adapter(adapter)
            .build()
            .unwrap();

        let error = pipeline.run(Conn::new("/test")).unwrap_err();

        // The guard's reason arrives unchanged; nothing past it executed.
        match &error {
            HermesError::Middleware { reason, conn } => {
                assert_eq!(reason, "token expired");
                assert!(conn.is_none());
            }
            other => panic!("expected middleware error, got {other:?}"),
        }
        assert_eq!(probe.calls(), 0);
        let recorded = order.lock().unwrap();
        assert_eq!(*recorded, vec!["enter:before", "exit:before"]);
    }

    #[test]
    fn test_adapter_error_passes_through_every_stage() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let mw = OrderTracking {
            name: "outer",
            order: order.clone(),
        };

        let pipeline = Pipeline::builder()
            .middleware(mw)
            .adapter(FailingAdapter::new("connection refused"))
            .build()
            .unwrap();

        let error = pipeline.run(Conn::new("/test")).unwrap_err();
        assert!(matches!(error, HermesError::Transport { .. }));
        // The wrapping stage still unwound normally.
        assert_eq!(
            *order.lock().unwrap(),
            vec!["enter:outer", "exit:outer"]
        );
    }

    #[test]
    fn test_build_without_adapter_fails() {
        let error = Pipeline::builder().build().unwrap_err();
        assert!(matches!(error, HermesError::Configuration { .. }));
    }

    #[test]
    fn test_stage_names_in_registration_order() {
        let pipeline = Pipeline::builder()
            .middleware(crate::FnMiddleware::new("a", |conn: Conn, next: Next<'_>| next.run(conn)))
            .middleware(crate::FnMiddleware::new("b", |conn: Conn, next: Next<'_>| next.run(conn)))
            .adapter(StubAdapter::new(StatusCode::OK))
            .build()
            .unwrap();

        assert_eq!(pipeline.stage_names(), vec!["a", "b"]);
    }

    #[test]
    fn test_pipeline_is_reentrant() {
        let adapter = RecordingAdapter::new();
        let probe = adapter.clone();
        let pipeline = Arc::new(
            Pipeline::builder()
                .middleware(crate::FnMiddleware::new("noop", |conn: Conn, next: Next<'_>| next.run(conn)))
                .adapter(adapter)
                .build()
                .unwrap(),
        );

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let pipeline = Arc::clone(&pipeline);
                std::thread::spawn(move || pipeline.run(Conn::new(format!("/req/{i}"))))
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap().is_ok());
        }
        assert_eq!(probe.calls(), 4);
    }
}
