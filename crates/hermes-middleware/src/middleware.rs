//! Core middleware trait and continuation type.
//!
//! This module defines the [`Middleware`] trait that all pipeline stages
//! implement, and the [`Next`] continuation representing the rest of the
//! chain (remaining middleware plus the adapter).
//!
//! A middleware may transform the context and run the continuation, possibly
//! post-processing the result, or short-circuit by returning an error
//! without running it. `Next::run` consumes the continuation, so the type
//! system enforces the contract that a stage calls it at most once; the
//! design does not support fanning one request out into multiple adapter
//! calls.
//!
//! # Example
//!
//! ```
//! use hermes_core::{Conn, HermesResult};
//! use hermes_middleware::{Middleware, Next};
//!
//! struct UserAgent;
//!
//! impl Middleware for UserAgent {
//!     fn name(&self) -> &'static str {
//!         "user_agent"
//!     }
//!
//!     fn call(&self, conn: Conn, next: Next<'_>) -> HermesResult<Conn> {
//!         let conn = conn.put_req_header("user-agent", "hermes/0.1")?;
//!         next.run(conn)
//!     }
//! }
//! ```

use hermes_core::{Adapter, Conn, HermesResult};

/// A pipeline stage.
///
/// # Invariants
///
/// - A stage calls `next.run` at most once (enforced by move semantics).
/// - A stage never mutates a context in place; it builds a new one.
/// - A stage must not swallow a downstream error silently; recovery, when
///   intended, converts the error back into a context explicitly.
pub trait Middleware: Send + Sync + 'static {
    /// Returns the unique name of this stage, used for logging and
    /// debugging.
    fn name(&self) -> &'static str;

    /// Processes the context through this stage.
    ///
    /// # Errors
    ///
    /// Returning an error short-circuits the pipeline: no later stage and
    /// not the adapter will run, and the error reaches the caller unchanged.
    fn call(&self, conn: Conn, next: Next<'_>) -> HermesResult<Conn>;
}

/// Continuation for the rest of the pipeline.
///
/// Passed to each stage; running it invokes the remaining middleware and,
/// finally, the adapter. `run` consumes `self`, so it can only be called
/// once.
pub struct Next<'a> {
    inner: NextInner<'a>,
}

enum NextInner<'a> {
    /// More middleware to process.
    Chain {
        middleware: &'a dyn Middleware,
        next: Box<Next<'a>>,
    },
    /// End of chain - invoke the terminal adapter.
    Adapter(&'a dyn Adapter),
}

impl<'a> Next<'a> {
    /// Creates a `Next` that will invoke the given middleware.
    pub(crate) fn new(middleware: &'a dyn Middleware, next: Next<'a>) -> Self {
        Self {
            inner: NextInner::Chain {
                middleware,
                next: Box::new(next),
            },
        }
    }

    /// Creates a terminal `Next` that invokes the adapter.
    pub(crate) fn adapter(adapter: &'a dyn Adapter) -> Self {
        Self {
            inner: NextInner::Adapter(adapter),
        }
    }

    /// Invokes the next middleware or the adapter.
    ///
    /// # Errors
    ///
    /// Propagates whatever error the remaining chain produces, unchanged.
    pub fn run(self, conn: Conn) -> HermesResult<Conn> {
        match self.inner {
            NextInner::Chain { middleware, next } => middleware.call(conn, *next),
            NextInner::Adapter(adapter) => adapter.call(conn),
        }
    }
}

/// A middleware built from a plain function.
///
/// Allows defining simple stages without a dedicated type.
///
/// # Example
///
/// ```
/// use hermes_middleware::FnMiddleware;
///
/// use hermes_core::Conn;
/// use hermes_middleware::Next;
///
/// let stage = FnMiddleware::new("trace_tag", |conn: Conn, next: Next<'_>| {
///     next.run(conn.put_state("traced", true))
/// });
/// ```
pub struct FnMiddleware<F> {
    name: &'static str,
    func: F,
}

impl<F> FnMiddleware<F> {
    /// Creates a new function-based middleware.
    pub const fn new(name: &'static str, func: F) -> Self {
        Self { name, func }
    }
}

impl<F> Middleware for FnMiddleware<F>
where
    F: Fn(Conn, Next<'_>) -> HermesResult<Conn> + Send + Sync + 'static,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn call(&self, conn: Conn, next: Next<'_>) -> HermesResult<Conn> {
        (self.func)(conn, next)
    }
}
