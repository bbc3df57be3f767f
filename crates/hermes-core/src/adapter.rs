//! The terminal transport contract.
//!
//! An [`Adapter`] is the last step of every compiled chain: it performs
//! whatever I/O the transport requires and returns a context populated with
//! response fields, or a [`HermesError::Transport`] on failure. The adapter
//! never receives a continuation; anything that should run "after" the
//! adapter is a middleware wrapping it.
//!
//! Wire-level concerns (connection pooling, TLS, sockets) live entirely in
//! adapter implementations, outside this crate.
//!
//! [`HermesError::Transport`]: crate::HermesError::Transport

use crate::conn::Conn;
use crate::error::HermesResult;

/// The pipeline's terminal step.
///
/// Adapters may block on network I/O and may hold transport-level mutable
/// resources; the `Send + Sync` bound lets one adapter serve concurrent
/// requests through a shared pipeline.
///
/// # Example
///
/// ```
/// use hermes_core::{Adapter, Conn, HermesResult};
/// use http::StatusCode;
///
/// struct AlwaysOk;
///
/// impl Adapter for AlwaysOk {
///     fn call(&self, conn: Conn) -> HermesResult<Conn> {
///         Ok(conn.with_status(StatusCode::OK))
///     }
/// }
/// ```
pub trait Adapter: Send + Sync + 'static {
    /// Performs the transport call.
    ///
    /// # Errors
    ///
    /// Returns [`HermesError::Transport`] on transport failure (connection
    /// refused, timeout, transport-level decode failure), carrying the
    /// context as of the failure when available.
    ///
    /// [`HermesError::Transport`]: crate::HermesError::Transport
    fn call(&self, conn: Conn) -> HermesResult<Conn>;
}

/// An adapter built from a plain function.
///
/// Useful for tests and for small adapters that need no configuration.
///
/// # Example
///
/// ```
/// use hermes_core::{Adapter, Conn, FnAdapter};
/// use http::StatusCode;
///
/// let adapter = FnAdapter::new(|conn: Conn| Ok(conn.with_status(StatusCode::NO_CONTENT)));
/// let conn = adapter.call(Conn::new("/ping"))?;
/// assert_eq!(conn.status(), Some(StatusCode::NO_CONTENT));
/// # Ok::<(), hermes_core::HermesError>(())
/// ```
pub struct FnAdapter<F> {
    func: F,
}

impl<F> FnAdapter<F> {
    /// Creates a new function-based adapter.
    pub const fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> Adapter for FnAdapter<F>
where
    F: Fn(Conn) -> HermesResult<Conn> + Send + Sync + 'static,
{
    fn call(&self, conn: Conn) -> HermesResult<Conn> {
        (self.func)(conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    #[test]
    fn test_fn_adapter() {
        let adapter = FnAdapter::new(|conn: Conn| Ok(conn.with_status(StatusCode::OK)));
        let conn = adapter.call(Conn::new("/ping")).unwrap();
        assert_eq!(conn.status(), Some(StatusCode::OK));
    }

    #[test]
    fn test_fn_adapter_propagates_errors() {
        let adapter = FnAdapter::new(|_conn: Conn| {
            Err(crate::HermesError::transport("connection refused"))
        });
        let result = adapter.call(Conn::new("/ping"));
        assert!(result.is_err());
    }
}
