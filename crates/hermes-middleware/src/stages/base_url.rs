//! Base-URL middleware.
//!
//! Prefixes relative request URLs with a configured base so callers can
//! dispatch `get("/users")` against a client bound to one host. Absolute
//! URLs pass through untouched, which lets a single client occasionally
//! talk to a foreign host.

use crate::middleware::{Middleware, Next};
use hermes_core::{Conn, HermesError, HermesResult};

/// Middleware that prefixes relative URLs with a configured base.
///
/// # Example
///
/// ```
/// use hermes_middleware::stages::BaseUrl;
///
/// let stage = BaseUrl::new("http://api.test/").unwrap();
/// // "/ping" becomes "http://api.test/ping" before the adapter sees it.
/// ```
#[derive(Debug, Clone)]
pub struct BaseUrl {
    base: String,
}

impl BaseUrl {
    /// Creates the stage with the given base URL.
    ///
    /// A trailing slash on the base is dropped so joining never doubles it.
    ///
    /// # Errors
    ///
    /// Fails with [`HermesError::Configuration`] if the base is empty.
    pub fn new(base: impl Into<String>) -> HermesResult<Self> {
        let base = base.into();
        if base.trim().is_empty() {
            return Err(HermesError::configuration("base URL cannot be empty"));
        }
        Ok(Self {
            base: base.trim_end_matches('/').to_string(),
        })
    }

    fn is_absolute(url: &str) -> bool {
        url.starts_with("http://") || url.starts_with("https://")
    }
}

impl Middleware for BaseUrl {
    fn name(&self) -> &'static str {
        "base_url"
    }

    fn call(&self, conn: Conn, next: Next<'_>) -> HermesResult<Conn> {
        if Self::is_absolute(conn.url()) {
            return next.run(conn);
        }
        let joined = if conn.url().starts_with('/') {
            format!("{}{}", self.base, conn.url())
        } else {
            format!("{}/{}", self.base, conn.url())
        };
        next.run(conn.with_url(joined))
    }
}
