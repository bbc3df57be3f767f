//! Default query parameters middleware.
//!
//! Appends configured query parameters to requests that don't already carry
//! a parameter with the same name. Parameter order is preserved: caller
//! params first, then defaults in configuration order.

use crate::middleware::{Middleware, Next};
use hermes_core::{Conn, HermesResult};

/// Middleware that appends default query parameters.
///
/// # Example
///
/// ```
/// use hermes_middleware::stages::DefaultQuery;
///
/// let stage = DefaultQuery::new(&[("api_version", "2")]);
/// ```
#[derive(Debug, Clone)]
pub struct DefaultQuery {
    params: Vec<(String, String)>,
}

impl DefaultQuery {
    /// Creates the stage from name/value pairs.
    #[must_use]
    pub fn new(pairs: &[(&str, &str)]) -> Self {
        Self {
            params: pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        }
    }
}

impl Middleware for DefaultQuery {
    fn name(&self) -> &'static str {
        "default_query"
    }

    fn call(&self, conn: Conn, next: Next<'_>) -> HermesResult<Conn> {
        let mut conn = conn;
        for (name, value) in &self.params {
            if conn.query_params().iter().any(|(k, _)| k == name) {
                continue;
            }
            conn = conn.put_query_param(name.clone(), value.clone());
        }
        next.run(conn)
    }
}
