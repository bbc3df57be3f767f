//! The polymorphic first argument of every verb entry point.

use hermes_core::Conn;

/// What a verb call dispatches on: a raw URL or a prepared context.
///
/// A URL is wrapped into a fresh `Conn`; a prepared context is used as-is,
/// with its verb field overwritten by the entry point that received it.
///
/// # Example
///
/// ```
/// use hermes_client::RequestTarget;
/// use hermes_core::Conn;
///
/// let from_url: RequestTarget = "/users/42".into();
/// let from_conn: RequestTarget = Conn::new("/users/42").into();
/// ```
#[derive(Debug, Clone)]
pub enum RequestTarget {
    /// A raw absolute or relative URL.
    Url(String),
    /// A partially-built context, e.g. with headers or a body prepared.
    Conn(Box<Conn>),
}

impl From<&str> for RequestTarget {
    fn from(url: &str) -> Self {
        Self::Url(url.to_string())
    }
}

impl From<String> for RequestTarget {
    fn from(url: String) -> Self {
        Self::Url(url)
    }
}

impl From<Conn> for RequestTarget {
    fn from(conn: Conn) -> Self {
        Self::Conn(Box::new(conn))
    }
}

impl RequestTarget {
    /// Converts the target into a context ready for dispatch.
    #[must_use]
    pub fn into_conn(self) -> Conn {
        match self {
            Self::Url(url) => Conn::new(url),
            Self::Conn(conn) => *conn,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_target_builds_fresh_conn() {
        let conn = RequestTarget::from("/ping").into_conn();
        assert_eq!(conn.url(), "/ping");
        assert!(conn.method().is_none());
    }

    #[test]
    fn test_conn_target_is_used_as_is() {
        let prepared = Conn::new("/ping").put_query_param("v", "1");
        let conn = RequestTarget::from(prepared).into_conn();
        assert_eq!(conn.query_params().len(), 1);
    }
}
