//! Authorization header middleware.
//!
//! Two stages that stamp an `authorization` header on every request:
//! [`BearerAuth`] for token schemes and [`BasicAuth`] for RFC 7617
//! user/password pairs. Credentials are validated and encoded once, at
//! assembly time; per-request work is a single header insert.

use crate::middleware::{Middleware, Next};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use hermes_core::{Conn, HermesError, HermesResult};
use http::header::{HeaderValue, AUTHORIZATION};

/// Middleware that sets `authorization: Bearer <token>`.
///
/// # Example
///
/// ```
/// use hermes_middleware::stages::BearerAuth;
///
/// let stage = BearerAuth::new("s3cr3t-token").unwrap();
/// assert!(BearerAuth::new("").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct BearerAuth {
    value: HeaderValue,
}

impl BearerAuth {
    /// Creates the stage with the given token.
    ///
    /// # Errors
    ///
    /// Fails with [`HermesError::Configuration`] if the token is empty or
    /// not a valid header value.
    pub fn new(token: impl AsRef<str>) -> HermesResult<Self> {
        let token = token.as_ref();
        if token.trim().is_empty() {
            return Err(HermesError::configuration("bearer token cannot be empty"));
        }
        let value = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| HermesError::configuration("bearer token is not a valid header value"))?;
        Ok(Self { value })
    }
}

impl Middleware for BearerAuth {
    fn name(&self) -> &'static str {
        "bearer_auth"
    }

    fn call(&self, conn: Conn, next: Next<'_>) -> HermesResult<Conn> {
        next.run(conn.put_req_header_value(AUTHORIZATION, self.value.clone()))
    }
}

/// Middleware that sets `authorization: Basic <base64(user:password)>`.
#[derive(Debug, Clone)]
pub struct BasicAuth {
    value: HeaderValue,
}

impl BasicAuth {
    /// Creates the stage with the given credentials.
    ///
    /// # Errors
    ///
    /// Fails with [`HermesError::Configuration`] if the username contains a
    /// colon, which RFC 7617 reserves as the credential separator.
    pub fn new(username: impl AsRef<str>, password: impl AsRef<str>) -> HermesResult<Self> {
        let username = username.as_ref();
        if username.contains(':') {
            return Err(HermesError::configuration(
                "basic auth username cannot contain ':'",
            ));
        }
        let encoded = STANDARD.encode(format!("{username}:{}", password.as_ref()));
        let value = HeaderValue::from_str(&format!("Basic {encoded}"))
            .map_err(|_| HermesError::configuration("basic auth credentials are not encodable"))?;
        Ok(Self { value })
    }
}

impl Middleware for BasicAuth {
    fn name(&self) -> &'static str {
        "basic_auth"
    }

    fn call(&self, conn: Conn, next: Next<'_>) -> HermesResult<Conn> {
        next.run(conn.put_req_header_value(AUTHORIZATION, self.value.clone()))
    }
}
