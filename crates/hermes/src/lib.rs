//! # Hermes
//!
//! **Declarative HTTP client modules with a composable middleware pipeline**
//!
//! A Hermes client is assembled once from three declarative pieces: an
//! ordered middleware list, one transport adapter, and the verbs it exposes.
//! The pieces compile into a single immutable chain that every request flows
//! through:
//!
//! ```text
//! Conn → m1 → m2 → ... → mn → Adapter
//!                                 ↓
//! Conn ← m1 ← m2 ← ... ← mn ←────┘
//! ```
//!
//! The first-registered middleware sees the raw request first and the
//! finished response last; any stage may short-circuit with an error that
//! skips everything after it.
//!
//! ## Quick Start
//!
//! ```
//! use hermes::core::fixtures::StubAdapter;
//! use hermes::prelude::*;
//! use hermes::stages::BaseUrl;
//! use http::StatusCode;
//!
//! let client = Client::builder()
//!     .middleware(BaseUrl::new("http://api.test")?)
//!     .adapter(StubAdapter::new(StatusCode::OK))
//!     .build()?;
//!
//! // Safe form: any structural success is Ok, even a 404.
//! let conn = client.get("/ping")?;
//! assert_eq!(conn.status(), Some(StatusCode::OK));
//!
//! // Strict form: non-2xx statuses become errors.
//! let conn = client.get_strict("/ping")?;
//! assert_eq!(conn.status(), Some(StatusCode::OK));
//! # Ok::<(), hermes::HermesError>(())
//! ```
//!
//! Wire-level transports are out of scope: an [`Adapter`] is anything that
//! consumes a [`Conn`] and returns a terminal `Conn` or an error.

#![doc(html_root_url = "https://docs.rs/hermes/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export member crates under stable module names
pub use hermes_client as client;
pub use hermes_core as core;
pub use hermes_middleware as middleware;

// Re-export the stock stage library at the crate root
pub use hermes_middleware::stages;

// Re-export the primary surface
pub use hermes_client::{Client, ClientBuilder, RequestTarget, StatusAccept};
pub use hermes_core::{
    Adapter, Conn, ErrorCategory, FnAdapter, HermesError, HermesResult, Method,
};
pub use hermes_middleware::{FnMiddleware, Middleware, Next, Pipeline, PipelineBuilder};

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```
/// use hermes::prelude::*;
/// ```
pub mod prelude {
    pub use hermes_client::{Client, ClientBuilder, RequestTarget, StatusAccept};
    pub use hermes_core::{
        Adapter, Conn, ErrorCategory, FnAdapter, HermesError, HermesResult, Method,
    };
    pub use hermes_middleware::{FnMiddleware, Middleware, Next, Pipeline, PipelineBuilder};
}
