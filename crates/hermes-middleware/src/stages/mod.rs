//! Stock middleware stages.
//!
//! Each stage validates its configuration at construction, so a bad option
//! aborts client assembly instead of surfacing on the first request. Stages
//! that deal in opaque bodies (JSON, form encoding) are out of scope here
//! and belong to adapter-side or third-party middleware.

mod auth;
mod base_url;
mod headers;
mod logger;
mod query;

pub use auth::{BasicAuth, BearerAuth};
pub use base_url::BaseUrl;
pub use headers::DefaultHeaders;
pub use logger::Logger;
pub use query::DefaultQuery;
